//! Axum router configuration with middleware.
//!
//! API routes live under `/api/rover/` behind the session layer.
//! Middleware: session cookie (API only), tracing.
//!
//! The landing page is served from `public/` (configurable via
//! `ROVER_WEB_DIR`). If the directory does not exist, only the API is served.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::extractors::session::session_layer;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/rover/save-position",
            post(handlers::position::save_position),
        )
        .route("/rover/get-position", get(handlers::position::get_position))
        .layer(middleware::from_fn_with_state(state.clone(), session_layer));

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let web_dir = std::env::var("ROVER_WEB_DIR").unwrap_or_else(|_| "public".to_string());
    if std::path::Path::new(&web_dir).exists() {
        router = router.fallback_service(ServeDir::new(&web_dir));
        tracing::info!(path = %web_dir, "landing page static file serving enabled");
    }

    router
}

/// GET /health - Simple health check endpoint (no session required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
