//! Cookie-backed session identity.
//!
//! [`session_layer`] runs in front of the API routes. It reads the session
//! cookie (name from config, `rover_session` by default); when the request has
//! none, it mints a new identifier and sets the cookie on the response. The
//! identifier is handed to handlers through the [`Session`] extractor, which
//! they pass explicitly to the service.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use rover_types::position::SessionId;

use crate::http::error::AppError;
use crate::state::AppState;

/// The session identifier of the current request.
#[derive(Debug, Clone)]
pub struct Session(pub SessionId);

impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))
    }
}

/// The session carried by the named cookie, if present and non-blank.
fn session_from_jar(jar: &CookieJar, name: &str) -> Option<SessionId> {
    jar.get(name)
        .and_then(|cookie| SessionId::new(cookie.value_trimmed()).ok())
}

/// Cookie for a freshly minted session.
fn session_cookie(name: &str, session_id: &SessionId) -> Cookie<'static> {
    Cookie::build((name.to_string(), session_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Middleware resolving (or minting) the session for every API request.
pub async fn session_layer(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let cookie_name = state.config.session_cookie.as_str();

    if let Some(session_id) = session_from_jar(&jar, cookie_name) {
        req.extensions_mut().insert(Session(session_id));
        return next.run(req).await;
    }

    let session_id = SessionId::generate();
    tracing::debug!(session = %session_id, "started new session");

    req.extensions_mut().insert(Session(session_id.clone()));
    let response = next.run(req).await;

    (jar.add(session_cookie(cookie_name, &session_id)), response).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::header::COOKIE;
    use axum::http::{HeaderMap, HeaderValue};

    use super::*;

    fn jar(cookies: &[&str]) -> CookieJar {
        let mut map = HeaderMap::new();
        for cookie in cookies {
            map.append(COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        CookieJar::from_headers(&map)
    }

    fn session(jar: &CookieJar) -> Option<String> {
        session_from_jar(jar, "rover_session").map(|id| id.to_string())
    }

    #[test]
    fn test_session_single_cookie() {
        assert_eq!(session(&jar(&["rover_session=abc123"])).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_session_among_other_cookies() {
        let jar = jar(&["theme=dark; rover_session=xyz; lang=es"]);
        assert_eq!(session(&jar).as_deref(), Some("xyz"));
    }

    #[test]
    fn test_session_across_headers_and_quoted() {
        let jar = jar(&["theme=dark", "rover_session=\"quoted\""]);
        assert_eq!(session(&jar).as_deref(), Some("quoted"));
    }

    #[test]
    fn test_session_missing_or_blank() {
        assert!(session(&jar(&["rover_sessionx=1; other=2"])).is_none());
        assert!(session(&jar(&["rover_session="])).is_none());
        assert!(session(&CookieJar::new()).is_none());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let sid = SessionId::new("s-1").unwrap();
        let cookie = session_cookie("rover_session", &sid);
        assert_eq!(cookie.name(), "rover_session");
        assert_eq!(cookie.value(), "s-1");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));

        let header = cookie.to_string();
        assert!(header.starts_with("rover_session=s-1"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Lax"));
        assert!(header.contains("Path=/"));
    }
}
