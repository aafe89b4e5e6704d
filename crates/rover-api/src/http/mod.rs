//! HTTP API layer for the rover position store.
//!
//! Axum-based JSON API under `/api/rover/` with cookie-backed session
//! identity and validation errors reported per field.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
