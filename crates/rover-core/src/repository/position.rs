//! Position repository trait definition.

use rover_types::error::RepositoryError;
use rover_types::position::{PositionInput, RoverPosition, SessionId};

/// Repository trait for per-session rover positions.
///
/// Holds at most one row per session. Uses RPITIT (native async fn in
/// traits, Rust 2024 edition).
pub trait PositionRepository: Send + Sync {
    /// Insert the session's position, or overwrite it if one already exists.
    ///
    /// Must be atomic with respect to the per-session uniqueness: concurrent
    /// calls for the same session leave exactly one row (last writer wins).
    fn upsert(
        &self,
        session_id: &SessionId,
        position: &PositionInput,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Find the session's position. Returns None if nothing was ever saved.
    fn find(
        &self,
        session_id: &SessionId,
    ) -> impl std::future::Future<Output = Result<Option<RoverPosition>, RepositoryError>> + Send;
}
