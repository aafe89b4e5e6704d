//! Rover position service.
//!
//! Saves and retrieves the last reported rover position for a session. The
//! session identifier is always passed in explicitly by the caller (HTTP
//! layer or CLI); this service never looks it up from ambient state.

use rover_types::error::PositionError;
use rover_types::position::{PositionInput, RoverPosition, SessionId};

use crate::repository::position::PositionRepository;

/// Service over a [`PositionRepository`].
///
/// Generic over the repository trait to maintain clean architecture --
/// rover-core never depends on rover-infra.
pub struct PositionService<R: PositionRepository> {
    repo: R,
}

impl<R: PositionRepository> PositionService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Save (create or overwrite) the session's position.
    pub async fn save(
        &self,
        session_id: &SessionId,
        position: &PositionInput,
    ) -> Result<(), PositionError> {
        self.repo.upsert(session_id, position).await?;

        tracing::debug!(
            session = %session_id,
            x = %position.x,
            y = %position.y,
            direction = %position.direction,
            "rover position saved"
        );

        Ok(())
    }

    /// Get the session's position. `Ok(None)` means nothing was saved yet.
    pub async fn get(&self, session_id: &SessionId) -> Result<Option<RoverPosition>, PositionError> {
        let position = self.repo.find(session_id).await?;

        if position.is_none() {
            tracing::debug!(session = %session_id, "no rover position saved for session");
        }

        Ok(position)
    }

    /// Access the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }
}
