//! SQLite rover position repository implementation.
//!
//! Implements `PositionRepository` from `rover-core` using sqlx with split
//! read/write pools. The upsert is a single `INSERT ... ON CONFLICT`
//! statement, so the `session_id` unique index settles concurrent saves.

use chrono::{DateTime, Utc};
use rover_core::repository::position::PositionRepository;
use rover_types::error::RepositoryError;
use rover_types::position::{Coordinate, Direction, PositionInput, RoverPosition, SessionId};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `PositionRepository`.
pub struct SqlitePositionRepository {
    pool: DatabasePool,
}

impl SqlitePositionRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct PositionRow {
    session_id: String,
    x: i64,
    y: i64,
    direction: String,
    created_at: String,
    updated_at: String,
}

impl PositionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            session_id: row.try_get("session_id")?,
            x: row.try_get("x")?,
            y: row.try_get("y")?,
            direction: row.try_get("direction")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_position(self) -> Result<RoverPosition, RepositoryError> {
        let session_id = SessionId::new(self.session_id)
            .map_err(|e| RepositoryError::Query(format!("invalid session_id: {e}")))?;
        let direction: Direction = self
            .direction
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid direction: {e}")))?;

        Ok(RoverPosition {
            session_id,
            x: Coordinate::from_stored(self.x),
            y: Coordinate::from_stored(self.y),
            direction,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn map_sqlx(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection(e.to_string())
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// PositionRepository implementation
// ---------------------------------------------------------------------------

impl PositionRepository for SqlitePositionRepository {
    async fn upsert(
        &self,
        session_id: &SessionId,
        position: &PositionInput,
    ) -> Result<(), RepositoryError> {
        let now = format_datetime(&Utc::now());

        sqlx::query(
            r#"INSERT INTO rover_positions (session_id, x, y, direction, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)
               ON CONFLICT (session_id) DO UPDATE SET
                   x = excluded.x,
                   y = excluded.y,
                   direction = excluded.direction,
                   updated_at = excluded.updated_at"#,
        )
        .bind(session_id.as_str())
        .bind(position.x.get())
        .bind(position.y.get())
        .bind(position.direction.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn find(&self, session_id: &SessionId) -> Result<Option<RoverPosition>, RepositoryError> {
        let row = sqlx::query(
            "SELECT session_id, x, y, direction, created_at, updated_at FROM rover_positions WHERE session_id = ?",
        )
        .bind(session_id.as_str())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => {
                let position_row = PositionRow::from_row(&row).map_err(map_sqlx)?;
                Ok(Some(position_row.into_position()?))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::sqlite::pool::database_url_for;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let url = database_url_for(dir.path());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    async fn row_count(pool: &DatabasePool, session_id: &str) -> i64 {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM rover_positions WHERE session_id = ?")
                .bind(session_id)
                .fetch_one(&pool.reader)
                .await
                .unwrap();
        count
    }

    fn sid(id: &str) -> SessionId {
        SessionId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_find_roundtrip() {
        let pool = test_pool().await;
        let repo = SqlitePositionRepository::new(pool.clone());
        let input = PositionInput::new(10, 20, Direction::N).unwrap();

        repo.upsert(&sid("session-a"), &input).await.unwrap();

        let got = repo.find(&sid("session-a")).await.unwrap().unwrap();
        assert_eq!(got.input(), input);
        assert_eq!(got.session_id.as_str(), "session-a");
        assert_eq!(got.created_at, got.updated_at);
    }

    #[tokio::test]
    async fn test_find_nonexistent_returns_none() {
        let pool = test_pool().await;
        let repo = SqlitePositionRepository::new(pool);

        assert!(repo.find(&sid("missing")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_overwrites_single_row() {
        let pool = test_pool().await;
        let repo = SqlitePositionRepository::new(pool.clone());

        repo.upsert(&sid("s"), &PositionInput::new(1, 2, Direction::E).unwrap())
            .await
            .unwrap();
        let first = repo.find(&sid("s")).await.unwrap().unwrap();

        let second = PositionInput::new(199, 200, Direction::W).unwrap();
        repo.upsert(&sid("s"), &second).await.unwrap();

        let got = repo.find(&sid("s")).await.unwrap().unwrap();
        assert_eq!(got.input(), second);
        assert_eq!(got.created_at, first.created_at);
        assert!(got.updated_at >= first.updated_at);
        assert_eq!(row_count(&pool, "s").await, 1);
    }

    #[tokio::test]
    async fn test_session_isolation() {
        let pool = test_pool().await;
        let repo = SqlitePositionRepository::new(pool);

        let a = PositionInput::new(3, 4, Direction::S).unwrap();
        let b = PositionInput::new(30, 40, Direction::N).unwrap();
        repo.upsert(&sid("a"), &a).await.unwrap();
        repo.upsert(&sid("b"), &b).await.unwrap();

        assert_eq!(repo.find(&sid("a")).await.unwrap().unwrap().input(), a);
        assert_eq!(repo.find(&sid("b")).await.unwrap().unwrap().input(), b);
    }

    #[tokio::test]
    async fn test_concurrent_upserts_leave_one_row() {
        let pool = test_pool().await;
        let repo = Arc::new(SqlitePositionRepository::new(pool.clone()));

        let attempts: Vec<PositionInput> = (1..=16)
            .map(|i| PositionInput::new(i, i * 10, Direction::ALL[(i % 4) as usize]).unwrap())
            .collect();

        let mut handles = Vec::new();
        for input in attempts.clone() {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.upsert(&sid("shared"), &input).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(row_count(&pool, "shared").await, 1);
        let stored = repo.find(&sid("shared")).await.unwrap().unwrap().input();
        assert!(attempts.contains(&stored));
    }

    #[tokio::test]
    async fn test_schema_rejects_unknown_direction() {
        let pool = test_pool().await;
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO rover_positions (session_id, x, y, direction, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind("bad")
        .bind(1_i64)
        .bind(1_i64)
        .bind("Q")
        .bind(&now)
        .bind(&now)
        .execute(&pool.writer)
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_closed_pool_surfaces_error() {
        let pool = test_pool().await;
        let repo = SqlitePositionRepository::new(pool.clone());
        pool.writer.close().await;

        let err = repo
            .upsert(&sid("s"), &PositionInput::new(1, 1, Direction::N).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Connection(_)));
    }
}
