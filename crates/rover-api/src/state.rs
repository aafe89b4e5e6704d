//! Application state wiring the service to its storage.
//!
//! AppState holds the concrete service instance used by both the CLI and the
//! HTTP API. The service is generic over the repository trait, but AppState
//! pins it to the SQLite implementation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use rover_core::service::position::PositionService;
use rover_infra::config::{load_config, resolve_database_url};
use rover_infra::sqlite::pool::DatabasePool;
use rover_infra::sqlite::position::SqlitePositionRepository;
use rover_types::config::RoverConfig;

/// The position service pinned to the SQLite repository.
pub type ConcretePositionService = PositionService<SqlitePositionRepository>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub position_service: Arc<ConcretePositionService>,
    pub config: Arc<RoverConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state under `data_dir`: load config,
    /// connect to the DB, wire the service.
    pub async fn init(data_dir: PathBuf) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let config = load_config(&data_dir).await;
        let db_url = resolve_database_url(&config, &data_dir);
        let db_pool = DatabasePool::new(&db_url)
            .await
            .with_context(|| format!("failed to open database at {db_url}"))?;

        Ok(Self::from_parts(db_pool, config, data_dir))
    }

    /// Wire the state from an already-open pool and loaded config.
    pub fn from_parts(db_pool: DatabasePool, config: RoverConfig, data_dir: PathBuf) -> Self {
        let repo = SqlitePositionRepository::new(db_pool);

        Self {
            position_service: Arc::new(PositionService::new(repo)),
            config: Arc::new(config),
            data_dir,
        }
    }
}
