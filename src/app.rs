//! App Core for LinkStash.
//!
//! Wires the configuration, database, preview fetcher and list controller
//! together and exposes the shared list handle.

use std::fs;
use std::sync::Arc;

use tracing::info;

use crate::database::{Database, SqliteStore};
use crate::managers::list_controller::ListController;
use crate::managers::list_handle::ListHandle;
use crate::services::config_engine::resolve_database_path;
use crate::services::preview_fetcher::PreviewFetcher;
use crate::services::storage_adapter::StorageAdapter;
use crate::types::config::{AppConfig, PreviewPolicy};
use crate::types::errors::AppError;

/// The list handle type used by the application.
pub type AppList = ListHandle<SqliteStore, PreviewFetcher>;

/// Central application struct.
pub struct App {
    pub config: AppConfig,
    pub list: AppList,
}

impl App {
    /// Opens the database named by `config` (creating its directory) and
    /// loads the saved list.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let path = resolve_database_path(&config);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| AppError::Database(e.to_string()))?;
        }
        let db = Database::open(&path).map_err(|e| AppError::Database(e.to_string()))?;
        info!(path = %path.display(), "database opened");
        Self::with_database(config, db)
    }

    /// Same as [`App::new`] but backed by a throwaway in-memory database.
    pub fn in_memory(config: AppConfig) -> Result<Self, AppError> {
        let db = Database::open_in_memory().map_err(|e| AppError::Database(e.to_string()))?;
        Self::with_database(config, db)
    }

    fn with_database(config: AppConfig, db: Database) -> Result<Self, AppError> {
        let fetcher = PreviewFetcher::new(&config.preview)
            .map_err(|e| AppError::HttpClient(e.to_string()))?;
        let policy = if config.preview.enabled {
            config.preview.policy
        } else {
            PreviewPolicy::Never
        };

        let adapter = StorageAdapter::new(SqliteStore::new(db), config.storage.on_corrupt);
        let mut controller = ListController::new(adapter, Arc::new(fetcher), policy);
        controller.load_initial().map_err(AppError::Load)?;

        Ok(Self {
            config,
            list: ListHandle::new(controller),
        })
    }
}
