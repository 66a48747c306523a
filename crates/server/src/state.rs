//! # Application State
//!
//! The shared state handed to every request handler: the resolved
//! configuration and the storage backend.

use crate::config::AppConfig;
use shopper::{SqliteProvider, Storage};
use std::{fs, path::Path, sync::Arc};
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// Where stores, items and recipes are persisted.
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(config: AppConfig, storage: Arc<dyn Storage>) -> Self {
        Self {
            config: Arc::new(config),
            storage,
        }
    }
}

/// Builds the shared application state from the configuration.
///
/// Opens the SQLite database at `db_url`, creating its parent directory if
/// needed, and makes sure the schema exists.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    if config.db_url != ":memory:" {
        if let Some(parent) = Path::new(&config.db_url).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
    }

    let sqlite_provider = SqliteProvider::new(&config.db_url).await?;
    info!(db_path = %config.db_url, "Initialized local storage provider (SQLite).");
    // Ensure the database schema is up-to-date on startup.
    sqlite_provider.initialize_schema().await?;

    Ok(AppState::new(config, Arc::new(sqlite_provider)))
}
