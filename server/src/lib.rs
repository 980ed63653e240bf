//! Server bootstrap for the to-do list service.
//!
//! Turns a [`Config`] into a running application: picks the item store,
//! prepares it, and wires the [`ItemService`] behind the HTTP router.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]

pub mod config;

pub use config::{Config, ConfigError, ServerConfig, StoreBackend, StoreConfig};

use std::sync::Arc;
use thiserror::Error;
use todo_list_core::environment::{SystemClock, UuidIdGenerator};
use todo_list_core::service::ItemService;
use todo_list_core::store::{ItemStore, StoreError};
use todo_list_postgres::PostgresItemStore;
use todo_list_testing::InMemoryItemStore;
use todo_list_web::{AppState, build_router};

/// Errors raised while starting the server.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Configuration could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The item store could not be prepared.
    #[error("item store: {0}")]
    Store(#[from] StoreError),

    /// Binding or serving the listener failed.
    #[error("server I/O: {0}")]
    Io(#[from] std::io::Error),

    /// The metrics recorder could not be installed.
    #[error("metrics recorder: {0}")]
    Metrics(String),
}

/// The item store the server runs against.
#[derive(Debug, Clone)]
pub enum StoreHandle {
    /// In-process store
    Memory(InMemoryItemStore),
    /// `PostgreSQL` store
    Postgres(PostgresItemStore),
}

impl StoreHandle {
    /// Build the store named by `config`, running migrations if asked to.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database is unreachable or a migration
    /// fails.
    pub async fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        match config.backend {
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory item store; items are lost on restart");
                Ok(Self::Memory(InMemoryItemStore::new()))
            }
            StoreBackend::Postgres => {
                tracing::info!(
                    host = %config.database_url.split('@').next_back().unwrap_or("unknown"),
                    "Connecting to PostgreSQL"
                );
                let store = PostgresItemStore::connect(
                    &config.database_url,
                    config.max_connections,
                    config.connect_timeout,
                )
                .await?;

                if config.run_migrations {
                    store.migrate().await?;
                    tracing::info!("✓ Migrations applied");
                }

                Ok(Self::Postgres(store))
            }
        }
    }

    /// Share the store as a trait object.
    #[must_use]
    pub fn as_dyn(&self) -> Arc<dyn ItemStore> {
        match self {
            Self::Memory(store) => Arc::new(store.clone()),
            Self::Postgres(store) => Arc::new(store.clone()),
        }
    }

    /// Release the store's resources.
    pub async fn close(&self) {
        if let Self::Postgres(store) = self {
            store.close().await;
            tracing::info!("Database pool closed");
        }
    }
}

/// Wire a production [`ItemService`] over `store`.
#[must_use]
pub fn item_service(store: &StoreHandle) -> ItemService {
    ItemService::new(
        store.as_dyn(),
        Arc::new(SystemClock),
        Arc::new(UuidIdGenerator),
    )
}

/// Build the application router over `store`.
#[must_use]
pub fn app(store: &StoreHandle) -> axum::Router {
    build_router(AppState::new(item_service(store)))
}
