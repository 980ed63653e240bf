//! `PostgreSQL` item store for the to-do list service.
//!
//! The managed key-value table is a single `PostgreSQL` table holding one JSONB
//! record per item, keyed by the item id:
//!
//! ```sql
//! CREATE TABLE todo_items (
//!     id TEXT PRIMARY KEY,
//!     item JSONB NOT NULL
//! );
//! ```
//!
//! # Example
//!
//! ```ignore
//! use todo_list_postgres::PostgresItemStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PostgresItemStore::connect("postgres://localhost/todo_list", 10, 30).await?;
//!     store.migrate().await?;
//!     // ...
//!     store.close().await;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use std::time::Duration;
use todo_list_core::item::{ItemId, ToDoItem};
use todo_list_core::store::{ItemStore, StoreError, StoreFuture};

/// PostgreSQL-backed item store.
///
/// Every operation is a single statement, so each is atomic per key. `put`
/// is an upsert that replaces the whole record.
#[derive(Clone, Debug)]
pub struct PostgresItemStore {
    pool: PgPool,
}

impl PostgresItemStore {
    /// Create a store over an existing connection pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` with a fresh pool.
    ///
    /// # Arguments
    ///
    /// - `database_url`: `PostgreSQL` connection string
    /// - `max_connections`: upper bound on pooled connections
    /// - `acquire_timeout_secs`: how long a caller waits for a connection
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the connection fails.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to connect: {e}")))?;

        Ok(Self::from_pool(pool))
    }

    /// Run the embedded migrations (creates `todo_items`).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Migration failed: {e}")))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn query_error(operation: &'static str, err: &sqlx::Error) -> StoreError {
    tracing::warn!(operation, error = %err, "Item store query failed");
    metrics::counter!("todo_items.store.errors", "operation" => operation).increment(1);

    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(err.to_string())
        },
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            StoreError::Serialization(err.to_string())
        },
        _ => StoreError::Database(err.to_string()),
    }
}

impl ItemStore for PostgresItemStore {
    fn get<'a>(&'a self, id: &'a ItemId) -> StoreFuture<'a, Option<ToDoItem>> {
        Box::pin(async move {
            let row: Option<(Json<ToDoItem>,)> =
                sqlx::query_as("SELECT item FROM todo_items WHERE id = $1")
                    .bind(id.as_str())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| query_error("get", &e))?;

            Ok(row.map(|(Json(item),)| item))
        })
    }

    fn put<'a>(&'a self, item: &'a ToDoItem) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            sqlx::query(
                r"
                INSERT INTO todo_items (id, item)
                VALUES ($1, $2)
                ON CONFLICT (id) DO UPDATE
                SET item = EXCLUDED.item
                ",
            )
            .bind(item.id.as_str())
            .bind(Json(item))
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("put", &e))?;

            Ok(())
        })
    }

    fn delete<'a>(&'a self, id: &'a ItemId) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            sqlx::query("DELETE FROM todo_items WHERE id = $1")
                .bind(id.as_str())
                .execute(&self.pool)
                .await
                .map_err(|e| query_error("delete", &e))?;

            Ok(())
        })
    }

    fn scan(&self) -> StoreFuture<'_, Vec<ToDoItem>> {
        Box::pin(async move {
            let rows: Vec<(Json<ToDoItem>,)> = sqlx::query_as("SELECT item FROM todo_items")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| query_error("scan", &e))?;

            Ok(rows.into_iter().map(|(Json(item),)| item).collect())
        })
    }
}
