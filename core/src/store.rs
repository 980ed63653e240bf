//! Item store trait and related types.
//!
//! The store is a plain key-value table keyed by [`ItemId`]. It offers exactly
//! four operations and no transactions:
//!
//! - `get`: fetch one record, or `None`
//! - `put`: upsert a full record (create or replace)
//! - `delete`: remove a record by key
//! - `scan`: read every record, in no particular order
//!
//! # Implementations
//!
//! - `PostgresItemStore` (in `todo-list-postgres`): production table
//! - `InMemoryItemStore` (in `todo-list-testing`): fast, deterministic testing
//!   and local development
//!
//! # Example
//!
//! ```no_run
//! use todo_list_core::store::{ItemStore, StoreError};
//! use todo_list_core::item::ItemId;
//!
//! async fn is_done<S: ItemStore>(store: &S, id: &ItemId) -> Result<bool, StoreError> {
//!     Ok(store.get(id).await?.is_some_and(|item| item.completed))
//! }
//!
//! async fn open_count<S: ItemStore>(store: &S) -> Result<usize, StoreError> {
//!     let items = store.scan().await?;
//!     Ok(items.iter().filter(|item| !item.completed).count())
//! }
//! ```

use crate::item::{ItemId, ToDoItem};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by [`ItemStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Errors that can occur during store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed a query.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Key-value store for to-do items.
///
/// Each operation is atomic per key; nothing spans keys.
///
/// # Dyn Compatibility
///
/// Methods return [`StoreFuture`] rather than using `async fn` so handlers can
/// hold an `Arc<dyn ItemStore>` chosen at startup.
pub trait ItemStore: Send + Sync {
    /// Fetches the record stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store fails; absence is `Ok(None)`.
    fn get<'a>(&'a self, id: &'a ItemId) -> StoreFuture<'a, Option<ToDoItem>>;

    /// Creates or fully replaces the record keyed by `item.id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    fn put<'a>(&'a self, item: &'a ToDoItem) -> StoreFuture<'a, ()>;

    /// Removes the record stored under `id`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the delete fails.
    fn delete<'a>(&'a self, id: &'a ItemId) -> StoreFuture<'a, ()>;

    /// Reads every record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the scan fails.
    fn scan(&self) -> StoreFuture<'_, Vec<ToDoItem>>;
}
