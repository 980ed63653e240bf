//! In-memory item store implementations.
//!
//! - [`InMemoryItemStore`]: `HashMap`-backed store for tests and local runs
//! - [`FailingItemStore`]: every call fails, for exercising the 5xx path

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use todo_list_core::item::{ItemId, ToDoItem};
use todo_list_core::store::{ItemStore, StoreError, StoreFuture};
use tokio::sync::RwLock;

/// In-memory item store.
///
/// Counts every write (`put` and `delete`) so tests can assert that a
/// rejected request never reached the store.
///
/// # Example
///
/// ```
/// use todo_list_testing::InMemoryItemStore;
/// use todo_list_core::store::ItemStore;
/// use todo_list_core::item::ItemId;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryItemStore::new();
/// assert!(store.get(&ItemId::new("missing")).await?.is_none());
/// assert_eq!(store.write_count(), 0);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryItemStore {
    items: Arc<RwLock<HashMap<ItemId, ToDoItem>>>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryItemStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `items`, without counting writes.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = ToDoItem>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();
        Self {
            items: Arc::new(RwLock::new(items)),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `put` and `delete` calls served so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether the store holds no items.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Whether an item is stored under `id`.
    pub async fn contains(&self, id: &ItemId) -> bool {
        self.items.read().await.contains_key(id)
    }
}

impl ItemStore for InMemoryItemStore {
    fn get<'a>(&'a self, id: &'a ItemId) -> StoreFuture<'a, Option<ToDoItem>> {
        Box::pin(async move { Ok(self.items.read().await.get(id).cloned()) })
    }

    fn put<'a>(&'a self, item: &'a ToDoItem) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.items.write().await.insert(item.id.clone(), item.clone());
            Ok(())
        })
    }

    fn delete<'a>(&'a self, id: &'a ItemId) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.items.write().await.remove(id);
            Ok(())
        })
    }

    fn scan(&self) -> StoreFuture<'_, Vec<ToDoItem>> {
        Box::pin(async move { Ok(self.items.read().await.values().cloned().collect()) })
    }
}

/// A store whose every operation fails with [`StoreError::Unavailable`].
#[derive(Clone, Debug)]
pub struct FailingItemStore {
    reason: String,
}

impl FailingItemStore {
    /// Create a store that fails with `reason`.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn fail<T>(&self) -> Result<T, StoreError> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }
}

impl Default for FailingItemStore {
    fn default() -> Self {
        Self::new("connection refused")
    }
}

impl ItemStore for FailingItemStore {
    fn get<'a>(&'a self, _id: &'a ItemId) -> StoreFuture<'a, Option<ToDoItem>> {
        Box::pin(async move { self.fail() })
    }

    fn put<'a>(&'a self, _item: &'a ToDoItem) -> StoreFuture<'a, ()> {
        Box::pin(async move { self.fail() })
    }

    fn delete<'a>(&'a self, _id: &'a ItemId) -> StoreFuture<'a, ()> {
        Box::pin(async move { self.fail() })
    }

    fn scan(&self) -> StoreFuture<'_, Vec<ToDoItem>> {
        Box::pin(async move { self.fail() })
    }
}
