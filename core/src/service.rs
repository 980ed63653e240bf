//! Item operations: decode, validate, talk to the store.
//!
//! Every operation is a single linear pass with at most two store calls.
//! Update and delete check for existence first and mutate second; a
//! concurrent delete between the two steps is not guarded against.

use crate::environment::{Clock, IdGenerator};
use crate::error::ItemError;
use crate::item::{ItemId, ToDoItem};
use crate::store::ItemStore;
use crate::validation::{ItemPayload, decode_body, validate};
use std::sync::Arc;

/// Orchestrates item operations over injected collaborators.
///
/// Cheap to clone; all collaborators are shared behind `Arc`.
#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl ItemService {
    /// Creates a service over the given store, clock and identifier source.
    #[must_use]
    pub fn new(
        store: Arc<dyn ItemStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self { store, clock, ids }
    }

    /// Creates an item from a raw request body.
    ///
    /// # Errors
    ///
    /// - [`ItemError::Parse`] if the body is not JSON
    /// - [`ItemError::Validation`] if `label` or `completed` is invalid
    /// - [`ItemError::Store`] if the write fails
    pub async fn create(&self, raw: &[u8]) -> Result<ToDoItem, ItemError> {
        let payload = Self::payload(raw)?;

        let id = ItemId::new(self.ids.new_id());
        let item = ToDoItem::create(id, payload, self.clock.now());
        self.store.put(&item).await?;

        tracing::info!(item_id = %item.id, "Item created");
        Ok(item)
    }

    /// Replaces the item stored under `id` with the payload in `raw`.
    ///
    /// The body is validated before the store is consulted, so an invalid body
    /// for an unknown id reports the validation problem.
    ///
    /// # Errors
    ///
    /// - [`ItemError::Parse`] / [`ItemError::Validation`] for a bad body
    /// - [`ItemError::NotFound`] if no record exists for `id`
    /// - [`ItemError::Store`] if either store call fails
    pub async fn update(&self, id: &ItemId, raw: &[u8]) -> Result<ToDoItem, ItemError> {
        let payload = Self::payload(raw)?;

        let existing = self.get(id).await?;
        let item = existing.replace_with(payload, self.clock.now());
        self.store.put(&item).await?;

        tracing::info!(item_id = %item.id, completed = item.completed, "Item updated");
        Ok(item)
    }

    /// Returns every stored item, in the store's scan order.
    ///
    /// An empty store yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::Store`] if the scan fails.
    pub async fn list(&self) -> Result<Vec<ToDoItem>, ItemError> {
        let items = self.store.scan().await?;
        tracing::debug!(count = items.len(), "Items scanned");
        Ok(items)
    }

    /// Deletes the item stored under `id`.
    ///
    /// # Errors
    ///
    /// - [`ItemError::NotFound`] if no record exists for `id`
    /// - [`ItemError::Store`] if either store call fails
    pub async fn delete(&self, id: &ItemId) -> Result<(), ItemError> {
        self.get(id).await?;
        self.store.delete(id).await?;

        tracing::info!(item_id = %id, "Item deleted");
        Ok(())
    }

    /// Fetches the item stored under `id`.
    ///
    /// # Errors
    ///
    /// - [`ItemError::NotFound`] if no record exists for `id`
    /// - [`ItemError::Store`] if the fetch fails
    pub async fn get(&self, id: &ItemId) -> Result<ToDoItem, ItemError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ItemError::NotFound(id.clone()))
    }

    fn payload(raw: &[u8]) -> Result<ItemPayload, ItemError> {
        let value = decode_body(raw)?;
        validate(&value).map_err(ItemError::from)
    }
}

impl std::fmt::Debug for ItemService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemService").finish_non_exhaustive()
    }
}
