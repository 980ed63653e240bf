//! The to-do item entity and its identifier.
//!
//! Items are serialized with camel-case keys (`createdAt`, `updatedAt`); the
//! same layout is used on the wire and in the store.

use crate::validation::ItemPayload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a to-do item (the store's partition key).
///
/// Identifiers are generated server-side by an
/// [`IdGenerator`](crate::environment::IdGenerator); callers only ever echo
/// them back in a path parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wraps an identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single to-do entry.
///
/// # Invariants
///
/// - `id` and `created_at` never change after creation
/// - `created_at <= updated_at`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToDoItem {
    /// Server-assigned identifier
    pub id: ItemId,
    /// What needs doing; never empty
    pub label: String,
    /// Whether the item is done
    pub completed: bool,
    /// When the item was created
    pub created_at: DateTime<Utc>,
    /// When the item was last replaced
    pub updated_at: DateTime<Utc>,
}

impl ToDoItem {
    /// Creates a new item from a validated payload, stamping both timestamps
    /// with `now`.
    #[must_use]
    pub fn create(id: ItemId, payload: ItemPayload, now: DateTime<Utc>) -> Self {
        Self {
            id,
            label: payload.label,
            completed: payload.completed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds the full replacement for this item.
    ///
    /// The identifier and creation time carry over; `updated_at` is refreshed
    /// to `now`, but never moves behind the previous `updated_at`.
    #[must_use]
    pub fn replace_with(&self, payload: ItemPayload, now: DateTime<Utc>) -> Self {
        Self {
            id: self.id.clone(),
            label: payload.label,
            completed: payload.completed,
            created_at: self.created_at,
            updated_at: now.max(self.updated_at),
        }
    }
}
