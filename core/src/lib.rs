//! # Todo List Core
//!
//! Domain types, validation and collaborator traits for the to-do list service.
//!
//! The crate is the functional core of the service: it knows how to turn a raw
//! request body into a stored [`ToDoItem`], but it performs I/O only through
//! the collaborator traits it is handed.
//!
//! ## Core Concepts
//!
//! - **Item**: [`ToDoItem`], the only entity, addressed by its [`ItemId`]
//! - **Validation**: untyped JSON is decoded first, then checked field by field
//!   with every violation collected into one [`ValidationError`]
//! - **Collaborators**: [`ItemStore`], [`Clock`] and [`IdGenerator`], injected
//!   into [`ItemService`] at construction
//! - **Errors**: [`ItemError`] tags the three expected failure kinds (parse,
//!   validation, not-found) apart from store failures, which callers propagate
//!
//! ## Example
//!
//! ```ignore
//! use todo_list_core::{ItemService, ItemId};
//! use todo_list_core::environment::{SystemClock, UuidIdGenerator};
//! use std::sync::Arc;
//!
//! let service = ItemService::new(store, Arc::new(SystemClock), Arc::new(UuidIdGenerator));
//!
//! let created = service.create(br#"{"label":"buy milk","completed":false}"#).await?;
//! let updated = service
//!     .update(&created.id, br#"{"label":"buy milk","completed":true}"#)
//!     .await?;
//! assert_eq!(updated.created_at, created.created_at);
//! ```

pub mod environment;
pub mod error;
pub mod item;
pub mod service;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use environment::{Clock, IdGenerator, SystemClock, UuidIdGenerator};
pub use error::{ItemError, ParseError};
pub use item::{ItemId, ToDoItem};
pub use service::ItemService;
pub use store::{ItemStore, StoreError, StoreFuture};
pub use validation::{FieldError, ItemPayload, ValidationError, decode_body, validate};
