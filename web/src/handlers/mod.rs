//! HTTP request handlers.

pub mod health;
pub mod items;

pub use health::health_check;
pub use items::{create_item, delete_item, list_items, update_item};
