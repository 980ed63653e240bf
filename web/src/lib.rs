//! Axum HTTP layer for the to-do list service.
//!
//! This crate is the imperative shell around the item service in
//! `todo-list-core`.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← HTTP, JSON, request ids
//! │  - Raw body extraction                  │  ← Tracing, metrics
//! │  - Error mapping + response rendering   │
//! ├─────────────────────────────────────────┤
//! │         Item service (core)             │
//! │  - Decode + validate payloads           │
//! │  - Item lifecycle rules                 │
//! │  - Item store behind a trait            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use todo_list_web::{AppState, build_router};
//!
//! let app = build_router(AppState::new(service));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use error::{AppError, ErrorBody, ErrorReply, map_item_error};
pub use response::PrettyJson;
pub use routes::build_router;
pub use state::AppState;
