//! Error types for web handlers.
//!
//! Two layers live here:
//!
//! - [`map_item_error`] is the error mapper: it turns the three expected
//!   [`ItemError`] kinds into a client response and hands everything else
//!   back as an [`AppError`].
//! - [`AppError`] is the hosting layer's failure: it becomes a generic 500
//!   and logs its source, never exposing it to the client.

use crate::response::PrettyJson;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use todo_list_core::error::ItemError;

/// Body sent when an item id has no record.
pub const ITEM_NOT_FOUND: &str = "item not found";

/// Application error type for web handlers.
///
/// Only unexpected failures become an `AppError`; the expected kinds are
/// answered by [`map_item_error`].
///
/// # Examples
///
/// ```ignore
/// async fn handler() -> Result<Response, AppError> {
///     let items = store.scan().await
///         .map_err(|e| AppError::internal("Scan failed").with_source(e.into()))?;
///     Ok(PrettyJson(StatusCode::OK, items).into_response())
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for client error handling)
    code: String,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: String) -> Self {
        Self {
            status,
            message,
            code,
            source: None,
        }
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR".to_string(),
        )
    }

    /// The status this error will be answered with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error code (for client error handling).
    code: String,
    /// Human-readable error message.
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    "Internal server error"
                );
            }
        }

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal("An internal error occurred").with_source(err)
    }
}

/// Client-facing error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    /// `{"error": "..."}`
    Message {
        /// What went wrong
        error: String,
    },
    /// `{"errors": ["...", ...]}`
    Fields {
        /// One message per violated field
        errors: Vec<String>,
    },
}

impl ErrorBody {
    /// A single-message body.
    #[must_use]
    pub fn message(error: impl Into<String>) -> Self {
        Self::Message {
            error: error.into(),
        }
    }
}

/// A mapped client error: status plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReply {
    /// 4xx status
    pub status: StatusCode,
    /// JSON body
    pub body: ErrorBody,
}

impl IntoResponse for ErrorReply {
    fn into_response(self) -> Response {
        PrettyJson(self.status, self.body).into_response()
    }
}

/// Map an item failure to a client response.
///
/// | Failure | Status | Body |
/// |---|---|---|
/// | parse | 400 | `{"error": "invalid request body format: <detail>"}` |
/// | validation | 400 | `{"errors": [...]}` |
/// | not found | 404 | `{"error": "item not found"}` |
///
/// # Errors
///
/// Store failures are not mapped: they come back as an [`AppError`] for the
/// hosting layer to answer with a 500.
pub fn map_item_error(err: ItemError) -> Result<ErrorReply, AppError> {
    match err {
        ItemError::Parse(e) => Ok(ErrorReply {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody::message(e.to_string()),
        }),
        ItemError::Validation(e) => Ok(ErrorReply {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody::Fields {
                errors: e.messages(),
            },
        }),
        ItemError::NotFound(_) => Ok(ErrorReply {
            status: StatusCode::NOT_FOUND,
            body: ErrorBody::message(ITEM_NOT_FOUND),
        }),
        ItemError::Store(e) => Err(AppError::from(anyhow::Error::new(e))),
    }
}
