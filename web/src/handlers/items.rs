//! Item endpoints.
//!
//! Every handler reads the body as raw bytes, whatever the content type, and
//! lets the service decode it. Expected failures are answered through
//! [`map_item_error`]; store failures propagate as [`AppError`]. A body that
//! cannot be read at all (too large, or a broken stream) is answered here
//! without reaching the service.

use crate::error::{AppError, ErrorBody, ErrorReply, map_item_error};
use crate::response::PrettyJson;
use crate::routes::MAX_BODY_BYTES;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use todo_list_core::error::ItemError;
use todo_list_core::item::ItemId;

/// Body returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Confirmation message
    pub success: &'static str,
}

fn record(operation: &'static str, outcome: &'static str) {
    metrics::counter!(
        "todo_items.requests",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

const fn outcome_of(err: &ItemError) -> &'static str {
    match err {
        ItemError::Parse(_) => "parse_error",
        ItemError::Validation(_) => "validation_error",
        ItemError::NotFound(_) => "not_found",
        ItemError::Store(_) => "error",
    }
}

fn reject(operation: &'static str, err: ItemError) -> Result<Response, AppError> {
    record(operation, outcome_of(&err));
    if err.is_expected() {
        tracing::debug!(operation, error = %err, "Request rejected");
    }
    Ok(map_item_error(err)?.into_response())
}

fn unreadable_body(operation: &'static str, rejection: &BytesRejection) -> Response {
    let (status, outcome, message) = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            "too_large",
            format!("request body exceeds {MAX_BODY_BYTES} bytes"),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            "parse_error",
            format!("invalid request body format: {}", rejection.body_text()),
        )
    };

    record(operation, outcome);
    tracing::debug!(operation, %status, error = %rejection.body_text(), "Request body unreadable");

    ErrorReply {
        status,
        body: ErrorBody::message(message),
    }
    .into_response()
}

/// Create an item.
///
/// # Endpoint
///
/// ```text
/// POST /items
/// {"label": "buy milk", "completed": false}
/// ```
///
/// # Errors
///
/// Returns [`AppError`] (500) if the store fails.
pub async fn create_item(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return Ok(unreadable_body("create", &rejection)),
    };

    match state.items.create(&body).await {
        Ok(item) => {
            record("create", "ok");
            Ok(PrettyJson(StatusCode::OK, item).into_response())
        }
        Err(err) => reject("create", err),
    }
}

/// Replace the label and completion flag of an existing item.
///
/// # Endpoint
///
/// ```text
/// PUT /items/:id
/// ```
///
/// # Errors
///
/// Returns [`AppError`] (500) if the store fails.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return Ok(unreadable_body("update", &rejection)),
    };

    let id = ItemId::new(id);
    match state.items.update(&id, &body).await {
        Ok(item) => {
            record("update", "ok");
            Ok(PrettyJson(StatusCode::OK, item).into_response())
        }
        Err(err) => reject("update", err),
    }
}

/// List every item, in store order.
///
/// An empty store is answered with 404 `{"error": "No items available"}`.
///
/// # Errors
///
/// Returns [`AppError`] (500) if the store fails.
pub async fn list_items(State(state): State<AppState>) -> Result<Response, AppError> {
    match state.items.list().await {
        Ok(items) if items.is_empty() => {
            record("list", "empty");
            Ok(PrettyJson(StatusCode::NOT_FOUND, ErrorBody::message("No items available"))
                .into_response())
        }
        Ok(items) => {
            record("list", "ok");
            Ok(PrettyJson(StatusCode::OK, items).into_response())
        }
        Err(err) => reject("list", err),
    }
}

/// Delete an item.
///
/// # Endpoint
///
/// ```text
/// DELETE /items/:id
/// ```
///
/// # Errors
///
/// Returns [`AppError`] (500) if the store fails.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = ItemId::new(id);
    match state.items.delete(&id).await {
        Ok(()) => {
            record("delete", "ok");
            Ok(PrettyJson(
                StatusCode::OK,
                DeleteResponse {
                    success: "Item deleted successfully",
                },
            )
            .into_response())
        }
        Err(err) => reject("delete", err),
    }
}
