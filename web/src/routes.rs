//! Router construction.

use crate::handlers::{create_item, delete_item, health_check, list_items, update_item};
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// Largest request body the item endpoints will read (2 MiB).
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Build the HTTP router.
///
/// # Routes
///
/// - `GET /health`
/// - `POST /items`, `GET /items`
/// - `PUT /items/:id`, `DELETE /items/:id`
///
/// Every request is assigned an `x-request-id` (kept if the client sent one),
/// traced, and answered with the same id. Bodies over [`MAX_BODY_BYTES`] are
/// answered 413 with a JSON error.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/items", post(create_item).get(list_items))
        .route("/items/:id", put(update_item).delete(delete_item))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}
