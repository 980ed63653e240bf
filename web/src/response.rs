//! Pretty-printed JSON responses.

use crate::error::AppError;
use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// A JSON response rendered with two-space indentation.
///
/// # Example
///
/// ```ignore
/// async fn handler() -> PrettyJson<Vec<ToDoItem>> {
///     PrettyJson(StatusCode::OK, items)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PrettyJson<T>(pub StatusCode, pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        let Self(status, body) = self;
        match serde_json::to_vec_pretty(&body) {
            Ok(bytes) => (
                status,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )],
                bytes,
            )
                .into_response(),
            Err(err) => AppError::internal("Failed to serialize response")
                .with_source(err.into())
                .into_response(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_renders_indented_json() {
        let response = PrettyJson(StatusCode::NOT_FOUND, json!({"error": "item not found"}))
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"{\n  \"error\": \"item not found\"\n}");
    }
}
