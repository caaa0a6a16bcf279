use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

/// JSON envelope returned by every `/songs` endpoint: `{"success": .., "body": ..}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub body: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(body: T) -> Self {
        ApiResponse {
            success: true,
            body,
        }
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl ApiResponse<serde_json::Value> {
    /// Failure whose body carries a `message`.
    pub fn message(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            body: json!({ "message": message.into() }),
        }
    }

    /// Failure with an empty object as body.
    pub fn empty_failure() -> Self {
        ApiResponse {
            success: false,
            body: json!({}),
        }
    }
}
