use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::models::ApiResponse;
use crate::store::SongStore;

pub const GREETING: &str = "Hi hello!";

pub struct RootController;

impl RootController {
    /// Liveness: answers without touching the store.
    pub async fn root() -> Response {
        (StatusCode::OK, GREETING).into_response()
    }

    /// Readiness: answers 503 while the store is unreachable.
    pub async fn health_check(store: &dyn SongStore) -> Response {
        match store.ping().await {
            Ok(()) => {
                ApiResponse::ok(json!({ "status": "ok" })).into_response_with(StatusCode::OK)
            }
            Err(e) => {
                error!("Health check failed: {}", e);
                ApiResponse::message(e.to_string())
                    .into_response_with(StatusCode::SERVICE_UNAVAILABLE)
            }
        }
    }
}
