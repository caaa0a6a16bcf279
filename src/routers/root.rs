use axum::extract::State;
use axum::response::Response;

use crate::AppState;
use crate::controllers::RootController;

pub async fn root_route() -> Response {
    RootController::root().await
}

pub async fn health_check_route(State(state): State<AppState>) -> Response {
    RootController::health_check(state.songs.as_ref()).await
}
