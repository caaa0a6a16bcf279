use axum::{
    Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::Response,
    routing::get,
};
use tracing::warn;

use crate::AppState;
use crate::controllers::SongController;
use crate::models::{ApiResponse, SongQuery};

pub async fn list_songs_route(
    State(state): State<AppState>,
    query: Result<Query<SongQuery>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(query)) => SongController::list_songs(state.songs.as_ref(), query).await,
        Err(rejection) => {
            warn!("Rejected song query string: {}", rejection.body_text());
            ApiResponse::message(rejection.body_text()).into_response_with(StatusCode::BAD_REQUEST)
        }
    }
}

pub async fn get_song_route(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    match id {
        Ok(Path(id)) => SongController::get_song(state.songs.as_ref(), &id).await,
        Err(rejection) => {
            warn!("Rejected song id: {}", rejection.body_text());
            ApiResponse::message(format!("Invalid song id: {}", rejection.body_text()))
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub fn song_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_songs_route))
        .route("/id/{id}", get(get_song_route))
}
