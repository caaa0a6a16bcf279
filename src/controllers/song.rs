use axum::{
    http::StatusCode,
    response::Response,
};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::models::{ApiResponse, SongFilter, SongQuery};
use crate::store::SongStore;

pub struct SongController;

impl SongController {
    /// `GET /songs`: every song matching the optional `genre` pattern and
    /// `danceability` lower bound.
    pub async fn list_songs(store: &dyn SongStore, query: SongQuery) -> Response {
        let filter = match SongFilter::try_from(query) {
            Ok(filter) => filter,
            Err(e) => {
                warn!("Rejected song query: {}", e);
                return ApiResponse::message(e.to_string())
                    .into_response_with(StatusCode::BAD_REQUEST);
            }
        };

        match store.list_songs(&filter).await {
            Ok(songs) => {
                debug!("Found {} songs", songs.len());
                ApiResponse::ok(songs).into_response_with(StatusCode::OK)
            }
            Err(e) => {
                error!("Failed to list songs: {}", e);
                ApiResponse::empty_failure().into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// `GET /songs/id/{id}`: a single song by its store key.
    pub async fn get_song(store: &dyn SongStore, id: &str) -> Response {
        let uid = match Uuid::parse_str(id) {
            Ok(uid) => uid,
            Err(e) => {
                warn!("Invalid song id {:?}: {}", id, e);
                return ApiResponse::message(format!("Invalid song id: {}", e))
                    .into_response_with(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

        match store.get_song(uid).await {
            Ok(Some(song)) => ApiResponse::ok(song).into_response_with(StatusCode::OK),
            Ok(None) => {
                debug!("Song {} not found", uid);
                ApiResponse::message("Song not found").into_response_with(StatusCode::NOT_FOUND)
            }
            Err(e) => {
                error!("Failed to get song {}: {}", uid, e);
                ApiResponse::message(e.to_string())
                    .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
