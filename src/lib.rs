//! HTTP API over a catalog of songs: list/filter by genre and danceability,
//! fetch a song by key, and reseed the catalog from the bundled dataset.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod models;
pub mod routers;
pub mod seed;
pub mod store;

use config::{Config, StoreBackend};
use db::Database;
use routers::{health_check_route, root_route, song_routes};
use store::{MemoryStore, SongStore};

/// State handed to every route.
#[derive(Clone)]
pub struct AppState {
    pub songs: Arc<dyn SongStore>,
}

impl AppState {
    pub fn new(songs: Arc<dyn SongStore>) -> Self {
        Self { songs }
    }
}

/// Opens the store selected by `config` and brings its schema up to date.
pub async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn SongStore>> {
    match config.store_backend() {
        StoreBackend::Memory => {
            info!("📦 Using in-memory song store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres(url) => {
            let database = Database::connect(&url, config.max_db_connections).await?;
            info!("📊 Connected to PostgreSQL database");
            database.migrate().await?;
            info!("📊 Database migrations completed");
            Ok(Arc::new(database))
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_route))
        .route("/health", get(health_check_route))
        .nest("/songs", song_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
