use thiserror::Error;

/// Failures coming out of a `SongStore` backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Rejections produced while turning `/songs` query parameters into a `SongFilter`.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid genre pattern: {0}")]
    InvalidGenre(#[from] regex::Error),

    #[error("Unsupported genre pattern {pattern:?}: {reason}")]
    UnsupportedGenre {
        pattern: String,
        reason: &'static str,
    },

    #[error("Invalid danceability {0:?}: expected a number")]
    InvalidDanceability(String),

    #[error("Invalid danceability {0}: must be a non-negative number")]
    NegativeDanceability(f64),
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to parse bundled dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("Failed to store seed data: {0}")]
    Store(#[from] StoreError),
}
