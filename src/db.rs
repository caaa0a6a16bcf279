use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Song, SongFilter, SongRecord};
use crate::store::SongStore;

const SONG_COLUMNS: &str = "uid, track_id, track_name, artist_name, genre, bpm, energy, \
     danceability, loudness, liveness, valence, length, acousticness, speechiness, popularity";

/// PostgreSQL-backed song store.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        debug!("Connecting to database with {} max connections", max_connections);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl SongStore for Database {
    async fn list_songs(&self, filter: &SongFilter) -> Result<Vec<Song>, StoreError> {
        let songs = sqlx::query_as::<_, Song>(&format!(
            "SELECT {SONG_COLUMNS} FROM songs
             WHERE ($1::TEXT IS NULL OR genre ~ $1) AND danceability > $2
             ORDER BY seq"
        ))
        .bind(filter.genre.as_ref().map(|pattern| pattern.as_str()))
        .bind(filter.min_danceability)
        .fetch_all(&self.pool)
        .await?;

        Ok(songs)
    }

    async fn get_song(&self, uid: Uuid) -> Result<Option<Song>, StoreError> {
        let song = sqlx::query_as::<_, Song>(&format!(
            "SELECT {SONG_COLUMNS} FROM songs WHERE uid = $1"
        ))
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(song)
    }

    async fn replace_all(&self, records: Vec<SongRecord>) -> Result<usize, StoreError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM songs").execute(&mut *tx).await?;
        debug!("Deleted {} songs", deleted.rows_affected());

        let count = records.len();
        for record in records {
            sqlx::query(
                "INSERT INTO songs (track_id, track_name, artist_name, genre, bpm, energy, danceability, loudness, liveness, valence, length, acousticness, speechiness, popularity)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)"
            )
            .bind(record.id)
            .bind(record.track_name)
            .bind(record.artist_name)
            .bind(record.genre)
            .bind(record.bpm)
            .bind(record.energy)
            .bind(record.danceability)
            .bind(record.loudness)
            .bind(record.liveness)
            .bind(record.valence)
            .bind(record.length)
            .bind(record.acousticness)
            .bind(record.speechiness)
            .bind(record.popularity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
