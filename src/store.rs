use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Song, SongFilter, SongRecord};

/// Repository of songs, injected into the HTTP handlers.
#[async_trait]
pub trait SongStore: Send + Sync {
    /// Songs matching `filter`, in insertion order.
    async fn list_songs(&self, filter: &SongFilter) -> Result<Vec<Song>, StoreError>;

    async fn get_song(&self, uid: Uuid) -> Result<Option<Song>, StoreError>;

    /// Drops every stored song and inserts `records` in order, each under a
    /// freshly assigned key. Returns the number of songs inserted.
    async fn replace_all(&self, records: Vec<SongRecord>) -> Result<usize, StoreError>;

    /// Cheap round trip used by the health route.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Process-local store, used for development runs and tests.
#[derive(Default)]
pub struct MemoryStore {
    songs: RwLock<Vec<Song>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SongStore for MemoryStore {
    async fn list_songs(&self, filter: &SongFilter) -> Result<Vec<Song>, StoreError> {
        let songs = self.songs.read().await;
        Ok(songs
            .iter()
            .filter(|song| filter.matches(&song.record))
            .cloned()
            .collect())
    }

    async fn get_song(&self, uid: Uuid) -> Result<Option<Song>, StoreError> {
        let songs = self.songs.read().await;
        Ok(songs.iter().find(|song| song.uid == uid).cloned())
    }

    async fn replace_all(&self, records: Vec<SongRecord>) -> Result<usize, StoreError> {
        let mut songs = self.songs.write().await;
        debug!("Replacing {} songs in memory store", songs.len());
        *songs = records
            .into_iter()
            .map(|record| Song {
                uid: Uuid::new_v4(),
                record,
            })
            .collect();
        Ok(songs.len())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SongQuery;

    fn record(id: i64, genre: &str, danceability: f64) -> SongRecord {
        SongRecord {
            id,
            track_name: format!("Track {id}"),
            artist_name: "Artist".to_string(),
            genre: genre.to_string(),
            bpm: 100.0,
            energy: 60.0,
            danceability,
            loudness: -6.0,
            liveness: 10.0,
            valence: 50.0,
            length: 180.0,
            acousticness: 10.0,
            speechiness: 5.0,
            popularity: 85.0,
        }
    }

    fn filter(genre: Option<&str>, danceability: Option<&str>) -> SongFilter {
        SongFilter::try_from(SongQuery {
            genre: genre.map(str::to_string),
            danceability: danceability.map(str::to_string),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn replace_all_keeps_order_and_assigns_distinct_keys() {
        let store = MemoryStore::new();
        let inserted = store
            .replace_all(vec![
                record(3, "pop", 70.0),
                record(1, "edm", 60.0),
                record(2, "latin", 80.0),
            ])
            .await
            .unwrap();
        assert_eq!(inserted, 3);

        let songs = store.list_songs(&SongFilter::default()).await.unwrap();
        let ids: Vec<i64> = songs.iter().map(|s| s.record.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_ne!(songs[0].uid, songs[1].uid);
        assert_ne!(songs[1].uid, songs[2].uid);
    }

    #[tokio::test]
    async fn replace_all_wipes_previous_contents() {
        let store = MemoryStore::new();
        store.replace_all(vec![record(1, "pop", 70.0)]).await.unwrap();
        let old = store.list_songs(&SongFilter::default()).await.unwrap();

        store.replace_all(vec![record(2, "edm", 50.0)]).await.unwrap();
        let songs = store.list_songs(&SongFilter::default()).await.unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].record.id, 2);
        assert!(store.get_song(old[0].uid).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_applies_genre_and_danceability() {
        let store = MemoryStore::new();
        store
            .replace_all(vec![
                record(1, "canadian pop", 76.0),
                record(2, "dance pop", 40.0),
                record(3, "edm", 90.0),
                record(4, "pop", 0.0),
            ])
            .await
            .unwrap();

        let pop = store.list_songs(&filter(Some("pop"), None)).await.unwrap();
        assert_eq!(pop.iter().map(|s| s.record.id).collect::<Vec<_>>(), vec![1, 2]);

        let danceable = store.list_songs(&filter(None, Some("50"))).await.unwrap();
        assert_eq!(
            danceable.iter().map(|s| s.record.id).collect::<Vec<_>>(),
            vec![1, 3]
        );

        let everything = store.list_songs(&filter(None, Some("0"))).await.unwrap();
        assert_eq!(everything.len(), 3);
    }

    #[tokio::test]
    async fn get_song_by_key() {
        let store = MemoryStore::new();
        store
            .replace_all(vec![record(1, "pop", 70.0), record(2, "edm", 60.0)])
            .await
            .unwrap();
        let songs = store.list_songs(&SongFilter::default()).await.unwrap();

        let found = store.get_song(songs[1].uid).await.unwrap();
        assert_eq!(found.as_ref(), Some(&songs[1]));
        assert!(store.get_song(Uuid::new_v4()).await.unwrap().is_none());
    }
}
