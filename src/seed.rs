use tracing::info;

use crate::error::SeedError;
use crate::models::SongRecord;
use crate::store::SongStore;

const TOP_MUSIC_JSON: &str = include_str!("../data/top-music.json");

/// Parses the dataset bundled into the binary.
pub fn bundled_dataset() -> Result<Vec<SongRecord>, SeedError> {
    Ok(serde_json::from_str(TOP_MUSIC_JSON)?)
}

/// Replaces the store contents with `records`, preserving their order.
/// Completes only once every record is stored.
pub async fn reset_database(
    store: &dyn SongStore,
    records: Vec<SongRecord>,
) -> Result<usize, SeedError> {
    info!("Resetting song collection with {} records", records.len());
    let inserted = store.replace_all(records).await?;
    info!("Seeded {} songs", inserted);
    Ok(inserted)
}
