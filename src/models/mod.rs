pub mod response;
pub mod song;

pub use response::ApiResponse;
pub use song::{GenrePattern, Song, SongFilter, SongQuery, SongRecord};
