pub mod artist;
pub mod genre;
pub mod ids;
pub mod mood;
pub mod song;

pub use artist::Artist;
pub use genre::{MainGenre, SubGenre};
pub use ids::{ArtistId, MainGenreId, MoodId, SongId, SubGenreId};
pub use mood::Mood;
pub use song::{Song, SongFields, SongGenre};

/// Trim a lookup-entity name, rejecting names that are empty afterwards.
pub(crate) fn normalize_name(field: &'static str, name: &str) -> crate::Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(crate::Error::invalid(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}
