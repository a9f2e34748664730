use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::genre::{MainGenre, SubGenre};
use crate::model::ids::{ArtistId, MoodId, SongId, SubGenreId};
use crate::model::{Artist, Mood};

/// A sub-genre together with the main genre that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongGenre {
    pub sub_genre: SubGenre,
    pub main_genre: MainGenre,
}

/// A catalogued song with all of its relations loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub name: String,
    pub year: Option<i32>,

    /// Free text matched by the search engine alongside the name.
    pub keywords: Option<String>,

    /// File path or URI of the audio.
    pub location: String,

    /// Principal artist.
    pub artist: Option<Artist>,
    pub genre: Option<SongGenre>,
    pub mood: Option<Mood>,

    /// Featuring artists, ordered by name, without duplicates.
    pub featuring: Vec<Artist>,
}

impl Song {
    /// Ids of the featuring artists.
    pub fn featuring_ids(&self) -> Vec<ArtistId> {
        self.featuring.iter().map(|a| a.id).collect()
    }

    pub fn sub_genre_id(&self) -> Option<SubGenreId> {
        self.genre.as_ref().map(|g| g.sub_genre.id)
    }
}

/// Scalar fields and foreign references submitted to create or update a song.
///
/// Featuring artists are passed separately as a set of ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongFields {
    pub name: String,
    pub year: Option<i32>,
    pub keywords: Option<String>,
    pub location: String,
    pub artist_id: Option<ArtistId>,
    pub sub_genre_id: Option<SubGenreId>,
    pub mood_id: Option<MoodId>,
}

impl SongFields {
    #[must_use]
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    #[must_use]
    pub fn with_artist(mut self, artist_id: ArtistId) -> Self {
        self.artist_id = Some(artist_id);
        self
    }

    #[must_use]
    pub fn with_sub_genre(mut self, sub_genre_id: SubGenreId) -> Self {
        self.sub_genre_id = Some(sub_genre_id);
        self
    }

    #[must_use]
    pub fn with_mood(mut self, mood_id: MoodId) -> Self {
        self.mood_id = Some(mood_id);
        self
    }

    /// Parse a raw year input. Blank input means "no year".
    pub fn parse_year(raw: &str) -> Result<Option<i32>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse()
            .map(Some)
            .map_err(|_| Error::invalid("year", format!("{raw:?} is not a year")))
    }

    /// Trim text fields and check the required ones.
    ///
    /// Blank keywords collapse to `None`.
    pub(crate) fn normalized(&self) -> Result<Self> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::invalid("name", "must not be empty"));
        }
        let location = self.location.trim();
        if location.is_empty() {
            return Err(Error::invalid("location", "must not be empty"));
        }
        let keywords = self
            .keywords
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        Ok(Self {
            name: name.to_string(),
            location: location.to_string(),
            keywords,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year_blank_is_none() {
        assert_eq!(SongFields::parse_year("").unwrap(), None);
        assert_eq!(SongFields::parse_year("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_year_number() {
        assert_eq!(SongFields::parse_year(" 1997 ").unwrap(), Some(1997));
    }

    #[test]
    fn test_parse_year_rejects_text() {
        let err = SongFields::parse_year("nineties").unwrap_err();
        assert!(matches!(err, Error::InvalidInput { field: "year", .. }));
    }

    #[test]
    fn test_normalized_trims_and_drops_blank_keywords() {
        let fields = SongFields::new("  Teardrop ", " /music/teardrop.flac ").with_keywords("  ");
        let fields = fields.normalized().unwrap();
        assert_eq!(fields.name, "Teardrop");
        assert_eq!(fields.location, "/music/teardrop.flac");
        assert_eq!(fields.keywords, None);
    }

    #[test]
    fn test_normalized_requires_name_and_location() {
        let err = SongFields::new("", "/x.mp3").normalized().unwrap_err();
        assert!(matches!(err, Error::InvalidInput { field: "name", .. }));

        let err = SongFields::new("Angel", " ").normalized().unwrap_err();
        assert!(matches!(err, Error::InvalidInput { field: "location", .. }));
    }
}
