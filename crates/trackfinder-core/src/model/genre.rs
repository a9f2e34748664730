use serde::{Deserialize, Serialize};

use crate::model::ids::{MainGenreId, SubGenreId};

/// A top-level genre (e.g. "Electronic").
///
/// Owns its sub-genres: deleting a main genre deletes all of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MainGenre {
    pub id: MainGenreId,
    pub name: String,
}

/// A second-level genre (e.g. "Techno" under "Electronic").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubGenre {
    pub id: SubGenreId,
    pub name: String,

    /// The owning main genre. Never dangling.
    pub main_genre_id: MainGenreId,
}

impl MainGenre {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

impl SubGenre {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            main_genre_id: row.get("main_genre_id")?,
        })
    }
}
