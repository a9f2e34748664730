use serde::{Deserialize, Serialize};

use crate::model::ids::ArtistId;

/// A performer (person or group).
///
/// An artist can be the principal artist of a song, a featuring
/// collaborator on it, or both on different songs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
}

impl Artist {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}
