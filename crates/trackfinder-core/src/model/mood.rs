use serde::{Deserialize, Serialize};

use crate::model::ids::MoodId;

/// A mood tag (e.g. "Melancholic").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mood {
    pub id: MoodId,
    pub name: String,
}

impl Mood {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}
