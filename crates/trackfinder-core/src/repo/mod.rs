//! Repository operations, grouped per entity as `impl Database` blocks.
//!
//! - `genre`: main genres and their sub-genres
//! - `mood`: mood tags
//! - `artist`: artists and featuring-set resolution
//! - `song`: song CRUD with whole-set featuring replacement

use rusqlite::{Connection, OptionalExtension};

use crate::error::{is_unique_violation, Error, Result};

pub mod artist;
pub mod genre;
pub mod mood;
pub mod song;

/// Tables whose rows are addressed by an integer `id` column.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Table {
    MainGenres,
    SubGenres,
    Moods,
    Artists,
    Songs,
}

impl Table {
    const fn name(self) -> &'static str {
        match self {
            Self::MainGenres => "main_genres",
            Self::SubGenres => "sub_genres",
            Self::Moods => "moods",
            Self::Artists => "artists",
            Self::Songs => "songs",
        }
    }

    /// Entity label used in error messages.
    pub(crate) const fn entity(self) -> &'static str {
        match self {
            Self::MainGenres => "main genre",
            Self::SubGenres => "sub-genre",
            Self::Moods => "mood",
            Self::Artists => "artist",
            Self::Songs => "song",
        }
    }
}

/// Fail with `NotFound` unless a row with `id` exists in `table`.
pub(crate) fn ensure_exists(conn: &Connection, table: Table, id: i64) -> Result<()> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)",
        table.name()
    );
    let exists: bool = conn.query_row(&sql, [id], |row| row.get(0))?;
    if exists {
        Ok(())
    } else {
        Err(Error::not_found(table.entity(), id))
    }
}

/// Delete the row with `id` from `table`, failing with `NotFound` if absent.
pub(crate) fn delete_by_id(conn: &Connection, table: Table, id: i64) -> Result<()> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", table.name());
    if conn.execute(&sql, [id])? == 0 {
        return Err(Error::not_found(table.entity(), id));
    }
    Ok(())
}

/// Insert a row holding only a name, returning the new row id.
///
/// A uniqueness violation becomes `DuplicateName`.
pub(crate) fn insert_named(conn: &Connection, table: Table, name: &str) -> Result<i64> {
    let sql = format!("INSERT INTO {} (name) VALUES (?1)", table.name());
    conn.execute(&sql, [name]).map_err(|e| {
        if is_unique_violation(&e) {
            Error::DuplicateName {
                entity: table.entity(),
                name: name.to_string(),
            }
        } else {
            e.into()
        }
    })?;
    Ok(conn.last_insert_rowid())
}

/// Look up the id of a row by its (case-insensitive) unique name.
pub(crate) fn id_by_name(conn: &Connection, table: Table, name: &str) -> Result<Option<i64>> {
    let sql = format!("SELECT id FROM {} WHERE name = ?1", table.name());
    Ok(conn.query_row(&sql, [name], |row| row.get(0)).optional()?)
}
