use rusqlite::{Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::model::{normalize_name, Artist, ArtistId, Song};
use crate::schema::Database;
use crate::search::{query_songs, SongFilter};

use super::{delete_by_id, id_by_name, insert_named, Table};

/// Both sides of an artist's relationship to songs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistCredits {
    pub artist: Artist,

    /// Songs where the artist is the principal artist.
    pub principal: Vec<Song>,

    /// Songs where the artist is a featuring collaborator.
    pub featuring: Vec<Song>,
}

// Artist CRUD
impl Database {
    /// List every artist ordered by name.
    pub fn list_artists(&self) -> Result<Vec<Artist>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, name FROM artists ORDER BY name, id")?;
        let artists = stmt
            .query_map([], Artist::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(artists)
    }

    /// Create an artist, or return the existing one with the same name.
    pub fn create_artist(&self, name: &str) -> Result<Artist> {
        let name = normalize_name("name", name)?;
        let tx = self.write_tx()?;
        if let Some(id) = id_by_name(&tx, Table::Artists, &name)? {
            let existing = tx.query_row(
                "SELECT id, name FROM artists WHERE id = ?1",
                [id],
                Artist::from_row,
            )?;
            log::debug!("Artist {:?} already exists as {}", existing.name, existing.id);
            return Ok(existing);
        }
        let id = ArtistId::from_raw(insert_named(&tx, Table::Artists, &name)?);
        tx.commit()?;

        log::debug!("Created artist {id} ({name})");
        Ok(Artist { id, name })
    }

    /// Delete an artist.
    ///
    /// Songs keep existing: the artist is cleared as principal artist and
    /// dropped from every featuring set.
    pub fn delete_artist(&self, id: ArtistId) -> Result<()> {
        let tx = self.write_tx()?;
        let (principal, featuring): (i64, i64) = tx.query_row(
            "SELECT
                (SELECT COUNT(*) FROM songs WHERE artist_id = ?1),
                (SELECT COUNT(*) FROM song_featuring WHERE artist_id = ?1)",
            [id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        delete_by_id(&tx, Table::Artists, id.get())?;
        tx.commit()?;

        log::debug!("Deleted artist {id}");
        if principal + featuring > 0 {
            log::warn!(
                "Deleting artist {id} cleared {principal} principal credit(s) and {featuring} featuring credit(s)"
            );
        }
        Ok(())
    }

    pub fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>> {
        Ok(self
            .conn()
            .query_row(
                "SELECT id, name FROM artists WHERE id = ?1",
                [id],
                Artist::from_row,
            )
            .optional()?)
    }

    /// Find an artist by exact (case-insensitive) name.
    pub fn find_artist_by_name(&self, name: &str) -> Result<Option<Artist>> {
        Ok(self
            .conn()
            .query_row(
                "SELECT id, name FROM artists WHERE name = ?1",
                [name.trim()],
                Artist::from_row,
            )
            .optional()?)
    }

    /// Materialize a featuring set from submitted ids.
    ///
    /// Unknown ids are dropped, duplicates collapse, and the result is
    /// ordered by name.
    pub fn resolve_artists_by_ids(
        &self,
        ids: impl IntoIterator<Item = ArtistId>,
    ) -> Result<Vec<Artist>> {
        let ids: BTreeSet<ArtistId> = ids.into_iter().collect();
        resolve_artists(self.conn(), &ids)
    }

    /// Songs crediting the artist, as principal and as featuring artist.
    pub fn artist_credits(&self, id: ArtistId) -> Result<ArtistCredits> {
        let tx = self.read_tx()?;
        let artist = tx
            .query_row(
                "SELECT id, name FROM artists WHERE id = ?1",
                [id],
                Artist::from_row,
            )
            .optional()?
            .ok_or_else(|| Error::not_found(Table::Artists.entity(), id))?;
        let principal = query_songs(&tx, &SongFilter::default().with_artist(id))?;
        let featuring = query_songs(&tx, &SongFilter::default().with_featuring_artist(id))?;
        tx.commit()?;

        Ok(ArtistCredits {
            artist,
            principal,
            featuring,
        })
    }
}

pub(crate) fn resolve_artists(conn: &Connection, ids: &BTreeSet<ArtistId>) -> Result<Vec<Artist>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT id, name FROM artists WHERE id IN ({placeholders}) ORDER BY name, id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let artists = stmt
        .query_map(rusqlite::params_from_iter(ids), Artist::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    if artists.len() < ids.len() {
        log::debug!(
            "Dropped {} unknown artist id(s) while resolving featuring set",
            ids.len() - artists.len()
        );
    }
    Ok(artists)
}

#[cfg(test)]
mod tests {
    use crate::{ArtistId, Database, SongFields};

    #[test]
    fn test_create_artist_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let first = db.create_artist("Massive Attack").unwrap();
        let second = db.create_artist("Massive Attack").unwrap();

        assert_eq!(first, second);
        assert_eq!(db.list_artists().unwrap().len(), 1);
    }

    #[test]
    fn test_list_artists_ordered_by_name() {
        let db = Database::open_in_memory().unwrap();
        db.create_artist("Portishead").unwrap();
        db.create_artist("Björk").unwrap();
        db.create_artist("Tricky").unwrap();

        let names: Vec<String> = db
            .list_artists()
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["Björk", "Portishead", "Tricky"]);
    }

    #[test]
    fn test_delete_missing_artist_leaves_table_unchanged() {
        let db = Database::open_in_memory().unwrap();
        db.create_artist("Goldfrapp").unwrap();
        let before = db.list_artists().unwrap();

        let err = db.delete_artist(ArtistId::from_raw(404)).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(db.list_artists().unwrap(), before);
    }

    #[test]
    fn test_resolve_drops_unknown_ids() {
        let db = Database::open_in_memory().unwrap();
        let a = db.create_artist("Horace Andy").unwrap();
        let b = db.create_artist("Elizabeth Fraser").unwrap();

        let resolved = db
            .resolve_artists_by_ids([a.id, ArtistId::from_raw(999), b.id, a.id])
            .unwrap();

        assert_eq!(resolved, vec![b, a]);
    }

    #[test]
    fn test_resolve_empty_set() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.resolve_artists_by_ids([]).unwrap().is_empty());
    }

    #[test]
    fn test_delete_artist_keeps_songs() {
        let db = Database::open_in_memory().unwrap();
        let lead = db.create_artist("Massive Attack").unwrap();
        let guest = db.create_artist("Horace Andy").unwrap();
        let other = db.create_artist("Tracey Thorn").unwrap();
        let song = db
            .create_song(
                &SongFields::new("Angel", "/m/angel.flac").with_artist(lead.id),
                [guest.id, other.id],
            )
            .unwrap();

        db.delete_artist(lead.id).unwrap();
        db.delete_artist(guest.id).unwrap();

        let song = db.get_song(song.id).unwrap();
        assert!(song.artist.is_none());
        assert_eq!(song.featuring, vec![other]);
    }

    #[test]
    fn test_artist_credits() {
        let db = Database::open_in_memory().unwrap();
        let ma = db.create_artist("Massive Attack").unwrap();
        let ha = db.create_artist("Horace Andy").unwrap();
        db.create_song(
            &SongFields::new("Angel", "/m/angel.flac").with_artist(ma.id),
            [ha.id],
        )
        .unwrap();
        db.create_song(
            &SongFields::new("Skylarking", "/m/skylarking.flac").with_artist(ha.id),
            [],
        )
        .unwrap();

        let credits = db.artist_credits(ha.id).unwrap();
        assert_eq!(credits.artist, ha);
        assert_eq!(credits.principal.len(), 1);
        assert_eq!(credits.principal[0].name, "Skylarking");
        assert_eq!(credits.featuring.len(), 1);
        assert_eq!(credits.featuring[0].name, "Angel");

        assert!(db
            .artist_credits(ArtistId::from_raw(77))
            .unwrap_err()
            .is_not_found());
    }
}
