use rusqlite::Connection;
use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::model::{ArtistId, Song, SongFields, SongId};
use crate::schema::Database;
use crate::search::{load_songs, query_songs, Predicate, SongFilter};

use super::artist::resolve_artists;
use super::{delete_by_id, ensure_exists, Table};

// Song CRUD
impl Database {
    /// List every song ordered by name, with all relations loaded.
    pub fn list_songs(&self) -> Result<Vec<Song>> {
        let tx = self.read_tx()?;
        let songs = query_songs(&tx, &SongFilter::default())?;
        tx.commit()?;
        Ok(songs)
    }

    /// Fetch one song with all relations loaded.
    pub fn get_song(&self, id: SongId) -> Result<Song> {
        let tx = self.read_tx()?;
        let song = fetch_song(&tx, id)?;
        tx.commit()?;
        Ok(song)
    }

    /// Create a song and assign its featuring set.
    ///
    /// Featuring ids that match no artist are dropped; foreign references in
    /// `fields` must exist.
    pub fn create_song(
        &self,
        fields: &SongFields,
        featuring: impl IntoIterator<Item = ArtistId>,
    ) -> Result<Song> {
        let fields = fields.normalized()?;
        let featuring: BTreeSet<ArtistId> = featuring.into_iter().collect();

        let tx = self.write_tx()?;
        check_references(&tx, &fields)?;
        tx.execute(
            "INSERT INTO songs (name, year, keywords, location, artist_id, sub_genre_id, mood_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                fields.name,
                fields.year,
                fields.keywords,
                fields.location,
                fields.artist_id,
                fields.sub_genre_id,
                fields.mood_id,
            ],
        )?;
        let id = SongId::from_raw(tx.last_insert_rowid());
        replace_featuring(&tx, id, &featuring)?;
        let song = fetch_song(&tx, id)?;
        tx.commit()?;

        log::debug!(
            "Created song {id} ({}) with {} featuring artist(s)",
            song.name,
            song.featuring.len()
        );
        Ok(song)
    }

    /// Overwrite every field of a song and replace its whole featuring set.
    ///
    /// The previous featuring set is discarded, not merged. Either all
    /// changes apply or none do.
    pub fn update_song(
        &self,
        id: SongId,
        fields: &SongFields,
        featuring: impl IntoIterator<Item = ArtistId>,
    ) -> Result<Song> {
        let fields = fields.normalized()?;
        let featuring: BTreeSet<ArtistId> = featuring.into_iter().collect();

        let tx = self.write_tx()?;
        ensure_exists(&tx, Table::Songs, id.get())?;
        check_references(&tx, &fields)?;
        tx.execute(
            "UPDATE songs SET
                name = ?2, year = ?3, keywords = ?4, location = ?5,
                artist_id = ?6, sub_genre_id = ?7, mood_id = ?8
             WHERE id = ?1",
            rusqlite::params![
                id,
                fields.name,
                fields.year,
                fields.keywords,
                fields.location,
                fields.artist_id,
                fields.sub_genre_id,
                fields.mood_id,
            ],
        )?;
        replace_featuring(&tx, id, &featuring)?;
        let song = fetch_song(&tx, id)?;
        tx.commit()?;

        log::debug!(
            "Updated song {id} ({}) with {} featuring artist(s)",
            song.name,
            song.featuring.len()
        );
        Ok(song)
    }

    /// Delete a song and its featuring rows. Related entities are untouched.
    pub fn delete_song(&self, id: SongId) -> Result<()> {
        let tx = self.write_tx()?;
        delete_by_id(&tx, Table::Songs, id.get())?;
        tx.commit()?;

        log::debug!("Deleted song {id}");
        Ok(())
    }
}

fn fetch_song(conn: &Connection, id: SongId) -> Result<Song> {
    load_songs(conn, &Predicate::song_id(id))?
        .pop()
        .ok_or_else(|| Error::not_found(Table::Songs.entity(), id))
}

fn check_references(conn: &Connection, fields: &SongFields) -> Result<()> {
    if let Some(artist_id) = fields.artist_id {
        ensure_exists(conn, Table::Artists, artist_id.get())?;
    }
    if let Some(sub_genre_id) = fields.sub_genre_id {
        ensure_exists(conn, Table::SubGenres, sub_genre_id.get())?;
    }
    if let Some(mood_id) = fields.mood_id {
        ensure_exists(conn, Table::Moods, mood_id.get())?;
    }
    Ok(())
}

/// Swap the featuring rows of a song for the resolved `ids`.
fn replace_featuring(conn: &Connection, song_id: SongId, ids: &BTreeSet<ArtistId>) -> Result<()> {
    let artists = resolve_artists(conn, ids)?;
    conn.execute("DELETE FROM song_featuring WHERE song_id = ?1", [song_id])?;
    let mut stmt =
        conn.prepare("INSERT INTO song_featuring (song_id, artist_id) VALUES (?1, ?2)")?;
    for artist in &artists {
        stmt.execute(rusqlite::params![song_id, artist.id])?;
    }
    Ok(())
}
