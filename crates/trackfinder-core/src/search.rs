//! Multi-criteria song search.
//!
//! A [`SongFilter`] compiles into one SQL predicate over `songs`. Every
//! supplied criterion narrows the result (logical AND); absent criteria
//! impose nothing. Matching songs are loaded with two queries no matter how
//! many songs match: one joined query for the scalar relations and one for
//! all featuring rows of the same predicate.

use rusqlite::types::Value;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;
use crate::model::{
    Artist, ArtistId, MainGenre, Mood, MoodId, Song, SongGenre, SongId, SubGenre, SubGenreId,
};
use crate::schema::Database;

/// Search criteria. Every field is optional; supplied fields are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongFilter {
    /// Case-insensitive literal substring of the song name or keywords.
    pub text: Option<String>,

    /// Principal artist. Featuring credits are not matched.
    pub artist_id: Option<ArtistId>,

    /// An artist that must be in the song's featuring set.
    pub featuring_artist_id: Option<ArtistId>,

    pub sub_genre_id: Option<SubGenreId>,
    pub mood_id: Option<MoodId>,
}

impl SongFilter {
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_artist(mut self, artist_id: ArtistId) -> Self {
        self.artist_id = Some(artist_id);
        self
    }

    #[must_use]
    pub fn with_featuring_artist(mut self, artist_id: ArtistId) -> Self {
        self.featuring_artist_id = Some(artist_id);
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

    /// The trimmed text criterion, if it constrains anything.
    fn text_query(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Returns `true` when no criterion constrains the result.
    pub fn is_empty(&self) -> bool {
        self.text_query().is_none()
            && self.artist_id.is_none()
            && self.featuring_artist_id.is_none()
            && self.sub_genre_id.is_none()
            && self.mood_id.is_none()
    }

    fn predicate(&self) -> Predicate {
        let mut predicate = Predicate::default();

        if let Some(text) = self.text_query() {
            let idx = predicate.bind(Value::Text(format!("%{}%", escape_like(text))));
            predicate.push(&format!(
                "(s.name LIKE ?{idx} ESCAPE '\\' OR s.keywords LIKE ?{idx} ESCAPE '\\')"
            ));
        }

        if let Some(artist_id) = self.artist_id {
            let idx = predicate.bind(Value::Integer(artist_id.get()));
            predicate.push(&format!("s.artist_id = ?{idx}"));
        }

        if let Some(artist_id) = self.featuring_artist_id {
            let idx = predicate.bind(Value::Integer(artist_id.get()));
            predicate.push(&format!(
                "EXISTS (SELECT 1 FROM song_featuring sf WHERE sf.song_id = s.id AND sf.artist_id = ?{idx})"
            ));
        }

        if let Some(sub_genre_id) = self.sub_genre_id {
            let idx = predicate.bind(Value::Integer(sub_genre_id.get()));
            predicate.push(&format!("s.sub_genre_id = ?{idx}"));
        }

        if let Some(mood_id) = self.mood_id {
            let idx = predicate.bind(Value::Integer(mood_id.get()));
            predicate.push(&format!("s.mood_id = ?{idx}"));
        }

        predicate
    }
}

/// A WHERE clause over the `songs s` alias with its bound values.
///
/// Clauses only reference `s.*` columns so the same predicate can drive both
/// the song query and the featuring query.
#[derive(Debug, Default)]
pub(crate) struct Predicate {
    clauses: Vec<String>,
    params: Vec<Value>,
}

impl Predicate {
    pub(crate) fn song_id(id: SongId) -> Self {
        Self {
            clauses: vec!["s.id = ?1".to_string()],
            params: vec![Value::Integer(id.get())],
        }
    }

    /// Bind a value, returning its 1-based parameter index.
    fn bind(&mut self, value: Value) -> usize {
        self.params.push(value);
        self.params.len()
    }

    fn push(&mut self, clause: &str) {
        self.clauses.push(clause.to_string());
    }

    fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }
}

/// Escape LIKE metacharacters so user text is matched literally.
fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

const SONG_SELECT: &str = "
SELECT
    s.id AS song_id,
    s.name AS song_name,
    s.year,
    s.keywords,
    s.location,
    a.id AS artist_id,
    a.name AS artist_name,
    sg.id AS sub_genre_id,
    sg.name AS sub_genre_name,
    mg.id AS main_genre_id,
    mg.name AS main_genre_name,
    m.id AS mood_id,
    m.name AS mood_name
FROM songs s
LEFT JOIN artists a ON a.id = s.artist_id
LEFT JOIN sub_genres sg ON sg.id = s.sub_genre_id
LEFT JOIN main_genres mg ON mg.id = sg.main_genre_id
LEFT JOIN moods m ON m.id = s.mood_id
";

fn row_to_song(row: &rusqlite::Row<'_>) -> rusqlite::Result<Song> {
    let artist = match row.get::<_, Option<ArtistId>>("artist_id")? {
        Some(id) => Some(Artist {
            id,
            name: row.get("artist_name")?,
        }),
        None => None,
    };

    let genre = match row.get::<_, Option<SubGenreId>>("sub_genre_id")? {
        Some(id) => {
            let main_genre = MainGenre {
                id: row.get("main_genre_id")?,
                name: row.get("main_genre_name")?,
            };
            Some(SongGenre {
                sub_genre: SubGenre {
                    id,
                    name: row.get("sub_genre_name")?,
                    main_genre_id: main_genre.id,
                },
                main_genre,
            })
        }
        None => None,
    };

    let mood = match row.get::<_, Option<MoodId>>("mood_id")? {
        Some(id) => Some(Mood {
            id,
            name: row.get("mood_name")?,
        }),
        None => None,
    };

    Ok(Song {
        id: row.get("song_id")?,
        name: row.get("song_name")?,
        year: row.get("year")?,
        keywords: row.get("keywords")?,
        location: row.get("location")?,
        artist,
        genre,
        mood,
        featuring: Vec::new(),
    })
}

/// Load every song matching `predicate`, ordered by name, with relations.
pub(crate) fn load_songs(conn: &Connection, predicate: &Predicate) -> Result<Vec<Song>> {
    let where_sql = predicate.where_sql();

    let sql = format!("{SONG_SELECT}{where_sql} ORDER BY s.name, s.id");
    let mut stmt = conn.prepare(&sql)?;
    let mut songs = stmt
        .query_map(
            rusqlite::params_from_iter(predicate.params.iter()),
            row_to_song,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    if songs.is_empty() {
        return Ok(songs);
    }

    let sql = format!(
        "SELECT f.song_id, fa.id, fa.name
         FROM song_featuring f
         JOIN artists fa ON fa.id = f.artist_id
         WHERE f.song_id IN (SELECT s.id FROM songs s{where_sql})
         ORDER BY fa.name, fa.id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut featuring: HashMap<SongId, Vec<Artist>> = HashMap::new();
    let rows = stmt.query_map(rusqlite::params_from_iter(predicate.params.iter()), |row| {
        Ok((
            row.get::<_, SongId>(0)?,
            Artist {
                id: row.get(1)?,
                name: row.get(2)?,
            },
        ))
    })?;
    for row in rows {
        let (song_id, artist) = row?;
        featuring.entry(song_id).or_default().push(artist);
    }

    for song in &mut songs {
        if let Some(artists) = featuring.remove(&song.id) {
            song.featuring = artists;
        }
    }
    Ok(songs)
}

/// Run a filter on an open connection or transaction.
pub(crate) fn query_songs(conn: &Connection, filter: &SongFilter) -> Result<Vec<Song>> {
    load_songs(conn, &filter.predicate())
}

impl Database {
    /// Search songs. All supplied criteria must hold.
    ///
    /// With no criteria this returns exactly what [`Database::list_songs`]
    /// returns, in the same order.
    pub fn search(&self, filter: &SongFilter) -> Result<Vec<Song>> {
        let tx = self.read_tx()?;
        let songs = query_songs(&tx, filter)?;
        tx.commit()?;

        log::debug!("Search {:?} matched {} song(s)", filter, songs.len());
        Ok(songs)
    }
}
