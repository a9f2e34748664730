/// A schema migration.
#[derive(Debug)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

const MIGRATION_001: &str = r#"
-- Main genres own their sub-genres
CREATE TABLE IF NOT EXISTS main_genres (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL COLLATE NOCASE UNIQUE
);

CREATE TABLE IF NOT EXISTS sub_genres (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL COLLATE NOCASE,
    main_genre_id INTEGER NOT NULL REFERENCES main_genres(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_sub_genres_main_genre_id ON sub_genres(main_genre_id);

CREATE TABLE IF NOT EXISTS moods (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL COLLATE NOCASE UNIQUE
);

CREATE TABLE IF NOT EXISTS artists (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL COLLATE NOCASE UNIQUE
);

-- Songs never disappear with their lookups: references are nulled instead
CREATE TABLE IF NOT EXISTS songs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL COLLATE NOCASE CHECK (length(trim(name)) > 0),
    year INTEGER,
    keywords TEXT,
    location TEXT NOT NULL CHECK (length(trim(location)) > 0),
    artist_id INTEGER REFERENCES artists(id) ON DELETE SET NULL,
    sub_genre_id INTEGER REFERENCES sub_genres(id) ON DELETE SET NULL,
    mood_id INTEGER REFERENCES moods(id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS idx_songs_name ON songs(name);
CREATE INDEX IF NOT EXISTS idx_songs_artist_id ON songs(artist_id);
CREATE INDEX IF NOT EXISTS idx_songs_sub_genre_id ON songs(sub_genre_id);
CREATE INDEX IF NOT EXISTS idx_songs_mood_id ON songs(mood_id);

-- Featuring artists (many-to-many)
CREATE TABLE IF NOT EXISTS song_featuring (
    song_id INTEGER NOT NULL REFERENCES songs(id) ON DELETE CASCADE,
    artist_id INTEGER NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
    PRIMARY KEY (song_id, artist_id)
);

CREATE INDEX IF NOT EXISTS idx_song_featuring_artist_id ON song_featuring(artist_id);
"#;

pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: MIGRATION_001,
}];
