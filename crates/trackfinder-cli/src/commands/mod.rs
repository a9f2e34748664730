pub mod artists;
pub mod config;
pub mod genres;
pub mod moods;
pub mod search;
pub mod songs;

use anyhow::Result;
use serde::Serialize;
use trackfinder_core::Song;

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One-line summary of a song with its relations.
pub(crate) fn song_line(song: &Song) -> String {
    let mut parts = vec![format!("#{:<4} {}", song.id, song.name)];
    if let Some(year) = song.year {
        parts.push(format!("({year})"));
    }
    if let Some(artist) = &song.artist {
        parts.push(format!("by {}", artist.name));
    }
    if !song.featuring.is_empty() {
        let names: Vec<&str> = song.featuring.iter().map(|a| a.name.as_str()).collect();
        parts.push(format!("feat. {}", names.join(", ")));
    }
    if let Some(genre) = &song.genre {
        parts.push(format!(
            "[{} / {}]",
            genre.main_genre.name, genre.sub_genre.name
        ));
    }
    if let Some(mood) = &song.mood {
        parts.push(format!("{{{}}}", mood.name));
    }
    parts.join(" ")
}

/// Print songs as a list, or a hint when there are none.
pub(crate) fn print_songs(songs: &[Song], json: bool) -> Result<()> {
    if json {
        return print_json(songs);
    }
    if songs.is_empty() {
        println!("No songs found.");
        return Ok(());
    }
    for song in songs {
        println!("{}", song_line(song));
    }
    println!("\n{} song(s)", songs.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackfinder_core::{Database, SongFields};

    #[test]
    fn test_song_line_includes_relations() {
        let db = Database::open_in_memory().unwrap();
        let electronic = db.create_main_genre("Electronic").unwrap();
        let trip_hop = db.create_sub_genre("Trip Hop", electronic.id).unwrap();
        let dark = db.create_mood("Dark").unwrap();
        let ma = db.create_artist("Massive Attack").unwrap();
        let ha = db.create_artist("Horace Andy").unwrap();
        let song = db
            .create_song(
                &SongFields::new("Angel", "/music/angel.flac")
                    .with_year(1998)
                    .with_artist(ma.id)
                    .with_sub_genre(trip_hop.id)
                    .with_mood(dark.id),
                [ha.id],
            )
            .unwrap();

        let line = song_line(&song);
        assert!(line.contains("Angel (1998) by Massive Attack feat. Horace Andy"));
        assert!(line.contains("[Electronic / Trip Hop]"));
        assert!(line.ends_with("{Dark}"));
    }

    #[test]
    fn test_song_line_bare_song() {
        let db = Database::open_in_memory().unwrap();
        let song = db
            .create_song(&SongFields::new("Untitled", "/music/x.mp3"), [])
            .unwrap();
        assert!(song_line(&song).ends_with("Untitled"));
    }
}
