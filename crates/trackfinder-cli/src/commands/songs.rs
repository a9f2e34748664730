use anyhow::Result;
use trackfinder_core::{ArtistId, Database, MoodId, SongFields, SongId, SubGenreId};

/// Every editable field of a song, as given on the command line.
///
/// Editing overwrites the whole record, so `edit` takes the same arguments
/// as `add`: omitted optional fields are cleared.
#[derive(Debug, Clone, clap::Args)]
pub struct SongArgs {
    /// Song title
    #[arg(long)]
    pub name: String,

    /// File path or URL of the recording
    #[arg(long)]
    pub location: String,

    /// Release year; an empty value means no year
    #[arg(long, default_value = "")]
    pub year: String,

    /// Free-text keywords matched by `search --text`
    #[arg(long)]
    pub keywords: Option<String>,

    /// Principal artist id
    #[arg(long)]
    pub artist: Option<ArtistId>,

    /// Sub-genre id
    #[arg(long = "sub-genre")]
    pub sub_genre: Option<SubGenreId>,

    /// Mood id
    #[arg(long)]
    pub mood: Option<MoodId>,

    /// Featuring artist id (repeatable)
    #[arg(long = "feat")]
    pub featuring: Vec<ArtistId>,
}

impl SongArgs {
    /// Split into the scalar fields and the featuring set.
    pub fn into_fields(self) -> Result<(SongFields, Vec<ArtistId>)> {
        let fields = SongFields {
            name: self.name,
            year: SongFields::parse_year(&self.year)?,
            keywords: self.keywords,
            location: self.location,
            artist_id: self.artist,
            sub_genre_id: self.sub_genre,
            mood_id: self.mood,
        };
        Ok((fields, self.featuring))
    }
}

pub fn list(db: &Database, json: bool) -> Result<()> {
    super::print_songs(&db.list_songs()?, json)
}

pub fn show(db: &Database, id: SongId, json: bool) -> Result<()> {
    let song = db.get_song(id)?;
    if json {
        return super::print_json(&song);
    }

    println!("Song #{}", song.id);
    println!("  name:      {}", song.name);
    println!("  location:  {}", song.location);
    println!(
        "  year:      {}",
        song.year.map_or_else(|| "-".to_string(), |y| y.to_string())
    );
    println!("  keywords:  {}", song.keywords.as_deref().unwrap_or("-"));
    println!(
        "  artist:    {}",
        song.artist.as_ref().map_or("-", |a| a.name.as_str())
    );
    match &song.genre {
        Some(genre) => println!(
            "  genre:     {} / {}",
            genre.main_genre.name, genre.sub_genre.name
        ),
        None => println!("  genre:     -"),
    }
    println!(
        "  mood:      {}",
        song.mood.as_ref().map_or("-", |m| m.name.as_str())
    );
    if song.featuring.is_empty() {
        println!("  featuring: -");
    } else {
        for artist in &song.featuring {
            println!("  featuring: {} (#{})", artist.name, artist.id);
        }
    }
    Ok(())
}

pub fn add(db: &Database, args: SongArgs, json: bool) -> Result<()> {
    let (fields, featuring) = args.into_fields()?;
    let song = db.create_song(&fields, featuring)?;
    if json {
        return super::print_json(&song);
    }
    println!("✓ Added {}", super::song_line(&song));
    Ok(())
}

pub fn edit(db: &Database, id: SongId, args: SongArgs, json: bool) -> Result<()> {
    let (fields, featuring) = args.into_fields()?;
    let song = db.update_song(id, &fields, featuring)?;
    if json {
        return super::print_json(&song);
    }
    println!("✓ Updated {}", super::song_line(&song));
    Ok(())
}

pub fn delete(db: &Database, id: SongId) -> Result<()> {
    db.delete_song(id)?;
    println!("✓ Deleted song #{id}");
    Ok(())
}
