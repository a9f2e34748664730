use anyhow::Result;
use trackfinder_core::{ArtistId, Database};

pub fn list(db: &Database, json: bool) -> Result<()> {
    let artists = db.list_artists()?;
    if json {
        return super::print_json(&artists);
    }
    if artists.is_empty() {
        println!("No artists yet.");
    }
    for artist in &artists {
        println!("#{:<4} {}", artist.id, artist.name);
    }
    Ok(())
}

/// Add an artist, reusing an existing one with the same name.
pub fn add(db: &Database, name: &str, json: bool) -> Result<()> {
    let artist = db.create_artist(name)?;
    if json {
        return super::print_json(&artist);
    }
    println!("✓ Artist #{} {}", artist.id, artist.name);
    Ok(())
}

pub fn delete(db: &Database, id: ArtistId) -> Result<()> {
    db.delete_artist(id)?;
    println!("✓ Deleted artist #{id}");
    Ok(())
}

/// Show the songs an artist leads and the songs they feature on.
pub fn credits(db: &Database, id: ArtistId, json: bool) -> Result<()> {
    let credits = db.artist_credits(id)?;
    if json {
        return super::print_json(&credits);
    }

    println!("{} (#{})", credits.artist.name, credits.artist.id);
    println!("\nPrincipal artist on {} song(s):", credits.principal.len());
    for song in &credits.principal {
        println!("  {}", super::song_line(song));
    }
    println!("\nFeatured on {} song(s):", credits.featuring.len());
    for song in &credits.featuring {
        println!("  {}", super::song_line(song));
    }
    Ok(())
}
