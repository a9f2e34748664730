use anyhow::Result;
use trackfinder_core::{Database, MoodId};

pub fn list(db: &Database, json: bool) -> Result<()> {
    let moods = db.list_moods()?;
    if json {
        return super::print_json(&moods);
    }
    if moods.is_empty() {
        println!("No moods yet.");
    }
    for mood in &moods {
        println!("#{:<4} {}", mood.id, mood.name);
    }
    Ok(())
}

/// Add a mood, reusing an existing one with the same name.
pub fn add(db: &Database, name: &str, json: bool) -> Result<()> {
    let mood = db.create_mood(name)?;
    if json {
        return super::print_json(&mood);
    }
    println!("✓ Mood #{} {}", mood.id, mood.name);
    Ok(())
}

pub fn delete(db: &Database, id: MoodId) -> Result<()> {
    db.delete_mood(id)?;
    println!("✓ Deleted mood #{id}");
    Ok(())
}
