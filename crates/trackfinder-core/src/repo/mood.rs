use rusqlite::OptionalExtension;

use crate::error::Result;
use crate::model::{normalize_name, Mood, MoodId};
use crate::schema::Database;

use super::{delete_by_id, id_by_name, insert_named, Table};

// Mood CRUD
impl Database {
    /// List every mood ordered by name.
    pub fn list_moods(&self) -> Result<Vec<Mood>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, name FROM moods ORDER BY name, id")?;
        let moods = stmt
            .query_map([], Mood::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(moods)
    }

    /// Create a mood, or return the existing one with the same name.
    pub fn create_mood(&self, name: &str) -> Result<Mood> {
        let name = normalize_name("name", name)?;
        let tx = self.write_tx()?;
        if let Some(id) = id_by_name(&tx, Table::Moods, &name)? {
            let existing = tx.query_row(
                "SELECT id, name FROM moods WHERE id = ?1",
                [id],
                Mood::from_row,
            )?;
            log::debug!("Mood {:?} already exists as {}", existing.name, existing.id);
            return Ok(existing);
        }
        let id = MoodId::from_raw(insert_named(&tx, Table::Moods, &name)?);
        tx.commit()?;

        log::debug!("Created mood {id} ({name})");
        Ok(Mood { id, name })
    }

    /// Delete a mood. Songs tagged with it lose their mood.
    pub fn delete_mood(&self, id: MoodId) -> Result<()> {
        let tx = self.write_tx()?;
        let songs: i64 = tx.query_row(
            "SELECT COUNT(*) FROM songs WHERE mood_id = ?1",
            [id],
            |row| row.get(0),
        )?;
        delete_by_id(&tx, Table::Moods, id.get())?;
        tx.commit()?;

        log::debug!("Deleted mood {id}");
        if songs > 0 {
            log::warn!("Cleared the mood of {songs} song(s) after deleting mood {id}");
        }
        Ok(())
    }

    pub fn get_mood(&self, id: MoodId) -> Result<Option<Mood>> {
        Ok(self
            .conn()
            .query_row("SELECT id, name FROM moods WHERE id = ?1", [id], Mood::from_row)
            .optional()?)
    }

    /// Find a mood by exact (case-insensitive) name.
    pub fn find_mood_by_name(&self, name: &str) -> Result<Option<Mood>> {
        Ok(self
            .conn()
            .query_row(
                "SELECT id, name FROM moods WHERE name = ?1",
                [name.trim()],
                Mood::from_row,
            )
            .optional()?)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, MoodId, SongFields};

    #[test]
    fn test_create_mood_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let first = db.create_mood("Happy").unwrap();
        let second = db.create_mood("Happy").unwrap();

        assert_eq!(first, second);
        let moods = db.list_moods().unwrap();
        assert_eq!(moods.len(), 1);
        assert_eq!(moods[0].name, "Happy");
    }

    #[test]
    fn test_create_mood_matches_existing_ignoring_case() {
        let db = Database::open_in_memory().unwrap();
        let first = db.create_mood("Happy").unwrap();
        let second = db.create_mood(" happy ").unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.name, "Happy");
    }

    #[test]
    fn test_list_moods_ordered_by_name() {
        let db = Database::open_in_memory().unwrap();
        db.create_mood("Melancholic").unwrap();
        db.create_mood("Energetic").unwrap();
        db.create_mood("calm").unwrap();

        let names: Vec<String> = db.list_moods().unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["calm", "Energetic", "Melancholic"]);
    }

    #[test]
    fn test_delete_mood() {
        let db = Database::open_in_memory().unwrap();
        let mood = db.create_mood("Dark").unwrap();

        db.delete_mood(mood.id).unwrap();

        assert!(db.get_mood(mood.id).unwrap().is_none());
        assert!(db.delete_mood(mood.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_missing_mood_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        assert!(db
            .delete_mood(MoodId::from_raw(5))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_delete_mood_nulls_song_reference() {
        let db = Database::open_in_memory().unwrap();
        let mood = db.create_mood("Dreamy").unwrap();
        let song = db
            .create_song(
                &SongFields::new("Cherry-coloured Funk", "/m/ccf.flac").with_mood(mood.id),
                [],
            )
            .unwrap();

        db.delete_mood(mood.id).unwrap();

        let song = db.get_song(song.id).unwrap();
        assert!(song.mood.is_none());
        assert_eq!(song.name, "Cherry-coloured Funk");
    }

    #[test]
    fn test_find_mood_by_name() {
        let db = Database::open_in_memory().unwrap();
        let mood = db.create_mood("Tense").unwrap();

        assert_eq!(db.find_mood_by_name("TENSE").unwrap(), Some(mood));
        assert!(db.find_mood_by_name("Relaxed").unwrap().is_none());
    }
}
