use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;

use crate::error::Result;
use crate::model::normalize_name;
use crate::model::{MainGenre, MainGenreId, SubGenre, SubGenreId};
use crate::schema::Database;

use super::{delete_by_id, ensure_exists, insert_named, Table};

// Genre CRUD
impl Database {
    /// List every main genre by name, each with its sub-genres (also by name).
    ///
    /// Runs two queries regardless of the number of genres.
    pub fn list_main_genres_with_subgenres(&self) -> Result<Vec<(MainGenre, Vec<SubGenre>)>> {
        let tx = self.read_tx()?;
        let mains = query_main_genres(&tx)?;
        let mut children: HashMap<MainGenreId, Vec<SubGenre>> = HashMap::new();
        for sub in query_sub_genres(&tx)? {
            children.entry(sub.main_genre_id).or_default().push(sub);
        }
        tx.commit()?;

        Ok(mains
            .into_iter()
            .map(|main| {
                let subs = children.remove(&main.id).unwrap_or_default();
                (main, subs)
            })
            .collect())
    }

    /// Create a main genre. Names are unique; a duplicate is rejected.
    pub fn create_main_genre(&self, name: &str) -> Result<MainGenre> {
        let name = normalize_name("name", name)?;
        let tx = self.write_tx()?;
        let id = MainGenreId::from_raw(insert_named(&tx, Table::MainGenres, &name)?);
        tx.commit()?;

        log::debug!("Created main genre {id} ({name})");
        Ok(MainGenre { id, name })
    }

    /// Create a sub-genre under an existing main genre.
    pub fn create_sub_genre(&self, name: &str, main_genre_id: MainGenreId) -> Result<SubGenre> {
        let name = normalize_name("name", name)?;
        let tx = self.write_tx()?;
        ensure_exists(&tx, Table::MainGenres, main_genre_id.get())?;
        tx.execute(
            "INSERT INTO sub_genres (name, main_genre_id) VALUES (?1, ?2)",
            rusqlite::params![name, main_genre_id],
        )?;
        let id = SubGenreId::from_raw(tx.last_insert_rowid());
        tx.commit()?;

        log::debug!("Created sub-genre {id} ({name}) under main genre {main_genre_id}");
        Ok(SubGenre {
            id,
            name,
            main_genre_id,
        })
    }

    /// Delete a main genre together with all of its sub-genres.
    ///
    /// Songs tagged with one of those sub-genres lose their genre.
    pub fn delete_main_genre(&self, id: MainGenreId) -> Result<()> {
        let tx = self.write_tx()?;
        let (subs, songs): (i64, i64) = tx.query_row(
            "SELECT
                (SELECT COUNT(*) FROM sub_genres WHERE main_genre_id = ?1),
                (SELECT COUNT(*) FROM songs s
                   JOIN sub_genres sg ON sg.id = s.sub_genre_id
                  WHERE sg.main_genre_id = ?1)",
            [id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        delete_by_id(&tx, Table::MainGenres, id.get())?;
        tx.commit()?;

        log::debug!("Deleted main genre {id} and {subs} sub-genre(s)");
        if songs > 0 {
            log::warn!("Cleared the genre of {songs} song(s) after deleting main genre {id}");
        }
        Ok(())
    }

    /// Delete a sub-genre. Songs tagged with it lose their genre.
    pub fn delete_sub_genre(&self, id: SubGenreId) -> Result<()> {
        let tx = self.write_tx()?;
        let songs: i64 = tx.query_row(
            "SELECT COUNT(*) FROM songs WHERE sub_genre_id = ?1",
            [id],
            |row| row.get(0),
        )?;
        delete_by_id(&tx, Table::SubGenres, id.get())?;
        tx.commit()?;

        log::debug!("Deleted sub-genre {id}");
        if songs > 0 {
            log::warn!("Cleared the genre of {songs} song(s) after deleting sub-genre {id}");
        }
        Ok(())
    }

    pub fn get_main_genre(&self, id: MainGenreId) -> Result<Option<MainGenre>> {
        Ok(self
            .conn()
            .query_row(
                "SELECT id, name FROM main_genres WHERE id = ?1",
                [id],
                MainGenre::from_row,
            )
            .optional()?)
    }

    pub fn get_sub_genre(&self, id: SubGenreId) -> Result<Option<SubGenre>> {
        Ok(self
            .conn()
            .query_row(
                "SELECT id, name, main_genre_id FROM sub_genres WHERE id = ?1",
                [id],
                SubGenre::from_row,
            )
            .optional()?)
    }
}

fn query_main_genres(conn: &Connection) -> Result<Vec<MainGenre>> {
    let mut stmt = conn.prepare("SELECT id, name FROM main_genres ORDER BY name, id")?;
    let mains = stmt
        .query_map([], MainGenre::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(mains)
}

fn query_sub_genres(conn: &Connection) -> Result<Vec<SubGenre>> {
    let mut stmt =
        conn.prepare("SELECT id, name, main_genre_id FROM sub_genres ORDER BY name, id")?;
    let subs = stmt
        .query_map([], SubGenre::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(subs)
}

#[cfg(test)]
mod tests {
    use crate::{Database, Error, MainGenreId, SongFields};

    #[test]
    fn test_list_orders_main_and_sub_genres_by_name() {
        let db = Database::open_in_memory().unwrap();
        let rock = db.create_main_genre("Rock").unwrap();
        let electronic = db.create_main_genre("Electronic").unwrap();
        db.create_sub_genre("Techno", electronic.id).unwrap();
        db.create_sub_genre("Ambient", electronic.id).unwrap();
        db.create_sub_genre("Grunge", rock.id).unwrap();

        let listed = db.list_main_genres_with_subgenres().unwrap();
        let names: Vec<(&str, Vec<&str>)> = listed
            .iter()
            .map(|(main, subs)| {
                (
                    main.name.as_str(),
                    subs.iter().map(|s| s.name.as_str()).collect(),
                )
            })
            .collect();

        assert_eq!(
            names,
            vec![
                ("Electronic", vec!["Ambient", "Techno"]),
                ("Rock", vec!["Grunge"]),
            ]
        );
    }

    #[test]
    fn test_main_genre_without_children_is_listed() {
        let db = Database::open_in_memory().unwrap();
        db.create_main_genre("Jazz").unwrap();

        let listed = db.list_main_genres_with_subgenres().unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].1.is_empty());
    }

    #[test]
    fn test_duplicate_main_genre_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.create_main_genre("Rock").unwrap();

        let err = db.create_main_genre("Rock").unwrap_err();
        assert!(err.is_duplicate());

        // Names compare case-insensitively.
        let err = db.create_main_genre("rock").unwrap_err();
        assert!(err.is_duplicate());

        assert_eq!(db.list_main_genres_with_subgenres().unwrap().len(), 1);
    }

    #[test]
    fn test_blank_main_genre_name_is_invalid() {
        let db = Database::open_in_memory().unwrap();
        let err = db.create_main_genre("  ").unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn test_sub_genre_requires_existing_parent() {
        let db = Database::open_in_memory().unwrap();
        let err = db
            .create_sub_genre("Shoegaze", MainGenreId::from_raw(99))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound {
                entity: "main genre",
                id: 99
            }
        ));
    }

    #[test]
    fn test_sub_genre_names_may_repeat_across_parents() {
        let db = Database::open_in_memory().unwrap();
        let rock = db.create_main_genre("Rock").unwrap();
        let metal = db.create_main_genre("Metal").unwrap();
        db.create_sub_genre("Progressive", rock.id).unwrap();
        db.create_sub_genre("Progressive", metal.id).unwrap();
    }

    #[test]
    fn test_delete_main_genre_cascades_to_sub_genres() {
        let db = Database::open_in_memory().unwrap();
        let rock = db.create_main_genre("Rock").unwrap();
        let grunge = db.create_sub_genre("Grunge", rock.id).unwrap();
        let punk = db.create_sub_genre("Punk", rock.id).unwrap();
        let jazz = db.create_main_genre("Jazz").unwrap();
        db.create_sub_genre("Bebop", jazz.id).unwrap();

        db.delete_main_genre(rock.id).unwrap();

        let listed = db.list_main_genres_with_subgenres().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].0.name, "Jazz");
        assert!(db.get_sub_genre(grunge.id).unwrap().is_none());
        assert!(db.get_sub_genre(punk.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_main_genre_clears_song_genre() {
        let db = Database::open_in_memory().unwrap();
        let rock = db.create_main_genre("Rock").unwrap();
        let grunge = db.create_sub_genre("Grunge", rock.id).unwrap();
        let song = db
            .create_song(
                &SongFields::new("Lithium", "/music/lithium.mp3").with_sub_genre(grunge.id),
                [],
            )
            .unwrap();

        db.delete_main_genre(rock.id).unwrap();

        let song = db.get_song(song.id).unwrap();
        assert!(song.genre.is_none());
    }

    #[test]
    fn test_delete_missing_genres_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        assert!(db
            .delete_main_genre(MainGenreId::from_raw(1))
            .unwrap_err()
            .is_not_found());
        assert!(db
            .delete_sub_genre(crate::SubGenreId::from_raw(1))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_delete_sub_genre_keeps_parent() {
        let db = Database::open_in_memory().unwrap();
        let rock = db.create_main_genre("Rock").unwrap();
        let grunge = db.create_sub_genre("Grunge", rock.id).unwrap();

        db.delete_sub_genre(grunge.id).unwrap();

        assert_eq!(db.get_main_genre(rock.id).unwrap(), Some(rock));
        assert!(db.get_sub_genre(grunge.id).unwrap().is_none());
    }
}
