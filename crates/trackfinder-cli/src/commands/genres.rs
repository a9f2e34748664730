use anyhow::{Context, Result};
use serde::Serialize;
use trackfinder_core::{Database, MainGenre, MainGenreId, SubGenre, SubGenreId};

#[derive(Debug, Serialize)]
struct GenreTree<'a> {
    #[serde(flatten)]
    main_genre: &'a MainGenre,
    sub_genres: &'a [SubGenre],
}

/// List main genres with their sub-genres nested beneath.
pub fn list(db: &Database, json: bool) -> Result<()> {
    let genres = db.list_main_genres_with_subgenres()?;

    if json {
        let tree: Vec<_> = genres
            .iter()
            .map(|(main_genre, sub_genres)| GenreTree {
                main_genre,
                sub_genres,
            })
            .collect();
        return super::print_json(&tree);
    }

    if genres.is_empty() {
        println!("No genres yet. Add one with 'trackfinder genres add-main <NAME>'.");
        return Ok(());
    }
    for (main_genre, sub_genres) in &genres {
        println!("#{:<4} {}", main_genre.id, main_genre.name);
        for sub in sub_genres {
            println!("  #{:<4} {}", sub.id, sub.name);
        }
    }
    Ok(())
}

pub fn add_main(db: &Database, name: &str, json: bool) -> Result<()> {
    let genre = db
        .create_main_genre(name)
        .with_context(|| format!("Failed to add main genre {name:?}"))?;
    if json {
        return super::print_json(&genre);
    }
    println!("✓ Added main genre #{} {}", genre.id, genre.name);
    Ok(())
}

pub fn add_sub(db: &Database, name: &str, main_genre_id: MainGenreId, json: bool) -> Result<()> {
    let sub = db
        .create_sub_genre(name, main_genre_id)
        .with_context(|| format!("Failed to add sub-genre {name:?}"))?;
    if json {
        return super::print_json(&sub);
    }
    println!(
        "✓ Added sub-genre #{} {} under main genre #{}",
        sub.id, sub.name, sub.main_genre_id
    );
    Ok(())
}

pub fn delete_main(db: &Database, id: MainGenreId) -> Result<()> {
    db.delete_main_genre(id)?;
    println!("✓ Deleted main genre #{id} and its sub-genres");
    Ok(())
}

pub fn delete_sub(db: &Database, id: SubGenreId) -> Result<()> {
    db.delete_sub_genre(id)?;
    println!("✓ Deleted sub-genre #{id}");
    Ok(())
}
