use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use trackfinder_core::{ArtistId, Database, MainGenreId, MoodId, SongId, SubGenreId};

mod commands;
mod config;

use commands::search::SearchArgs;
use commands::songs::SongArgs;
use config::Config;

#[derive(Debug, Parser)]
#[command(name = "trackfinder", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the database (default: ~/.local/share/trackfinder/trackfinder.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Manage main genres and their sub-genres
    Genres {
        #[command(subcommand)]
        command: GenreCommands,
    },
    /// Manage moods
    Moods {
        #[command(subcommand)]
        command: MoodCommands,
    },
    /// Manage artists
    Artists {
        #[command(subcommand)]
        command: ArtistCommands,
    },
    /// Manage songs
    Songs {
        #[command(subcommand)]
        command: SongCommands,
    },
    /// Search songs by text, artist, featured artist, sub-genre and mood
    ///
    /// Every given criterion must match. With no criteria every song is
    /// listed. Text matches a literal, case-insensitive substring of the
    /// song name or its keywords.
    Search(SearchArgs),
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, clap::Subcommand)]
enum GenreCommands {
    /// List main genres with their sub-genres
    List,
    /// Add a main genre
    AddMain {
        name: String,
    },
    /// Add a sub-genre under a main genre
    AddSub {
        name: String,
        /// Id of the parent main genre
        #[arg(long)]
        main: MainGenreId,
    },
    /// Delete a main genre and all of its sub-genres
    ///
    /// Songs filed under a removed sub-genre keep existing without a genre.
    DeleteMain {
        id: MainGenreId,
    },
    /// Delete a sub-genre; its songs keep existing without a genre
    DeleteSub {
        id: SubGenreId,
    },
}

#[derive(Debug, clap::Subcommand)]
enum MoodCommands {
    /// List moods
    List,
    /// Add a mood (an existing mood with the same name is reused)
    Add { name: String },
    /// Delete a mood; its songs keep existing without a mood
    Delete { id: MoodId },
}

#[derive(Debug, clap::Subcommand)]
enum ArtistCommands {
    /// List artists
    List,
    /// Add an artist (an existing artist with the same name is reused)
    Add { name: String },
    /// Delete an artist, clearing it from songs and featuring credits
    Delete { id: ArtistId },
    /// Show the songs an artist leads or is featured on
    Credits { id: ArtistId },
}

#[derive(Debug, clap::Subcommand)]
enum SongCommands {
    /// List every song
    List,
    /// Show one song with its relations
    Show { id: SongId },
    /// Add a song
    Add(SongArgs),
    /// Overwrite a song's fields and featuring set
    Edit {
        id: SongId,
        #[command(flatten)]
        song: SongArgs,
    },
    /// Delete a song
    Delete { id: SongId },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommands {
    /// Show current effective configuration
    Show,
    /// Show config file path
    Path,
    /// Show example configuration
    Example,
    /// Initialize config file with defaults
    Init,
}

fn open_database(config: &Config) -> Result<Database> {
    let db_path = &config.database_path;

    // Ensure database directory exists
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }
    }

    Database::open(db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_with_db_path(cli.db)?;
    twyg::setup(config.logging.clone())
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {e:?}"))?;
    log::debug!("Using database {}", config.database_path.display());

    let json = cli.json;
    match cli.command {
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::show_config(&config)?,
            ConfigCommands::Path => commands::config::show_path()?,
            ConfigCommands::Example => commands::config::show_example()?,
            ConfigCommands::Init => commands::config::init_config()?,
        },
        Commands::Genres { command } => {
            let db = open_database(&config)?;
            match command {
                GenreCommands::List => commands::genres::list(&db, json)?,
                GenreCommands::AddMain { name } => commands::genres::add_main(&db, &name, json)?,
                GenreCommands::AddSub { name, main } => {
                    commands::genres::add_sub(&db, &name, main, json)?;
                }
                GenreCommands::DeleteMain { id } => commands::genres::delete_main(&db, id)?,
                GenreCommands::DeleteSub { id } => commands::genres::delete_sub(&db, id)?,
            }
        }
        Commands::Moods { command } => {
            let db = open_database(&config)?;
            match command {
                MoodCommands::List => commands::moods::list(&db, json)?,
                MoodCommands::Add { name } => commands::moods::add(&db, &name, json)?,
                MoodCommands::Delete { id } => commands::moods::delete(&db, id)?,
            }
        }
        Commands::Artists { command } => {
            let db = open_database(&config)?;
            match command {
                ArtistCommands::List => commands::artists::list(&db, json)?,
                ArtistCommands::Add { name } => commands::artists::add(&db, &name, json)?,
                ArtistCommands::Delete { id } => commands::artists::delete(&db, id)?,
                ArtistCommands::Credits { id } => commands::artists::credits(&db, id, json)?,
            }
        }
        Commands::Songs { command } => {
            let db = open_database(&config)?;
            match command {
                SongCommands::List => commands::songs::list(&db, json)?,
                SongCommands::Show { id } => commands::songs::show(&db, id, json)?,
                SongCommands::Add(song) => commands::songs::add(&db, song, json)?,
                SongCommands::Edit { id, song } => commands::songs::edit(&db, id, song, json)?,
                SongCommands::Delete { id } => commands::songs::delete(&db, id)?,
            }
        }
        Commands::Search(args) => {
            let db = open_database(&config)?;
            commands::search::run(&db, args, json)?;
        }
    }

    Ok(())
}
