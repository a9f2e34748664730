//! Core catalog model for trackfinder.
//!
//! This crate defines the relational song catalog (main genres, sub-genres,
//! moods, artists and songs), its SQLite schema, per-entity repository
//! operations on [`Database`], and the multi-criteria song search.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod repo;
pub mod schema;
pub mod search;

pub use error::{Error, Result};
pub use model::{
    Artist, ArtistId, MainGenre, MainGenreId, Mood, MoodId, Song, SongFields, SongGenre, SongId,
    SubGenre, SubGenreId,
};
pub use repo::artist::ArtistCredits;
pub use schema::Database;
pub use search::SongFilter;
