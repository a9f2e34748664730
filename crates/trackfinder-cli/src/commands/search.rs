use anyhow::Result;
use trackfinder_core::{ArtistId, Database, MoodId, SongFilter, SubGenreId};

#[derive(Debug, Clone, Default, clap::Args)]
pub struct SearchArgs {
    /// Substring of the song name or keywords (case-insensitive)
    #[arg(long)]
    pub text: Option<String>,

    /// Principal artist id
    #[arg(long)]
    pub artist: Option<ArtistId>,

    /// Artist id that must be among the featured artists
    #[arg(long)]
    pub featuring: Option<ArtistId>,

    /// Sub-genre id
    #[arg(long = "sub-genre")]
    pub sub_genre: Option<SubGenreId>,

    /// Mood id
    #[arg(long)]
    pub mood: Option<MoodId>,
}

impl From<SearchArgs> for SongFilter {
    fn from(args: SearchArgs) -> Self {
        Self {
            text: args.text,
            artist_id: args.artist,
            featuring_artist_id: args.featuring,
            sub_genre_id: args.sub_genre,
            mood_id: args.mood,
        }
    }
}

pub fn run(db: &Database, args: SearchArgs, json: bool) -> Result<()> {
    let filter = SongFilter::from(args);
    if filter.is_empty() {
        log::debug!("Search without criteria; listing every song");
    }
    super::print_songs(&db.search(&filter)?, json)
}
