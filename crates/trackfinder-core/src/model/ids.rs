use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            #[must_use]
            pub const fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.0))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

define_id!(MainGenreId, "Row id of a main genre.");
define_id!(SubGenreId, "Row id of a sub-genre.");
define_id!(MoodId, "Row id of a mood tag.");
define_id!(ArtistId, "Row id of an artist.");
define_id!(SongId, "Row id of a song.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_str_trims() {
        let id: ArtistId = " 42 ".parse().unwrap();
        assert_eq!(id.get(), 42);
    }

    #[test]
    fn test_id_from_str_rejects_garbage() {
        assert!("abc".parse::<MoodId>().is_err());
        assert!("".parse::<MoodId>().is_err());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(SongId::from_raw(3).to_string(), "3");
    }

    #[test]
    fn test_id_round_trips_through_sqlite() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let id: SubGenreId = conn
            .query_row("SELECT ?1", [SubGenreId::from_raw(9)], |row| row.get(0))
            .unwrap();
        assert_eq!(id, SubGenreId::from_raw(9));
    }
}
