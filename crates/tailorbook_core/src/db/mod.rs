//! SQLite layer underneath the record store.
//!
//! # Responsibility
//! - Hand out connections with the shop schema in place, for a file or for
//!   a private in-memory database.
//! - Own the versioned schema history of the three record collections.
//!
//! # Invariants
//! - No connection leaves this module before its migrations have committed.
//! - A file stamped by a newer build is refused untouched.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, DEFAULT_BUSY_TIMEOUT};

pub type DbResult<T> = Result<T, DbError>;

/// Reason the record store's database could not be made usable.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a build with more migrations than this one.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// The shared in-memory connection guard was poisoned by a panic.
    ConnectionPoisoned,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "shop records were written by schema {db_version}; this build knows up to {latest_supported}"
            ),
            Self::ConnectionPoisoned => write!(f, "in-memory record connection is poisoned"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Sqlite(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
