/*!
 * Error types for the tweetstore library.
 *
 * The database handle reports failures through `DatabaseError`; its lenient
 * operations log these and fall back to empty or sentinel results.
 */

use thiserror::Error;

/// Errors that can occur when talking to the status database
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The configured driver name does not resolve to a supported driver
    #[error("Driver error: unknown driver '{0}'")]
    Driver(String),

    /// The database could not be opened at the derived URL
    #[error("Connection error for '{url}': {source}")]
    Connection {
        /// Connection URL that failed to open
        url: String,
        /// Underlying driver error
        #[source]
        source: rusqlite::Error,
    },

    /// A statement failed to prepare or execute
    #[error("SQL error {}: {source}", sql_error_code(.source))]
    Sql {
        /// Underlying driver error
        #[from]
        source: rusqlite::Error,
    },

    /// A table or column name is not a plain SQL identifier
    #[error("Invalid identifier: '{0}'")]
    InvalidIdentifier(String),
}

impl DatabaseError {
    /// Extended driver error code, when the failure came from SQLite itself
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Connection { source, .. } | Self::Sql { source } => match source {
                rusqlite::Error::SqliteFailure(err, _) => Some(err.extended_code),
                _ => None,
            },
            _ => None,
        }
    }
}

fn sql_error_code(error: &rusqlite::Error) -> String {
    match error {
        rusqlite::Error::SqliteFailure(err, _) => err.extended_code.to_string(),
        _ => "-".to_string(),
    }
}

/// Errors that can occur while reading status input
#[derive(Error, Debug)]
pub enum StatusError {
    /// Reading the input file failed
    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    /// The input was not valid status JSON
    #[error("Failed to parse status JSON at line {line}: {source}")]
    Parse {
        /// 1-based line of the offending record (1 for whole-document input)
        line: usize,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}
