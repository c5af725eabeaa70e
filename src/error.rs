//! Error types for sqlite-kit.
//!
//! Builder validation, saved-query lookups and engine failures all surface
//! through [`Error`]. Nothing in this crate terminates the process.

use thiserror::Error;

/// Every failure a builder or [`Database`](crate::Database) can report.
#[derive(Error, Debug)]
pub enum Error {
    /// A statement builder is missing a required field.
    #[error("malformed query: {0}")]
    MalformedQuery(String),

    /// A saved query was built without a name or SQL text.
    #[error("invalid saved query: {0}")]
    InvalidSavedQuery(String),

    /// The named query was never saved.
    #[error("query \"{0}\" has not been saved")]
    QueryNotSaved(String),

    /// The named query was saved but never prepared on this connection.
    #[error("query \"{0}\" has not been prepared")]
    QueryNotPrepared(String),

    /// The named query has no row handler to interpret its results.
    #[error("query \"{0}\" has no row handler")]
    MissingHandler(String),

    /// The named query was not saved with generated-id retrieval enabled.
    #[error("query \"{0}\" does not return generated ids")]
    IdsNotReturned(String),

    /// The row handler of a saved query produces a different row type.
    #[error("row handler of query \"{name}\" does not produce {expected}")]
    HandlerType { name: String, expected: &'static str },

    /// No connection is open.
    #[error("database connection is not open")]
    NotConnected,

    /// `open()` was called on an already open connection.
    #[error("database connection is already open")]
    AlreadyConnected,

    /// Commit or rollback was requested while auto-commit is enabled.
    #[error("database is in auto-commit mode")]
    AutoCommitEnabled,

    /// The generated-key cursor was empty.
    #[error("no generated key was returned")]
    NoGeneratedKey,

    /// The database file could not be opened.
    #[error("failed to connect to database {path}: {source}")]
    Connection {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    /// The SQLite engine rejected an operation.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl Error {
    pub(crate) fn malformed(cause: impl Into<String>) -> Self {
        Error::MalformedQuery(cause.into())
    }

    /// Returns `true` for failures reported by the SQLite engine itself.
    /// Client-side errors such as a bad parameter count or a row handler
    /// reading a column as the wrong type are not engine errors.
    pub fn is_engine_error(&self) -> bool {
        match self {
            Error::Sqlite(err) | Error::Connection { source: err, .. } => {
                err.sqlite_error_code().is_some()
            }
            _ => false,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
