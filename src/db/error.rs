use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the book store. Not-found and empty results are not
/// errors; they come back as zero counts and empty vectors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite could not open the file or rejected a statement.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The directory holding the database file could not be created.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
