//! Error types for index building and index I/O.

use std::path::PathBuf;

use thiserror::Error;

/// All errors produced by the inverted index library.
#[derive(Error, Debug)]
pub enum IndexError {
    /// An input line did not have the `(documentId, text)` shape.
    /// Recovered by the corpus reader; only surfaced by [`crate::parse_record`].
    #[error("Malformed input line {line_number}: {line:?}")]
    MalformedInputLine { line_number: usize, line: String },

    #[error("Output location already exists: {}", .0.display())]
    OutputAlreadyExists(PathBuf),

    #[error("Resource unavailable at {}: {source}", .path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output directory has no success marker, so it is not a valid index.
    #[error("Incomplete output at {}: missing success marker", .0.display())]
    IncompleteOutput(PathBuf),

    #[error("Malformed index record: {0}")]
    MalformedIndexRecord(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

impl IndexError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IndexError::ResourceUnavailable {
            path: path.into(),
            source,
        }
    }
}

pub type IndexResult<T> = Result<T, IndexError>;
