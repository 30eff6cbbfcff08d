// Error types for the journal core
// Listing, loading and directory resolution degrade to safe defaults instead

use std::path::PathBuf;
use thiserror::Error;

/// Why a filename is not a journal entry name
#[derive(Debug, Error)]
pub enum FilenameError {
    #[error("missing .md extension: {0}")]
    MissingExtension(String),

    #[error("expected 2 segments separated by \"]-[\", found {0}")]
    SegmentCount(usize),

    #[error("empty id or timestamp segment")]
    EmptySegment,

    #[error("entry id is not a hyphenated UUID: {0}")]
    MalformedId(String),

    #[error("entry timestamp is not yyyy-MM-dd-HH-mm-ss: {0}")]
    MalformedTimestamp(String),

    #[error("invalid entry id: {0}")]
    InvalidId(#[from] uuid::Error),

    #[error("invalid entry timestamp: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("could not determine a documents or home directory")]
    NoDocumentsDir,
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
