use rusqlite;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DockeepError {
    #[error("SQLite error: {0}")]
    RusqliteError(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("no username configured; pass --user <name> once to set one")]
    MissingIdentity,
    #[error("selection '{given}' is not in range 0..{count}")]
    AmbiguousSelection { given: String, count: usize },
    #[error("cannot resolve a home directory (set DOCKEEP_HOME or HOME)")]
    HomeNotFound,
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("editor failed: {0}")]
    EditorError(String),
}
