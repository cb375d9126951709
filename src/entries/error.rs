//! Errors raised while building the entry map

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EntryError>;

#[derive(Debug, Error)]
pub enum EntryError {
    #[error("page root cannot be read: {path}: {reason}")]
    UnreadableRoot { path: PathBuf, reason: String },

    #[error("malformed page path {path}: {reason}")]
    MalformedPagePath { path: PathBuf, reason: String },

    #[error("pages {first} and {second} both map to chunk '{name}'")]
    DuplicateChunkName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("invalid manual entry '{name}': {reason}")]
    InvalidManualEntry { name: String, reason: String },

    #[error("invalid page marker pattern '{pattern}': {reason}")]
    InvalidMarker { pattern: String, reason: String },
}

impl EntryError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedPagePath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
