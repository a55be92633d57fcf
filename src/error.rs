//! Error types for the record store.
//!
//! The store only knows two failure modes: the backing file could not be read
//! or written, or a caller referred to a record that is no longer present.
//! Everything above the store (forms, the TUI loop) works with `anyhow`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::RecordId;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The directory file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The directory file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An update or delete targeted a record that is no longer in the store.
    #[error("record {0} not found")]
    NotFound(RecordId),
}

/// Result alias used throughout the store module.
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Whether the underlying cause is a missing file. The shell treats this
    /// as "start with an empty directory" rather than a hard failure.
    #[must_use]
    pub fn is_missing_file(&self) -> bool {
        match self {
            Self::Read { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Whether this error reports a record that disappeared.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
