//! Error types for snapshot ingestion
//!
//! Only structural failures surface here. Unreadable numbers inside a
//! well-formed document are absorbed by [`crate::numeric`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a snapshot file into a [`crate::document::SnapshotDocument`].
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("cannot read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid snapshot document {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ParseError {
    /// Path of the offending file.
    pub fn path(&self) -> &PathBuf {
        match self {
            ParseError::Io { path, .. } | ParseError::Json { path, .. } => path,
        }
    }
}
