use std::path::PathBuf;

use thiserror::Error;

use crate::models::store::Store;

pub mod json;
pub mod migrations;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to load snapshot from '{path}': {source}")]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock snapshot '{path}' for reading: {source}")]
    LockFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON from '{path}': {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Snapshot field 'version' must be a non-negative integer")]
    InvalidVersion,

    #[error(
        "Snapshot was exported by a newer version of taskpulse (version {0}). Please upgrade taskpulse to read it."
    )]
    FutureVersion(u32),

    #[error("Snapshot has unsupported version {0}. This version of taskpulse cannot read it.")]
    UnsupportedVersion(u32),
}

/// Source of backend snapshots. Read-only: the backend owns the records.
pub trait Storage {
    fn load(&self) -> Result<Store, StorageError>;
}
