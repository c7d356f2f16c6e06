//! Errors for reading and writing artifact bundles.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading an artifact bundle.
#[derive(Debug, Error)]
pub enum ReadError {
    /// An artifact file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact file is not valid JSON or does not match its schema.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Artifact was written by a newer format revision.
    #[error("unsupported artifact format version {found} (current is {current})")]
    UnsupportedVersion { found: u32, current: u32 },

    /// Artifacts parsed but describe an inconsistent or unsound bundle.
    #[error("invalid artifact bundle: {0}")]
    Validation(String),
}

/// Errors that can occur while writing an artifact bundle.
#[derive(Debug, Error)]
pub enum WriteError {
    /// An artifact file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact could not be encoded as JSON.
    #[error("failed to encode {artifact}: {source}")]
    Serialize {
        artifact: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
