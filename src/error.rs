//! Error types for an export run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of a run. Skipped pages and invalid links are not errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The input directory is missing or is not a directory.
    #[error("input folder does not exist: {0:?}")]
    MissingInput(PathBuf),

    /// The input directory exists but could not be listed.
    #[error("failed to list {path:?}: {source}")]
    ListInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A document could not be read (including non UTF-8 content).
    #[error("failed to read {path:?}: {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An output table could not be created.
    #[error("failed to open {path:?} for writing: {source}")]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An output table could not be written or flushed.
    #[error("failed to write {path:?}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExportError>;
