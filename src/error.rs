//! Error types for a collation run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every way a run can fail. None of these are recovered from.
#[derive(Debug, Error)]
pub enum CollateError {
    /// The directory could not be listed, or one of its entries could not be read.
    #[error("cannot list directory {}: {source}", path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A selected source file could not be opened or is not valid UTF-8.
    #[error("cannot read {}: {source}", path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A matching entry whose name cannot be written into a UTF-8 header.
    #[error("file name is not valid UTF-8: {name}")]
    NonUtf8Name { name: String },

    #[error("cannot write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CollateError {
    pub(crate) fn list_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ListDir {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn read_source(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadSource {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write_output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::WriteOutput {
            path: path.into(),
            source,
        }
    }
}
