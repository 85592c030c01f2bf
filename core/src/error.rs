// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error type shared by the normalizer, loader and config layer

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a normalizer run or a dataset load
///
/// Malformed records and missing category directories are not errors;
/// they are dropped or skipped without surfacing here.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The output directory could not be created
    #[error("failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory could not be listed
    #[error("failed to list directory {}", path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An input file could not be opened or read
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An output file could not be created or written
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration is unusable
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A category name outside the fixed set
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

impl NormalizeError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read { path: path.into(), source }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write { path: path.into(), source }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, NormalizeError>;
