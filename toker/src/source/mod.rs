//! Character sources feeding the lexical state machine
//!
//! A `CharacterSource` yields one character at a time with arbitrary-distance
//! lookahead and a running line count. It reads from a file or from text held
//! in memory.

pub mod character_source;

pub use character_source::CharacterSource;

use crate::logging::codes;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a source could not be opened or read
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Invalid source path: {0}")]
    InvalidPath(String),

    #[error("Source not found: {0}")]
    NotFound(PathBuf),

    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No source is open")]
    NotOpen,
}

impl SourceError {
    /// Classify an I/O failure raised while opening `path`
    pub fn from_io(path: PathBuf, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io {
                path,
                source: error,
            },
        }
    }

    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::InvalidPath(_) => codes::source::INVALID_PATH,
            Self::NotFound(_) => codes::source::FILE_NOT_FOUND,
            Self::NotAFile(_) => codes::source::NOT_A_FILE,
            Self::PermissionDenied(_) => codes::source::PERMISSION_DENIED,
            Self::Io { .. } => codes::source::IO_ERROR,
            Self::NotOpen => codes::source::SOURCE_NOT_OPEN,
        }
    }
}
