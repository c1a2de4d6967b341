//! Configuration module for the tokenizer
//!
//! Fixed defaults live in `constants::compile_time`; user preferences are read
//! from `TOKER_*` environment variables or a TOML file by `runtime`.

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{LoggingPreferences, RuntimeConfig, TokenizerPreferences};

use crate::logging::codes;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a runtime configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::Read { .. } => codes::config::CONFIG_READ_ERROR,
            Self::Parse(_) => codes::config::CONFIG_PARSE_ERROR,
        }
    }
}
