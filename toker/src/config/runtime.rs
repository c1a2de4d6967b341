//! Runtime preferences read from `TOKER_*` environment variables or TOML

use super::ConfigError;
use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerPreferences {
    /// Whether comment tokens are surfaced instead of discarded
    pub return_comments: bool,

    /// Single-character operators added to the default table
    pub extra_one_char_tokens: Vec<String>,

    /// Two-character operators added to the default table
    pub extra_two_char_tokens: Vec<String>,
}

impl Default for TokenizerPreferences {
    fn default() -> Self {
        Self {
            return_comments: env::var(env_vars::RETURN_COMMENTS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            extra_one_char_tokens: env::var(env_vars::EXTRA_ONE_CHAR_TOKENS)
                .ok()
                .map(|v| parse_token_list(&v))
                .unwrap_or_default(),
            extra_two_char_tokens: env::var(env_vars::EXTRA_TWO_CHAR_TOKENS)
                .ok()
                .map(|v| parse_token_list(&v))
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Minimum level the global logger emits
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
        }
    }
}

/// Parse a level name or rank, as used by `TOKER_LOGGING_MIN_LEVEL`
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    LogLevel::parse(level)
}

/// Split a whitespace- or comma-separated operator list
fn parse_token_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub tokenizer: TokenizerPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a configuration document; missing tables and keys fall back to
    /// their environment-aware defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Tokenizer
    pub const RETURN_COMMENTS: &str = "TOKER_RETURN_COMMENTS";
    pub const EXTRA_ONE_CHAR_TOKENS: &str = "TOKER_EXTRA_ONE_CHAR_TOKENS";
    pub const EXTRA_TWO_CHAR_TOKENS: &str = "TOKER_EXTRA_TWO_CHAR_TOKENS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "TOKER_LOGGING_USE_STRUCTURED";
    pub const LOGGING_MIN_LEVEL: &str = "TOKER_LOGGING_MIN_LEVEL";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("1"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_token_list_parsing() {
        assert_eq!(parse_token_list("%, ^ ,,!"), vec!["%", "^", "!"]);
        assert!(parse_token_list("  ").is_empty());
    }

    #[test]
    fn test_from_toml_str() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [tokenizer]
            return_comments = true
            extra_one_char_tokens = ["%"]
            extra_two_char_tokens = ["->", "!="]

            [logging]
            use_structured_logging = true
            min_log_level = "Debug"
            "#,
        )
        .unwrap();

        assert!(config.tokenizer.return_comments);
        assert_eq!(config.tokenizer.extra_one_char_tokens, vec!["%"]);
        assert_eq!(config.tokenizer.extra_two_char_tokens, vec!["->", "!="]);
        assert!(config.logging.use_structured_logging);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_from_toml_str_partial_document() {
        let config = RuntimeConfig::from_toml_str("[tokenizer]\nreturn_comments = true\n").unwrap();
        assert!(config.tokenizer.return_comments);
        assert_eq!(config.logging, LoggingPreferences::default());
    }

    #[test]
    fn test_from_toml_str_rejects_bad_syntax() {
        let result = RuntimeConfig::from_toml_str("[tokenizer\nreturn_comments = ");
        assert_matches!(result, Err(ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_toml_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("toker.toml");
        fs::write(&path, "[logging]\nmin_log_level = \"Error\"\n").unwrap();

        let config = RuntimeConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.logging.min_log_level, LogLevel::Error);
    }

    #[test]
    fn test_from_toml_file_missing() {
        let temp_dir = tempdir().unwrap();
        let result = RuntimeConfig::from_toml_file(temp_dir.path().join("absent.toml"));
        assert_matches!(result, Err(ConfigError::Read { .. }));
    }

    #[test]
    fn test_env_var_names_exist() {
        assert!(env_vars::RETURN_COMMENTS.starts_with("TOKER_"));
        assert!(env_vars::LOGGING_MIN_LEVEL.starts_with("TOKER_"));
    }
}
