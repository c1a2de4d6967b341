//! Logging settings: compile-time buffer limit plus runtime preferences

use super::events::LogLevel;
use super::LoggingError;
use crate::config::compile_time::logging::LOG_BUFFER_SIZE;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Fix the preferences the global logger is built from. Without this call
/// the environment-derived defaults apply.
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), LoggingError> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| LoggingError::PreferencesAlreadySet)
}

fn preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

pub fn get_min_log_level() -> LogLevel {
    preferences().min_log_level
}

pub fn use_structured_logging() -> bool {
    preferences().use_structured_logging
}

/// Events kept by a `MemoryLogger` before the oldest are dropped
pub fn get_event_buffer_size() -> usize {
    LOG_BUFFER_SIZE.max(1)
}

pub fn get_config_summary() -> String {
    let preferences = preferences();
    format!(
        "min_level={} structured={} buffer={}",
        preferences.min_log_level.as_str(),
        preferences.use_structured_logging,
        get_event_buffer_size()
    )
}
