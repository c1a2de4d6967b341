//! Process-wide logging for the tokenizer
//!
//! Library code reports through the `log_*!` macros. Until a binary calls
//! `init_global_logging` there is no logger and every macro is a no-op, so
//! embedding the library needs no setup.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};
use thiserror::Error;

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, JsonLogger, Logger, LoggingService, MemoryLogger};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoggingError {
    #[error("Global logger already initialized")]
    LoggerAlreadySet,

    #[error("Runtime logging preferences already initialized")]
    PreferencesAlreadySet,
}

impl LoggingError {
    pub fn error_code(&self) -> Code {
        codes::system::INITIALIZATION_FAILURE
    }
}

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// Install a logger built from the runtime logging preferences
pub fn init_global_logging() -> Result<(), LoggingError> {
    let service = Arc::new(LoggingService::from_preferences());
    init_global_logging_with_service(service.clone())?;

    service.log_event(
        LogEvent::success(
            codes::success::SYSTEM_INITIALIZATION_COMPLETED,
            "Global logging initialized",
        )
        .with_context("min_level", service.min_level().as_str()),
    );
    Ok(())
}

pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), LoggingError> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| LoggingError::LoggerAlreadySet)
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// MACRO SUPPORT
// ============================================================================

/// Whether an event at `level` would reach the global logger. Macros check
/// this before building the event.
pub fn enabled(level: LogLevel) -> bool {
    try_get_global_logger().is_some_and(|logger| logger.should_log(level))
}

pub fn emit(event: LogEvent) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}
