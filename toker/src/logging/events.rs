//! Log events and their text and JSON renderings

use super::codes::{self, Code};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Event levels, most severe first; a logger set to a level accepts that level
/// and everything above it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Accepts names (`warn`, `Warning`, ...) or the numeric rank `0`-`3`
    pub fn parse(level: &str) -> Option<Self> {
        match level.trim().to_ascii_lowercase().as_str() {
            "error" | "0" => Some(LogLevel::Error),
            "warning" | "warn" | "1" => Some(LogLevel::Warning),
            "info" | "2" => Some(LogLevel::Info),
            "debug" | "3" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Option<Code>,
    pub message: String,
    /// Source line the event refers to
    pub line: Option<usize>,
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    pub fn new(level: LogLevel, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code: None,
            message: message.to_string(),
            line: None,
            context: BTreeMap::new(),
        }
    }

    pub fn error(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, message).with_code(code)
    }

    /// Info event marking a completed step
    pub fn success(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Info, message).with_code(code)
    }

    pub fn with_code(mut self, code: Code) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_context(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn has_code(&self, code: Code) -> bool {
        self.code == Some(code)
    }

    pub fn category(&self) -> &'static str {
        self.code
            .map_or("General", |code| codes::get_category(code.as_str()))
    }

    pub fn requires_halt(&self) -> bool {
        self.code
            .is_some_and(|code| codes::requires_halt(code.as_str()))
    }

    /// One-line rendering: `[LEVEL] CODE message (line N) key=value ...`
    pub fn format(&self) -> String {
        let mut output = format!("[{}]", self.level.as_str());
        if let Some(code) = self.code {
            output.push(' ');
            output.push_str(code.as_str());
        }
        output.push(' ');
        output.push_str(&self.message);
        if let Some(line) = self.line {
            output.push_str(&format!(" (line {})", line));
        }
        for (key, value) in &self.context {
            output.push_str(&format!(" {}={}", key, value));
        }
        output
    }

    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339(),
            "level": self.level.as_str(),
            "message": self.message,
            "category": self.category(),
        });

        if let Some(code) = self.code {
            json["code"] = serde_json::json!(code.as_str());
            if let Some(info) = codes::get_code_info(code.as_str()) {
                json["severity"] = serde_json::json!(info.severity.as_str());
                json["requires_halt"] = serde_json::json!(info.halts);
            }
        }
        if let Some(line) = self.line {
            json["line"] = serde_json::json!(line);
        }
        if !self.context.is_empty() {
            json["context"] = serde_json::json!(self.context);
        }

        serde_json::to_string(&json)
    }
}
