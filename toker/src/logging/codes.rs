//! Codes attached to log events and error types
//!
//! Every code lives in one family module below. Error codes also have a
//! registry entry describing where they come from and whether processing
//! can continue after them.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

// ============================================================================
// CODE FAMILIES
// ============================================================================

pub mod system {
    use super::Code;

    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Opening and reading character sources
pub mod source {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const NOT_A_FILE: Code = Code::new("E006");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const SOURCE_NOT_OPEN: Code = Code::new("E013");
}

pub mod lexical {
    use super::Code;

    pub const TRUNCATED_LEXEME: Code = Code::new("E021");
    pub const INVALID_PUNCTUATION_ENTRY: Code = Code::new("E029");
}

pub mod semi {
    use super::Code;

    pub const INDEX_OUT_OF_RANGE: Code = Code::new("E045");
}

pub mod config {
    use super::Code;

    pub const CONFIG_READ_ERROR: Code = Code::new("E060");
    pub const CONFIG_PARSE_ERROR: Code = Code::new("E061");
}

/// Milestones reported at info or debug level
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const SOURCE_OPENED: Code = Code::new("I006");
    pub const SOURCE_CLOSED: Code = Code::new("I007");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const FOR_HEADER_FOLDED: Code = Code::new("I040");
    pub const CONFIG_LOADED: Code = Code::new("I060");
}

// ============================================================================
// REGISTRY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Registry entry for one error code
#[derive(Debug, Clone, Copy)]
pub struct CodeInfo {
    pub code: Code,
    pub category: &'static str,
    pub severity: Severity,
    /// Whether the operation that raised the code had to give up
    pub halts: bool,
    pub description: &'static str,
}

const fn entry(
    code: Code,
    category: &'static str,
    severity: Severity,
    halts: bool,
    description: &'static str,
) -> CodeInfo {
    CodeInfo {
        code,
        category,
        severity,
        halts,
        description,
    }
}

const ENTRIES: &[CodeInfo] = &[
    entry(system::INITIALIZATION_FAILURE, "System", Severity::Critical, true, "Logging or configuration could not be initialized"),
    entry(source::FILE_NOT_FOUND, "Source", Severity::Medium, true, "Source file does not exist"),
    entry(source::NOT_A_FILE, "Source", Severity::Medium, true, "Source path is not a regular file"),
    entry(source::PERMISSION_DENIED, "Source", Severity::Medium, true, "Source file is not readable"),
    entry(source::IO_ERROR, "Source", Severity::Medium, true, "Reading the source failed"),
    entry(source::INVALID_PATH, "Source", Severity::Medium, true, "Source path is empty or malformed"),
    entry(source::SOURCE_NOT_OPEN, "Source", Severity::Low, false, "No source has been opened"),
    entry(lexical::TRUNCATED_LEXEME, "Lexical", Severity::Low, false, "Input ended inside a comment or quoted literal"),
    entry(lexical::INVALID_PUNCTUATION_ENTRY, "Lexical", Severity::Low, false, "Punctuation entry has the wrong number of characters"),
    entry(semi::INDEX_OUT_OF_RANGE, "SemiExpression", Severity::Low, false, "Index lies outside the token group"),
    entry(config::CONFIG_READ_ERROR, "Configuration", Severity::Medium, false, "Configuration file could not be read"),
    entry(config::CONFIG_PARSE_ERROR, "Configuration", Severity::Medium, false, "Configuration file is not valid TOML"),
];

static REGISTRY: OnceLock<HashMap<&'static str, &'static CodeInfo>> = OnceLock::new();

fn registry() -> &'static HashMap<&'static str, &'static CodeInfo> {
    REGISTRY.get_or_init(|| ENTRIES.iter().map(|info| (info.code.as_str(), info)).collect())
}

pub fn get_code_info(code: &str) -> Option<&'static CodeInfo> {
    registry().get(code).copied()
}

/// Category of a registered code, `"General"` for anything else
pub fn get_category(code: &str) -> &'static str {
    get_code_info(code).map_or("General", |info| info.category)
}

pub fn get_severity(code: &str) -> Option<Severity> {
    get_code_info(code).map(|info| info.severity)
}

pub fn requires_halt(code: &str) -> bool {
    get_code_info(code).is_some_and(|info| info.halts)
}

pub fn get_description(code: &str) -> Option<&'static str> {
    get_code_info(code).map(|info| info.description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let info = get_code_info("E005").unwrap();
        assert_eq!(info.code, source::FILE_NOT_FOUND);
        assert_eq!(info.category, "Source");
        assert_eq!(info.severity, Severity::Medium);
        assert!(info.halts);
    }

    #[test]
    fn test_unregistered_codes() {
        assert_eq!(get_category("I020"), "General");
        assert_eq!(get_severity("Z999"), None);
        assert_eq!(get_description("Z999"), None);
        assert!(!requires_halt("Z999"));
    }

    #[test]
    fn test_registry_codes_are_unique() {
        assert_eq!(registry().len(), ENTRIES.len());
    }

    #[test]
    fn test_system_family_matches_logging_errors() {
        let info = get_code_info(system::INITIALIZATION_FAILURE.as_str()).unwrap();
        assert_eq!(info.category, "System");
        assert_eq!(
            crate::logging::LoggingError::LoggerAlreadySet.error_code(),
            system::INITIALIZATION_FAILURE
        );
        assert!(ENTRIES
            .iter()
            .filter(|info| info.category == "System")
            .all(|info| info.code == system::INITIALIZATION_FAILURE));
    }

    #[test]
    fn test_recoverable_codes() {
        assert!(!requires_halt(lexical::TRUNCATED_LEXEME.as_str()));
        assert!(!requires_halt(semi::INDEX_OUT_OF_RANGE.as_str()));
        assert!(requires_halt(source::PERMISSION_DENIED.as_str()));
    }
}
