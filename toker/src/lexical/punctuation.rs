//! One- and two-character operator tables

use crate::config::compile_time::punctuation::{DEFAULT_ONE_CHAR_TOKENS, DEFAULT_TWO_CHAR_TOKENS};
use crate::log_error;
use crate::logging::codes;
use std::collections::HashSet;

/// Operators the punctuation state emits as whole tokens instead of scanning
/// a generic punctuation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunctuationTable {
    one_char: HashSet<String>,
    two_char: HashSet<String>,
}

impl PunctuationTable {
    /// Table with no entries
    pub fn empty() -> Self {
        Self {
            one_char: HashSet::new(),
            two_char: HashSet::new(),
        }
    }

    /// Add a single-character operator; rejects anything that is not exactly
    /// one character
    pub fn add_one_char_token(&mut self, token: &str) -> bool {
        if token.chars().count() != 1 {
            log_error!(codes::lexical::INVALID_PUNCTUATION_ENTRY,
                "Rejected one-character punctuation entry",
                "entry" => token
            );
            return false;
        }
        self.one_char.insert(token.to_string());
        true
    }

    pub fn remove_one_char_token(&mut self, token: &str) -> bool {
        self.one_char.remove(token)
    }

    /// Add a two-character operator; rejects anything that is not exactly
    /// two characters
    pub fn add_two_char_token(&mut self, token: &str) -> bool {
        if token.chars().count() != 2 {
            log_error!(codes::lexical::INVALID_PUNCTUATION_ENTRY,
                "Rejected two-character punctuation entry",
                "entry" => token
            );
            return false;
        }
        self.two_char.insert(token.to_string());
        true
    }

    pub fn remove_two_char_token(&mut self, token: &str) -> bool {
        self.two_char.remove(token)
    }

    pub fn is_one_char_token(&self, token: &str) -> bool {
        self.one_char.contains(token)
    }

    pub fn is_two_char_token(&self, token: &str) -> bool {
        self.two_char.contains(token)
    }

    /// Operators in sorted order, for display
    pub fn one_char_tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.one_char.iter().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }

    pub fn two_char_tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.two_char.iter().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }
}

impl Default for PunctuationTable {
    fn default() -> Self {
        Self {
            one_char: DEFAULT_ONE_CHAR_TOKENS.iter().map(|t| t.to_string()).collect(),
            two_char: DEFAULT_TWO_CHAR_TOKENS.iter().map(|t| t.to_string()).collect(),
        }
    }
}
