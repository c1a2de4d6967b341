//! Semi-expressions: token groups that end at a statement or scope boundary
//!
//! A `SemiExpression` pulls tokens from its own `Tokenizer` until it sees
//! `;`, `{`, `}`, or the newline closing a `#` directive. A `for` header is
//! delivered whole instead of being split at its inner semicolons.

pub mod semi_expression;

pub use semi_expression::{is_terminator_token, SemiExpression};

use crate::config::runtime::TokenizerPreferences;
use crate::logging::codes;
use crate::source::SourceError;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SemiError {
    #[error("Index {index} is out of range for a group of {size} tokens")]
    IndexOutOfRange { index: usize, size: usize },
}

impl SemiError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::IndexOutOfRange { .. } => codes::semi::INDEX_OUT_OF_RANGE,
        }
    }
}

// ============================================================================
// MODULE API
// ============================================================================

/// Create a semi-expression builder with default settings
pub fn create_semi_expression() -> SemiExpression {
    SemiExpression::new()
}

/// Every non-empty semi-expression of `text`
pub fn split_text(text: &str) -> Vec<Vec<String>> {
    let mut semi = SemiExpression::new();
    semi.open_text(text);
    drain_groups(&mut semi)
        .into_iter()
        .map(|(_, tokens)| tokens)
        .collect()
}

/// Every non-empty semi-expression of a file, each paired with the line it
/// ends on
pub fn split_file<P: AsRef<Path>>(
    path: P,
    preferences: &TokenizerPreferences,
) -> Result<Vec<(usize, Vec<String>)>, SourceError> {
    let mut semi = SemiExpression::with_preferences(preferences);
    semi.try_open(path)?;
    let groups = drain_groups(&mut semi);
    semi.close();
    Ok(groups)
}

fn drain_groups(semi: &mut SemiExpression) -> Vec<(usize, Vec<String>)> {
    let mut groups = Vec::new();
    while !semi.is_done() {
        let tokens = semi.get_tokens().to_vec();
        if !tokens.is_empty() {
            groups.push((semi.line_count(), tokens));
        }
    }
    groups
}
