//! Lexical analysis: the state machine and the tokenizer built on it
//!
//! `TokenContext` owns the character source, the current `LexState` and the
//! punctuation tables. Each state extracts one raw token. `Tokenizer` drives
//! the context and filters out whitespace and (optionally) comments.

pub mod context;
pub mod punctuation;
pub mod state;
pub mod tokenizer;

use crate::config::runtime::TokenizerPreferences;
use crate::source::SourceError;
use std::path::Path;

pub use context::TokenContext;
pub use punctuation::PunctuationTable;
pub use state::{is_escaped, LexState};
pub use tokenizer::Tokenizer;

// ============================================================================
// MODULE API
// ============================================================================

/// Create a tokenizer with default settings
pub fn create_tokenizer() -> Tokenizer {
    Tokenizer::new()
}

/// Create a tokenizer configured from runtime preferences
pub fn create_tokenizer_with_preferences(preferences: &TokenizerPreferences) -> Tokenizer {
    Tokenizer::with_preferences(preferences)
}

/// All significant tokens of `text`, newlines included
pub fn tokenize_text(text: &str) -> Vec<String> {
    let mut tokenizer = Tokenizer::new();
    tokenizer.open_text(text);
    tokenizer.collect()
}

/// All significant tokens of a file, each paired with the line it ends on
pub fn tokenize_file<P: AsRef<Path>>(
    path: P,
    preferences: &TokenizerPreferences,
) -> Result<Vec<(usize, String)>, SourceError> {
    let mut tokenizer = Tokenizer::with_preferences(preferences);
    tokenizer.try_open(path)?;

    let mut tokens = Vec::new();
    while let Some(token) = tokenizer.get_token() {
        tokens.push((tokenizer.line_count(), token));
    }
    tokenizer.close();

    Ok(tokens)
}
