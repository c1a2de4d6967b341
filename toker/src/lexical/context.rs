//! Shared state threaded through every lexical state

use super::punctuation::PunctuationTable;
use super::state::LexState;
use crate::source::{CharacterSource, SourceError};
use std::path::Path;

/// Owns the character source, the current lexical state and the operator
/// tables. One context serves every token of one tokenizer.
#[derive(Debug, Default)]
pub struct TokenContext {
    pub(crate) source: CharacterSource,
    pub(crate) current: Option<LexState>,
    pub(crate) punctuation: PunctuationTable,
}

impl TokenContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_punctuation(punctuation: PunctuationTable) -> Self {
        Self {
            punctuation,
            ..Self::default()
        }
    }

    /// Open a file and enter the state its first character calls for
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> bool {
        self.try_open(path).is_ok()
    }

    pub fn try_open<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SourceError> {
        let result = self.source.try_open(path);
        self.current = match result {
            Ok(()) => LexState::classify(&mut self.source),
            Err(_) => None,
        };
        result
    }

    pub fn open_text(&mut self, text: &str) {
        self.source.open_text(text);
        self.current = LexState::classify(&mut self.source);
    }

    pub fn close(&mut self) {
        self.source.close();
        self.current = None;
    }

    /// Extract one raw token from the current state, then move to the state
    /// the remaining input calls for. `None` once input is exhausted.
    pub fn next_lexeme(&mut self) -> Option<(LexState, String)> {
        let state = self.current?;
        let token = state.extract(self);
        self.current = LexState::classify(&mut self.source);
        Some((state, token))
    }

    pub fn current_state(&self) -> Option<LexState> {
        self.current
    }

    /// True when there is no current state or every character has been
    /// consumed, buffered lookahead included
    pub fn is_done(&self) -> bool {
        self.current.is_none() || self.source.is_exhausted()
    }

    pub fn line_count(&self) -> usize {
        self.source.line_count()
    }

    pub fn source(&self) -> &CharacterSource {
        &self.source
    }

    pub fn punctuation(&self) -> &PunctuationTable {
        &self.punctuation
    }

    pub fn punctuation_mut(&mut self) -> &mut PunctuationTable {
        &mut self.punctuation
    }
}
