//! Pull-based tokenizer over the lexical state machine

use super::context::TokenContext;
use super::punctuation::PunctuationTable;
use crate::config::runtime::TokenizerPreferences;
use crate::logging::codes;
use crate::source::SourceError;
use crate::tokens::TokenCategory;
use crate::{log_debug, log_success};
use std::path::Path;

/// Drives the state machine and hands out one significant token at a time.
///
/// Whitespace is always dropped. Comments are dropped unless
/// `return_comments` is set. Newline tokens are delivered so callers can
/// track line structure.
#[derive(Debug, Default)]
pub struct Tokenizer {
    context: TokenContext,
    return_comments: bool,
    tokens_delivered: usize,
    completion_reported: bool,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizer configured from runtime preferences; invalid extra operators
    /// are skipped
    pub fn with_preferences(preferences: &TokenizerPreferences) -> Self {
        let mut punctuation = PunctuationTable::default();
        for token in &preferences.extra_one_char_tokens {
            punctuation.add_one_char_token(token);
        }
        for token in &preferences.extra_two_char_tokens {
            punctuation.add_two_char_token(token);
        }

        Self {
            context: TokenContext::with_punctuation(punctuation),
            return_comments: preferences.return_comments,
            ..Self::default()
        }
    }

    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> bool {
        self.try_open(path).is_ok()
    }

    pub fn try_open<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SourceError> {
        self.reset_counters();
        self.context.try_open(path)
    }

    pub fn open_text(&mut self, text: &str) {
        self.reset_counters();
        self.context.open_text(text);
    }

    pub fn close(&mut self) {
        self.context.close();
    }

    fn reset_counters(&mut self) {
        self.tokens_delivered = 0;
        self.completion_reported = false;
    }

    pub fn set_return_comments(&mut self, return_comments: bool) {
        log_debug!("Comment delivery changed", "return_comments" => return_comments);
        self.return_comments = return_comments;
    }

    pub fn return_comments(&self) -> bool {
        self.return_comments
    }

    /// Next token that survives filtering, or `None` at end of input.
    /// Never returns an empty string.
    pub fn get_token(&mut self) -> Option<String> {
        while !self.is_done() {
            let Some((state, token)) = self.context.next_lexeme() else {
                break;
            };
            if self.keeps(state.category()) {
                self.tokens_delivered += 1;
                return Some(token);
            }
        }

        self.report_completion();
        None
    }

    /// Like `get_token`, but distinguishes "nothing was ever opened" from end
    /// of input
    pub fn try_get_token(&mut self) -> Result<Option<String>, SourceError> {
        if !self.context.source().is_open() {
            return Err(SourceError::NotOpen);
        }
        Ok(self.get_token())
    }

    fn keeps(&self, category: TokenCategory) -> bool {
        if category.is_whitespace() {
            return false;
        }
        !category.is_comment() || self.return_comments
    }

    fn report_completion(&mut self) {
        if self.completion_reported || !self.context.source().is_open() {
            return;
        }
        self.completion_reported = true;
        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization complete",
            "origin" => self.context.source().origin().unwrap_or("<unknown>"),
            "tokens" => self.tokens_delivered,
            "lines" => self.line_count()
        );
    }

    pub fn is_done(&self) -> bool {
        self.context.is_done()
    }

    /// Newlines consumed so far, plus one
    pub fn line_count(&self) -> usize {
        self.context.line_count()
    }

    pub fn add_one_char_token(&mut self, token: &str) -> bool {
        self.context.punctuation_mut().add_one_char_token(token)
    }

    pub fn remove_one_char_token(&mut self, token: &str) -> bool {
        self.context.punctuation_mut().remove_one_char_token(token)
    }

    pub fn add_two_char_token(&mut self, token: &str) -> bool {
        self.context.punctuation_mut().add_two_char_token(token)
    }

    pub fn remove_two_char_token(&mut self, token: &str) -> bool {
        self.context.punctuation_mut().remove_two_char_token(token)
    }

    pub fn punctuation(&self) -> &PunctuationTable {
        self.context.punctuation()
    }
}

impl Iterator for Tokenizer {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.get_token()
    }
}
