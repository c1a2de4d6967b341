//! Lexical categories recovered from token text

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category a token belongs to; one per lexical state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenCategory {
    /// Run of whitespace other than newline
    WhiteSpace,
    /// A single `\n`
    NewLine,
    /// Identifier, keyword or number
    AlphaNumeric,
    /// Operator or other punctuation run
    Punctuation,
    /// `//` comment, without its newline
    SingleLineComment,
    /// `/* ... */` comment
    MultiLineComment,
    /// Character literal
    SingleQuote,
    /// String literal, plain or verbatim
    DoubleQuote,
}

impl TokenCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhiteSpace => "whitespace",
            Self::NewLine => "newline",
            Self::AlphaNumeric => "alphanumeric",
            Self::Punctuation => "punctuation",
            Self::SingleLineComment => "single-line-comment",
            Self::MultiLineComment => "multi-line-comment",
            Self::SingleQuote => "single-quote",
            Self::DoubleQuote => "double-quote",
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Self::SingleLineComment | Self::MultiLineComment)
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self, Self::WhiteSpace)
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// === CLASSIFICATION FUNCTIONS ===

/// Whitespace that is not a line break
pub fn is_blank(ch: char) -> bool {
    ch.is_whitespace() && ch != '\n'
}

/// Letter, digit or underscore
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Recover the category of a token from its text.
///
/// Checks follow the state machine's precedence, so every token the
/// tokenizer produces maps back to the state that produced it. Returns `None`
/// for the empty string.
pub fn classify_token(token: &str) -> Option<TokenCategory> {
    let mut chars = token.chars();
    let first = chars.next()?;
    let second = chars.next();

    let category = match (first, second) {
        ('\n', _) => TokenCategory::NewLine,
        (ch, _) if is_blank(ch) => TokenCategory::WhiteSpace,
        (ch, _) if is_word_char(ch) => TokenCategory::AlphaNumeric,
        ('/', Some('/')) => TokenCategory::SingleLineComment,
        ('/', Some('*')) => TokenCategory::MultiLineComment,
        ('\'', _) => TokenCategory::SingleQuote,
        ('"', _) | ('@', Some('"')) => TokenCategory::DoubleQuote,
        _ => TokenCategory::Punctuation,
    };

    Some(category)
}
