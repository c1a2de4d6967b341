//! Token classification
//!
//! Tokens travel through the tokenizer and semi-expression builder as plain
//! `String`s. The category that produced a token is not stored; it is
//! recovered from the text with [`classify_token`].

pub mod category;

pub use category::{classify_token, is_blank, is_word_char, TokenCategory};

/// A token as delivered to consumers
pub type Token = String;
