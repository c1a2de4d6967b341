//! Lexical states and their extraction rules
//!
//! Each state pulls exactly one raw token from the context's source. Which
//! state runs next depends only on the upcoming one or two characters.

use super::context::TokenContext;
use super::punctuation::PunctuationTable;
use crate::log_debug;
use crate::logging::codes;
use crate::source::CharacterSource;
use crate::tokens::{is_blank, is_word_char, TokenCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexState {
    WhiteSpace,
    NewLine,
    AlphaNumeric,
    Punctuation,
    SingleLineComment,
    MultiLineComment,
    SingleQuote,
    DoubleQuote,
}

impl LexState {
    /// State for the characters at the front of `source`, or `None` at end of
    /// input. Looks one character ahead, two only after `/` or `@`.
    pub fn classify(source: &mut CharacterSource) -> Option<Self> {
        let first = source.peek(0)?;

        let state = if is_blank(first) {
            Self::WhiteSpace
        } else if first == '\n' {
            Self::NewLine
        } else if is_word_char(first) {
            Self::AlphaNumeric
        } else {
            match first {
                '/' => match source.peek(1) {
                    Some('/') => Self::SingleLineComment,
                    Some('*') => Self::MultiLineComment,
                    _ => Self::Punctuation,
                },
                '\'' => Self::SingleQuote,
                '"' => Self::DoubleQuote,
                '@' if source.peek(1) == Some('"') => Self::DoubleQuote,
                _ => Self::Punctuation,
            }
        };

        Some(state)
    }

    /// Category of the tokens this state produces
    pub fn category(&self) -> TokenCategory {
        match self {
            Self::WhiteSpace => TokenCategory::WhiteSpace,
            Self::NewLine => TokenCategory::NewLine,
            Self::AlphaNumeric => TokenCategory::AlphaNumeric,
            Self::Punctuation => TokenCategory::Punctuation,
            Self::SingleLineComment => TokenCategory::SingleLineComment,
            Self::MultiLineComment => TokenCategory::MultiLineComment,
            Self::SingleQuote => TokenCategory::SingleQuote,
            Self::DoubleQuote => TokenCategory::DoubleQuote,
        }
    }

    /// Consume one token from the context's source.
    ///
    /// The context must currently be in this state, so at least one character
    /// is available. If input ends inside a comment or literal, the partial
    /// lexeme is returned as-is.
    pub fn extract(self, context: &mut TokenContext) -> String {
        let source = &mut context.source;

        match self {
            Self::WhiteSpace => extract_run(source, is_blank),
            Self::NewLine => source.next().into_iter().collect(),
            Self::AlphaNumeric => extract_run(source, is_word_char),
            Self::SingleLineComment => extract_single_line_comment(source),
            Self::MultiLineComment => extract_multi_line_comment(source),
            Self::SingleQuote => extract_single_quote(source),
            Self::DoubleQuote => extract_double_quote(source),
            Self::Punctuation => extract_punctuation(source, &context.punctuation),
        }
    }
}

/// Whether the last character of `token` is escaped: an odd number of
/// backslashes directly before it
pub fn is_escaped(token: &str) -> bool {
    token
        .chars()
        .rev()
        .skip(1)
        .take_while(|&ch| ch == '\\')
        .count()
        % 2
        == 1
}

fn extract_run(source: &mut CharacterSource, accept: fn(char) -> bool) -> String {
    let mut token = String::new();
    token.extend(source.next());
    while source.peek(0).is_some_and(accept) {
        token.extend(source.next());
    }
    token
}

fn extract_single_line_comment(source: &mut CharacterSource) -> String {
    let mut token: String = source.by_ref().take(2).collect();
    while source.peek(0).is_some_and(|ch| ch != '\n') {
        token.extend(source.next());
    }
    token
}

fn extract_multi_line_comment(source: &mut CharacterSource) -> String {
    let mut token: String = source.by_ref().take(2).collect();
    let mut previous = None;

    for ch in source.by_ref() {
        token.push(ch);
        if previous == Some('*') && ch == '/' {
            return token;
        }
        previous = Some(ch);
    }

    truncated(LexState::MultiLineComment, token, source)
}

fn extract_single_quote(source: &mut CharacterSource) -> String {
    let mut token: String = source.next().into_iter().collect();

    for ch in source.by_ref() {
        token.push(ch);
        if ch == '\'' && !is_escaped(&token) {
            return token;
        }
    }

    truncated(LexState::SingleQuote, token, source)
}

fn extract_double_quote(source: &mut CharacterSource) -> String {
    let mut token: String = source.next().into_iter().collect();
    let verbatim = token.starts_with('@');
    if verbatim && source.peek(0) == Some('"') {
        token.extend(source.next());
    }

    // Backslashes do not escape inside a verbatim string
    for ch in source.by_ref() {
        token.push(ch);
        if ch == '"' && (verbatim || !is_escaped(&token)) {
            return token;
        }
    }

    truncated(LexState::DoubleQuote, token, source)
}

fn extract_punctuation(source: &mut CharacterSource, table: &PunctuationTable) -> String {
    if let (Some(first), Some(second)) = (source.peek(0), source.peek(1)) {
        let pair: String = [first, second].iter().collect();
        if table.is_two_char_token(&pair) {
            source.next();
            source.next();
            return pair;
        }
    }

    let mut token = String::new();
    token.extend(source.next());
    if table.is_one_char_token(&token) {
        return token;
    }

    while LexState::classify(source) == Some(LexState::Punctuation) {
        token.extend(source.next());
    }
    token
}

fn truncated(state: LexState, token: String, source: &CharacterSource) -> String {
    log_debug!(code = codes::lexical::TRUNCATED_LEXEME, "Input ended inside a lexeme",
        line = source.line_count(),
        "category" => state.category(),
        "chars" => token.chars().count()
    );
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(text: &str) -> CharacterSource {
        let mut source = CharacterSource::new();
        source.open_text(text);
        source
    }

    fn context(text: &str) -> TokenContext {
        let mut context = TokenContext::new();
        context.open_text(text);
        context
    }

    /// Run the state that `text` starts in and return its token
    fn first_token(text: &str) -> (LexState, String) {
        let mut context = context(text);
        context.next_lexeme().unwrap()
    }

    #[test]
    fn test_classification_precedence() {
        assert_eq!(LexState::classify(&mut source(" x")), Some(LexState::WhiteSpace));
        assert_eq!(LexState::classify(&mut source("\tx")), Some(LexState::WhiteSpace));
        assert_eq!(LexState::classify(&mut source("\nx")), Some(LexState::NewLine));
        assert_eq!(LexState::classify(&mut source("_x")), Some(LexState::AlphaNumeric));
        assert_eq!(LexState::classify(&mut source("9")), Some(LexState::AlphaNumeric));
        assert_eq!(LexState::classify(&mut source("//")), Some(LexState::SingleLineComment));
        assert_eq!(LexState::classify(&mut source("/*")), Some(LexState::MultiLineComment));
        assert_eq!(LexState::classify(&mut source("'a'")), Some(LexState::SingleQuote));
        assert_eq!(LexState::classify(&mut source("\"a\"")), Some(LexState::DoubleQuote));
        assert_eq!(LexState::classify(&mut source("@\"a\"")), Some(LexState::DoubleQuote));
        assert_eq!(LexState::classify(&mut source("@x")), Some(LexState::Punctuation));
        assert_eq!(LexState::classify(&mut source("/")), Some(LexState::Punctuation));
        assert_eq!(LexState::classify(&mut source("")), None);
    }

    #[test]
    fn test_classify_reads_second_char_only_when_needed() {
        let mut src = source("ab");
        LexState::classify(&mut src);
        assert!(!src.end());

        let mut src = source("/b");
        LexState::classify(&mut src);
        assert!(src.end());
    }

    #[test]
    fn test_is_escaped() {
        assert!(!is_escaped("'"));
        assert!(!is_escaped("\"abc\""));
        assert!(is_escaped("'\\'"));
        assert!(!is_escaped("'\\\\'"));
        assert!(is_escaped("\"a\\\\\\\""));
    }

    #[test]
    fn test_whitespace_run_stops_at_newline() {
        assert_eq!(first_token(" \t \nx"), (LexState::WhiteSpace, " \t ".to_string()));
    }

    #[test]
    fn test_newline_is_single_char() {
        assert_eq!(first_token("\n\n"), (LexState::NewLine, "\n".to_string()));
    }

    #[test]
    fn test_alphanumeric_run() {
        assert_eq!(first_token("foo_1(x)"), (LexState::AlphaNumeric, "foo_1".to_string()));
    }

    #[test]
    fn test_single_line_comment_excludes_newline() {
        assert_eq!(
            first_token("// note here\nx"),
            (LexState::SingleLineComment, "// note here".to_string())
        );
        assert_eq!(first_token("//"), (LexState::SingleLineComment, "//".to_string()));
    }

    #[test]
    fn test_multi_line_comment() {
        assert_eq!(
            first_token("/* a\n * b */x"),
            (LexState::MultiLineComment, "/* a\n * b */".to_string())
        );
        // The opening star cannot also close the comment
        assert_eq!(
            first_token("/*/ x */"),
            (LexState::MultiLineComment, "/*/ x */".to_string())
        );
    }

    #[test]
    fn test_multi_line_comment_counts_lines() {
        let mut context = context("/* a\nb\n*/");
        context.next_lexeme();
        assert_eq!(context.line_count(), 3);
    }

    #[test]
    fn test_single_quote_escapes() {
        assert_eq!(first_token("'a' b"), (LexState::SingleQuote, "'a'".to_string()));
        assert_eq!(first_token("'\\''x"), (LexState::SingleQuote, "'\\''".to_string()));
        assert_eq!(first_token("'\\\\'x"), (LexState::SingleQuote, "'\\\\'".to_string()));
    }

    #[test]
    fn test_double_quote_escapes() {
        assert_eq!(
            first_token("\"say \\\"hi\\\"\";"),
            (LexState::DoubleQuote, "\"say \\\"hi\\\"\"".to_string())
        );
        assert_eq!(first_token("\"\""), (LexState::DoubleQuote, "\"\"".to_string()));
    }

    #[test]
    fn test_verbatim_string_ignores_backslash() {
        let mut context = context("@\"a\\\"b\"");
        let (state, token) = context.next_lexeme().unwrap();

        assert_eq!(state, LexState::DoubleQuote);
        assert_eq!(token, "@\"a\\\"");
        assert_eq!(context.next_lexeme().unwrap().1, "b");
    }

    #[test]
    fn test_truncated_lexemes_are_returned() {
        assert_eq!(first_token("\"abc"), (LexState::DoubleQuote, "\"abc".to_string()));
        assert_eq!(first_token("'a"), (LexState::SingleQuote, "'a".to_string()));
        assert_eq!(first_token("/* open"), (LexState::MultiLineComment, "/* open".to_string()));
        assert_eq!(first_token("\"a\\"), (LexState::DoubleQuote, "\"a\\".to_string()));
    }

    #[test]
    fn test_punctuation_prefers_two_char_tokens() {
        assert_eq!(first_token("::x"), (LexState::Punctuation, "::".to_string()));
        assert_eq!(first_token("+=1"), (LexState::Punctuation, "+=".to_string()));
        assert_eq!(first_token("<<<"), (LexState::Punctuation, "<<".to_string()));
    }

    #[test]
    fn test_punctuation_one_char_tokens() {
        assert_eq!(first_token(";;"), (LexState::Punctuation, ";".to_string()));
        assert_eq!(first_token("(x"), (LexState::Punctuation, "(".to_string()));
    }

    #[test]
    fn test_generic_punctuation_run() {
        assert_eq!(first_token("!=b"), (LexState::Punctuation, "!=".to_string()));
        assert_eq!(first_token("%^ x"), (LexState::Punctuation, "%^".to_string()));
        // A run stops before anything that opens a comment or literal
        assert_eq!(first_token("!//c"), (LexState::Punctuation, "!".to_string()));
        assert_eq!(first_token("!\"s\""), (LexState::Punctuation, "!".to_string()));
        assert_eq!(first_token("!@\"s\""), (LexState::Punctuation, "!".to_string()));
    }

    #[test]
    fn test_category_matches_classification() {
        for (text, state) in [
            (" ", LexState::WhiteSpace),
            ("\n", LexState::NewLine),
            ("x", LexState::AlphaNumeric),
            ("//", LexState::SingleLineComment),
            ("/**/", LexState::MultiLineComment),
            ("'a'", LexState::SingleQuote),
            ("\"a\"", LexState::DoubleQuote),
            ("+", LexState::Punctuation),
        ] {
            let (produced, token) = first_token(text);
            assert_eq!(produced, state);
            assert_eq!(crate::tokens::classify_token(&token), Some(state.category()));
        }
    }
}
