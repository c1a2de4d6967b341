//! Statement-sized token groups built from the tokenizer

use super::SemiError;
use crate::config::compile_time::semi::{
    FOR_HEADER_EXTRA_SEGMENTS, FOR_HEADER_MARKERS, NEWLINE_TOKEN, PREPROCESSOR_MARKER,
    TERMINATORS,
};
use crate::config::runtime::TokenizerPreferences;
use crate::lexical::Tokenizer;
use crate::log_debug;
use crate::logging::codes;
use crate::source::SourceError;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::path::Path;

/// Whether `token` always ends a semi-expression
pub fn is_terminator_token(token: &str) -> bool {
    TERMINATORS.contains(&token)
}

/// An ordered group of tokens ending at a terminator, plus the tokenizer that
/// feeds it.
///
/// `get_tokens` replaces the group with the next statement from the source.
/// The query operations (`find`, `predecessor`, `has_sequence`, ...) work on
/// whatever the group currently holds, so a group can also be built by hand.
#[derive(Debug, Default)]
pub struct SemiExpression {
    tokens: Vec<String>,
    tokenizer: Tokenizer,
}

impl SemiExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokenizer(tokenizer: Tokenizer) -> Self {
        Self {
            tokens: Vec::new(),
            tokenizer,
        }
    }

    pub fn with_preferences(preferences: &TokenizerPreferences) -> Self {
        Self::with_tokenizer(Tokenizer::with_preferences(preferences))
    }

    /// Group holding `tokens`, with no source attached
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            tokenizer: Tokenizer::new(),
        }
    }

    // ------------------------------------------------------------------
    // Source handling
    // ------------------------------------------------------------------

    /// Open a file; on failure the builder acts as an empty, finished group
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> bool {
        self.try_open(path).is_ok()
    }

    pub fn try_open<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SourceError> {
        self.tokens.clear();
        self.tokenizer.try_open(path)
    }

    pub fn open_text(&mut self, text: &str) {
        self.tokens.clear();
        self.tokenizer.open_text(text);
    }

    pub fn close(&mut self) {
        self.tokenizer.close();
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn tokenizer_mut(&mut self) -> &mut Tokenizer {
        &mut self.tokenizer
    }

    pub fn is_done(&self) -> bool {
        self.tokenizer.is_done()
    }

    pub fn line_count(&self) -> usize {
        self.tokenizer.line_count()
    }

    // ------------------------------------------------------------------
    // Collection
    // ------------------------------------------------------------------

    /// Replace the group with the next semi-expression.
    ///
    /// Tokens are pulled until a terminator or end of input; newline tokens
    /// are never stored. A group that starts a `for` header swallows two more
    /// segments so the whole header arrives as one unit.
    pub fn get_tokens(&mut self) -> &[String] {
        self.tokens.clear();
        self.collect_statement();
        &self.tokens
    }

    /// Fill the (empty) group with one segment, folding in the rest of a
    /// `for` header. Extra segments are collected the same way, so a header
    /// nested inside another header is folded too.
    fn collect_statement(&mut self) {
        self.collect_segment();
        if !self.has_sequence(FOR_HEADER_MARKERS) {
            return;
        }

        for _ in 0..FOR_HEADER_EXTRA_SEGMENTS {
            let head = std::mem::take(&mut self.tokens);
            self.collect_statement();
            let segment = std::mem::replace(&mut self.tokens, head);
            self.tokens.extend(segment);
        }
        log_debug!(code = codes::success::FOR_HEADER_FOLDED, "Folded for header",
            line = self.line_count(),
            "tokens" => self.tokens.len()
        );
    }

    /// Append tokens to the (empty) group up to and including a terminator
    fn collect_segment(&mut self) {
        while !self.tokenizer.is_done() {
            let Some(token) = self.tokenizer.get_token() else {
                break;
            };

            if token == NEWLINE_TOKEN {
                self.trim();
                if self.starts_with_preprocessor_marker() {
                    return;
                }
                continue;
            }

            let terminates = is_terminator_token(&token);
            self.tokens.push(token);
            if terminates {
                return;
            }
        }
    }

    fn starts_with_preprocessor_marker(&self) -> bool {
        self.tokens
            .iter()
            .find(|token| token.as_str() != NEWLINE_TOKEN)
            .is_some_and(|token| token == PREPROCESSOR_MARKER)
    }

    /// Drop newline tokens from the front of the group
    pub fn trim(&mut self) {
        let leading = self
            .tokens
            .iter()
            .take_while(|token| token.as_str() == NEWLINE_TOKEN)
            .count();
        self.tokens.drain(..leading);
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Whether `token` ends this group: `;`, `{`, `}`, or a newline closing a
    /// line that begins with `#`
    pub fn is_terminator(&self, token: &str) -> bool {
        if is_terminator_token(token) {
            return true;
        }
        token.starts_with('\n') && self.starts_with_preprocessor_marker()
    }

    pub fn has_terminator(&self) -> bool {
        self.tokens
            .last()
            .is_some_and(|last| self.is_terminator(last))
    }

    /// Ordered-subsequence check that stops one marker short.
    ///
    /// Scans once with a cursor into `markers`; succeeds as soon as every
    /// marker except the last has been matched in order. The final marker is
    /// never required to appear, so `["class", "{"]` matches any group
    /// containing `class`.
    pub fn has_sequence(&self, markers: &[&str]) -> bool {
        let Some(last_index) = markers.len().checked_sub(1) else {
            return false;
        };

        let mut position = 0;
        for token in &self.tokens {
            if position == last_index {
                return true;
            }
            if token == markers[position] {
                position += 1;
            }
        }
        position == last_index
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Index of the first occurrence of `token`
    pub fn find(&self, token: &str) -> Option<usize> {
        self.tokens.iter().position(|t| t == token)
    }

    /// Token just before the first occurrence of `token`; empty when `token`
    /// is absent or first
    pub fn predecessor(&self, token: &str) -> &str {
        match self.find(token) {
            Some(index) if index > 0 => &self.tokens[index - 1],
            _ => "",
        }
    }

    pub fn last_token(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }

    pub fn size(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.tokens.iter()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    pub fn add(&mut self, token: impl Into<String>) -> &mut Self {
        self.tokens.push(token.into());
        self
    }

    /// Append every token of `other`
    pub fn add_range(&mut self, other: &SemiExpression) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Insert before `index`; `index == size()` appends
    pub fn insert(&mut self, index: usize, token: impl Into<String>) -> bool {
        self.try_insert(index, token).is_ok()
    }

    pub fn try_insert(&mut self, index: usize, token: impl Into<String>) -> Result<(), SemiError> {
        if index > self.tokens.len() {
            return Err(self.out_of_range(index));
        }
        self.tokens.insert(index, token.into());
        Ok(())
    }

    /// Replace the token at `index`
    pub fn set(&mut self, index: usize, token: impl Into<String>) -> bool {
        self.try_set(index, token).is_ok()
    }

    pub fn try_set(&mut self, index: usize, token: impl Into<String>) -> Result<(), SemiError> {
        if index >= self.tokens.len() {
            return Err(self.out_of_range(index));
        }
        self.tokens[index] = token.into();
        Ok(())
    }

    fn out_of_range(&self, index: usize) -> SemiError {
        let size = self.tokens.len();
        log_debug!("Rejected semi-expression index", "index" => index, "size" => size);
        SemiError::IndexOutOfRange { index, size }
    }

    /// Group rendered for display, newline tokens left out
    pub fn show(&self) -> String {
        let mut output = String::from("--  ");
        for token in self.tokens.iter().filter(|t| t.as_str() != NEWLINE_TOKEN) {
            output.push_str(token);
            output.push(' ');
        }
        output
    }
}

impl fmt::Display for SemiExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

impl Index<usize> for SemiExpression {
    type Output = String;

    fn index(&self, index: usize) -> &String {
        &self.tokens[index]
    }
}

impl IndexMut<usize> for SemiExpression {
    fn index_mut(&mut self, index: usize) -> &mut String {
        &mut self.tokens[index]
    }
}

impl From<Vec<String>> for SemiExpression {
    fn from(tokens: Vec<String>) -> Self {
        Self::from_tokens(tokens)
    }
}

impl<S: Into<String>> FromIterator<S> for SemiExpression {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_tokens(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for SemiExpression {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.tokens.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a SemiExpression {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn semi(text: &str) -> SemiExpression {
        let mut semi = SemiExpression::new();
        semi.open_text(text);
        semi
    }

    fn group(tokens: &[&str]) -> SemiExpression {
        tokens.iter().copied().collect()
    }

    /// Every non-empty group `text` splits into
    fn groups_of(text: &str) -> Vec<Vec<String>> {
        let mut semi = semi(text);
        let mut groups = Vec::new();
        while !semi.is_done() {
            let tokens = semi.get_tokens();
            if !tokens.is_empty() {
                groups.push(tokens.to_vec());
            }
        }
        groups
    }

    #[test]
    fn test_groups_split_at_terminators() {
        assert_eq!(
            groups_of("int x = 1;\nclass A { int y; }"),
            vec![
                vec!["int", "x", "=", "1", ";"],
                vec!["class", "A", "{"],
                vec!["int", "y", ";"],
                vec!["}"],
            ]
        );
    }

    #[test]
    fn test_newlines_are_not_stored() {
        assert_eq!(
            groups_of("a\n+\nb\n;"),
            vec![vec!["a", "+", "b", ";"]]
        );
    }

    #[test]
    fn test_preprocessor_line_ends_at_newline() {
        assert_eq!(
            groups_of("#include <vector>\nint x;"),
            vec![
                vec!["#", "include", "<", "vector", ">"],
                vec!["int", "x", ";"],
            ]
        );
    }

    #[test]
    fn test_hash_later_in_line_is_not_a_directive() {
        assert_eq!(groups_of("x #\ny;"), vec![vec!["x", "#", "y", ";"]]);
    }

    #[test]
    fn test_for_header_is_folded() {
        assert_eq!(
            groups_of("for ( ; cond ; incr )"),
            vec![vec!["for", "(", ";", "cond", ";", "incr", ")"]]
        );
    }

    #[test]
    fn test_for_header_with_body() {
        assert_eq!(
            groups_of("for (int i = 0; i < n; ++i) { f(i); }"),
            vec![
                vec![
                    "for", "(", "int", "i", "=", "0", ";", "i", "<", "n", ";", "++", "i", ")",
                    "{"
                ],
                vec!["f", "(", "i", ")", ";"],
                vec!["}"],
            ]
        );
    }

    #[test]
    fn test_nested_for_headers_fold_into_one_group() {
        assert_eq!(
            groups_of("for(;;) for(;;) x;"),
            vec![vec![
                "for", "(", ";", ";", ")", "for", "(", ";", ";", ")", "x", ";"
            ]]
        );
    }

    #[test]
    fn test_nested_for_with_body() {
        assert_eq!(
            groups_of("for (i = 0; i < n; ++i)\n  for (j = 0; j < m; ++j) { a; }"),
            vec![
                vec![
                    "for", "(", "i", "=", "0", ";", "i", "<", "n", ";", "++", "i", ")", "for",
                    "(", "j", "=", "0", ";", "j", "<", "m", ";", "++", "j", ")", "{"
                ],
                vec!["a", ";"],
                vec!["}"],
            ]
        );
    }

    #[test]
    fn test_foreach_is_not_folded() {
        assert_eq!(
            groups_of("foreach (var x in y) { a; }"),
            vec![
                vec!["foreach", "(", "var", "x", "in", "y", ")", "{"],
                vec!["a", ";"],
                vec!["}"],
            ]
        );
    }

    #[test]
    fn test_get_tokens_after_exhaustion() {
        let mut semi = semi("a;");
        assert_eq!(semi.get_tokens(), ["a", ";"]);
        assert!(semi.is_done());

        assert!(semi.get_tokens().is_empty());
        assert_eq!(semi.size(), 0);
        assert!(semi.is_done());
    }

    #[test]
    fn test_last_group_without_terminator() {
        let mut semi = semi("a = b");
        assert_eq!(semi.get_tokens(), ["a", "=", "b"]);
        assert!(!semi.has_terminator());
        assert!(semi.is_done());
    }

    #[test]
    fn test_has_sequence_skips_last_marker() {
        let semi = group(&["public", "class", "Foo"]);
        assert!(semi.has_sequence(&["class", "{"]));

        let semi = group(&["public", "struct", "Foo"]);
        assert!(!semi.has_sequence(&["class", "{"]));
    }

    #[test]
    fn test_has_sequence_in_order() {
        let semi = group(&["void", "f", "(", ")", "{"]);
        assert!(semi.has_sequence(&["f", "(", ")"]));
        assert!(!semi.has_sequence(&["(", "f", ")"]));
        assert!(!semi.has_sequence(&[]));
        assert!(group(&[]).has_sequence(&["anything"]));
    }

    #[test]
    fn test_predecessor() {
        let semi = group(&["public", "class", "Foo"]);
        assert_eq!(semi.predecessor("Foo"), "class");
        assert_eq!(semi.predecessor("missing"), "");
        assert_eq!(semi.predecessor("public"), "");
    }

    #[test]
    fn test_find_and_contains() {
        let semi = group(&["a", "b", "a"]);
        assert_eq!(semi.find("a"), Some(0));
        assert_eq!(semi.find("b"), Some(1));
        assert_eq!(semi.find("c"), None);
        assert!(semi.contains("b"));
        assert!(!semi.contains("c"));
    }

    #[test]
    fn test_insert_range() {
        let mut semi = group(&["a", "c"]);

        assert!(semi.insert(1, "b"));
        assert!(semi.insert(3, "d"));
        assert!(!semi.insert(9, "z"));
        assert_eq!(semi.tokens(), ["a", "b", "c", "d"]);

        assert_matches!(
            semi.try_insert(7, "z"),
            Err(SemiError::IndexOutOfRange { index: 7, size: 4 })
        );
    }

    #[test]
    fn test_get_and_set() {
        let mut semi = group(&["x", "y"]);

        assert_eq!(semi.get(1), Some("y"));
        assert_eq!(semi.get(2), None);
        assert!(semi.set(0, "z"));
        assert!(!semi.set(2, "w"));
        assert_matches!(semi.try_set(5, "w"), Err(SemiError::IndexOutOfRange { .. }));

        semi[1] = "q".to_string();
        assert_eq!(semi[0], "z");
        assert_eq!(semi[1], "q");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut semi = group(&["a"]);
        semi.clear();
        assert_eq!(semi.size(), 0);
        semi.clear();
        assert_eq!(semi.size(), 0);
        assert!(semi.is_empty());
    }

    #[test]
    fn test_has_terminator() {
        assert!(group(&["a", ";"]).has_terminator());
        assert!(group(&["{"]).has_terminator());
        assert!(!group(&["a"]).has_terminator());
        assert!(!group(&[]).has_terminator());
        assert!(group(&["\n", "#", "define", "\n"]).has_terminator());
        assert!(!group(&["x", "#", "\n"]).has_terminator());
    }

    #[test]
    fn test_trim() {
        let mut semi = group(&["\n", "\n", "#", "\n"]);
        semi.trim();
        assert_eq!(semi.tokens(), ["#", "\n"]);
    }

    #[test]
    fn test_add_range_and_extend() {
        let mut semi = group(&["a"]);
        semi.add("b").add_range(&group(&["c", "d"]));
        semi.extend(["e"]);

        assert_eq!(semi.tokens(), ["a", "b", "c", "d", "e"]);
        assert_eq!(semi.last_token(), Some("e"));
        assert_eq!(group(&[]).last_token(), None);
    }

    #[test]
    fn test_display_and_show() {
        let semi = group(&["int", "x", "\n", ";"]);
        assert_eq!(semi.to_string(), "int x \n ;");
        assert_eq!(semi.show(), "--  int x ; ");

        let collected: Vec<&String> = (&semi).into_iter().collect();
        assert_eq!(collected.len(), 4);
        assert_eq!(semi.iter().count(), 4);
    }

    #[test]
    fn test_from_vec() {
        let semi = SemiExpression::from(vec!["a".to_string()]);
        assert_eq!(semi.size(), 1);
        assert!(semi.is_done());
    }

    #[test]
    fn test_line_count_follows_tokenizer() {
        let mut semi = semi("a;\nb;\nc;");
        semi.get_tokens();
        assert_eq!(semi.line_count(), 1);
        semi.get_tokens();
        assert_eq!(semi.line_count(), 2);
    }

    #[test]
    fn test_comments_kept_when_enabled() {
        let mut semi = semi("");
        semi.tokenizer_mut().set_return_comments(true);
        semi.open_text("x; // note\ny;");

        assert_eq!(semi.get_tokens(), ["x", ";"]);
        assert_eq!(semi.get_tokens(), ["// note", "y", ";"]);
    }

    #[test]
    fn test_open_file_and_find_classes() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("demo.cs");
        fs::write(
            &path,
            "namespace N {\n  public class Foo {\n    int x;\n  }\n  class Bar : Foo { }\n}\n",
        )
        .unwrap();

        let mut semi = SemiExpression::new();
        assert!(semi.open(&path));

        let mut classes = Vec::new();
        while !semi.is_done() {
            semi.get_tokens();
            if semi.has_sequence(&["class", "{"]) {
                classes.push(semi.to_string());
            }
        }
        semi.close();

        assert_eq!(classes, vec!["public class Foo {", "class Bar : Foo {"]);
    }

    #[test]
    fn test_failed_open_behaves_as_empty() {
        let temp_dir = tempdir().unwrap();
        let mut semi = group(&["stale"]);

        assert!(!semi.open(temp_dir.path().join("missing.cs")));
        assert_eq!(semi.size(), 0);
        assert!(semi.is_done());
        assert!(semi.get_tokens().is_empty());
        assert!(!semi.has_terminator());
        assert_eq!(semi.predecessor("x"), "");
    }
}
