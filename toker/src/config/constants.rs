pub mod compile_time {
    pub mod punctuation {
        /// Operators recognised as a single-character token before generic
        /// punctuation scanning
        pub const DEFAULT_ONE_CHAR_TOKENS: &[&str] = &[
            "<", ">", "[", "]", "(", ")", "{", "}", ".", ";", "=", "+", "-", "*",
        ];

        /// Operators recognised as a two-character token; checked before the
        /// single-character table
        pub const DEFAULT_TWO_CHAR_TOKENS: &[&str] = &[
            "<<", ">>", "::", "++", "--", "==", "+=", "-=", "*=", "/=", "&&", "||",
        ];
    }

    pub mod semi {
        /// Tokens that always end a semi-expression
        pub const TERMINATORS: &[&str] = &[";", "{", "}"];

        /// Prefix that makes a semi-expression absorb the rest of a `for` header
        pub const FOR_HEADER_MARKERS: &[&str] = &["for", "(", ";"];

        /// Extra terminator-delimited segments folded into a `for` header
        pub const FOR_HEADER_EXTRA_SEGMENTS: usize = 2;

        /// First token of a preprocessor directive line
        pub const PREPROCESSOR_MARKER: &str = "#";

        pub const NEWLINE_TOKEN: &str = "\n";
    }

    pub mod source {
        /// Byte-order mark skipped at the start of a source
        pub const UTF8_BOM: char = '\u{FEFF}';

        /// Line counter value before any newline is consumed
        pub const INITIAL_LINE_COUNT: usize = 1;

        /// Longest UTF-8 encoding of one character
        pub const MAX_UTF8_SEQUENCE_LENGTH: usize = 4;
    }

    pub mod logging {
        /// Maximum events retained by the in-memory logger
        pub const LOG_BUFFER_SIZE: usize = 10_000;
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::*;

    #[test]
    fn test_punctuation_tables_have_exact_lengths() {
        assert!(punctuation::DEFAULT_ONE_CHAR_TOKENS
            .iter()
            .all(|t| t.chars().count() == 1));
        assert!(punctuation::DEFAULT_TWO_CHAR_TOKENS
            .iter()
            .all(|t| t.chars().count() == 2));
    }

    #[test]
    fn test_for_markers_end_with_terminator() {
        let last = semi::FOR_HEADER_MARKERS[semi::FOR_HEADER_MARKERS.len() - 1];
        assert!(semi::TERMINATORS.contains(&last));
    }
}
