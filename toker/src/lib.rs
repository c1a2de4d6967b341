// Internal modules
pub mod config;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod semi;
pub mod source;
pub mod tokens;

// Re-export key types for library consumers
pub use config::{ConfigError, RuntimeConfig, TokenizerPreferences};
pub use lexical::{PunctuationTable, Tokenizer};
pub use semi::{SemiError, SemiExpression};
pub use source::{CharacterSource, SourceError};
pub use tokens::{Token, TokenCategory};
