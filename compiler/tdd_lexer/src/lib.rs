//! Scanner for the TDD data language.
//!
//! TDD has no fixed token grammar: whether `:` ends a word depends on
//! whether the parser is reading a hash key, and a line break between two
//! items acts as a comma. The scanner is therefore pulled by the parser one
//! token at a time with a [`WordMode`], and reports the trivia it skipped
//! before each token in [`TokenFlags`].
//!
//! # Architecture
//!
//! - [`Cursor`]: position over the source text with `memchr` helpers
//! - [`Scanner`]: trivia skipping and token dispatch
//! - `cook_escape`: quoted string bodies and escape sequences
//! - [`chars`]: character classes (whitespace, unquoted-word characters)
//! - [`LexError`]: structured errors with the offending offset

pub mod chars;
mod cook_escape;
mod cursor;
mod lex_error;
mod scanner;
mod token;

pub use cursor::Cursor;
pub use lex_error::{LexError, LexErrorKind};
pub use scanner::Scanner;
pub use token::{Token, TokenFlags, TokenKind, WordMode};
