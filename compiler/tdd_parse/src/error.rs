//! Parse error types.

use tdd_diagnostic::{Diagnostic, SourceLocation, ToDiagnostic};
use tdd_lexer::LexError;
use thiserror::Error;

/// Reason attached to a misplaced colon inside a list.
pub const COLON_IN_LIST: &str = "This is a list, and not a hash.";

/// Reason attached to a second colon after a hash value.
pub const COLON_AFTER_VALUE: &str =
    "Colon is for separating the key from the value, and the value was already given previously.";

/// A syntax error, located in the parsed text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("TDD syntax error: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: SourceLocation,
    /// Where the unclosed list or hash was opened.
    pub opener: Option<SourceLocation>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, location: SourceLocation) -> Self {
        ParseError {
            kind,
            location,
            opener: None,
        }
    }

    #[must_use]
    pub fn with_opener(mut self, opener: SourceLocation) -> Self {
        self.opener = Some(opener);
        self
    }

    /// Byte offset of the error in the full text.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.location.offset()
    }

    /// 1-based character position of the error.
    pub fn char_position(&self) -> usize {
        self.location.char_position()
    }
}

impl ToDiagnostic for ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        let mut diagnostic = Diagnostic::error(self.to_string()).with_location(self.location.clone());
        if let Some(opener) = &self.opener {
            diagnostic = diagnostic.with_label(opener.clone(), "opened here");
        }
        diagnostic
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("The text is empty.")]
    EmptyText,

    #[error("Extra character(s) after the expression.")]
    ExtraCharacters,

    /// No expression can start with this character.
    #[error("Unexpected character.")]
    UnexpectedCharacter,

    #[error("List item is missing before the comma.")]
    MissingListItem,

    #[error("Key-value pair is missing before the comma.")]
    MissingPair,

    #[error("Reached the end of the text, but the list was not closed with {closer}.")]
    UnclosedList { closer: String },

    #[error("Reached the end of the text, but the map was not closed with {closer}.")]
    UnclosedMap { closer: String },

    #[error("The key must be followed by a value because colon was used.")]
    MissingValue,

    #[error("Colon (:) shouldn't be used here. {reason}")]
    MisplacedColon { reason: &'static str },

    #[error(
        "Semicolon (;) was unexpected here. If you want to separate items in a \
         listing then use comma (,) instead."
    )]
    UnexpectedSemicolon,

    #[error(
        "Equals sign (=) was unexpected here. If you want to associate a key \
         with a value then use colon (:) instead."
    )]
    UnexpectedEquals,

    /// The removed `+` hash-union operator.
    #[error(
        "The + operator (\"hash union\") is not allowed. Please use \"hash addition\" \
         instead. For example, instead of this:\n\
         data={{a:1, b:2}} + properties(data/style.properties) + birds:csv(data/birds.csv)\n\
         you should write this:\n\
         data=a:1, b:2, tdd(data/style.tdd), birds:csv(data/birds.csv)"
    )]
    HashUnion,

    /// A character directly after an item, with no whitespace between.
    #[error("Character {name} shouldn't occur here.")]
    UnexpectedCharacterHere { name: String },

    #[error("Lists, hashes and function calls are nested deeper than {limit} levels.")]
    TooDeep { limit: u32 },

    #[error(
        "No separator was used before the item. Items in listings should be \
         separated with comma (,) or line-break. Keys and values in hashes \
         should be separated with colon (:)."
    )]
    MissingSeparator,
}
