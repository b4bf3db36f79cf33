//! Scanner errors.

use tdd_ir::Span;
use thiserror::Error;

use crate::chars::quote_or_name;

/// An error found while scanning, located by the offending byte offset.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("{kind}")]
pub struct LexError {
    /// Where the error is reported; an opening quote, a backslash, or a
    /// comment opener.
    pub span: Span,
    pub kind: LexErrorKind,
}

impl LexError {
    pub fn new(offset: u32, kind: LexErrorKind) -> Self {
        LexError {
            span: Span::point(offset),
            kind,
        }
    }

    #[inline]
    pub fn offset(&self) -> u32 {
        self.span.start
    }
}

/// What went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexErrorKind {
    /// Quoted or raw string without its closing quote.
    #[error("The closing {} of the string is missing.", quote_name(.quote))]
    UnterminatedString { quote: char },

    /// `\` followed by a character with no escape meaning.
    #[error("Invalid escape sequence \\{ch} in the string literal.")]
    InvalidEscape { ch: char },

    /// `\x` or `\u` without hexadecimal digits, or naming a surrogate.
    #[error("Invalid hexadecimal UNICODE escape in the string literal.")]
    InvalidHexEscape,

    /// `\` followed by whitespace that contains no line break.
    #[error(
        "Invalid usage of escape sequence \\white-space. This escape sequence \
         can be used only before line-break."
    )]
    MisplacedLineContinuation,

    /// `<#--` without a matching `-->`.
    #[error("Comment was not closed with \"-->\".")]
    UnclosedComment,
}

fn quote_name(quote: &char) -> String {
    quote_or_name(*quote)
}
