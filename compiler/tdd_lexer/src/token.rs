//! Tokens produced by the scanner.

use bitflags::bitflags;
use tdd_ir::Span;

/// Which characters an unquoted word may contain.
///
/// Hash keys stop at `:` so that `a:b` is a key-value pair, while values
/// keep it so that `http://host` and `c:\dir` stay single words.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum WordMode {
    Key,
    Value,
}

bitflags! {
    /// Trivia skipped directly before a token.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TokenFlags: u8 {
        /// Whitespace or a comment preceded the token.
        const SPACE_BEFORE = 1 << 0;
        /// The skipped whitespace contained a line break (an implicit comma).
        const LINE_BREAK_BEFORE = 1 << 1;
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    /// Only produced by [`crate::Scanner::next_separator`].
    Colon,
    Semicolon,
    Equals,
    Plus,
    /// Unquoted word; its text is the token span.
    Word,
    /// Quoted or raw string, escapes already applied.
    Str(String),
    /// A character that starts no token in the current context.
    Other(char),
    Eof,
}

impl TokenKind {
    /// The closing delimiter character, for `]`, `}` and `)`.
    pub fn closer_char(&self) -> Option<char> {
        match self {
            TokenKind::RBrace => Some('}'),
            TokenKind::RBracket => Some(']'),
            TokenKind::RParen => Some(')'),
            _ => None,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub flags: TokenFlags,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span, flags: TokenFlags) -> Self {
        Token { kind, span, flags }
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// `true` when a line break was skipped before the token.
    #[inline]
    pub fn after_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::LINE_BREAK_BEFORE)
    }

    /// `true` when any trivia was skipped before the token.
    #[inline]
    pub fn after_space(&self) -> bool {
        self.flags.contains(TokenFlags::SPACE_BEFORE)
    }
}
