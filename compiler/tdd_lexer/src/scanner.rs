//! Token scanner.
//!
//! Skips whitespace and comments, then dispatches on the first character.
//! The parser decides the [`WordMode`] per token, and uses
//! [`Scanner::next_separator`] between items, where only separator
//! characters are consumed.

use tdd_ir::Span;

use crate::chars::{is_line_break, is_whitespace, is_word_char};
use crate::cook_escape::{scan_quoted, scan_raw};
use crate::{Cursor, LexError, LexErrorKind, Token, TokenFlags, TokenKind, WordMode};

#[derive(Clone, Debug)]
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Scanner<'a> {
    /// Scanner over `text[start..end]`. Offsets in tokens and errors are
    /// relative to the whole of `text`.
    pub fn new(text: &'a str, start: u32, end: u32) -> Self {
        Scanner {
            cursor: Cursor::new(text, start as usize, end as usize),
        }
    }

    /// Scanner over the whole text.
    pub fn whole(text: &'a str) -> Self {
        Scanner {
            cursor: Cursor::new(text, 0, text.len()),
        }
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.cursor.end()
    }

    #[inline]
    pub fn reset(&mut self, pos: u32) {
        self.cursor.reset(pos);
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    /// Character at the cursor, `None` at the end of the region.
    #[inline]
    pub fn current(&self) -> Option<char> {
        self.cursor.current()
    }

    /// The complete source text.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.cursor.text()
    }

    /// Source text of `span`.
    #[inline]
    pub fn slice(&self, span: Span) -> &'a str {
        self.cursor.slice(span.start, span.end)
    }

    /// Skip whitespace, `#` line comments and `<#-- -->` block comments.
    pub fn skip_trivia(&mut self) -> Result<TokenFlags, LexError> {
        let mut flags = TokenFlags::empty();
        while let Some(c) = self.cursor.current() {
            if is_whitespace(c) {
                if is_line_break(c) {
                    flags |= TokenFlags::LINE_BREAK_BEFORE;
                }
                flags |= TokenFlags::SPACE_BEFORE;
                self.cursor.advance_char();
            } else if c == '#' && self.line_empty_before() {
                flags |= TokenFlags::SPACE_BEFORE;
                self.cursor.eat_until_line_break();
            } else if c == '<' && self.cursor.starts_with("<#--") {
                flags |= TokenFlags::SPACE_BEFORE;
                self.skip_block_comment()?;
            } else {
                break;
            }
        }
        Ok(flags)
    }

    /// Is there only whitespace between the last line break and the cursor?
    ///
    /// Looks at the whole text, so a fragment that starts mid-line sees
    /// what precedes it.
    fn line_empty_before(&self) -> bool {
        for c in self.cursor.before().chars().rev() {
            if is_line_break(c) {
                return true;
            }
            if !is_whitespace(c) {
                return false;
            }
        }
        true
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let open = self.cursor.pos_usize();
        // `<#-->` closes itself: the search starts right after `<`.
        match self.cursor.find_from(open + 1, "-->") {
            Some(close) => {
                self.cursor.reset(to_offset(close + 3));
                Ok(())
            }
            None => Err(LexError::new(
                to_offset(open),
                LexErrorKind::UnclosedComment,
            )),
        }
    }

    /// Scan the next token in expression position.
    pub fn next_token(&mut self, mode: WordMode) -> Result<Token, LexError> {
        let flags = self.skip_trivia()?;
        let start = self.cursor.pos();
        let Some(c) = self.cursor.current() else {
            return Ok(Token::new(TokenKind::Eof, Span::point(start), flags));
        };

        let punct = match c {
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            '[' => Some(TokenKind::LBracket),
            ']' => Some(TokenKind::RBracket),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            ',' => Some(TokenKind::Comma),
            _ => None,
        };
        if let Some(kind) = punct {
            self.cursor.advance_ascii(1);
            return Ok(Token::new(kind, Span::new(start, start + 1), flags));
        }

        let kind = match (c, self.cursor.peek()) {
            ('"' | '\'', _) => TokenKind::Str(scan_quoted(&mut self.cursor, c)?),
            ('r', Some(quote @ ('"' | '\''))) => TokenKind::Str(scan_raw(&mut self.cursor, quote)?),
            (c, _) if is_word_char(c, true, mode) => {
                self.cursor.advance_char();
                self.cursor.eat_while(|c| is_word_char(c, false, mode));
                TokenKind::Word
            }
            (other, _) => {
                self.cursor.advance_char();
                TokenKind::Other(other)
            }
        };
        Ok(Token::new(kind, Span::new(start, self.cursor.pos()), flags))
    }

    /// Scan what follows an item.
    ///
    /// `,` and `:` are consumed; every other result leaves the cursor on
    /// the character it describes, so a closer or the next item (after an
    /// implicit line-break comma) is read again by [`Scanner::next_token`].
    pub fn next_separator(&mut self) -> Result<Token, LexError> {
        let flags = self.skip_trivia()?;
        let start = self.cursor.pos();
        let Some(c) = self.cursor.current() else {
            return Ok(Token::new(TokenKind::Eof, Span::point(start), flags));
        };
        let kind = match c {
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '=' => TokenKind::Equals,
            '+' => TokenKind::Plus,
            '}' => TokenKind::RBrace,
            ']' => TokenKind::RBracket,
            ')' => TokenKind::RParen,
            other => TokenKind::Other(other),
        };
        let end = start + to_offset(c.len_utf8());
        if matches!(kind, TokenKind::Comma | TokenKind::Colon) {
            self.cursor.advance_ascii(1);
        }
        Ok(Token::new(kind, Span::new(start, end), flags))
    }

    /// Next non-trivia character without moving the cursor.
    pub fn peek_char(&mut self) -> Result<Option<char>, LexError> {
        let saved = self.cursor.pos();
        self.skip_trivia()?;
        let c = self.cursor.current();
        self.cursor.reset(saved);
        Ok(c)
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation, reason = "texts are capped at u32::MAX bytes")]
fn to_offset(offset: usize) -> u32 {
    offset as u32
}

#[cfg(test)]
mod tests;
