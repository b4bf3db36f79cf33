//! Position over a bounded region of a source text.
//!
//! The cursor never reads past `end`, but lookbehind (used by line comments)
//! may see the text before `start`.

use memchr::{memchr2, memmem};

#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor over `text[start..end]`.
    ///
    /// Offsets are clamped to the text and moved back to character
    /// boundaries.
    pub fn new(text: &'a str, start: usize, end: usize) -> Self {
        let end = floor_boundary(text, end.min(text.len()));
        let start = floor_boundary(text, start.min(end));
        Cursor {
            text,
            pos: start,
            end,
        }
    }

    /// The complete text, including the part outside the region.
    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        to_u32(self.pos)
    }

    #[inline]
    pub fn end(&self) -> u32 {
        to_u32(self.end)
    }

    #[inline]
    pub(crate) fn pos_usize(&self) -> usize {
        self.pos
    }

    /// Move to `pos`, which must be a character boundary inside the region.
    pub fn reset(&mut self, pos: u32) {
        self.pos = floor_boundary(self.text, (pos as usize).min(self.end));
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.end
    }

    /// Remaining text of the region.
    #[inline]
    pub fn rest(&self) -> &'a str {
        self.text.get(self.pos..self.end).unwrap_or_default()
    }

    #[inline]
    pub fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character after the current one.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    #[inline]
    pub fn advance_char(&mut self) {
        if let Some(c) = self.current() {
            self.pos += c.len_utf8();
        }
    }

    /// Advance by `n` bytes of ASCII.
    #[inline]
    pub fn advance_ascii(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.end);
    }

    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.current() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// Skip to the next `\n` or `\r` (not consumed), or to the end.
    pub fn eat_until_line_break(&mut self) {
        let rest = self.rest().as_bytes();
        self.pos = match memchr2(b'\n', b'\r', rest) {
            Some(i) => self.pos + i,
            None => self.end,
        };
    }

    /// Byte offset of the next `needle` at or after `from`, within the region.
    pub fn find_from(&self, from: usize, needle: &str) -> Option<usize> {
        let hay = self.text.as_bytes().get(from..self.end)?;
        memmem::find(hay, needle.as_bytes()).map(|i| from + i)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// `text[start..end]`, empty when the range is not valid.
    #[inline]
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        self.text
            .get(start as usize..end as usize)
            .unwrap_or_default()
    }

    /// Text before the current position, from the very start of the text.
    #[inline]
    pub fn before(&self) -> &'a str {
        self.text.get(..self.pos).unwrap_or_default()
    }
}

fn floor_boundary(text: &str, mut offset: usize) -> usize {
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Scanner offsets are `u32`; longer texts are rejected before scanning.
#[inline]
#[allow(clippy::cast_possible_truncation, reason = "texts are capped at u32::MAX bytes")]
fn to_u32(offset: usize) -> u32 {
    offset as u32
}
