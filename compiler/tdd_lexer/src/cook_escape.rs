//! Quoted and raw string bodies.
//!
//! The cursor is positioned on the opening quote (or on the `r` of a raw
//! string). On success it is left after the closing quote.

use crate::chars::{is_line_break, is_whitespace};
use crate::{Cursor, LexError, LexErrorKind};

/// Scan `"..."` or `'...'` and apply escapes.
pub(crate) fn scan_quoted(cursor: &mut Cursor<'_>, quote: char) -> Result<String, LexError> {
    let open = cursor.pos();
    let unterminated = || LexError::new(open, LexErrorKind::UnterminatedString { quote });
    cursor.advance_char();

    let mut buf = String::new();
    loop {
        let Some(c) = cursor.current() else {
            return Err(unterminated());
        };
        if c == quote {
            cursor.advance_char();
            return Ok(buf);
        }
        if c != '\\' {
            buf.push(c);
            cursor.advance_char();
            continue;
        }

        let backslash = cursor.pos();
        let Some(escaped) = cursor.peek() else {
            return Err(unterminated());
        };
        let simple = match escaped {
            '"' => Some('"'),
            '\'' => Some('\''),
            '\\' => Some('\\'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'f' => Some('\u{0C}'),
            'b' => Some('\u{08}'),
            'g' => Some('>'),
            'l' => Some('<'),
            'a' => Some('&'),
            '{' => Some('{'),
            _ => None,
        };
        if let Some(cooked) = simple {
            buf.push(cooked);
            cursor.advance_ascii(2);
            continue;
        }

        match escaped {
            'x' | 'u' => {
                cursor.advance_ascii(2);
                buf.push(cook_hex(cursor, backslash)?);
            }
            c if is_whitespace(c) => {
                cursor.advance_char();
                skip_line_continuation(cursor, backslash)?;
            }
            ch => {
                return Err(LexError::new(backslash, LexErrorKind::InvalidEscape { ch }));
            }
        }
    }
}

/// Up to four hex digits after `\x` or `\u`.
fn cook_hex(cursor: &mut Cursor<'_>, backslash: u32) -> Result<char, LexError> {
    let mut value = 0u32;
    let mut digits = 0;
    while digits < 4 {
        let Some(d) = cursor.current().and_then(|c| c.to_digit(16)) else {
            break;
        };
        value = (value << 4) | d;
        digits += 1;
        cursor.advance_ascii(1);
    }
    if digits == 0 {
        return Err(LexError::new(backslash, LexErrorKind::InvalidHexEscape));
    }
    char::from_u32(value).ok_or_else(|| LexError::new(backslash, LexErrorKind::InvalidHexEscape))
}

/// Skip the whitespace after a `\`, which must contain exactly one line
/// break. `\r\n` counts as one; a second line break is left in place.
fn skip_line_continuation(cursor: &mut Cursor<'_>, backslash: u32) -> Result<(), LexError> {
    let mut seen_break = false;
    while let Some(c) = cursor.current() {
        if !is_whitespace(c) {
            break;
        }
        if is_line_break(c) {
            if seen_break {
                break;
            }
            seen_break = true;
            if c == '\r' && cursor.peek() == Some('\n') {
                cursor.advance_char();
            }
        }
        cursor.advance_char();
    }
    if seen_break {
        Ok(())
    } else {
        Err(LexError::new(
            backslash,
            LexErrorKind::MisplacedLineContinuation,
        ))
    }
}

/// Scan `r"..."` or `r'...'`; no escapes.
pub(crate) fn scan_raw(cursor: &mut Cursor<'_>, quote: char) -> Result<String, LexError> {
    let open = cursor.pos();
    cursor.advance_ascii(2);
    let body_start = cursor.pos();
    cursor.eat_while(|c| c != quote);
    if cursor.is_eof() {
        return Err(LexError::new(
            open,
            LexErrorKind::UnterminatedString { quote },
        ));
    }
    let body = cursor.slice(body_start, cursor.pos()).to_owned();
    cursor.advance_char();
    Ok(body)
}
