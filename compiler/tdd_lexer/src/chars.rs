//! Character classes of the TDD language.

use crate::WordMode;

/// TDD whitespace.
///
/// Unicode whitespace without the non-breaking spaces and NEL, plus the
/// ASCII information separators (U+001C..=U+001F) and the byte order mark.
#[inline]
pub fn is_whitespace(c: char) -> bool {
    match c {
        '\u{1C}'..='\u{1F}' | '\u{FEFF}' => true,
        '\u{85}' | '\u{A0}' | '\u{2007}' | '\u{202F}' => false,
        c => c.is_whitespace(),
    }
}

#[inline]
pub fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Can `c` appear in an unquoted word?
///
/// `first` is true for the first character of the word, where `+` is
/// allowed. In [`WordMode::Value`] a `:` does not end the word, so
/// `http://example.com` is one word in value position.
#[inline]
pub fn is_word_char(c: char, first: bool, mode: WordMode) -> bool {
    if u32::from(c) > 160 {
        return !is_whitespace(c);
    }
    match c {
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' ' | '"' | '\'' | '(' | ')' | ',' | ';'
        | '<' | '=' | '>' | '[' | ']' | '{' | '}' | '\u{85}' | '\u{A0}' => false,
        '+' => first,
        ':' => mode == WordMode::Value,
        _ => true,
    }
}

/// Describe a character for an error message: `'x'`, `quotation mark`,
/// `'\n'`, `'\u001B'`.
pub fn quote_or_name(c: char) -> String {
    match c {
        '"' => "quotation mark".to_owned(),
        '\'' => "apostrophe-quote".to_owned(),
        '\\' => "'\\\\'".to_owned(),
        '\n' => "'\\n'".to_owned(),
        '\r' => "'\\r'".to_owned(),
        '\t' => "'\\t'".to_owned(),
        '\u{08}' => "'\\b'".to_owned(),
        '\u{0C}' => "'\\f'".to_owned(),
        c if u32::from(c) < 0x20 => format!("'\\u{:04X}'", u32::from(c)),
        c => format!("'{c}'"),
    }
}
