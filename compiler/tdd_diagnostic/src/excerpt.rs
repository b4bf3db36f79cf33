//! Bounded-width source excerpts.
//!
//! Renders the "where" part of a TDD error message:
//!
//! ```text
//! Error location: line 2, column 9 in data.tdd:
//! colors: [red; green]
//!             ^
//! ```
//!
//! The quoted line is at most [`MAX_QUOTE_WIDTH`] columns wide after tab
//! expansion; overlong lines are cut with `...` around the error column.

use crate::span_utils::char_index;

/// Maximum width of the quoted source line.
pub const MAX_QUOTE_WIDTH: usize = 56;

/// Distance of tab stops when quoting a line.
pub const TAB_WIDTH: usize = 8;

/// Render the location block for a byte `offset` in `text`.
///
/// The result has no trailing newline. It starts with `Error location:`
/// and is meant to follow the error message on its own line.
pub fn render_location(text: &str, offset: usize, file_name: Option<&str>) -> String {
    render_location_with_width(text, offset, file_name, MAX_QUOTE_WIDTH)
}

/// [`render_location`] with an explicit quote width.
pub fn render_location_with_width(
    text: &str,
    offset: usize,
    file_name: Option<&str>,
    max_width: usize,
) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut position = char_index(text, offset);

    if position >= len {
        return format!(
            "Error location: The very end of {}.",
            file_name.unwrap_or("the text")
        );
    }

    let (row, row_begin) = row_of(&chars, position);

    // Last character of the row, excluding the line break.
    let mut row_end = position;
    while row_end < len && !matches!(chars[row_end], '\n' | '\r') {
        row_end += 1;
    }
    if row_end == position && position > 0 && chars[position] == '\n' && chars[position - 1] == '\r'
    {
        row_end -= 1;
    }
    // `row_end` is now exclusive. The error may sit on the line break itself.
    if position > row_end {
        position = row_end;
    }
    let col = position - row_begin + 1;

    let mut out = format!("Error location: line {row}, column {col}");
    if let Some(name) = file_name {
        out.push_str(" in ");
        out.push_str(name);
    }
    out.push(':');

    if row_begin >= row_end {
        out.push_str("\n(Can't show the line because it is empty.)");
        return out;
    }

    let before: String = chars[row_begin..position].iter().collect();
    let after: String = chars[position..row_end].iter().collect();
    let (before, after) = fit_to_width(&before, &after, max_width);

    out.push('\n');
    out.push_str(&before);
    out.push_str(&after);
    out.push('\n');
    out.extend(std::iter::repeat(' ').take(before.chars().count()));
    out.push('^');
    out
}

/// 1-based row number and the char index where that row begins.
fn row_of(chars: &[char], position: usize) -> (usize, usize) {
    let mut row = 1;
    let mut row_begin = 0;
    let mut last = '\0';
    for (i, &c) in chars.iter().enumerate().take(position + 1) {
        if last == '\n' || (last == '\r' && c != '\n') {
            row_begin = i;
            row += 1;
        }
        last = c;
    }
    (row, row_begin)
}

/// Expand tabs and cut both halves so they fit `max_width` columns.
///
/// The part after the error column is cut first (keeping at least six
/// columns of it), then the part before it.
fn fit_to_width(before: &str, after: &str, max_width: usize) -> (String, String) {
    let mut before = expand_tabs(before, TAB_WIDTH, 0);
    let before_len = before.chars().count();
    let mut after = expand_tabs(after, TAB_WIDTH, before_len);
    let mut after_len = after.chars().count();

    if before_len + after_len > max_width {
        let overflow = before_len + after_len - max_width;
        let new_after_len = after_len.saturating_sub(overflow).max(6);
        if new_after_len < after_len {
            let kept: String = after.chars().take(new_after_len - 3).collect();
            after = format!("{kept}...");
            after_len = new_after_len;
        }
        if before_len + after_len > max_width {
            let skip = before_len + after_len - max_width + 3;
            let kept: String = before.chars().skip(skip).collect();
            before = format!("...{kept}");
        }
    }
    (before, after)
}

/// Replace tabs with spaces up to the next tab stop.
///
/// `start_col` is the 0-based column of the first character of `text`.
pub fn expand_tabs(text: &str, tab_width: usize, start_col: usize) -> String {
    if !text.contains('\t') {
        return text.to_owned();
    }
    let mut out = String::with_capacity(text.len() + 16);
    let mut col = start_col;
    for c in text.chars() {
        if c == '\t' {
            let pad = tab_width - col % tab_width;
            out.extend(std::iter::repeat(' ').take(pad));
            col += pad;
        } else {
            out.push(c);
            col += 1;
        }
    }
    out
}
