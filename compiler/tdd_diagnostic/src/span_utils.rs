//! Line and column computation for TDD source text.
//!
//! TDD accepts `\n`, `\r\n` and a lone `\r` as line breaks, so all three
//! start a new line here. Columns and character positions count Unicode
//! scalar values, not bytes.

/// Pre-computed line start table for repeated line/column lookups.
///
/// ```
/// use tdd_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "a: 1\r\nb: 2\rc: 3";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 6), (2, 1));
/// assert_eq!(table.offset_to_line_col(source, 11), (3, 1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut offsets = vec![0u32];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => offsets.push(to_u32(i + 1)),
                b'\r' if bytes.get(i + 1) != Some(&b'\n') => offsets.push(to_u32(i + 1)),
                _ => {}
            }
            i += 1;
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        to_u32(line_idx) + 1
    }

    /// Byte offset where the 1-based `line` starts.
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// 1-based (line, column); the column counts characters.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.line_start_offset(line).unwrap_or(0) as usize;
        let end = floor_char_boundary(source, offset as usize);
        let col = source
            .get(line_start..end)
            .map_or(0, |s| s.chars().count());
        (line, to_u32(col) + 1)
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// 1-based (line, column) of a byte offset, without a table.
pub fn offset_to_line_col(source: &str, offset: u32) -> (u32, u32) {
    LineOffsetTable::build(source).offset_to_line_col(source, offset)
}

/// 0-based character index of a byte offset.
///
/// Offsets inside a multi-byte character are rounded down to its start;
/// offsets past the end map to the character count.
pub fn char_index(source: &str, offset: usize) -> usize {
    source
        .get(..floor_char_boundary(source, offset))
        .map_or(0, |s| s.chars().count())
}

/// 1-based character position of a byte offset.
pub fn char_position(source: &str, offset: usize) -> usize {
    char_index(source, offset) + 1
}

/// Largest char boundary `<= offset`, clamped to the source length.
pub fn floor_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[inline]
fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
