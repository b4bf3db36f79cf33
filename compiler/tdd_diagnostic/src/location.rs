use std::fmt;
use std::sync::Arc;

use tdd_ir::Fragment;

use crate::excerpt::render_location;
use crate::span_utils::{char_position, offset_to_line_col};

/// A byte offset in a named source text.
///
/// Keeps the whole text so that the location can be rendered with a
/// source excerpt long after parsing has finished.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceLocation {
    text: Arc<str>,
    offset: u32,
    file_name: Option<Arc<str>>,
}

impl SourceLocation {
    pub fn new(text: Arc<str>, offset: u32, file_name: Option<Arc<str>>) -> Self {
        SourceLocation {
            text,
            offset,
            file_name,
        }
    }

    /// Location of the first character of `fragment`.
    pub fn at_fragment(fragment: &Fragment) -> Self {
        SourceLocation {
            text: Arc::clone(fragment.text()),
            offset: fragment.span().start,
            file_name: fragment.file_name_arc().cloned(),
        }
    }

    /// Same text and file, different offset.
    #[must_use]
    pub fn with_offset(&self, offset: u32) -> Self {
        SourceLocation {
            text: Arc::clone(&self.text),
            offset,
            file_name: self.file_name.clone(),
        }
    }

    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    #[inline]
    pub fn text(&self) -> &Arc<str> {
        &self.text
    }

    #[inline]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// 1-based (line, column).
    pub fn line_col(&self) -> (u32, u32) {
        offset_to_line_col(&self.text, self.offset)
    }

    /// 1-based character position from the start of the text.
    pub fn char_position(&self) -> usize {
        char_position(&self.text, self.offset as usize)
    }

    /// `true` when the location is at (or past) the end of the text.
    pub fn is_end_of_text(&self) -> bool {
        self.offset as usize >= self.text.len()
    }

    /// The full "Error location: ..." block with a source excerpt.
    pub fn render_excerpt(&self) -> String {
        render_location(&self.text, self.offset as usize, self.file_name())
    }
}

/// Terse form: `line 3, column 7 in data.tdd`.
impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end_of_text() {
            f.write_str("end of ")?;
            return f.write_str(self.file_name().unwrap_or("the text"));
        }
        let (line, col) = self.line_col();
        write!(f, "line {line}, column {col}")?;
        if let Some(name) = self.file_name() {
            write!(f, " in {name}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceLocation")
            .field("offset", &self.offset)
            .field("file_name", &self.file_name)
            .finish_non_exhaustive()
    }
}
