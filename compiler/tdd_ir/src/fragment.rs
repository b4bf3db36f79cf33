//! Immutable views into TDD source text.
//!
//! A [`Fragment`] is what diagnostics point at, and what a lazily evaluated
//! hash value is bound to when the evaluation environment asks for the raw
//! source instead of the evaluated form.

use std::fmt;
use std::sync::Arc;

use crate::{Span, SpanError};

/// Error returned when fragment bounds don't fit the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentError {
    /// `start > end`.
    Inverted { start: usize, end: usize },
    /// `end` is past the end of the text.
    OutOfBounds { end: usize, len: usize },
    /// An offset falls inside a multi-byte character.
    NotCharBoundary(usize),
    /// The text is too large for a [`Span`].
    TooLarge(SpanError),
}

impl fmt::Display for FragmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentError::Inverted { start, end } => {
                write!(f, "fragment start {start} is after its end {end}")
            }
            FragmentError::OutOfBounds { end, len } => {
                write!(f, "fragment end {end} is past the end of the text ({len})")
            }
            FragmentError::NotCharBoundary(offset) => {
                write!(f, "fragment offset {offset} is not on a character boundary")
            }
            FragmentError::TooLarge(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for FragmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FragmentError::TooLarge(e) => Some(e),
            _ => None,
        }
    }
}

/// A part of a source text, with the name of the file it came from.
///
/// # Invariant
///
/// `0 <= start <= end <= text.len()`, and both offsets are on UTF-8
/// character boundaries. The full text is kept (shared) so that error
/// positions inside the fragment can be reported relative to the file.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fragment {
    text: Arc<str>,
    span: Span,
    file_name: Option<Arc<str>>,
}

impl Fragment {
    /// Create a fragment covering `start..end` of `text`.
    pub fn new(
        text: impl Into<Arc<str>>,
        start: usize,
        end: usize,
        file_name: Option<Arc<str>>,
    ) -> Result<Self, FragmentError> {
        let text = text.into();
        if start > end {
            return Err(FragmentError::Inverted { start, end });
        }
        if end > text.len() {
            return Err(FragmentError::OutOfBounds {
                end,
                len: text.len(),
            });
        }
        for offset in [start, end] {
            if !text.is_char_boundary(offset) {
                return Err(FragmentError::NotCharBoundary(offset));
            }
        }
        let span = Span::try_from_range(start..end).map_err(FragmentError::TooLarge)?;
        Ok(Fragment {
            text,
            span,
            file_name,
        })
    }

    /// Create a fragment covering the whole of `text`.
    pub fn whole(
        text: impl Into<Arc<str>>,
        file_name: Option<Arc<str>>,
    ) -> Result<Self, FragmentError> {
        let text = text.into();
        let len = text.len();
        Self::new(text, 0, len, file_name)
    }

    /// Create a fragment from a span already known to be valid for `text`.
    ///
    /// Spans produced by the TDD scanner always satisfy the invariant; any
    /// other span is checked like [`Fragment::new`].
    pub fn from_span(
        text: &Arc<str>,
        span: Span,
        file_name: Option<&Arc<str>>,
    ) -> Result<Self, FragmentError> {
        Self::new(
            Arc::clone(text),
            span.start as usize,
            span.end as usize,
            file_name.cloned(),
        )
    }

    /// The complete source text this fragment points into.
    #[inline]
    pub fn text(&self) -> &Arc<str> {
        &self.text
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.span.start as usize
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.span.end as usize
    }

    /// Name of the originating file, if known.
    #[inline]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    #[inline]
    pub fn file_name_arc(&self) -> Option<&Arc<str>> {
        self.file_name.as_ref()
    }

    /// The fragment content, `text[start..end]`.
    #[inline]
    pub fn as_str(&self) -> &str {
        // Bounds and boundaries were validated at construction.
        self.text.get(self.span.to_range()).unwrap_or_default()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fragment")
            .field("span", &self.span)
            .field("content", &self.as_str())
            .field("file_name", &self.file_name)
            .finish()
    }
}
