//! Highlighted match ranges within a line.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::hash::FxHashMap;

/// Spans for one line. Most lines carry one or two matches, so up to four are
/// stored inline without a heap allocation.
pub type HighlightSpans = SmallVec<[HighlightSpan; 4]>;

/// Highlight spans keyed by original line number. Lines without matches have
/// no entry.
pub type LineHighlights = FxHashMap<usize, HighlightSpans>;

/// A half-open byte range `[start, end)` within a single line's text.
///
/// Offsets always fall on UTF-8 character boundaries because they come from
/// pattern matches over the line's `str`.
///
/// # Examples
///
/// ```
/// use lw_core::HighlightSpan;
///
/// let span = HighlightSpan::new(6, 11);
/// assert_eq!(span.slice("level ERROR disk"), Some("ERROR"));
/// assert_eq!(span.len(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HighlightSpan {
    /// Byte offset of the first matched byte.
    pub start: usize,

    /// Byte offset one past the last matched byte.
    pub end: usize,
}

impl HighlightSpan {
    /// Creates a new span.
    #[inline]
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the span length in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` for a zero-width span.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the matched text, or `None` if the span does not fit `text`.
    #[must_use]
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}
