//! The complete numbered line set for one refresh.

use std::sync::Arc;

use lw_core::LineRecord;

/// Every line of the watched file, numbered from 1.
///
/// Splitting happens on `'\n'` only. A trailing `'\r'` is dropped from each
/// line so CRLF files display cleanly. Content ending in a newline yields a
/// final empty record, and empty content yields exactly one empty record.
///
/// The records are shared behind an [`Arc`] so views and presenters can hold
/// the set without copying text.
#[derive(Debug, Clone)]
pub struct FullLineSet {
    lines: Arc<[LineRecord]>,
}

impl FullLineSet {
    /// Splits `text` into numbered records.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<LineRecord> = text
            .split('\n')
            .enumerate()
            .map(|(idx, line)| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                LineRecord::new(idx + 1, line)
            })
            .collect();
        Self {
            lines: lines.into(),
        }
    }

    /// Creates a set with no records, used before any file has been read.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lines: Arc::from(Vec::new()),
        }
    }

    /// Number of records.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` when the set holds no records.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterates over the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineRecord> {
        self.lines.iter()
    }

    /// Record at zero-based `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LineRecord> {
        self.lines.get(index)
    }

    /// All records as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[LineRecord] {
        &self.lines
    }
}

impl Default for FullLineSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a FullLineSet {
    type Item = &'a LineRecord;
    type IntoIter = std::slice::Iter<'a, LineRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
