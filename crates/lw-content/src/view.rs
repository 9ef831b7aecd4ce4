//! Filtered views over a line set.

use std::sync::Arc;

use lw_core::{LineHighlights, LineRecord, fx_hash_map};

use crate::lines::FullLineSet;
use crate::pattern::CompiledPattern;

/// The records currently shown to the user.
///
/// An unfiltered view shares the full set directly. A filtered view keeps
/// the indices of matching records, so records keep their original line
/// numbers and relative order.
#[derive(Debug, Clone, Default)]
pub struct VisibleLineSet {
    lines: FullLineSet,
    indices: Option<Arc<[usize]>>,
}

impl VisibleLineSet {
    /// A view showing every record.
    #[must_use]
    pub fn unfiltered(lines: FullLineSet) -> Self {
        Self {
            lines,
            indices: None,
        }
    }

    /// A view showing only records that match `pattern`.
    #[must_use]
    pub fn filtered(lines: FullLineSet, pattern: &CompiledPattern) -> Self {
        let indices: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| pattern.matches(&line.text))
            .map(|(idx, _)| idx)
            .collect();
        Self {
            lines,
            indices: Some(indices.into()),
        }
    }

    /// Number of visible records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices
            .as_ref()
            .map_or_else(|| self.lines.len(), |indices| indices.len())
    }

    /// Returns `true` when nothing is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if this view was narrowed by a pattern.
    #[must_use]
    pub const fn is_filtered(&self) -> bool {
        self.indices.is_some()
    }

    /// Visible record at zero-based `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&LineRecord> {
        match &self.indices {
            Some(indices) => indices.get(position).and_then(|&idx| self.lines.get(idx)),
            None => self.lines.get(position),
        }
    }

    /// The last visible record.
    #[must_use]
    pub fn last(&self) -> Option<&LineRecord> {
        self.len().checked_sub(1).and_then(|pos| self.get(pos))
    }

    /// Iterates over visible records in order.
    pub fn iter(&self) -> impl Iterator<Item = &LineRecord> + '_ {
        (0..self.len()).filter_map(move |pos| self.get(pos))
    }

    /// Largest line number among visible records, used to size the gutter.
    #[must_use]
    pub fn max_number(&self) -> usize {
        self.last().map_or(0, |line| line.number)
    }

    /// Digits needed to print [`max_number`](Self::max_number); at least 1.
    #[must_use]
    pub fn gutter_width(&self) -> usize {
        self.max_number().checked_ilog10().map_or(1, |d| d as usize + 1)
    }

    /// Copies the visible records out.
    #[must_use]
    pub fn to_vec(&self) -> Vec<LineRecord> {
        self.iter().cloned().collect()
    }

    /// The full set this view was built from.
    #[must_use]
    pub const fn source(&self) -> &FullLineSet {
        &self.lines
    }

    /// Match spans for every visible record that contains a non-empty match,
    /// keyed by line number.
    #[must_use]
    pub fn highlights(&self, pattern: &CompiledPattern) -> LineHighlights {
        let mut out = fx_hash_map();
        for line in self.iter() {
            let spans = pattern.find_spans(&line.text);
            if !spans.is_empty() {
                out.insert(line.number, spans);
            }
        }
        out
    }
}
