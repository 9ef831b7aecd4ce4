//! The content store.

use tracing::debug;

use crate::error::ContentError;
use crate::filter::FilterState;
use crate::lines::FullLineSet;
use crate::view::VisibleLineSet;

/// Holds the most recently read file text and its numbered lines.
///
/// The store is owned by exactly one controller and is only touched from its
/// worker, so it needs no interior locking.
#[derive(Debug, Default)]
pub struct ContentStore {
    raw: String,
    lines: FullLineSet,
}

impl ContentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored content with `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Decode`] if `bytes` is not UTF-8. The previous
    /// content is kept in that case.
    pub fn refresh(&mut self, bytes: Vec<u8>) -> Result<FullLineSet, ContentError> {
        let raw = Self::decode(bytes)?;
        Ok(self.replace(raw))
    }

    /// Decodes `bytes` without touching the store, so callers can finish
    /// other fallible steps before committing with [`replace`](Self::replace).
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Decode`] if `bytes` is not UTF-8.
    pub fn decode(bytes: Vec<u8>) -> Result<String, ContentError> {
        String::from_utf8(bytes).map_err(|err| ContentError::decode(err.utf8_error()))
    }

    /// Replaces the stored content with already decoded text.
    pub fn replace(&mut self, raw: String) -> FullLineSet {
        let lines = FullLineSet::from_text(&raw);
        debug!(bytes = raw.len(), lines = lines.len(), "content refreshed");
        self.raw = raw;
        self.lines = lines.clone();
        lines
    }

    /// The line set from the last successful refresh.
    #[must_use]
    pub const fn lines(&self) -> &FullLineSet {
        &self.lines
    }

    /// The raw text from the last successful refresh.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Drops all stored content.
    pub fn clear(&mut self) {
        self.raw.clear();
        self.lines = FullLineSet::empty();
    }

    /// Narrows `lines` to the records matching `filter`.
    ///
    /// With no active pattern the result is `lines` itself.
    #[must_use]
    pub fn apply_filter(lines: &FullLineSet, filter: &FilterState) -> VisibleLineSet {
        match filter.pattern() {
            Some(pattern) => VisibleLineSet::filtered(lines.clone(), pattern),
            None => VisibleLineSet::unfiltered(lines.clone()),
        }
    }

    /// Applies `filter` to the stored lines.
    #[must_use]
    pub fn visible(&self, filter: &FilterState) -> VisibleLineSet {
        Self::apply_filter(&self.lines, filter)
    }
}
