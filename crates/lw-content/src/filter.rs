//! The active filter.

use crate::error::ContentError;
use crate::pattern::{CompiledPattern, PatternFilter};

/// The currently active pattern, or none.
///
/// A `FilterState` is replaced wholesale: a failed compile never produces
/// one, so the previous state stays in effect.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pattern: Option<CompiledPattern>,
}

impl FilterState {
    /// A state with no active pattern.
    #[must_use]
    pub const fn none() -> Self {
        Self { pattern: None }
    }

    /// Compiles `raw` into a new state. Empty input means no filter.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidPattern`] if `raw` does not compile.
    pub fn compile(filter: &PatternFilter, raw: &str) -> Result<Self, ContentError> {
        if raw.is_empty() {
            return Ok(Self::none());
        }
        filter.compile(raw).map(|pattern| Self {
            pattern: Some(pattern),
        })
    }

    /// The active pattern, if any.
    #[must_use]
    pub const fn pattern(&self) -> Option<&CompiledPattern> {
        self.pattern.as_ref()
    }

    /// The active pattern's text, or an empty string.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        self.pattern.as_ref().map_or("", CompiledPattern::as_str)
    }

    /// Returns `true` when a pattern is in effect.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.pattern.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_no_filter() {
        let state = FilterState::compile(&PatternFilter::default(), "").expect("empty ok");
        assert!(!state.is_active());
        assert_eq!(state.raw_text(), "");
    }

    #[test]
    fn test_compile_active() {
        let state = FilterState::compile(&PatternFilter::default(), "ERR").expect("valid");
        assert!(state.is_active());
        assert_eq!(state.raw_text(), "ERR");
    }

    #[test]
    fn test_compile_failure_returns_error() {
        assert!(FilterState::compile(&PatternFilter::default(), "[").is_err());
    }
}
