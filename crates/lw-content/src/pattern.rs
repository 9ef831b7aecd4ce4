//! Pattern compilation and matching.

use lw_core::{FilterConfig, HighlightSpan, HighlightSpans};
use regex::{Regex, RegexBuilder};

use crate::error::ContentError;

/// Compiles user input into [`CompiledPattern`]s using the configured options.
#[derive(Debug, Clone, Copy)]
pub struct PatternFilter {
    case_insensitive: bool,
    size_limit: usize,
}

impl PatternFilter {
    /// Creates a compiler from the filter section of the configuration.
    #[must_use]
    pub const fn new(config: &FilterConfig) -> Self {
        Self {
            case_insensitive: config.case_insensitive,
            size_limit: config.size_limit_bytes,
        }
    }

    /// Compiles `raw` as a regular expression.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidPattern`] if the syntax is invalid or the
    /// compiled program exceeds the size limit.
    pub fn compile(&self, raw: &str) -> Result<CompiledPattern, ContentError> {
        let regex = RegexBuilder::new(raw)
            .case_insensitive(self.case_insensitive)
            .size_limit(self.size_limit)
            .build()
            .map_err(|err| ContentError::invalid_pattern(raw, err))?;
        Ok(CompiledPattern {
            regex,
            source: raw.to_owned(),
        })
    }
}

impl Default for PatternFilter {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}

/// A validated pattern ready for matching.
///
/// Matching is a search: a line matches if the pattern occurs anywhere in it,
/// not only at the start.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    source: String,
}

impl CompiledPattern {
    /// Returns `true` if the pattern occurs anywhere in `text`.
    #[inline]
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Byte ranges of every non-overlapping, non-empty occurrence in `text`.
    ///
    /// Empty matches carry nothing to highlight and are skipped; the
    /// underlying iterator always advances past them.
    #[must_use]
    pub fn find_spans(&self, text: &str) -> HighlightSpans {
        self.regex
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| HighlightSpan::new(m.start(), m.end()))
            .collect()
    }

    /// The pattern text as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl std::fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(raw: &str) -> CompiledPattern {
        PatternFilter::default().compile(raw).expect("valid pattern")
    }

    #[test]
    fn test_search_semantics() {
        let pattern = compile("ERR");
        assert!(pattern.matches("2024 ERR disk"));
        assert!(!pattern.matches("all good"));
    }

    #[test]
    fn test_case_sensitive_by_default() {
        assert!(!compile("err").matches("ERR"));
    }

    #[test]
    fn test_case_insensitive_option() {
        let config = FilterConfig {
            case_insensitive: true,
            ..FilterConfig::default()
        };
        let pattern = PatternFilter::new(&config).compile("err").expect("valid");
        assert!(pattern.matches("ERR"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = PatternFilter::default().compile("(").expect_err("unbalanced");
        assert!(err.is_invalid_pattern());
    }

    #[test]
    fn test_size_limit() {
        let config = FilterConfig {
            size_limit_bytes: 16,
            ..FilterConfig::default()
        };
        let err = PatternFilter::new(&config)
            .compile(r"\w{50}")
            .expect_err("too big");
        assert!(err.to_string().contains("byte limit"));
    }

    #[test]
    fn test_find_spans_all_occurrences() {
        let spans = compile("ab").find_spans("ab_ab_ab");
        let ranges: Vec<(usize, usize)> = spans.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(ranges, vec![(0, 2), (3, 5), (6, 8)]);
    }

    #[test]
    fn test_find_spans_skips_zero_width() {
        let pattern = compile("x*");
        assert!(pattern.matches("abc"));
        let spans = pattern.find_spans("abxxc");
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (2, 4));
    }

    #[test]
    fn test_find_spans_anchor_only() {
        let spans = compile("^").find_spans("line");
        assert!(spans.is_empty());
    }

    #[test]
    fn test_as_str() {
        assert_eq!(compile("a.c").as_str(), "a.c");
        assert_eq!(compile("a.c").to_string(), "a.c");
    }
}
