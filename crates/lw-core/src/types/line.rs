//! Numbered lines of file content.

use serde::{Deserialize, Serialize};

/// One line of the watched file with its original line number.
///
/// `number` is 1-based and reflects the line's position in the unfiltered
/// content at the last refresh. Filtering never renumbers a record.
///
/// # Examples
///
/// ```
/// use lw_core::LineRecord;
///
/// let line = LineRecord::new(42, "GET /health 200");
/// assert_eq!(line.number, 42);
/// assert_eq!(line.text, "GET /health 200");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRecord {
    /// Line number (1-indexed) in the unfiltered content.
    pub number: usize,

    /// Line text without its line break.
    pub text: String,
}

impl LineRecord {
    /// Creates a new line record.
    #[inline]
    #[must_use]
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// Returns `true` if the line has no text.
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_record_new() {
        let line = LineRecord::new(3, "c");
        assert_eq!(line.number, 3);
        assert_eq!(line.text, "c");
        assert!(!line.is_blank());
        assert!(LineRecord::new(4, "").is_blank());
    }

    #[test]
    fn test_line_record_serialization() {
        let line = LineRecord::new(7, "WARN low memory");
        let json = serde_json::to_string(&line).expect("serialize");
        assert_eq!(json, r#"{"number":7,"text":"WARN low memory"}"#);
    }
}
