//! Error types for the lw-content crate.

/// Errors produced while decoding file content or compiling a pattern.
///
/// Both variants are recoverable: the caller keeps whatever state it had
/// before the failed call and reports the message to the user.
///
/// # Examples
///
/// ```
/// use lw_content::{ContentStore, ContentError};
///
/// let mut store = ContentStore::new();
/// let err = store.refresh(vec![b'o', b'k', 0xff]).unwrap_err();
/// assert!(matches!(err, ContentError::Decode { offset: 2, .. }));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The file's bytes are not valid UTF-8.
    #[error("file content is not valid UTF-8 (invalid byte at offset {offset})")]
    Decode {
        /// Byte offset of the first invalid sequence.
        offset: usize,
        /// The underlying decode error.
        #[source]
        source: std::str::Utf8Error,
    },

    /// The pattern could not be compiled.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern text as the user entered it.
        pattern: String,
        /// One-line summary of the syntax complaint.
        reason: String,
        /// The underlying compile error.
        #[source]
        source: regex::Error,
    },
}

impl ContentError {
    /// Creates a [`ContentError::Decode`] from a UTF-8 error.
    #[must_use]
    pub fn decode(source: std::str::Utf8Error) -> Self {
        Self::Decode {
            offset: source.valid_up_to(),
            source,
        }
    }

    /// Creates a [`ContentError::InvalidPattern`] from a regex error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: summarize(&source),
            source,
        }
    }

    /// Returns `true` for decode failures.
    #[inline]
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Returns `true` for pattern failures.
    #[inline]
    #[must_use]
    pub const fn is_invalid_pattern(&self) -> bool {
        matches!(self, Self::InvalidPattern { .. })
    }
}

/// Reduces a regex error to a single line suitable for a status bar.
///
/// Syntax errors render as a multi-line diagram ending in `error: <message>`.
fn summarize(err: &regex::Error) -> String {
    match err {
        regex::Error::Syntax(text) => text
            .lines()
            .rev()
            .find_map(|line| line.trim().strip_prefix("error:"))
            .map_or_else(|| text.trim().to_owned(), |msg| msg.trim().to_owned()),
        regex::Error::CompiledTooBig(limit) => {
            format!("compiled pattern exceeds the {limit} byte limit")
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_offset() {
        let bytes = [b'a', b'b', 0xc3];
        let source = std::str::from_utf8(&bytes).expect_err("truncated sequence");
        let err = ContentError::decode(source);
        assert!(err.is_decode());
        assert!(err.to_string().contains("offset 2"));
    }

    #[test]
    fn test_invalid_pattern_summary_is_single_line() {
        let source = regex::Regex::new("(").expect_err("unbalanced group");
        let err = ContentError::invalid_pattern("(", source);
        assert!(err.is_invalid_pattern());
        let msg = err.to_string();
        assert!(msg.starts_with("invalid pattern '(':"));
        assert!(!msg.contains('\n'));
        insta::assert_snapshot!(msg, @"invalid pattern '(': unclosed group");
    }
}
