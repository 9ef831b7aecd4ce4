//! TUI-specific error types.

use thiserror::Error;

/// Errors that can occur in the TUI.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TuiError {
    /// Terminal initialization or operation failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Event channel was closed unexpectedly.
    #[error("event channel closed unexpectedly")]
    ChannelClosed,

    /// The tail worker rejected a command.
    #[error("tail error: {0}")]
    Tail(#[from] lw_tail::TailError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl TuiError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns `true` if the UI can keep running.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Tail(err) => err.is_recoverable(),
            Self::Terminal(_) | Self::ChannelClosed | Self::Config(_) => false,
        }
    }
}

impl From<lw_core::ConfigError> for TuiError {
    fn from(err: lw_core::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = TuiError::config("tick rate must be positive");
        assert!(matches!(err, TuiError::Config(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            TuiError::ChannelClosed.to_string(),
            "event channel closed unexpectedly"
        );
    }

    #[test]
    fn test_tail_error_recoverability() {
        assert!(!TuiError::from(lw_tail::TailError::ChannelClosed).is_recoverable());
        assert!(TuiError::from(lw_tail::TailError::NoFileOpen).is_recoverable());
    }
}
