//! Domain types for the logwatch tool.
//!
//! # Module Organization
//!
//! - [`target`] - The watched file and its directory
//! - [`line`] - Numbered lines of file content
//! - [`span`] - Highlighted match ranges within a line
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use lw_core::{HighlightSpan, LineRecord, WatchTarget};
//! ```

pub mod line;
pub mod span;
pub mod target;

pub use line::LineRecord;
pub use span::{HighlightSpan, HighlightSpans, LineHighlights};
pub use target::WatchTarget;
