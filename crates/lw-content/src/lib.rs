//! Numbered line store and pattern filtering for logwatch.
//!
//! This crate turns raw file bytes into a numbered line set and narrows that
//! set with a user-supplied pattern. It holds no threads and performs no I/O;
//! the tail controller feeds it bytes and publishes what it returns.
//!
//! # Overview
//!
//! - [`ContentStore`]: owns the raw text and the [`FullLineSet`] of the last
//!   successful refresh
//! - [`PatternFilter`]: compiles user input into a [`CompiledPattern`]
//! - [`FilterState`]: the active pattern (or none), replaced wholesale
//! - [`VisibleLineSet`]: a view over a [`FullLineSet`] holding only the
//!   matching records, with their original numbers
//!
//! # Example
//!
//! ```
//! use lw_content::{ContentStore, FilterState, PatternFilter};
//! use lw_core::FilterConfig;
//!
//! let mut store = ContentStore::new();
//! let lines = store.refresh(b"a\nb\nc\n".to_vec())?;
//! assert_eq!(lines.len(), 4);
//!
//! let filter = FilterState::compile(&PatternFilter::new(&FilterConfig::default()), "b")?;
//! let visible = ContentStore::apply_filter(&lines, &filter);
//! let numbers: Vec<usize> = visible.iter().map(|line| line.number).collect();
//! assert_eq!(numbers, vec![2]);
//! # Ok::<(), lw_content::ContentError>(())
//! ```
//!
//! # Consistency
//!
//! Every operation either succeeds completely or leaves state untouched: a
//! failed decode keeps the previous line set, and a failed compile never
//! produces a [`FilterState`].

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;
mod filter;
mod lines;
mod pattern;
mod store;
mod view;

pub use error::ContentError;
pub use filter::FilterState;
pub use lines::FullLineSet;
pub use pattern::{CompiledPattern, PatternFilter};
pub use store::ContentStore;
pub use view::VisibleLineSet;
