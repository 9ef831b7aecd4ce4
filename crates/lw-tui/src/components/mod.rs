//! UI components for the TUI.
//!
//! # Component Types
//!
//! - **Widgets** (`Widget` trait): `HeaderBar`, `StatusBar`
//! - **Stateful Widgets** (`StatefulWidget` trait): `LogView`
//! - **Overlays**: `HelpPanel`, `PromptInput`, `ConfirmDialog`

mod confirm;
mod header;
mod help;
mod log_view;
mod prompt_input;
mod status_bar;

pub use confirm::ConfirmDialog;
pub use header::HeaderBar;
pub use help::HelpPanel;
pub use log_view::{LogView, highlight_line};
pub use prompt_input::{PromptInput, PromptKind};
pub use status_bar::StatusBar;
