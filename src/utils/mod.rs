//! Utility modules shared by the storage layer, the CLI and the list screen.
//!
//! - [`datetime`] - Timestamp layout, parsing and `HH:MM:SS` formatting
//! - [`wordwrap`] - Character-based word wrapping with continuation glue

pub mod datetime;
pub mod wordwrap;
