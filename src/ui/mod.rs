//! UI module for branchdo
//!
//! This module handles the interactive list: state, key handling, rendering
//! and the screen lifecycle.

pub mod app;
pub mod components;
pub mod core;
pub mod layout;
pub mod renderer;
pub mod session;
pub mod state;

pub use app::run_list_ui;
pub use layout::LayoutManager;
pub use session::ListSession;
