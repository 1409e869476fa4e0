//! Core UI building blocks for the list screen.
//!
//! - [`actions`] - Actions produced from key presses
//! - [`component`] - Key handling and rendering abstraction
//! - [`event_handler`] - Terminal input and timer tick merged into one stream
//! - [`signals`] - Per-screen restart and exit signals
//!
//! Events flow one at a time: the [`EventHandler`] yields an [`EventType`],
//! the session maps it to an [`Action`] and applies it, and the screen is
//! redrawn before the next event is read.

pub mod actions;
pub mod component;
pub mod event_handler;
pub mod signals;

pub use actions::Action;
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
pub use signals::{screen_channel, ScreenControl, ScreenExit, ScreenSignals};
