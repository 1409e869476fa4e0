//! Reusable UI components

pub mod footer;
pub mod header;
pub mod item_list;

// Component exports
pub use footer::Footer;
pub use header::Header;
pub use item_list::{BodyView, ItemList};
