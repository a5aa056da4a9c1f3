//! UI rendering module for mangalag
//!
//! Rendering for the terminal user interface, using the ratatui library.

pub mod help_overlay;
pub mod reading_list;

pub use help_overlay::render as render_help_overlay;
pub use reading_list::render_reading_list;
