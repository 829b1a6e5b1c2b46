//! User interface module.
//!
//! This module handles all UI rendering using the `ratatui` library, including:
//! - Terminal rendering and layout
//! - Theme management
//! - Styling helpers
//! - Panel rendering (sidebar, issue list, issue detail, log, footer)

type Frame<'a> = ratatui::Frame<'a>;

mod render;
mod theme;
mod widgets;

pub use render::render;
pub use theme::{ColorSpec, Theme};
