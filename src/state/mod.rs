//! Application state management module.
//!
//! This module contains the interface state layered over the issue store:
//! - Main `State` struct holding the store, live projections and input buffers
//! - Input modes and the selection stepping rules (`navigation`)
//! - Clipboard access for copying identifiers

mod clipboard;
mod navigation;

pub use clipboard::{ClipboardSink, SystemClipboard};
pub use navigation::{step_selection, InputMode, Step};

#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;
