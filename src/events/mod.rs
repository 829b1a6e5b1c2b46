//! Event handling module.
//!
//! Terminal input is polled on a background thread and forwarded over a
//! channel to the main thread, which owns all state.

pub mod terminal;
