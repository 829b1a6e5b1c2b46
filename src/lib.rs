//! Terminal issue tracker.
//!
//! The crate is organised around an issue [`store::Store`] holding immutable
//! snapshots, pure derived views over those snapshots, and a `ratatui`
//! interface driven by a configurable keymap.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod model;
pub mod state;
pub mod store;
pub mod ui;
pub mod utils;
