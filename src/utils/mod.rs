//! Shared helpers with no UI or store dependencies.

pub mod color;
