//! Reusable UI widget components.
//!
//! This module contains styling utilities shared by the renderers.

pub mod styling;
