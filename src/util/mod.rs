//! Utility types shared across the crate.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - [`Palette`] / [`ColorMode`] - Terminal colors
//! - [`Timer`] - Named section timing

mod color;
mod error;
mod timer;

pub use color::*;
pub use error::*;
pub use timer::*;
