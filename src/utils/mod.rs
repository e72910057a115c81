//! Utils Module - Helper Functions & Shared Utilities

pub mod constants;
pub mod filename;
pub mod minify;

pub use constants::*;
pub use filename::*;
pub use minify::*;
