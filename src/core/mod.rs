//! Core Module - Business Logic
//!
//! Configuration acceptance, GTM document builders and the analytics sample.
//! Everything here is pure and synchronous.

pub mod analytics;
pub mod gtm;
pub mod validation;

pub use analytics::*;
pub use gtm::*;
pub use validation::*;
