//! Klaro GTM Generator Library
//!
//! Turns a Klaro consent-management configuration into the three Google
//! Tag Manager artifacts needed to wire consent into the dataLayer:
//! - a tag template that bootstraps Klaro with the minified configuration
//! - a custom-event trigger on `klaroConsentUpdate`
//! - a custom JavaScript variable exposing the consent status

pub mod api;
pub mod core;
pub mod models;
pub mod utils;

pub use crate::api::{create_router, AppState};
pub use crate::core::{
    generate_gtm_template_code, generate_gtm_trigger_code, generate_gtm_variable_code,
    validate_klaro_config, ConsentAnalytics, GtmBundle,
};
pub use crate::models::{AppConfig, AppError, AppResult, ConsentConfig, ErrorCode};
pub use crate::utils::minify::minify;
