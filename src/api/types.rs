//! API Request/Response Types

use serde::Serialize;

use crate::core::gtm::GtmBundle;
use crate::utils::constants::MSG_GENERATED;

// ============================================
// GTM Generation
// ============================================

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub template: String,
    pub trigger: String,
    pub variable: String,
    pub message: String,
}

impl From<GtmBundle> for GenerateResponse {
    fn from(bundle: GtmBundle) -> Self {
        Self {
            template: bundle.template,
            trigger: bundle.trigger,
            variable: bundle.variable,
            message: MSG_GENERATED.to_string(),
        }
    }
}

// ============================================
// Simulation / Upload
// ============================================

/// Plain `{"message": "..."}` body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
