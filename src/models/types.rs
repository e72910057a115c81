//! Core Types for the Klaro GTM generator

use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::validation::validate_klaro_config;
use crate::models::errors::{AppError, AppResult};

/// A Klaro consent configuration that passed acceptance.
///
/// Holds the client's JSON object untouched; only `language` and `services`
/// are known to be present. Lives for a single request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConsentConfig(Map<String, Value>);

impl ConsentConfig {
    /// Accept a raw JSON value as a consent configuration.
    pub fn accept(value: Value) -> AppResult<Self> {
        if !validate_klaro_config(&value) {
            return Err(AppError::invalid_config());
        }
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(AppError::invalid_config()),
        }
    }

    /// UI language, when given as a string
    pub fn language(&self) -> Option<&str> {
        self.0.get("language").and_then(Value::as_str)
    }

    /// Names of the service entries that carry a string `name`
    pub fn service_names(&self) -> Vec<&str> {
        self.0
            .get("services")
            .and_then(Value::as_array)
            .map(|services| {
                services
                    .iter()
                    .filter_map(|s| s.get("name").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Raw JSON object, in the client's key order
    pub fn as_value(&self) -> &Map<String, Value> {
        &self.0
    }
}
