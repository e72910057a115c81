//! Google Tag Manager document builders
//!
//! Three documents are produced per accepted configuration:
//! - **template**: a tag whose only field defaults to the minified config,
//!   plus the Klaro bootstrap snippet
//! - **trigger**: a custom-event trigger on `klaroConsentUpdate`
//! - **variable**: a custom JavaScript variable exposing the consent status
//!
//! Only the template depends on the input. Every document is rendered as
//! JSON pretty-printed with two-space indentation; key order is fixed by
//! the struct field order below.

use serde::Serialize;
use tracing::debug;

use crate::models::errors::AppResult;
use crate::models::types::ConsentConfig;
use crate::utils::constants::*;
use crate::utils::minify::minify;

// ============================================
// Template
// ============================================

#[derive(Debug, Serialize)]
pub struct TemplateDocument {
    pub template: TagTemplate,
}

#[derive(Debug, Serialize)]
pub struct TagTemplate {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'static str,
    pub metadata: TemplateMetadata,
    pub fields: Vec<TemplateField>,
    pub code: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMetadata {
    pub display_name: &'static str,
    pub category: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateField {
    pub name: &'static str,
    pub display_name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub default_value: String,
    pub help: &'static str,
}

// ============================================
// Trigger
// ============================================

#[derive(Debug, Serialize)]
pub struct TriggerDocument {
    pub trigger: CustomEventTrigger,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEventTrigger {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'static str,
    pub metadata: DisplayMetadata,
    pub filter: Vec<TriggerFilter>,
    pub unique_trigger_id: &'static str,
    pub trigger_id: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayMetadata {
    pub display_name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TriggerFilter {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub parameter: Vec<FilterParameter>,
}

/// One side of a trigger filter comparison
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FilterParameter {
    RuntimeVariable { key: &'static str },
    Template { value: &'static str },
}

// ============================================
// Variable
// ============================================

#[derive(Debug, Serialize)]
pub struct VariableDocument {
    pub variable: JsVariable,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsVariable {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'static str,
    pub metadata: DisplayMetadata,
    pub code: &'static str,
    pub variable_id: &'static str,
}

// ============================================
// Builders
// ============================================

/// Render the tag template, embedding the minified configuration.
pub fn generate_gtm_template_code(config: &ConsentConfig) -> AppResult<String> {
    let serialized = serde_json::to_string(config.as_value())?;
    let minified_config = minify(&serialized)?;
    debug!(
        language = ?config.language(),
        services = config.service_names().len(),
        bytes = minified_config.len(),
        "Config minified"
    );

    let document = TemplateDocument {
        template: TagTemplate {
            kind: TEMPLATE_TYPE,
            name: TEMPLATE_NAME,
            metadata: TemplateMetadata {
                display_name: TEMPLATE_NAME,
                category: TEMPLATE_CATEGORY,
            },
            fields: vec![TemplateField {
                name: TEMPLATE_FIELD_NAME,
                display_name: TEMPLATE_FIELD_DISPLAY_NAME,
                kind: TEMPLATE_FIELD_TYPE,
                default_value: minified_config,
                help: TEMPLATE_FIELD_HELP,
            }],
            code: TEMPLATE_JS,
        },
    };

    Ok(serde_json::to_string_pretty(&document)?)
}

/// Render the consent-update trigger. The configuration does not affect it.
pub fn generate_gtm_trigger_code(_config: &ConsentConfig) -> AppResult<String> {
    let document = TriggerDocument {
        trigger: CustomEventTrigger {
            kind: TRIGGER_TYPE,
            name: TRIGGER_NAME,
            metadata: DisplayMetadata {
                display_name: TRIGGER_DISPLAY_NAME,
            },
            filter: vec![TriggerFilter {
                kind: "equals",
                parameter: vec![
                    FilterParameter::RuntimeVariable { key: "event" },
                    FilterParameter::Template {
                        value: CONSENT_UPDATE_EVENT,
                    },
                ],
            }],
            unique_trigger_id: TRIGGER_UNIQUE_ID,
            trigger_id: TRIGGER_ID,
        },
    };

    Ok(serde_json::to_string_pretty(&document)?)
}

/// Render the consent-status variable. The configuration does not affect it.
pub fn generate_gtm_variable_code(_config: &ConsentConfig) -> AppResult<String> {
    let document = VariableDocument {
        variable: JsVariable {
            kind: VARIABLE_TYPE,
            name: VARIABLE_NAME,
            metadata: DisplayMetadata {
                display_name: VARIABLE_DISPLAY_NAME,
            },
            code: VARIABLE_JS,
            variable_id: VARIABLE_ID,
        },
    };

    Ok(serde_json::to_string_pretty(&document)?)
}

/// All three rendered documents for one configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GtmBundle {
    pub template: String,
    pub trigger: String,
    pub variable: String,
}

impl GtmBundle {
    /// Run every builder; fails as a whole if any of them fails.
    pub fn build(config: &ConsentConfig) -> AppResult<Self> {
        Ok(Self {
            template: generate_gtm_template_code(config)?,
            trigger: generate_gtm_trigger_code(config)?,
            variable: generate_gtm_variable_code(config)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn config(value: Value) -> ConsentConfig {
        ConsentConfig::accept(value).unwrap()
    }

    #[test]
    fn test_template_embeds_minified_config() {
        let input = json!({
            "language": "en",
            "services": [{"name": "ga", "title": "Google  Analytics"}]
        });
        let rendered = generate_gtm_template_code(&config(input.clone())).unwrap();
        let doc: Value = serde_json::from_str(&rendered).unwrap();

        let default_value = doc["template"]["fields"][0]["defaultValue"].as_str().unwrap();
        assert_eq!(
            default_value,
            r#"{"language":"en","services":[{"name":"ga","title":"Google  Analytics"}]}"#
        );
        let round_trip: Value = serde_json::from_str(default_value).unwrap();
        assert_eq!(round_trip, input);
    }

    #[test]
    fn test_template_keeps_large_integers_and_unicode() {
        let raw = r#"{"language":"de","services":[{"name":"ga","id":123456789012345678901234567890,"title":"Datenschutzerklärung"}]}"#;
        let input: Value = serde_json::from_str(raw).unwrap();
        let rendered = generate_gtm_template_code(&config(input)).unwrap();
        let doc: Value = serde_json::from_str(&rendered).unwrap();

        let default_value = doc["template"]["fields"][0]["defaultValue"].as_str().unwrap();
        assert_eq!(default_value, raw);
    }

    #[test]
    fn test_template_shape() {
        let rendered =
            generate_gtm_template_code(&config(json!({"language": "en", "services": [1]}))).unwrap();
        let doc: Value = serde_json::from_str(&rendered).unwrap();
        let template = &doc["template"];

        assert_eq!(template["type"], "tag");
        assert_eq!(template["name"], "Klaro Consent Manager");
        assert_eq!(template["metadata"]["displayName"], "Klaro Consent Manager");
        assert_eq!(template["metadata"]["category"], "Consents");
        assert_eq!(template["fields"][0]["name"], "klaroConfig");
        assert_eq!(template["fields"][0]["type"], "textarea");
        assert_eq!(template["code"], TEMPLATE_JS);
    }

    #[test]
    fn test_template_key_order_and_indent() {
        let rendered =
            generate_gtm_template_code(&config(json!({"language": "en", "services": [1]}))).unwrap();
        assert!(rendered.starts_with("{\n  \"template\": {\n    \"type\": \"tag\",\n    \"name\""));
        let code_pos = rendered.find("\"code\"").unwrap();
        let fields_pos = rendered.find("\"fields\"").unwrap();
        assert!(fields_pos < code_pos);
    }

    #[test]
    fn test_trigger_is_constant() {
        let a = generate_gtm_trigger_code(&config(json!({"language": "en", "services": [1]}))).unwrap();
        let b = generate_gtm_trigger_code(&config(json!({
            "language": "fr",
            "services": [{"name": "a"}, {"name": "b"}],
            "extra": true
        })))
        .unwrap();
        assert_eq!(a, b);

        let doc: Value = serde_json::from_str(&a).unwrap();
        assert_eq!(
            doc,
            json!({
                "trigger": {
                    "type": "customEvent",
                    "name": "Klaro Consent Update",
                    "metadata": {"displayName": "Klaro Consent Update Trigger"},
                    "filter": [{
                        "type": "equals",
                        "parameter": [
                            {"type": "runtimeVariable", "key": "event"},
                            {"type": "template", "value": "klaroConsentUpdate"}
                        ]
                    }],
                    "uniqueTriggerId": "klaro_consent_update",
                    "triggerId": "1"
                }
            })
        );
    }

    #[test]
    fn test_variable_is_constant() {
        let a = generate_gtm_variable_code(&config(json!({"language": "en", "services": [1]}))).unwrap();
        let b = generate_gtm_variable_code(&config(json!({"language": "de", "services": ["x"]}))).unwrap();
        assert_eq!(a, b);

        let doc: Value = serde_json::from_str(&a).unwrap();
        assert_eq!(doc["variable"]["type"], "jsm");
        assert_eq!(doc["variable"]["name"], "Klaro Consent Status");
        assert_eq!(doc["variable"]["variableId"], "klaro_consent_status");
        assert!(doc["variable"]["code"].as_str().unwrap().contains("{{k.consentStatus}}"));
    }

    #[test]
    fn test_bundle_builds_all_three() {
        let bundle = GtmBundle::build(&config(json!({"language": "en", "services": [{"name": "ga"}]})))
            .unwrap();
        assert!(bundle.template.contains("\"template\""));
        assert!(bundle.trigger.contains("\"trigger\""));
        assert!(bundle.variable.contains("\"variable\""));
    }
}
