//! Consent configuration acceptance
//!
//! Presence checks only: the configuration must be a JSON object with a
//! non-empty `language` and a non-empty `services`. Nothing about the
//! individual services is inspected.

use serde_json::Value;

/// Keys that must be present and non-empty
const REQUIRED_KEYS: [&str; 2] = ["language", "services"];

/// Validate a Klaro configuration. Returns a bare verdict.
pub fn validate_klaro_config(config: &Value) -> bool {
    let Some(map) = config.as_object() else {
        return false;
    };

    REQUIRED_KEYS
        .iter()
        .all(|key| map.get(*key).is_some_and(is_present))
}

/// `null`, `false`, zero, `""`, `[]` and `{}` count as empty.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_minimal_config() {
        assert!(validate_klaro_config(&json!({
            "language": "en",
            "services": [{"name": "ga"}]
        })));
    }

    #[test]
    fn test_rejects_non_objects() {
        assert!(!validate_klaro_config(&json!(null)));
        assert!(!validate_klaro_config(&json!([{"language": "en"}])));
        assert!(!validate_klaro_config(&json!("en")));
        assert!(!validate_klaro_config(&json!(42)));
    }

    #[test]
    fn test_rejects_missing_or_empty_language() {
        for language in [json!(null), json!(""), json!(false), json!(0)] {
            let config = json!({"language": language, "services": [{"name": "ga"}]});
            assert!(!validate_klaro_config(&config), "accepted {}", config);
        }
        assert!(!validate_klaro_config(&json!({"services": [{"name": "ga"}]})));
    }

    #[test]
    fn test_rejects_missing_or_empty_services() {
        assert!(!validate_klaro_config(&json!({"language": "en"})));
        assert!(!validate_klaro_config(&json!({"language": "en", "services": []})));
        assert!(!validate_klaro_config(&json!({"language": "en", "services": {}})));
        assert!(!validate_klaro_config(&json!({"language": "en", "services": null})));
        assert!(!validate_klaro_config(&json!({})));
    }

    #[test]
    fn test_ignores_malformed_extra_fields() {
        // Services without names, odd types elsewhere: still accepted.
        assert!(validate_klaro_config(&json!({
            "language": "en",
            "services": [{}, 3, "x"],
            "storageMethod": 12,
            "consentTitle": null
        })));
        assert!(validate_klaro_config(&json!({"language": 1, "services": "ga"})));
        assert!(validate_klaro_config(&json!({"language": true, "services": {"a": 1}})));
    }
}
