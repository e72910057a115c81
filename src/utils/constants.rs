//! Constants Module - Single Source of Truth
//!
//! Every literal the generator emits (GTM identifiers, JavaScript snippets,
//! response messages) and every startup default lives here.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "Klaro GTM Generator";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// STARTUP DEFAULTS
// ============================================

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_UPLOAD_DIR: &str = "/tmp/uploads";
pub const DEFAULT_STATIC_DIR: &str = "static";
/// Development-only session secret; override with `SECRET_KEY`
pub const DEFAULT_SECRET_KEY: &str = "your_default_secret_key";
/// 16 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

// ============================================
// UPLOADS
// ============================================

/// Policy upload extensions, lower-case
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["txt", "pdf", "doc", "docx"];

/// Multipart field carrying the policy file
pub const UPLOAD_FIELD: &str = "file";

/// Landing page, under `<static>/`
pub const INDEX_PAGE_FILE: &str = "index.html";

/// Downloadable sample policy, under `<static>/templates/`
pub const POLICY_TEMPLATE_FILE: &str = "sample_privacy_policy.txt";

// ============================================
// RESPONSE MESSAGES
// ============================================

pub const MSG_GENERATED: &str = "GTM templates and triggers generated successfully!";
pub const MSG_GENERATE_FAILED: &str = "Failed to generate GTM template";
pub const MSG_SIMULATE_FAILED: &str = "Failed to simulate consent";
pub const MSG_NO_FILE_PART: &str = "No file part";
pub const MSG_NO_SELECTED_FILE: &str = "No selected file";
pub const MSG_FILE_TYPE_NOT_ALLOWED: &str = "File type not allowed";
pub const MSG_INVALID_FILE_NAME: &str = "Invalid file name";
pub const MSG_UPLOAD_FAILED: &str = "Failed to upload file";
pub const MSG_TEMPLATE_SERVE_FAILED: &str = "Failed to serve template";
pub const MSG_PAGE_SERVE_FAILED: &str = "Failed to serve page";

// ============================================
// GTM TEMPLATE (tag)
// ============================================

pub const TEMPLATE_TYPE: &str = "tag";
pub const TEMPLATE_NAME: &str = "Klaro Consent Manager";
pub const TEMPLATE_CATEGORY: &str = "Consents";
pub const TEMPLATE_FIELD_NAME: &str = "klaroConfig";
pub const TEMPLATE_FIELD_DISPLAY_NAME: &str = "Klaro Configuration";
pub const TEMPLATE_FIELD_TYPE: &str = "textarea";
pub const TEMPLATE_FIELD_HELP: &str = "Paste your minified Klaro configuration here.";

/// Klaro CDN bundle injected by the tag
pub const KLARO_CDN_URL: &str = "https://cdn.kiprotect.com/klaro/latest/klaro.js";

/// dataLayer event pushed on every consent change
pub const CONSENT_UPDATE_EVENT: &str = "klaroConsentUpdate";

/// Tag body. `{{klaroConfig}}` is resolved by GTM from the template field.
pub const TEMPLATE_JS: &str = r#"
// Load minified Klaro config from the GTM template field
var klaroConfig = JSON.parse({{klaroConfig}});

// Initialize Klaro with the config
var klaro = window.klaro = window.klaro || {};
klaro.config = klaroConfig;

// Function to update consent status in dataLayer
function updateConsentStatus(serviceName, consentGiven) {
    var consentStatus = {};
    consentStatus['klaro_' + serviceName] = consentGiven;
    dataLayer.push({'event': 'klaroConsentUpdate', 'consentStatus': consentStatus});
}

// Check for existing consent or initialize
for (var i = 0; i < klaroConfig.services.length; i++) {
    var service = klaroConfig.services[i];
    if (typeof klaro.getConsent(service.name) === 'undefined') {
        // Initialize consent (default or as per your logic)
        klaro.setup(klaroConfig);
    }
    // Push initial consent status to dataLayer
    updateConsentStatus(service.name, klaro.getConsent(service.name));
}

// Attach listener for consent changes
klaro.callback = function(consent, service) {
    updateConsentStatus(service.name, consent);
};

// Load and run Klaro
var script = document.createElement('script');
script.type = 'text/javascript';
script.src = 'https://cdn.kiprotect.com/klaro/latest/klaro.js';
script.async = true;
script.onload = function() {
    // Ensure Klaro is fully initialized before using it
    if (window.klaro && typeof window.klaro.show === 'function') {
        window.klaro.show();
    }
};
document.head.appendChild(script);

// Data layer push for successful script execution
dataLayer.push({'event': 'klaroScriptLoaded'});
"#;

// ============================================
// GTM TRIGGER
// ============================================

pub const TRIGGER_TYPE: &str = "customEvent";
pub const TRIGGER_NAME: &str = "Klaro Consent Update";
pub const TRIGGER_DISPLAY_NAME: &str = "Klaro Consent Update Trigger";
pub const TRIGGER_UNIQUE_ID: &str = "klaro_consent_update";
pub const TRIGGER_ID: &str = "1";

// ============================================
// GTM VARIABLE
// ============================================

pub const VARIABLE_TYPE: &str = "jsm";
pub const VARIABLE_NAME: &str = "Klaro Consent Status";
pub const VARIABLE_DISPLAY_NAME: &str = "Klaro Consent Status Variable";
pub const VARIABLE_ID: &str = "klaro_consent_status";

/// Custom JavaScript variable body
pub const VARIABLE_JS: &str = r#"
function() {
    var consentStatus = {{k.consentStatus}};
    return consentStatus;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_js_references_constants() {
        assert!(TEMPLATE_JS.contains(KLARO_CDN_URL));
        assert!(TEMPLATE_JS.contains(CONSENT_UPDATE_EVENT));
        assert!(TEMPLATE_JS.contains(&format!("{{{{{}}}}}", TEMPLATE_FIELD_NAME)));
    }

    #[test]
    fn test_template_js_keeps_setup_comments() {
        assert!(TEMPLATE_JS.contains("// Initialize consent (default or as per your logic)"));
        assert!(TEMPLATE_JS.contains("// Ensure Klaro is fully initialized before using it"));
    }

    #[test]
    fn test_allowed_extensions_are_lowercase() {
        for ext in ALLOWED_EXTENSIONS {
            assert_eq!(ext, ext.to_lowercase());
        }
    }
}
