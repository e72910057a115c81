//! Startup configuration
//!
//! Everything the handlers need from the environment is read once here and
//! handed to the router through `AppState`. No handler touches env vars.

use std::path::PathBuf;
use tracing::{info, warn};

use crate::utils::constants::{
    DEFAULT_HOST, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT, DEFAULT_SECRET_KEY, DEFAULT_STATIC_DIR,
    DEFAULT_UPLOAD_DIR,
};

/// Server configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Where uploaded policy files are written
    pub upload_dir: PathBuf,
    /// Frontend assets and the downloadable policy template
    pub static_dir: PathBuf,
    /// Session secret. Never logged.
    pub secret_key: String,
    /// Request body limit for uploads
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("upload_dir", &self.upload_dir)
            .field("static_dir", &self.static_dir)
            .field("secret_key", &"<redacted>")
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// `PORT` wins over `KLARO_PORT` so PaaS-assigned ports are honoured.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] but with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("KLARO_HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT").or_else(|| lookup("KLARO_PORT")) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("⚠️ Invalid port {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let upload_dir = lookup("UPLOAD_FOLDER")
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_dir);

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let secret_key = lookup("SECRET_KEY")
            .filter(|key| !key.is_empty())
            .unwrap_or(defaults.secret_key);

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("⚠️ Invalid MAX_UPLOAD_BYTES {:?}, using {}", raw, DEFAULT_MAX_UPLOAD_BYTES);
                DEFAULT_MAX_UPLOAD_BYTES
            }),
            None => defaults.max_upload_bytes,
        };

        let config = Self {
            host,
            port,
            upload_dir,
            static_dir,
            secret_key,
            max_upload_bytes,
        };
        info!(?config, "Configuration loaded");
        config
    }

    /// `host:port` string for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether the secret key is still the built-in development value
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    /// Path of the landing page
    pub fn index_page_path(&self) -> PathBuf {
        self.static_dir.join(crate::utils::constants::INDEX_PAGE_FILE)
    }

    /// Path of the downloadable privacy policy template
    pub fn policy_template_path(&self) -> PathBuf {
        self.static_dir
            .join("templates")
            .join(crate::utils::constants::POLICY_TEMPLATE_FILE)
    }
}
