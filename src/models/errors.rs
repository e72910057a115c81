//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so it can be grepped in logs.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - CFG_xxx: Consent configuration errors
//! - UPLOAD_xxx: Policy upload errors
//! - TPL_xxx: Template rendering / serving errors
//! - API_xxx: Generic API errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use tracing::{error, warn};

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message, returned to the caller as-is
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// Replace the caller-facing message, keeping code and source.
    ///
    /// Handlers use this to collapse internal failures into the route's
    /// generic message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Configuration Errors
    // ============================================
    /// Consent configuration missing `language`/`services` or not an object
    ConfigInvalid,
    /// Request body is not valid JSON
    PayloadInvalid,

    // ============================================
    // Upload Errors
    // ============================================
    /// Multipart body has no `file` field
    UploadMissingPart,
    /// `file` field present but without a filename
    UploadEmptyName,
    /// Extension not in the allow-list
    UploadDisallowedType,
    /// Filename sanitised down to nothing
    UploadInvalidName,

    // ============================================
    // Template Errors
    // ============================================
    /// Downloadable template file is missing
    TemplateNotFound,
    /// Landing page is missing from the static directory
    PageNotFound,
    /// Minifier rejected its input
    MinifyFailed,
    /// JSON serialization failed
    SerializationFailed,

    // ============================================
    // Generic Errors
    // ============================================
    /// Filesystem error
    Io,
    /// Internal server error
    Internal,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigInvalid => "CFG_INVALID",
            Self::PayloadInvalid => "CFG_PAYLOAD_INVALID",

            Self::UploadMissingPart => "UPLOAD_MISSING_PART",
            Self::UploadEmptyName => "UPLOAD_EMPTY_NAME",
            Self::UploadDisallowedType => "UPLOAD_DISALLOWED_TYPE",
            Self::UploadInvalidName => "UPLOAD_INVALID_NAME",

            Self::TemplateNotFound => "TPL_NOT_FOUND",
            Self::PageNotFound => "TPL_PAGE_NOT_FOUND",
            Self::MinifyFailed => "TPL_MINIFY_FAILED",
            Self::SerializationFailed => "TPL_SERIALIZATION_FAILED",

            Self::Io => "API_IO_ERROR",
            Self::Internal => "API_INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::ConfigInvalid
            | Self::PayloadInvalid
            | Self::UploadMissingPart
            | Self::UploadEmptyName
            | Self::UploadDisallowedType
            | Self::UploadInvalidName => StatusCode::BAD_REQUEST,
            Self::TemplateNotFound | Self::PageNotFound => StatusCode::NOT_FOUND,
            Self::MinifyFailed | Self::SerializationFailed | Self::Io | Self::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Invalid consent configuration
    pub fn invalid_config() -> Self {
        Self::new(ErrorCode::ConfigInvalid, "Invalid Klaro configuration")
    }

    /// Minification failed
    pub fn minify_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::MinifyFailed, msg)
    }

    /// Upload rejected for the given reason
    pub fn upload(code: ErrorCode, msg: impl Into<String>) -> Self {
        Self::new(code, msg)
    }

    /// Template file missing
    pub fn template_not_found() -> Self {
        Self::new(ErrorCode::TemplateNotFound, "Template file not found")
    }

    /// Landing page missing
    pub fn page_not_found() -> Self {
        Self::new(ErrorCode::PageNotFound, "Page not found")
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::Io, "IO error", err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::SerializationFailed, "JSON error", err)
    }
}

// ============================================
// HTTP mapping
// ============================================

/// Error body: `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code.http_status();
        if status.is_server_error() {
            match &self.source {
                Some(source) => error!(code = self.code_str(), %source, "{}", self.message),
                None => error!(code = self.code_str(), "{}", self.message),
            }
        } else {
            warn!(code = self.code_str(), "{}", self.message);
        }

        (status, Json(ErrorBody { error: self.message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::invalid_config();
        assert_eq!(err.code, ErrorCode::ConfigInvalid);
        assert_eq!(err.code_str(), "CFG_INVALID");
        assert_eq!(err.to_string(), "[CFG_INVALID] Invalid Klaro configuration");
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::ConfigInvalid.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::UploadDisallowedType.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::TemplateNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::PageNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::Internal.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorCode::MinifyFailed.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_with_message_keeps_code_and_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = AppError::from(io).with_message("Failed to upload file");
        assert_eq!(err.code, ErrorCode::Io);
        assert_eq!(err.message, "Failed to upload file");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::template_not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
