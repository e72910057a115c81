//! API Request Handlers

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::types::*;
use crate::core::analytics::ConsentAnalytics;
use crate::core::gtm::GtmBundle;
use crate::models::config::AppConfig;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::ConsentConfig;
use crate::utils::constants::*;
use crate::utils::filename::{allowed_file, secure_filename};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

// ============================================
// Pages & Health
// ============================================

pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let path = state.config.index_page_path();

    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Ok(Html(page)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Landing page missing at {}", path.display());
            Err(AppError::page_not_found())
        }
        Err(e) => Err(AppError::from(e).with_message(MSG_PAGE_SERVE_FAILED)),
    }
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthData> {
    Json(HealthData {
        status: "healthy".to_string(),
        version: APP_VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

// ============================================
// GTM Generation
// ============================================

pub async fn generate_gtm_template(body: Bytes) -> AppResult<Json<GenerateResponse>> {
    let raw: Value = serde_json::from_slice(&body).map_err(|e| {
        AppError::with_source(ErrorCode::ConfigInvalid, "Invalid Klaro configuration", e)
    })?;

    let config = ConsentConfig::accept(raw)?;

    let bundle = GtmBundle::build(&config).map_err(|e| e.with_message(MSG_GENERATE_FAILED))?;

    info!(
        "📦 GTM bundle generated: language={:?}, services={}",
        config.language(),
        config.service_names().len()
    );

    Ok(Json(bundle.into()))
}

// ============================================
// Consent Simulation
// ============================================

pub async fn simulate_consent(body: Bytes) -> AppResult<Json<MessageResponse>> {
    let choices: Value = serde_json::from_slice(&body).map_err(|e| {
        AppError::with_source(ErrorCode::Internal, MSG_SIMULATE_FAILED, e)
    })?;

    let message = format!("Simulating consent choices: {}", choices);
    info!("{}", message);

    Ok(Json(MessageResponse::new(message)))
}

// ============================================
// Policy Upload / Download
// ============================================

pub async fn upload_policy(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<MessageResponse>> {
    let mut multipart = multipart.map_err(|e| {
        AppError::with_source(ErrorCode::UploadMissingPart, MSG_NO_FILE_PART, e)
    })?;

    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::with_source(ErrorCode::PayloadInvalid, MSG_UPLOAD_FAILED, e)
    })? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        // A `file` part without a filename is a plain form value, not a file.
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field.bytes().await.map_err(|e| {
            AppError::with_source(ErrorCode::PayloadInvalid, MSG_UPLOAD_FAILED, e)
        })?;
        upload = Some((filename, data));
        break;
    }

    let Some((filename, data)) = upload else {
        return Err(AppError::upload(ErrorCode::UploadMissingPart, MSG_NO_FILE_PART));
    };
    if filename.is_empty() {
        return Err(AppError::upload(ErrorCode::UploadEmptyName, MSG_NO_SELECTED_FILE));
    }
    if !allowed_file(&filename) {
        return Err(AppError::upload(
            ErrorCode::UploadDisallowedType,
            MSG_FILE_TYPE_NOT_ALLOWED,
        ));
    }

    let safe_name = secure_filename(&filename);
    if safe_name.is_empty() {
        return Err(AppError::upload(ErrorCode::UploadInvalidName, MSG_INVALID_FILE_NAME));
    }

    let upload_dir = &state.config.upload_dir;
    let path = upload_dir.join(&safe_name);
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::from(e).with_message(MSG_UPLOAD_FAILED))?;
    tokio::fs::write(&path, &data)
        .await
        .map_err(|e| AppError::from(e).with_message(MSG_UPLOAD_FAILED))?;

    info!("📄 Policy uploaded: {} ({} bytes)", path.display(), data.len());

    Ok(Json(MessageResponse::new(format!(
        "File {} uploaded successfully",
        safe_name
    ))))
}

pub async fn download_template(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let path = state.config.policy_template_path();

    let contents = match tokio::fs::read(&path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Policy template missing at {}", path.display());
            return Err(AppError::template_not_found());
        }
        Err(e) => return Err(AppError::from(e).with_message(MSG_TEMPLATE_SERVE_FAILED)),
    };

    let disposition = format!("attachment; filename=\"{}\"", POLICY_TEMPLATE_FILE);
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        contents,
    )
        .into_response())
}

// ============================================
// Analytics
// ============================================

pub async fn consent_analytics() -> Json<ConsentAnalytics> {
    Json(ConsentAnalytics::sample())
}
