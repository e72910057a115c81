//! Klaro GTM Generator API Server
//!
//! Usage:
//!   cargo run --bin klaro_gtm
//!
//! Environment:
//!   PORT / KLARO_PORT - Server port (default: 8080)
//!   KLARO_HOST        - Server host (default: 0.0.0.0)
//!   UPLOAD_FOLDER     - Policy upload directory (default: /tmp/uploads)
//!   STATIC_DIR        - Frontend assets & policy template (default: static)
//!   SECRET_KEY        - Session secret
//!   RUST_LOG          - Log filter (default: info)

use klaro_gtm::utils::constants::{APP_NAME, APP_VERSION};
use klaro_gtm::{create_router, AppConfig, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    info!("🍪 {} v{}", APP_NAME, APP_VERSION);

    let config = AppConfig::from_env();
    if config.uses_default_secret() {
        warn!("⚠️ Running with the development secret key; set SECRET_KEY in production");
    }

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    info!("📁 Upload folder: {}", config.upload_dir.display());

    if !config.policy_template_path().exists() {
        warn!(
            "⚠️ Policy template not found at {}; /download-template will return 404",
            config.policy_template_path().display()
        );
    }
    if !config.index_page_path().exists() {
        warn!(
            "⚠️ Landing page not found at {}; / will return 404",
            config.index_page_path().display()
        );
    }

    let addr: SocketAddr = config.bind_addr().parse()?;
    let app = create_router(Arc::new(AppState::new(config)));

    info!("🚀 Listening on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /                      - Configuration page");
    info!("  POST /generate-gtm-template - Build GTM template, trigger & variable");
    info!("  POST /simulate-consent      - Echo simulated consent choices");
    info!("  POST /upload-policy         - Upload a privacy policy file");
    info!("  GET  /download-template     - Download the sample privacy policy");
    info!("  GET  /consent-analytics     - Sample consent analytics");
    info!("  GET  /health                - Health check");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("👋 Shutdown complete");

    Ok(())
}
