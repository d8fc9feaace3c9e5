//! copyworx-analysis - AI Copy Analysis Microservice
//!
//! HTTP service behind the CopyWorx workspace: accepts marketing copy plus
//! brand-voice/persona snapshots, batches the requested metrics into one
//! model call, and returns validated JSON judgments.
//!
//! Configuration is resolved and validated once here; a missing model API
//! key fails startup rather than surfacing per request.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use copyworx_analysis::services::AnthropicClient;
use copyworx_analysis::{build_router, AnalysisConfig, AppState};
use copyworx_common::config::{default_config_path, load_toml_config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging before configuration resolution so the resolver's
    // own messages (key source, multi-source warnings) are not dropped.
    // The TOML log filter is peeked silently here; RUST_LOG still wins.
    let configured_filter = default_config_path("copyworx-analysis")
        .and_then(|path| load_toml_config(&path).ok())
        .and_then(|toml_config| toml_config.logging.filter);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_filter(configured_filter)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AnalysisConfig::resolve()
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    info!("Starting copyworx-analysis microservice");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Model: {}", config.model_id);

    let model = AnthropicClient::new(&config)
        .map_err(|e| anyhow::anyhow!("Failed to create model client: {}", e))?;

    let bind = format!("{}:{}", config.bind_address, config.port);
    let state = AppState::new(Arc::new(config), Arc::new(model));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("Listening on http://{}", bind);
    info!("Health check: http://{}/health", bind);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Filter directive applied when RUST_LOG is unset: the TOML-configured
/// filter, falling back to "info".
fn fallback_filter(configured: Option<String>) -> String {
    configured.unwrap_or_else(|| "info".to_string())
}
