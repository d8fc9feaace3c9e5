//! copyworx-analysis library interface
//!
//! Exposes the router, state, and pipeline stages for integration testing.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod validators;

pub use crate::config::AnalysisConfig;
pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::ModelClient;

/// Application state shared across handlers
///
/// The pipeline itself is stateless; state carries only startup-validated
/// configuration, the shared model client, and diagnostics.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration, validated once at startup
    pub config: Arc<AnalysisConfig>,
    /// Upstream model client (stubbed in tests)
    pub model: Arc<dyn ModelClient>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last error for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(config: Arc<AnalysisConfig>, model: Arc<dyn ModelClient>) -> Self {
        Self {
            config,
            model,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Record the most recent handler error for the health endpoint
    pub async fn note_error(&self, err: &ApiError) {
        *self.last_error.write().await = Some(err.to_string());
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::analysis_routes())
        .merge(api::brand_routes())
        .merge(api::persona_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
