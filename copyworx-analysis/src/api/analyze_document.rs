//! Combined document analysis handler
//!
//! POST /api/analyze-document
//!
//! Accepts `content` plus a requested metric set; metrics missing their
//! configuration object are dropped rather than rejected, and a request
//! whose surviving set is empty succeeds with an empty object.

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, routing::post, Json, Router};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::{BrandVoice, DocumentAnalysis, Persona};
use crate::services::parser::parse_document;
use crate::services::prompt::{compose_document_prompt, SYSTEM_DOCUMENT};
use crate::services::{invoke_model, ANALYZE_DOCUMENT};
use crate::validators::{parse_optional_config, resolve_metrics, validate_text_field};
use crate::AppState;

/// POST /api/analyze-document
pub async fn analyze_document(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<DocumentAnalysis>> {
    let Json(body) = payload
        .map_err(|e| ApiError::InvalidInput(format!("request body is not valid JSON: {}", e)))?;
    match run(&state, &body).await {
        Ok(analysis) => Ok(Json(analysis)),
        Err(e) => {
            state.note_error(&e).await;
            Err(e)
        }
    }
}

async fn run(state: &AppState, body: &Value) -> ApiResult<DocumentAnalysis> {
    let text = validate_text_field(body, "content")?;
    let brand_voice: Option<BrandVoice> = parse_optional_config(body, "brandVoice");
    let persona: Option<Persona> = parse_optional_config(body, "persona");

    let active = resolve_metrics(body, brand_voice.as_ref(), persona.as_ref())?;
    if active.is_empty() {
        // All requested metrics lost their configuration; an empty success
        // beats failing a request that held a valid (if empty) subset.
        tracing::debug!("All requested metrics dropped; returning empty analysis");
        return Ok(DocumentAnalysis::default());
    }

    let prompt = compose_document_prompt(&text, &active, brand_voice.as_ref(), persona.as_ref());
    let raw = invoke_model(
        state.model.as_ref(),
        &ANALYZE_DOCUMENT,
        SYSTEM_DOCUMENT,
        &prompt,
    )
    .await?;

    parse_document(&raw, &active)
}

/// Build combined-analysis routes
pub fn analysis_routes() -> Router<AppState> {
    Router::new().route("/api/analyze-document", post(analyze_document))
}
