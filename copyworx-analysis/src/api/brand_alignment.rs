//! Brand alignment handler
//!
//! POST /api/brand-alignment
//!
//! Unlike the combined endpoint, the brand voice is required here: there is
//! no other metric to fall back to, so a missing or unnamed brand voice is
//! a caller fault.

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, routing::post, Json, Router};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::{AlignmentResponse, BrandReport, BrandVoice};
use crate::services::parser::parse_brand_report;
use crate::services::prompt::{brand_alignment_prompt, SYSTEM_BRAND};
use crate::services::{invoke_model, BRAND_ALIGNMENT};
use crate::validators::{parse_required_config, validate_text_field};
use crate::AppState;

/// POST /api/brand-alignment
pub async fn brand_alignment(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<AlignmentResponse<BrandReport>>> {
    let Json(body) = payload
        .map_err(|e| ApiError::InvalidInput(format!("request body is not valid JSON: {}", e)))?;
    match run(&state, &body).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            state.note_error(&e).await;
            Err(e)
        }
    }
}

async fn run(state: &AppState, body: &Value) -> ApiResult<AlignmentResponse<BrandReport>> {
    let text = validate_text_field(body, "text")?;
    let brand_voice: BrandVoice = parse_required_config(body, "brandVoice")?;
    if !brand_voice.has_name() {
        return Err(ApiError::InvalidInput(
            "'brandVoice.brandName' is required".to_string(),
        ));
    }

    let prompt = brand_alignment_prompt(&text, &brand_voice);
    let raw = invoke_model(state.model.as_ref(), &BRAND_ALIGNMENT, SYSTEM_BRAND, &prompt).await?;
    let result = parse_brand_report(&raw)?;

    Ok(AlignmentResponse {
        result,
        text_length: text.chars().count(),
    })
}

/// Build brand-alignment routes
pub fn brand_routes() -> Router<AppState> {
    Router::new().route("/api/brand-alignment", post(brand_alignment))
}
