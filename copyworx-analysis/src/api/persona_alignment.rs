//! Persona alignment handler
//!
//! POST /api/persona-alignment

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, routing::post, Json, Router};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::{AlignmentResponse, Persona, PersonaReport};
use crate::services::parser::parse_persona_report;
use crate::services::prompt::{persona_alignment_prompt, SYSTEM_PERSONA};
use crate::services::{invoke_model, PERSONA_ALIGNMENT};
use crate::validators::{parse_required_config, validate_text_field};
use crate::AppState;

/// POST /api/persona-alignment
pub async fn persona_alignment(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<AlignmentResponse<PersonaReport>>> {
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

async fn run(state: &AppState, body: &Value) -> ApiResult<AlignmentResponse<PersonaReport>> {
    let text = validate_text_field(body, "text")?;
    let persona: Persona = parse_required_config(body, "persona")?;
    if !persona.has_name() {
        return Err(ApiError::InvalidInput(
            "'persona.name' is required".to_string(),
        ));
    }

    let prompt = persona_alignment_prompt(&text, &persona);
    let raw = invoke_model(
        state.model.as_ref(),
        &PERSONA_ALIGNMENT,
        SYSTEM_PERSONA,
        &prompt,
    )
    .await?;
    let result = parse_persona_report(&raw)?;

    Ok(AlignmentResponse {
        result,
        text_length: text.chars().count(),
    })
}

/// Build persona-alignment routes
pub fn persona_routes() -> Router<AppState> {
    Router::new().route("/api/persona-alignment", post(persona_alignment))
}
