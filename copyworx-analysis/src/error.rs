//! Error types for copyworx-analysis
//!
//! One classification per request: every failure in the pipeline maps to
//! exactly one of these variants, and nothing propagates to the client
//! unclassified. Internal error text is logged server-side and never
//! included in the response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use copyworx_common::api::ErrorBody;
use thiserror::Error;

/// API error type covering the full pipeline taxonomy
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller fault (400), never retryable
    #[error("Invalid request: {0}")]
    InvalidInput(String),

    /// The model call exceeded the endpoint's wall-clock budget (408)
    #[error("Analysis timed out after {budget_secs}s")]
    Timeout { budget_secs: u64 },

    /// Upstream returned 429; retryable by the caller
    #[error("Upstream rate limited (status {status})")]
    UpstreamRateLimited { status: u16 },

    /// Upstream returned 401/403; an operator fault, not a caller fault
    #[error("Upstream auth failure (status {status})")]
    UpstreamAuth { status: u16 },

    /// Upstream returned 5xx; retryable by the caller
    #[error("Upstream unavailable (status {status})")]
    UpstreamUnavailable { status: u16 },

    /// The model's reply was not parseable as the expected JSON (500);
    /// attributed to the upstream model, not the caller
    #[error("Malformed upstream response: {0}")]
    MalformedUpstream(String),

    /// Anything unclassified (500); detail is logged, not exposed
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this classification. Upstream statuses are passed
    /// through so callers can distinguish 429 from 503.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            ApiError::UpstreamRateLimited { status }
            | ApiError::UpstreamAuth { status }
            | ApiError::UpstreamUnavailable { status } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::MalformedUpstream(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::InvalidInput(msg) => ErrorBody::new("Invalid request", msg.clone()),
            ApiError::Timeout { budget_secs } => ErrorBody::new(
                "Analysis timed out",
                format!(
                    "The analysis took longer than {}s. Try again with shorter text.",
                    budget_secs
                ),
            ),
            ApiError::UpstreamRateLimited { .. } => ErrorBody::new(
                "Rate limit exceeded",
                "The AI service is rate limiting requests. Wait a moment and try again.",
            ),
            ApiError::UpstreamAuth { .. } => ErrorBody::new(
                "AI service rejected the request",
                "This is a configuration issue on our side. Please contact support.",
            ),
            ApiError::UpstreamUnavailable { .. } => ErrorBody::new(
                "AI service unavailable",
                "The AI service is temporarily unavailable. Try again shortly.",
            ),
            ApiError::MalformedUpstream(detail) => {
                tracing::error!(detail = %detail, "Failed to parse AI response");
                ErrorBody::new(
                    "Failed to parse AI response",
                    "The AI returned an unexpected format. Retrying usually helps.",
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "Unclassified internal error");
                ErrorBody::new("Internal server error", "An unexpected error occurred.")
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::InvalidInput("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Timeout { budget_secs: 20 }.status(),
            StatusCode::REQUEST_TIMEOUT
        );
        assert_eq!(
            ApiError::UpstreamRateLimited { status: 429 }.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError::UpstreamAuth { status: 403 }.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::UpstreamUnavailable { status: 503 }.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::MalformedUpstream("bad json".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn invalid_upstream_status_falls_back_to_500() {
        let err = ApiError::UpstreamUnavailable { status: 99 };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
