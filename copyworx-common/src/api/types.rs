//! Shared API request/response types
//!
//! Wire types used by every CopyWorx HTTP service. Error responses carry a
//! short category string plus an optional human-readable detail; internal
//! error text and stack traces never leave the server.

use serde::{Deserialize, Serialize};

/// Error response body
///
/// Returned with a matching HTTP status for every failed request:
///
/// ```json
/// { "error": "Invalid request", "details": "text must not be empty" }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorBody {
    /// Short error category, stable across releases
    pub error: String,

    /// Human-readable detail safe to show to end users
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }

    /// Error body with no detail line
    pub fn bare(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_omitted_when_none() {
        let body = ErrorBody::bare("Internal server error");
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"Internal server error"}"#);
    }

    #[test]
    fn details_serialized_when_present() {
        let body = ErrorBody::new("Invalid request", "text must not be empty");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["details"], "text must not be empty");
    }
}
