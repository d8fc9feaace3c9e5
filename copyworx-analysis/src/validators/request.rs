//! Validation of raw analysis request bodies
//!
//! Handlers take the body as raw JSON so that missing and wrong-typed fields
//! produce a 400 with a specific message instead of a framework rejection.
//!
//! Filtering policy for the combined endpoint: a metric whose required
//! configuration object is missing is dropped, not an error. The request is
//! only a caller fault when the submitted metric list itself was empty or
//! contained nothing recognizable.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::ApiError;
use crate::models::{BrandVoice, Metric, Persona};

/// Maximum accepted text length, in characters
pub const MAX_TEXT_CHARS: usize = 10_000;

/// Extract and validate the text payload under `field`.
///
/// The text must be present, a string, non-blank, and within
/// [`MAX_TEXT_CHARS`]. Returns the owned string on success.
pub fn validate_text_field(body: &Value, field: &str) -> Result<String, ApiError> {
    let value = body
        .get(field)
        .ok_or_else(|| ApiError::InvalidInput(format!("'{}' is required", field)))?;

    let text = value
        .as_str()
        .ok_or_else(|| ApiError::InvalidInput(format!("'{}' must be a string", field)))?;

    if text.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!(
            "'{}' must not be empty",
            field
        )));
    }

    let chars = text.chars().count();
    if chars > MAX_TEXT_CHARS {
        return Err(ApiError::InvalidInput(format!(
            "'{}' exceeds the {} character limit ({} characters submitted)",
            field, MAX_TEXT_CHARS, chars
        )));
    }

    Ok(text.to_string())
}

/// Parse an optional configuration object (combined endpoint).
///
/// Absent, null, or malformed objects all resolve to `None` — the metric
/// depending on the object is then dropped by [`resolve_metrics`]. Malformed
/// objects are logged since they usually indicate a client bug.
pub fn parse_optional_config<T: DeserializeOwned>(body: &Value, field: &str) -> Option<T> {
    let value = body.get(field)?;
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(field = field, error = %e, "Ignoring malformed configuration object");
            None
        }
    }
}

/// Parse a required configuration object (dedicated endpoints).
pub fn parse_required_config<T: DeserializeOwned>(body: &Value, field: &str) -> Result<T, ApiError> {
    let value = body
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| ApiError::InvalidInput(format!("'{}' is required", field)))?;

    serde_json::from_value(value.clone())
        .map_err(|e| ApiError::InvalidInput(format!("'{}' is malformed: {}", field, e)))
}

/// Resolve the active metric set for the combined endpoint.
///
/// - Submitted list missing, not an array, or empty → 400.
/// - List holds no recognized metric name → 400.
/// - Recognized metric lacking its configuration → silently dropped.
/// - Surviving set may be empty; the caller then returns 200 with `{}`.
pub fn resolve_metrics(
    body: &Value,
    brand_voice: Option<&BrandVoice>,
    persona: Option<&Persona>,
) -> Result<Vec<Metric>, ApiError> {
    let submitted = body
        .get("metricsToAnalyze")
        .ok_or_else(|| ApiError::InvalidInput("'metricsToAnalyze' is required".to_string()))?
        .as_array()
        .ok_or_else(|| {
            ApiError::InvalidInput("'metricsToAnalyze' must be an array of strings".to_string())
        })?;

    if submitted.is_empty() {
        return Err(ApiError::InvalidInput(
            "'metricsToAnalyze' must contain at least one metric".to_string(),
        ));
    }

    let mut recognized: Vec<Metric> = Vec::new();
    for entry in submitted {
        if let Some(name) = entry.as_str() {
            if let Some(metric) = Metric::parse(name) {
                if !recognized.contains(&metric) {
                    recognized.push(metric);
                }
            }
        }
    }

    if recognized.is_empty() {
        return Err(ApiError::InvalidInput(
            "'metricsToAnalyze' contains no recognized metrics (expected: tone, brand, persona)"
                .to_string(),
        ));
    }

    // Drop metrics whose required configuration is absent or unusable.
    let has_brand = brand_voice.map(|bv| bv.has_name()).unwrap_or(false);
    let has_persona = persona.map(|p| p.has_name()).unwrap_or(false);

    let active: Vec<Metric> = recognized
        .into_iter()
        .filter(|metric| match metric {
            Metric::Tone => true,
            Metric::Brand => {
                if !has_brand {
                    warn!("Dropping 'brand' metric: no usable brandVoice supplied");
                }
                has_brand
            }
            Metric::Persona => {
                if !has_persona {
                    warn!("Dropping 'persona' metric: no usable persona supplied");
                }
                has_persona
            }
        })
        .collect();

    Ok(active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn brand_voice() -> BrandVoice {
        serde_json::from_value(json!({"brandName": "Acme"})).unwrap()
    }

    fn persona() -> Persona {
        serde_json::from_value(json!({"name": "Busy Founder"})).unwrap()
    }

    #[test]
    fn missing_text_rejected() {
        let err = validate_text_field(&json!({}), "text").unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn wrong_typed_text_rejected() {
        let err = validate_text_field(&json!({"text": 42}), "text").unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn blank_text_rejected() {
        let err = validate_text_field(&json!({"text": "   "}), "text").unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn oversized_text_rejected() {
        let body = json!({ "text": "a".repeat(MAX_TEXT_CHARS + 1) });
        let err = validate_text_field(&body, "text").unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn text_at_limit_accepted() {
        let body = json!({ "text": "a".repeat(MAX_TEXT_CHARS) });
        assert!(validate_text_field(&body, "text").is_ok());
    }

    #[test]
    fn empty_metric_list_rejected() {
        let body = json!({"metricsToAnalyze": []});
        let err = resolve_metrics(&body, None, None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn unrecognized_only_rejected() {
        let body = json!({"metricsToAnalyze": ["sentiment", "readability"]});
        let err = resolve_metrics(&body, None, None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn brand_without_config_dropped_not_error() {
        let body = json!({"metricsToAnalyze": ["brand"]});
        let active = resolve_metrics(&body, None, None).unwrap();
        assert!(active.is_empty());
    }

    #[test]
    fn tone_survives_without_config() {
        let body = json!({"metricsToAnalyze": ["tone", "brand"]});
        let active = resolve_metrics(&body, None, None).unwrap();
        assert_eq!(active, vec![Metric::Tone]);
    }

    #[test]
    fn all_metrics_survive_with_config() {
        let body = json!({"metricsToAnalyze": ["tone", "brand", "persona"]});
        let bv = brand_voice();
        let p = persona();
        let active = resolve_metrics(&body, Some(&bv), Some(&p)).unwrap();
        assert_eq!(active, vec![Metric::Tone, Metric::Brand, Metric::Persona]);
    }

    #[test]
    fn duplicate_metrics_deduplicated() {
        let body = json!({"metricsToAnalyze": ["tone", "tone", "TONE"]});
        let active = resolve_metrics(&body, None, None).unwrap();
        assert_eq!(active, vec![Metric::Tone]);
    }

    #[test]
    fn blank_brand_name_treated_as_absent() {
        let body = json!({"metricsToAnalyze": ["brand"]});
        let bv: BrandVoice = serde_json::from_value(json!({"brandName": "  "})).unwrap();
        let active = resolve_metrics(&body, Some(&bv), None).unwrap();
        assert!(active.is_empty());
    }

    #[test]
    fn malformed_optional_config_ignored() {
        let body = json!({"brandVoice": {"brandName": 7}});
        let parsed: Option<BrandVoice> = parse_optional_config(&body, "brandVoice");
        assert!(parsed.is_none());
    }

    #[test]
    fn required_config_missing_rejected() {
        let err = parse_required_config::<BrandVoice>(&json!({}), "brandVoice").unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}
