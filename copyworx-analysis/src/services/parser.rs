//! Model response parsing and validation
//!
//! The upstream model is prompted, never guaranteed, to match the schema.
//! Policy is coerce-and-default: clamp numbers into range, truncate long
//! feedback, default missing lists to empty, coerce out-of-vocabulary tone
//! labels to "neutral". Only an unparseable reply is an error, and that is
//! attributed to the upstream (500), not the caller.

use copyworx_common::text::truncate_chars;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{
    AlignmentJudgment, BrandReport, DocumentAnalysis, Metric, PersonaReport, ToneJudgment,
    TONE_LABELS,
};

/// Maximum characters kept from feedback/assessment strings
pub const MAX_FEEDBACK_CHARS: usize = 200;

/// Strip a surrounding triple-backtick code fence, optionally tagged `json`.
///
/// Tolerant parsing: a reply without a fence passes through unchanged, and
/// an unterminated fence is stripped on the side that is present.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

fn parse_json(raw: &str) -> Result<Value, ApiError> {
    let cleaned = strip_code_fence(raw);
    serde_json::from_str(cleaned).map_err(|e| ApiError::MalformedUpstream(e.to_string()))
}

/// Coerce a JSON value into a score clamped to [min, max].
///
/// Accepts integers, floats, and numeric strings; everything else is `None`.
fn coerce_score(value: Option<&Value>, min: u8, max: u8) -> Option<u8> {
    let value = value?;
    let n = if let Some(i) = value.as_i64() {
        i as f64
    } else if let Some(f) = value.as_f64() {
        f
    } else if let Some(s) = value.as_str() {
        s.trim().parse::<f64>().ok()?
    } else {
        return None;
    };
    if !n.is_finite() {
        return None;
    }
    Some(n.round().clamp(min as f64, max as f64) as u8)
}

/// Coerce a feedback/assessment field: missing or non-string becomes empty,
/// long strings are truncated to [`MAX_FEEDBACK_CHARS`].
fn coerce_feedback(value: Option<&Value>) -> String {
    match value.and_then(Value::as_str) {
        Some(s) => truncate_chars(s, MAX_FEEDBACK_CHARS),
        None => String::new(),
    }
}

/// Coerce a list field: missing or non-array becomes empty; non-string
/// entries are skipped.
fn coerce_list(value: Option<&Value>) -> Vec<String> {
    match value.and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        None => Vec::new(),
    }
}

/// Coerce a tone label into the closed vocabulary.
fn coerce_tone_label(value: Option<&Value>) -> String {
    let label = value
        .and_then(Value::as_str)
        .map(|s| s.trim().to_ascii_lowercase())
        .unwrap_or_default();
    if TONE_LABELS.contains(&label.as_str()) {
        label
    } else {
        "neutral".to_string()
    }
}

/// Parse the combined-analysis reply for the active metric set.
///
/// A metric whose object is missing from the reply, or whose score cannot
/// be coerced, is omitted from the result rather than failing the request.
pub fn parse_document(raw: &str, metrics: &[Metric]) -> Result<DocumentAnalysis, ApiError> {
    let value = parse_json(raw)?;
    let mut analysis = DocumentAnalysis::default();

    for metric in metrics {
        match metric {
            Metric::Tone => {
                if let Some(tone) = value.get("tone").filter(|v| v.is_object()) {
                    analysis.tone = Some(ToneJudgment {
                        label: coerce_tone_label(tone.get("label")),
                        confidence: coerce_score(tone.get("confidence"), 0, 100).unwrap_or(0),
                    });
                }
            }
            Metric::Brand => {
                analysis.brand_alignment = parse_judgment(value.get("brandAlignment"));
            }
            Metric::Persona => {
                analysis.persona_alignment = parse_judgment(value.get("personaAlignment"));
            }
        }
    }

    Ok(analysis)
}

fn parse_judgment(value: Option<&Value>) -> Option<AlignmentJudgment> {
    let obj = value.filter(|v| v.is_object())?;
    let score = coerce_score(obj.get("score"), 0, 100)?;
    Some(AlignmentJudgment {
        score,
        feedback: coerce_feedback(obj.get("feedback")),
    })
}

/// Parse the dedicated brand-alignment reply.
///
/// The score is the one field that cannot be defaulted; a reply without a
/// coercible score is malformed.
pub fn parse_brand_report(raw: &str) -> Result<BrandReport, ApiError> {
    let value = parse_json(raw)?;
    let score = coerce_score(value.get("score"), 1, 10).ok_or_else(|| {
        ApiError::MalformedUpstream("reply is missing a numeric 'score' field".to_string())
    })?;

    Ok(BrandReport {
        score,
        assessment: coerce_feedback(value.get("assessment")),
        matches: coerce_list(value.get("matches")),
        violations: coerce_list(value.get("violations")),
        recommendations: coerce_list(value.get("recommendations")),
    })
}

/// Parse the dedicated persona-alignment reply.
pub fn parse_persona_report(raw: &str) -> Result<PersonaReport, ApiError> {
    let value = parse_json(raw)?;
    let score = coerce_score(value.get("score"), 1, 10).ok_or_else(|| {
        ApiError::MalformedUpstream("reply is missing a numeric 'score' field".to_string())
    })?;

    Ok(PersonaReport {
        score,
        assessment: coerce_feedback(value.get("assessment")),
        strengths: coerce_list(value.get("strengths")),
        improvements: coerce_list(value.get("improvements")),
        recommendations: coerce_list(value.get("recommendations")),
    })
}
