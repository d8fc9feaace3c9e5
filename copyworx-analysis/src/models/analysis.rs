//! Analysis metrics and result types
//!
//! Wire names are camelCase to match the CopyWorx client. Numeric fields are
//! always within their documented range by the time they reach these types;
//! the response parser clamps before constructing them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed vocabulary for tone labels. Upstream labels outside this set are
/// coerced to "neutral" by the response parser.
pub const TONE_LABELS: &[&str] = &[
    "professional",
    "casual",
    "friendly",
    "formal",
    "persuasive",
    "informative",
    "playful",
    "urgent",
    "neutral",
];

/// A metric the caller can request on the combined analysis endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Tone,
    Brand,
    Persona,
}

impl Metric {
    /// Parse a submitted metric name; unrecognized names yield `None` and
    /// are ignored rather than rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tone" => Some(Metric::Tone),
            "brand" => Some(Metric::Brand),
            "persona" => Some(Metric::Persona),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Tone => "tone",
            Metric::Brand => "brand",
            Metric::Persona => "persona",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tone judgment: closed-vocabulary label + confidence 0-100
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToneJudgment {
    pub label: String,
    pub confidence: u8,
}

/// Alignment judgment on the combined endpoint: score 0-100 + short feedback
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlignmentJudgment {
    pub score: u8,
    pub feedback: String,
}

/// Combined-analysis result. Only requested-and-configured metrics appear;
/// an empty result serializes as `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<ToneJudgment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_alignment: Option<AlignmentJudgment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona_alignment: Option<AlignmentJudgment>,
}

impl DocumentAnalysis {
    pub fn is_empty(&self) -> bool {
        self.tone.is_none() && self.brand_alignment.is_none() && self.persona_alignment.is_none()
    }
}

/// Brand-alignment report: score 1-10, assessment <=200 chars
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrandReport {
    pub score: u8,
    pub assessment: String,
    pub matches: Vec<String>,
    pub violations: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Persona-alignment report: score 1-10, assessment <=200 chars
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonaReport {
    pub score: u8,
    pub assessment: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Envelope for the dedicated alignment endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentResponse<T> {
    pub result: T,
    pub text_length: usize,
}
