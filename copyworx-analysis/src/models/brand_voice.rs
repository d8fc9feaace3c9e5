//! Brand voice snapshot
//!
//! The pipeline receives a fully-populated snapshot in the request body;
//! identity and ownership are resolved upstream and are not part of this
//! service's contract.

use serde::{Deserialize, Serialize};

/// Brand voice configuration supplied with brand-alignment requests
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandVoice {
    /// Brand name (required)
    pub brand_name: String,

    /// Overall tone, free text (e.g. "playful", "authoritative")
    #[serde(default)]
    pub brand_tone: String,

    /// Phrases the brand prefers to use
    #[serde(default)]
    pub approved_phrases: Vec<String>,

    /// Words/phrases the brand never uses
    #[serde(default)]
    pub forbidden_words: Vec<String>,

    /// Brand values, free text items
    #[serde(default)]
    pub brand_values: Vec<String>,

    /// Mission statement, free text
    #[serde(default)]
    pub mission_statement: String,
}

impl BrandVoice {
    /// A snapshot is usable only when the brand name carries content
    pub fn has_name(&self) -> bool {
        !self.brand_name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_default() {
        let bv: BrandVoice = serde_json::from_str(r#"{"brandName":"Acme"}"#).unwrap();
        assert_eq!(bv.brand_name, "Acme");
        assert!(bv.brand_tone.is_empty());
        assert!(bv.approved_phrases.is_empty());
        assert!(bv.forbidden_words.is_empty());
    }

    #[test]
    fn blank_name_detected() {
        let bv: BrandVoice = serde_json::from_str(r#"{"brandName":"   "}"#).unwrap();
        assert!(!bv.has_name());
    }
}
