//! Target persona snapshot

use serde::{Deserialize, Serialize};

/// Audience persona supplied with persona-alignment requests
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    /// Persona name (required)
    pub name: String,

    /// Age range, location, occupation, free text
    #[serde(default)]
    pub demographics: String,

    /// Attitudes, interests, motivations, free text
    #[serde(default)]
    pub psychographics: String,

    /// What frustrates this audience, free text
    #[serde(default)]
    pub pain_points: String,

    /// Vocabulary and phrasing this audience uses, free text
    #[serde(default)]
    pub language_patterns: String,

    /// What this audience wants to achieve, free text
    #[serde(default)]
    pub goals: String,
}

impl Persona {
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_default() {
        let p: Persona = serde_json::from_str(r#"{"name":"Busy Founder"}"#).unwrap();
        assert_eq!(p.name, "Busy Founder");
        assert!(p.demographics.is_empty());
        assert!(p.goals.is_empty());
    }
}
