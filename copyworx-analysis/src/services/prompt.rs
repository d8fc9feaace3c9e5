//! Prompt composition
//!
//! Pure functions from (text, configuration) to instruction strings. Same
//! inputs always produce byte-identical prompts; tests depend on that.
//!
//! The combined endpoint truncates input to a fixed budget with a visible
//! marker; the dedicated endpoints validate the larger request bound and
//! send the text untruncated.

use copyworx_common::text::truncate_with_marker;
use std::fmt::Write;

use crate::models::{BrandVoice, Metric, Persona, TONE_LABELS};

/// Character budget for the combined-analysis excerpt
pub const DOCUMENT_TEXT_BUDGET: usize = 3000;

/// Marker appended when the excerpt was truncated
pub const TRUNCATION_MARKER: &str = "... [truncated]";

/// System instruction for the combined analysis endpoint
pub const SYSTEM_DOCUMENT: &str = "You are a marketing copy analyst. You respond with a single \
JSON object matching the requested schema exactly, and nothing else.";

/// System instruction for brand alignment
pub const SYSTEM_BRAND: &str = "You are a brand compliance reviewer for marketing copy. You \
respond with a single JSON object matching the requested schema exactly, and nothing else.";

/// System instruction for persona alignment
pub const SYSTEM_PERSONA: &str = "You are an audience-fit reviewer for marketing copy. You \
respond with a single JSON object matching the requested schema exactly, and nothing else.";

fn tone_vocabulary() -> String {
    TONE_LABELS.join("|")
}

fn push_brand_context(out: &mut String, bv: &BrandVoice) {
    writeln!(out, "Brand voice:").unwrap();
    writeln!(out, "- Name: {}", bv.brand_name).unwrap();
    writeln!(out, "- Tone: {}", bv.brand_tone).unwrap();
    writeln!(out, "- Approved phrases: {}", bv.approved_phrases.join(", ")).unwrap();
    writeln!(out, "- Forbidden words: {}", bv.forbidden_words.join(", ")).unwrap();
    writeln!(out, "- Values: {}", bv.brand_values.join(", ")).unwrap();
    writeln!(out, "- Mission: {}", bv.mission_statement).unwrap();
}

fn push_persona_context(out: &mut String, p: &Persona) {
    writeln!(out, "Target persona:").unwrap();
    writeln!(out, "- Name: {}", p.name).unwrap();
    writeln!(out, "- Demographics: {}", p.demographics).unwrap();
    writeln!(out, "- Psychographics: {}", p.psychographics).unwrap();
    writeln!(out, "- Pain points: {}", p.pain_points).unwrap();
    writeln!(out, "- Language patterns: {}", p.language_patterns).unwrap();
    writeln!(out, "- Goals: {}", p.goals).unwrap();
}

/// Compose the combined-analysis prompt for the active metric set.
///
/// Each active metric contributes a task block and the literal JSON
/// sub-schema the model must emit for that field; the fragments are
/// assembled into one target schema.
pub fn compose_document_prompt(
    text: &str,
    metrics: &[Metric],
    brand_voice: Option<&BrandVoice>,
    persona: Option<&Persona>,
) -> String {
    let excerpt = truncate_with_marker(text, DOCUMENT_TEXT_BUDGET, TRUNCATION_MARKER);

    let mut out = String::new();
    writeln!(out, "Analyze the following marketing copy.").unwrap();
    writeln!(out).unwrap();

    let mut schema_fragments: Vec<String> = Vec::new();

    for metric in metrics {
        match metric {
            Metric::Tone => {
                writeln!(
                    out,
                    "Task: judge the overall tone of the copy. Pick the single best label \
                     from this closed list: {}.",
                    tone_vocabulary()
                )
                .unwrap();
                schema_fragments.push(format!(
                    "\"tone\": {{ \"label\": \"<one of: {}>\", \"confidence\": <integer 0-100> }}",
                    tone_vocabulary()
                ));
            }
            Metric::Brand => {
                writeln!(
                    out,
                    "Task: judge how well the copy aligns with the brand voice below. \
                     Score 0-100 and give short feedback."
                )
                .unwrap();
                if let Some(bv) = brand_voice {
                    push_brand_context(&mut out, bv);
                }
                schema_fragments.push(
                    "\"brandAlignment\": { \"score\": <integer 0-100>, \"feedback\": \"<string>\" }"
                        .to_string(),
                );
            }
            Metric::Persona => {
                writeln!(
                    out,
                    "Task: judge how well the copy speaks to the target persona below. \
                     Score 0-100 and give short feedback."
                )
                .unwrap();
                if let Some(p) = persona {
                    push_persona_context(&mut out, p);
                }
                schema_fragments.push(
                    "\"personaAlignment\": { \"score\": <integer 0-100>, \"feedback\": \"<string>\" }"
                        .to_string(),
                );
            }
        }
        writeln!(out).unwrap();
    }

    writeln!(out, "Respond with exactly this JSON shape:").unwrap();
    writeln!(out, "{{ {} }}", schema_fragments.join(", ")).unwrap();
    writeln!(
        out,
        "Respond with JSON only. No prose, no markdown fences."
    )
    .unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Copy to analyze:\n---\n{}\n---", excerpt).unwrap();

    out
}

/// Compose the dedicated brand-alignment prompt.
pub fn brand_alignment_prompt(text: &str, bv: &BrandVoice) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "Evaluate how well the following marketing copy aligns with the brand voice. \
         Score 1-10 where 10 is perfect alignment."
    )
    .unwrap();
    writeln!(out).unwrap();
    push_brand_context(&mut out, bv);
    writeln!(out).unwrap();
    writeln!(out, "Respond with exactly this JSON shape:").unwrap();
    writeln!(
        out,
        "{{ \"score\": <integer 1-10>, \"assessment\": \"<string>\", \
         \"matches\": [\"<string>\"], \"violations\": [\"<string>\"], \
         \"recommendations\": [\"<string>\"] }}"
    )
    .unwrap();
    writeln!(
        out,
        "Respond with JSON only. No prose, no markdown fences."
    )
    .unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Copy to evaluate:\n---\n{}\n---", text).unwrap();
    out
}

/// Compose the dedicated persona-alignment prompt.
pub fn persona_alignment_prompt(text: &str, persona: &Persona) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "Evaluate how well the following marketing copy speaks to the target persona. \
         Score 1-10 where 10 is a perfect fit."
    )
    .unwrap();
    writeln!(out).unwrap();
    push_persona_context(&mut out, persona);
    writeln!(out).unwrap();
    writeln!(out, "Respond with exactly this JSON shape:").unwrap();
    writeln!(
        out,
        "{{ \"score\": <integer 1-10>, \"assessment\": \"<string>\", \
         \"strengths\": [\"<string>\"], \"improvements\": [\"<string>\"], \
         \"recommendations\": [\"<string>\"] }}"
    )
    .unwrap();
    writeln!(
        out,
        "Respond with JSON only. No prose, no markdown fences."
    )
    .unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Copy to evaluate:\n---\n{}\n---", text).unwrap();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn brand_voice() -> BrandVoice {
        serde_json::from_value(json!({
            "brandName": "Acme",
            "brandTone": "playful",
            "forbiddenWords": ["buy now"],
        }))
        .unwrap()
    }

    fn persona() -> Persona {
        serde_json::from_value(json!({
            "name": "Busy Founder",
            "painPoints": "no time for long reads",
        }))
        .unwrap()
    }

    #[test]
    fn composition_is_deterministic() {
        let metrics = vec![Metric::Tone, Metric::Brand, Metric::Persona];
        let bv = brand_voice();
        let p = persona();
        let a = compose_document_prompt("Some copy.", &metrics, Some(&bv), Some(&p));
        let b = compose_document_prompt("Some copy.", &metrics, Some(&bv), Some(&p));
        assert_eq!(a, b);
    }

    #[test]
    fn only_active_metric_schemas_included() {
        let prompt = compose_document_prompt("Some copy.", &[Metric::Tone], None, None);
        assert!(prompt.contains("\"tone\""));
        assert!(!prompt.contains("\"brandAlignment\""));
        assert!(!prompt.contains("\"personaAlignment\""));
    }

    #[test]
    fn long_text_truncated_with_marker() {
        let text = "x".repeat(DOCUMENT_TEXT_BUDGET + 500);
        let prompt = compose_document_prompt(&text, &[Metric::Tone], None, None);
        assert!(prompt.contains(TRUNCATION_MARKER));
        // the full 3500-char text must not appear
        assert!(!prompt.contains(&text));
    }

    #[test]
    fn short_text_not_truncated() {
        let prompt = compose_document_prompt("Short copy.", &[Metric::Tone], None, None);
        assert!(!prompt.contains(TRUNCATION_MARKER));
        assert!(prompt.contains("Short copy."));
    }

    #[test]
    fn dedicated_prompts_do_not_truncate() {
        let text = "y".repeat(DOCUMENT_TEXT_BUDGET + 500);
        let prompt = brand_alignment_prompt(&text, &brand_voice());
        assert!(prompt.contains(&text));
        assert!(!prompt.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn brand_context_embedded() {
        let prompt = brand_alignment_prompt("Some copy.", &brand_voice());
        assert!(prompt.contains("Acme"));
        assert!(prompt.contains("playful"));
        assert!(prompt.contains("buy now"));
        assert!(prompt.contains("\"violations\""));
    }

    #[test]
    fn persona_context_embedded() {
        let prompt = persona_alignment_prompt("Some copy.", &persona());
        assert!(prompt.contains("Busy Founder"));
        assert!(prompt.contains("no time for long reads"));
        assert!(prompt.contains("\"strengths\""));
    }

    #[test]
    fn json_only_directive_present() {
        let prompt = compose_document_prompt("Some copy.", &[Metric::Tone], None, None);
        assert!(prompt.contains("JSON only"));
    }
}
