//! Data model for the analysis pipeline
//!
//! All of these types live for exactly one request/response cycle; the
//! pipeline persists nothing.

pub mod analysis;
pub mod brand_voice;
pub mod persona;

pub use analysis::{
    AlignmentJudgment, AlignmentResponse, BrandReport, DocumentAnalysis, Metric, PersonaReport,
    ToneJudgment, TONE_LABELS,
};
pub use brand_voice::BrandVoice;
pub use persona::Persona;
