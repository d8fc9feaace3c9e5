//! Request validation layer
//!
//! First stage of the analysis pipeline: rejects caller faults before any
//! prompt is composed or any upstream call is made.

pub mod request;

pub use request::{
    parse_optional_config, parse_required_config, resolve_metrics, validate_text_field,
    MAX_TEXT_CHARS,
};
