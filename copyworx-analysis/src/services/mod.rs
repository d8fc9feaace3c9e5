//! Analysis pipeline services
//!
//! The pipeline runs strictly sequentially per request:
//! validate → compose → invoke → parse → classify. One upstream call per
//! request, all active metrics batched into a single prompt.

pub mod model_client;
pub mod parser;
pub mod pipeline;
pub mod prompt;

pub use model_client::{AnthropicClient, ModelClient, ModelError};
pub use pipeline::{invoke_model, EndpointParams, ANALYZE_DOCUMENT, BRAND_ALIGNMENT, PERSONA_ALIGNMENT};
