//! HTTP API handlers for copyworx-analysis

pub mod analyze_document;
pub mod brand_alignment;
pub mod health;
pub mod persona_alignment;

pub use analyze_document::analysis_routes;
pub use brand_alignment::brand_routes;
pub use health::health_routes;
pub use persona_alignment::persona_routes;
