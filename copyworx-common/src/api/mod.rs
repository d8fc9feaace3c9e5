//! Shared API types for CopyWorx services

pub mod types;

pub use types::ErrorBody;
