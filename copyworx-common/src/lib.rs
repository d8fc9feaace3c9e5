//! # CopyWorx Common Library
//!
//! Shared code for CopyWorx services including:
//! - Error types
//! - API request/response types
//! - Configuration loading
//! - Text utilities (bounded truncation)

pub mod api;
pub mod config;
pub mod error;
pub mod text;

pub use error::{Error, Result};
