//! Configuration loading for CopyWorx services
//!
//! Services resolve settings with a two-tier priority:
//! 1. Environment variable (highest)
//! 2. TOML config file
//!
//! followed by compiled defaults for non-secret settings. Secrets have no
//! compiled default; their absence is a startup error in the service crates.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Logging section of the TOML config
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Tracing env-filter directive, e.g. "info,copyworx_analysis=debug"
    pub filter: Option<String>,
}

/// TOML configuration file contents
///
/// All fields optional; missing fields fall through to the next tier.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Model provider API key (secret)
    pub model_api_key: Option<String>,

    /// Model identifier sent to the provider
    pub model_id: Option<String>,

    /// Model provider base URL (override for self-hosted gateways)
    pub api_base_url: Option<String>,

    /// Bind address for the HTTP server
    pub bind_address: Option<String>,

    /// Bind port for the HTTP server
    pub port: Option<u16>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default TOML config path for a service, e.g.
/// `~/.config/copyworx/copyworx-analysis.toml` on Linux.
pub fn default_config_path(service_name: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("copyworx").join(format!("{}.toml", service_name)))
}

/// Load a TOML config file. A missing file is not an error: every setting
/// has an ENV tier above it, so absence just yields defaults.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        return Ok(TomlConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed ({}): {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
}
