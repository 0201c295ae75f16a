use crate::utils::error::{EnrollError, Result};
use serde::Deserialize;

/// Optional TOML settings file. Any field left out falls back to the CLI
/// default; explicit command-line flags win over the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub data_path: Option<String>,
    pub ledger_endpoint: Option<String>,
}

impl Settings {
    pub fn load(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| EnrollError::ConfigError {
            message: format!("invalid settings file {}: {}", path, e),
        })
    }
}
