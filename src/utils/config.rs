use crate::pipeline::ReconstructMode;
use crate::utils::errors::{MissingIdPolicy, Result, TextMapperError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub extract: ExtractConfig,
    pub reconstruct: ReconstructConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub default_encoding: String,
    pub latin1_fallback: bool,
    pub missing_ids: MissingIdPolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructConfig {
    pub mode: ReconstructMode,
    pub missing_ids: MissingIdPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            default_encoding: "utf-8".to_string(),
            latin1_fallback: true,
            missing_ids: MissingIdPolicy::PassThrough,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| TextMapperError::ConfigError(e.to_string()))?;
        toml::from_str(&content).map_err(|e| TextMapperError::ConfigError(e.to_string()))
    }

    /// Defaults when the file does not exist; an existing file that fails to
    /// load is reported alongside the defaults.
    pub fn load_or_default(path: &Path) -> (Self, Option<TextMapperError>) {
        match Self::load_from_file(path) {
            Ok(config) => (config, None),
            Err(e) if path.exists() => (Self::default(), Some(e)),
            Err(_) => (Self::default(), None),
        }
    }
}
