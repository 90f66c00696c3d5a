//! Runtime configuration, overridable by the page via `POST /api/config`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tiers::{CpuTier, GpuTier};

pub const DEFAULT_STORAGE_KEY: &str = "gamecheck_profile";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// localStorage key the saved profile lives under.
    pub storage_key: String,
    /// Used when the page has no CPU selector.
    pub default_cpu_tier: CpuTier,
    /// Used when the page has no GPU selector.
    pub default_gpu_tier: GpuTier,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_cpu_tier: CpuTier::Mid,
            default_gpu_tier: GpuTier::Mid,
        }
    }
}

impl AppConfig {
    /// Parse a JSON object; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        if config.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(config)
    }
}
