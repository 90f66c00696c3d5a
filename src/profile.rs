//! The user's hardware, as entered in the check form.

use serde::{Deserialize, Serialize};

use crate::tiers::{CpuTier, GpuTier, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareProfile {
    pub cpu_tier: CpuTier,
    pub gpu_tier: GpuTier,
    pub ram_gb: f64,
    pub storage_gb: f64,
    pub has_ssd: bool,
}

impl Default for HardwareProfile {
    fn default() -> Self {
        Self {
            cpu_tier: CpuTier::Mid,
            gpu_tier: GpuTier::Mid,
            ram_gb: 0.0,
            storage_gb: 0.0,
            has_ssd: false,
        }
    }
}

/// Raw form input before it is turned into a [`HardwareProfile`].
///
/// `cpu_tier`/`gpu_tier` are `None` when the page has no selector for them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileInput<'a> {
    pub cpu_tier: Option<&'a str>,
    pub gpu_tier: Option<&'a str>,
    pub ram_gb: &'a str,
    pub storage_gb: &'a str,
    pub has_ssd: &'a str,
}

impl<'a> ProfileInput<'a> {
    /// Build the profile, substituting the given defaults for missing or
    /// unknown tiers.
    pub fn into_profile(self, default_cpu: CpuTier, default_gpu: GpuTier) -> HardwareProfile {
        HardwareProfile {
            cpu_tier: self.cpu_tier.and_then(CpuTier::parse).unwrap_or(default_cpu),
            gpu_tier: self.gpu_tier.and_then(GpuTier::parse).unwrap_or(default_gpu),
            ram_gb: parse_amount(self.ram_gb),
            storage_gb: parse_amount(self.storage_gb),
            has_ssd: parse_flag(self.has_ssd),
        }
    }
}

/// Parse a GB amount. Blank, garbage, negative and non-finite input count as 0.
pub fn parse_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

/// Checkbox/select style booleans: "yes", "true", "on", "1".
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "yes" | "true" | "on" | "1"
    )
}
