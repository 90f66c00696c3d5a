//! Preference store — remembers the last submitted profile across sessions
//! and decides how the form's tier selectors get pre-filled.
//!
//! ## Persistence
//!
//! The durable record lives in the browser's localStorage. The worker only
//! sees it through a [`ProfileStore`] backend: the JavaScript bridge restores
//! the record on page load and persists whatever the worker hands back after
//! each check. Persistence is a convenience. Store failures never reach the
//! user and never change an evaluation.
//!
//! ## Pre-fill precedence
//!
//! ```text
//! saved profile  >  touched selector  >  game Minimum tier  >  current value
//! ```
//!
//! A touched selector is never overwritten, not even by the saved profile.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::GameRequirement;
use crate::error::StoreError;
use crate::profile::HardwareProfile;
use crate::tiers::{CpuTier, GpuTier, Tier, deserialize_optional_tier};

/// Persisted subset of the user's profile. Every field may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedUserProfile {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_tier",
        skip_serializing_if = "Option::is_none"
    )]
    pub cpu_tier: Option<CpuTier>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_tier",
        skip_serializing_if = "Option::is_none"
    )]
    pub gpu_tier: Option<GpuTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram_gb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_gb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_ssd: Option<bool>,
}

impl From<&HardwareProfile> for SavedUserProfile {
    fn from(p: &HardwareProfile) -> Self {
        Self {
            cpu_tier: Some(p.cpu_tier),
            gpu_tier: Some(p.gpu_tier),
            ram_gb: Some(p.ram_gb),
            storage_gb: Some(p.storage_gb),
            has_ssd: Some(p.has_ssd),
        }
    }
}

impl SavedUserProfile {
    pub fn has_tiers(&self) -> bool {
        self.cpu_tier.is_some() || self.gpu_tier.is_some()
    }
}

/// Durable storage for the single serialized profile record.
pub trait ProfileStore {
    fn read(&self) -> Result<Option<String>, StoreError>;
    fn write(&mut self, record: &str) -> Result<(), StoreError>;
}

/// In-worker mirror of the localStorage record.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<String>,
}

impl MemoryStore {
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
        }
    }
}

impl ProfileStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.record.clone())
    }

    fn write(&mut self, record: &str) -> Result<(), StoreError> {
        self.record = Some(record.to_string());
        Ok(())
    }
}

/// Saved-profile access with silent degradation on store failures.
#[derive(Debug, Clone, Default)]
pub struct PreferenceStore<S: ProfileStore = MemoryStore> {
    backend: S,
    /// Profile saved during this session, if any. Wins over the backend so a
    /// failed write never loses the values the user just entered.
    session: Option<SavedUserProfile>,
}

impl<S: ProfileStore> PreferenceStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            session: None,
        }
    }

    /// Read the saved profile. Never fails: a missing, unreadable or
    /// malformed record yields an empty profile.
    pub fn load(&self) -> SavedUserProfile {
        if let Some(saved) = self.session {
            return saved;
        }
        match self.backend.read() {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                debug!(error = %e, "saved profile is malformed, ignoring it");
                SavedUserProfile::default()
            }),
            Ok(None) => SavedUserProfile::default(),
            Err(e) => {
                debug!(error = %e, "saved profile unreadable, ignoring it");
                SavedUserProfile::default()
            }
        }
    }

    /// Remember `profile` for this session and write it to the backend.
    ///
    /// The in-memory copy is updated even when the write fails.
    pub fn save(&mut self, profile: &HardwareProfile) -> Result<(), StoreError> {
        let saved = SavedUserProfile::from(profile);
        self.session = Some(saved);
        let record = serde_json::to_string(&saved)
            .map_err(|e| StoreError::Rejected(e.to_string()))?;
        self.backend.write(&record)
    }

    /// Replace the backend record with one read from localStorage at page load.
    pub fn restore(&mut self, record: &str) -> Result<(), StoreError> {
        self.session = None;
        self.backend.write(record)
    }

    /// The record as it should be persisted, or `None` if nothing was ever saved.
    pub fn export(&self) -> Option<String> {
        if let Some(saved) = self.session {
            return serde_json::to_string(&saved).ok();
        }
        self.backend.read().ok().flatten()
    }

}

// ── Touched flags ──────────────────────────────────────────────────

/// The two tier selectors on the check form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierControl {
    Cpu,
    Gpu,
}

impl TierControl {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" | "cputier" => Some(TierControl::Cpu),
            "gpu" | "gputier" => Some(TierControl::Gpu),
            _ => None,
        }
    }
}

/// Which tier selectors have been set by genuine user input this session.
///
/// Only [`TouchedFlags::mark`] sets a flag; nothing clears one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchedFlags {
    cpu: bool,
    gpu: bool,
}

impl TouchedFlags {
    pub fn mark(&mut self, control: TierControl) {
        match control {
            TierControl::Cpu => self.cpu = true,
            TierControl::Gpu => self.gpu = true,
        }
    }

    pub fn is_touched(&self, control: TierControl) -> bool {
        match control {
            TierControl::Cpu => self.cpu,
            TierControl::Gpu => self.gpu,
        }
    }

    pub fn any(&self) -> bool {
        self.cpu || self.gpu
    }
}

// ── Pre-fill planning ──────────────────────────────────────────────

/// Which tier selectors exist in the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub cpu: bool,
    pub gpu: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self { cpu: true, gpu: true }
    }
}

impl Controls {
    pub const NONE: Controls = Controls {
        cpu: false,
        gpu: false,
    };

    /// Parse a comma-separated list such as `cpu,gpu`.
    pub fn parse(list: &str) -> Self {
        let mut controls = Controls::NONE;
        for name in list.split(',') {
            match TierControl::parse(name) {
                Some(TierControl::Cpu) => controls.cpu = true,
                Some(TierControl::Gpu) => controls.gpu = true,
                None => {}
            }
        }
        controls
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    CpuTier,
    GpuTier,
    RamGb,
    StorageGb,
    HasSsd,
}

/// Set form field `field` to `value`. Programmatic; never marks a selector touched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prefill {
    pub field: FormField,
    pub value: String,
}

impl Prefill {
    fn new(field: FormField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Decide how the tier selectors should be pre-filled for `game`.
pub fn plan_tier_prefill(
    saved: &SavedUserProfile,
    touched: &TouchedFlags,
    controls: Controls,
    game: Option<&GameRequirement>,
) -> Vec<Prefill> {
    let mut plan = Vec::new();

    if saved.has_tiers() {
        let cpu = controls.cpu && !touched.is_touched(TierControl::Cpu);
        let gpu = controls.gpu && !touched.is_touched(TierControl::Gpu);
        if let (true, Some(t)) = (cpu, saved.cpu_tier) {
            plan.push(Prefill::new(FormField::CpuTier, t.id()));
        }
        if let (true, Some(t)) = (gpu, saved.gpu_tier) {
            plan.push(Prefill::new(FormField::GpuTier, t.id()));
        }
        return plan;
    }

    if touched.any() {
        return plan;
    }

    let Some(game) = game else {
        return plan;
    };
    // Unrecognized tiers have no matching <option>, so they are skipped.
    if let (true, Some(t)) = (controls.cpu, game.min.cpu_tier.as_ref().and_then(|t| t.known())) {
        plan.push(Prefill::new(FormField::CpuTier, t.id()));
    }
    if let (true, Some(t)) = (controls.gpu, game.min.gpu_tier.as_ref().and_then(|t| t.known())) {
        plan.push(Prefill::new(FormField::GpuTier, t.id()));
    }
    plan
}

/// Page-load pre-fill of the numeric and SSD inputs from the saved profile.
pub fn plan_field_prefill(saved: &SavedUserProfile) -> Vec<Prefill> {
    let mut plan = Vec::new();
    if let Some(ram) = saved.ram_gb {
        plan.push(Prefill::new(FormField::RamGb, ram.to_string()));
    }
    if let Some(storage) = saved.storage_gb {
        plan.push(Prefill::new(FormField::StorageGb, storage.to_string()));
    }
    if let Some(ssd) = saved.has_ssd {
        plan.push(Prefill::new(FormField::HasSsd, if ssd { "yes" } else { "no" }));
    }
    plan
}
