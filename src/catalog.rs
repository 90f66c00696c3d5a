//! Game catalog — the list of games and their Minimum/Recommended profiles.
//!
//! The JavaScript loader fetches the catalog JSON once per session and posts
//! it here. After a successful load the catalog is immutable.
//!
//! ## Wire format
//!
//! ```text
//! [
//!   {
//!     "id": "anno117",
//!     "name": "Anno 117: Pax Romana",
//!     "min": { "cpuTier": "Mid", "gpuTier": "Low", "ramGb": 16, "storageGb": 70, "ssdRequired": true },
//!     "rec": { "cpuTier": "High", "gpuTier": "Mid", "ramGb": 32, "storageGb": 70, "ssdRequired": true },
//!     "sourceUrl": "https://example.com/anno117",
//!     "note": "optional"
//!   }
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::CatalogError;
use crate::tiers::{CatalogTier, CpuTier, GpuTier};

/// One requirement threshold (Minimum or Recommended).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// Absent = not specified yet, the check is skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_tier: Option<CatalogTier<CpuTier>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_tier: Option<CatalogTier<GpuTier>>,
    pub ram_gb: f64,
    pub storage_gb: f64,
    pub ssd_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRequirement {
    pub id: String,
    pub name: String,
    pub min: Requirement,
    pub rec: Requirement,
    #[serde(default)]
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Ordered game list, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    games: Vec<GameRequirement>,
}

impl Catalog {
    /// Parse and validate a catalog JSON array.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let games: Vec<GameRequirement> = serde_json::from_str(json)?;
        Self::new(games)
    }

    pub fn new(games: Vec<GameRequirement>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(games.len());
        for (index, game) in games.iter().enumerate() {
            if game.id.trim().is_empty() {
                return Err(CatalogError::EmptyId { index });
            }
            if !seen.insert(game.id.as_str()) {
                return Err(CatalogError::DuplicateId(game.id.clone()));
            }
            check_numbers(&game.id, &game.min)?;
            check_numbers(&game.id, &game.rec)?;
        }
        Ok(Self { games })
    }

    pub fn get(&self, id: &str) -> Option<&GameRequirement> {
        self.games.iter().find(|g| g.id == id)
    }

    pub fn games(&self) -> &[GameRequirement] {
        &self.games
    }

    pub fn first(&self) -> Option<&GameRequirement> {
        self.games.first()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

fn check_numbers(id: &str, req: &Requirement) -> Result<(), CatalogError> {
    let valid = |v: f64| v.is_finite() && v >= 0.0;
    if !valid(req.ram_gb) {
        return Err(CatalogError::InvalidNumber {
            id: id.to_string(),
            field: "ramGb",
        });
    }
    if !valid(req.storage_gb) {
        return Err(CatalogError::InvalidNumber {
            id: id.to_string(),
            field: "storageGb",
        });
    }
    Ok(())
}

/// One-line summary of a requirement, e.g.
/// `CPU: High-end · GPU: Mid-range · RAM: 16 GB · Storage: 70 GB · SSD required`.
pub fn summary(req: &Requirement) -> String {
    let cpu = req
        .cpu_tier
        .as_ref()
        .map(|t| t.label())
        .unwrap_or("not specified");
    let gpu = req
        .gpu_tier
        .as_ref()
        .map(|t| t.label())
        .unwrap_or("not specified");
    let ssd = if req.ssd_required {
        "SSD required"
    } else {
        "SSD not required"
    };
    format!(
        "CPU: {} · GPU: {} · RAM: {} GB · Storage: {} GB · {}",
        cpu, gpu, req.ram_gb, req.storage_gb, ssd
    )
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Small catalog shared by tests across the crate.
    pub const CATALOG_JSON: &str = r#"[
      {
        "id": "anno117",
        "name": "Anno 117: Pax Romana",
        "min": { "cpuTier": "Low", "gpuTier": "Low", "ramGb": 16, "storageGb": 70, "ssdRequired": true },
        "rec": { "cpuTier": "High", "gpuTier": "High", "ramGb": 32, "storageGb": 70, "ssdRequired": true },
        "sourceUrl": "https://example.com/anno117",
        "note": "Numbers from the publisher's store page."
      },
      {
        "id": "civ6",
        "name": "Civilization VI",
        "min": { "cpuTier": "Mid", "gpuTier": "IntegratedGraphics", "ramGb": 4, "storageGb": 12, "ssdRequired": false },
        "rec": { "cpuTier": "High", "gpuTier": "Mid", "ramGb": 8, "storageGb": 12, "ssdRequired": false },
        "sourceUrl": "https://example.com/civ6"
      },
      {
        "id": "warzone",
        "name": "Call of Duty: Warzone",
        "min": { "ramGb": 8, "storageGb": 116, "ssdRequired": true },
        "rec": { "cpuTier": "Quantum", "ramGb": 16, "storageGb": 116, "ssdRequired": true },
        "sourceUrl": "https://example.com/warzone"
      }
    ]"#;
}
