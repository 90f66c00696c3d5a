//! Requirement evaluator — compares a user's hardware against one
//! requirement threshold and classifies the Minimum/Recommended outcome.
//!
//! Everything here is pure: same inputs, same failure list, same order.

use crate::catalog::{GameRequirement, Requirement};
use crate::profile::HardwareProfile;
use crate::tiers::{CatalogTier, Tier, satisfies};

/// Hardware dimension a check is made on. Declaration order is check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Dimension {
    Cpu,
    Gpu,
    Ram,
    Storage,
    Ssd,
}

impl Dimension {
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Cpu => "CPU",
            Dimension::Gpu => "GPU",
            Dimension::Ram => "RAM",
            Dimension::Storage => "Storage",
            Dimension::Ssd => "SSD",
        }
    }
}

/// One dimension on which the user falls short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unmet {
    pub dimension: Dimension,
    /// Carries both the user's value and the required value.
    pub message: String,
}

/// Result of checking a user against both thresholds of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    RecommendedMet,
    /// Minimum met; holds the Recommended failures.
    MinimumMet(Vec<Unmet>),
    /// Holds the Minimum failures.
    MinimumNotMet(Vec<Unmet>),
}

impl Outcome {
    pub fn failures(&self) -> &[Unmet] {
        match self {
            Outcome::RecommendedMet => &[],
            Outcome::MinimumMet(f) | Outcome::MinimumNotMet(f) => f,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Outcome::RecommendedMet => "Recommended requirements met",
            Outcome::MinimumMet(_) => "Minimum met, Recommended not met",
            Outcome::MinimumNotMet(_) => "Minimum requirements not met",
        }
    }
}

/// Check `user` against `req`, returning failures in CPU, GPU, RAM, Storage, SSD order.
pub fn evaluate(user: &HardwareProfile, req: &Requirement) -> Vec<Unmet> {
    let mut fails = Vec::new();

    if let Some(msg) = tier_shortfall(user.cpu_tier, req.cpu_tier.as_ref()) {
        fails.push(Unmet {
            dimension: Dimension::Cpu,
            message: format!("CPU: {}", msg),
        });
    }
    if let Some(msg) = tier_shortfall(user.gpu_tier, req.gpu_tier.as_ref()) {
        fails.push(Unmet {
            dimension: Dimension::Gpu,
            message: format!("GPU: {}", msg),
        });
    }
    if user.ram_gb < req.ram_gb {
        fails.push(Unmet {
            dimension: Dimension::Ram,
            message: format!("RAM: you have {} GB, required {} GB", user.ram_gb, req.ram_gb),
        });
    }
    if user.storage_gb < req.storage_gb {
        fails.push(Unmet {
            dimension: Dimension::Storage,
            message: format!(
                "Storage: you have {} GB free, required {} GB",
                user.storage_gb, req.storage_gb
            ),
        });
    }
    if req.ssd_required && !user.has_ssd {
        fails.push(Unmet {
            dimension: Dimension::Ssd,
            message: "SSD: the game requires an SSD, you have none".to_string(),
        });
    }

    fails
}

fn tier_shortfall<T: Tier>(user: T, required: Option<&CatalogTier<T>>) -> Option<String> {
    if satisfies(user, required) {
        return None;
    }
    let required = required?;
    Some(format!(
        "you have {}, required {}",
        user.display_name(),
        required.label()
    ))
}

/// Three-way classification against a game's Minimum and Recommended profiles.
pub fn classify(user: &HardwareProfile, game: &GameRequirement) -> Outcome {
    let rec_fails = evaluate(user, &game.rec);
    if rec_fails.is_empty() {
        return Outcome::RecommendedMet;
    }
    let min_fails = evaluate(user, &game.min);
    if min_fails.is_empty() {
        Outcome::MinimumMet(rec_fails)
    } else {
        Outcome::MinimumNotMet(min_fails)
    }
}
