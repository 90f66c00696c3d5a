//! Tier scale — coarse, ordered CPU/GPU capability classes.
//!
//! Every tier maps to an integer rank. A user's tier satisfies a requirement
//! when its rank is at least the required rank.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Shared behaviour of the CPU and GPU tier families.
pub trait Tier: Copy + Eq + fmt::Debug + 'static {
    /// Every tier of the family, lowest rank first.
    const ALL: &'static [Self];

    fn rank(self) -> u8;

    /// Wire identifier, as used in the catalog and the persisted profile.
    fn id(self) -> &'static str;

    fn display_name(self) -> &'static str;

    /// Parse a wire identifier (case-insensitive).
    fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.id().eq_ignore_ascii_case(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CpuTier {
    Low,
    Mid,
    High,
    Enthusiast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GpuTier {
    IntegratedGraphics,
    Low,
    Mid,
    High,
    Enthusiast,
}

impl Tier for CpuTier {
    const ALL: &'static [Self] = &[
        CpuTier::Low,
        CpuTier::Mid,
        CpuTier::High,
        CpuTier::Enthusiast,
    ];

    fn rank(self) -> u8 {
        match self {
            CpuTier::Low => 1,
            CpuTier::Mid => 2,
            CpuTier::High => 3,
            CpuTier::Enthusiast => 4,
        }
    }

    fn id(self) -> &'static str {
        match self {
            CpuTier::Low => "Low",
            CpuTier::Mid => "Mid",
            CpuTier::High => "High",
            CpuTier::Enthusiast => "Enthusiast",
        }
    }

    fn display_name(self) -> &'static str {
        match self {
            CpuTier::Low => "Entry-level",
            CpuTier::Mid => "Mid-range",
            CpuTier::High => "High-end",
            CpuTier::Enthusiast => "Enthusiast",
        }
    }
}

impl Tier for GpuTier {
    const ALL: &'static [Self] = &[
        GpuTier::IntegratedGraphics,
        GpuTier::Low,
        GpuTier::Mid,
        GpuTier::High,
        GpuTier::Enthusiast,
    ];

    fn rank(self) -> u8 {
        match self {
            GpuTier::IntegratedGraphics => 0,
            GpuTier::Low => 1,
            GpuTier::Mid => 2,
            GpuTier::High => 3,
            GpuTier::Enthusiast => 4,
        }
    }

    fn id(self) -> &'static str {
        match self {
            GpuTier::IntegratedGraphics => "IntegratedGraphics",
            GpuTier::Low => "Low",
            GpuTier::Mid => "Mid",
            GpuTier::High => "High",
            GpuTier::Enthusiast => "Enthusiast",
        }
    }

    fn display_name(self) -> &'static str {
        match self {
            GpuTier::IntegratedGraphics => "Integrated graphics",
            GpuTier::Low => "Entry-level",
            GpuTier::Mid => "Mid-range",
            GpuTier::High => "High-end",
            GpuTier::Enthusiast => "Enthusiast",
        }
    }
}

/// A tier value as read from the game catalog.
///
/// Catalogs may name tiers this build does not know yet. Those are kept as
/// `Unrecognized` so they can still be displayed; they have no rank and can
/// never be satisfied. Identifiers are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogTier<T> {
    Known(T),
    Unrecognized(String),
}

impl<T: Tier> CatalogTier<T> {
    pub fn known(&self) -> Option<T> {
        match self {
            CatalogTier::Known(t) => Some(*t),
            CatalogTier::Unrecognized(_) => None,
        }
    }

    /// Human-readable label; the raw identifier for unrecognized tiers.
    pub fn label(&self) -> &str {
        match self {
            CatalogTier::Known(t) => t.display_name(),
            CatalogTier::Unrecognized(raw) => raw,
        }
    }
}

impl<T> From<T> for CatalogTier<T> {
    fn from(tier: T) -> Self {
        CatalogTier::Known(tier)
    }
}

impl<T: Tier> Serialize for CatalogTier<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CatalogTier::Known(t) => serializer.serialize_str(t.id()),
            CatalogTier::Unrecognized(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de, T: Tier> Deserialize<'de> for CatalogTier<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match T::parse(&raw) {
            Some(t) => CatalogTier::Known(t),
            None => CatalogTier::Unrecognized(raw),
        })
    }
}

/// `deserialize_with` helper for optional tier fields outside the catalog.
/// Matches case-insensitively; an unknown identifier reads as absent instead
/// of failing the whole record.
pub fn deserialize_optional_tier<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Tier,
{
    let tier = Option::<CatalogTier<T>>::deserialize(deserializer)?;
    Ok(tier.and_then(|t| t.known()))
}

/// Whether `user` meets `required`. An absent requirement is always met.
pub fn satisfies<T: Tier>(user: T, required: Option<&CatalogTier<T>>) -> bool {
    match required {
        None => true,
        Some(CatalogTier::Known(req)) => user.rank() >= req.rank(),
        Some(CatalogTier::Unrecognized(_)) => false,
    }
}
