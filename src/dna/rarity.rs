//! Rarity — classification by segment diversity

use super::Dna;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal rarity tiers, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RarityTier {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl RarityTier {
    /// Tier for a given count of distinct segment values
    pub fn from_unique_count(unique_values: usize) -> Self {
        match unique_values {
            12.. => RarityTier::Legendary,
            10..=11 => RarityTier::Epic,
            8..=9 => RarityTier::Rare,
            6..=7 => RarityTier::Uncommon,
            _ => RarityTier::Common,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RarityTier::Common => "Common",
            RarityTier::Uncommon => "Uncommon",
            RarityTier::Rare => "Rare",
            RarityTier::Epic => "Epic",
            RarityTier::Legendary => "Legendary",
        }
    }

    /// Display color (hex) for the tier
    pub fn color(&self) -> &'static str {
        match self {
            RarityTier::Common => "#7a7a8c",
            RarityTier::Uncommon => "#ed8936",
            RarityTier::Rare => "#16c172",
            RarityTier::Epic => "#892cdc",
            RarityTier::Legendary => "#ffd700",
        }
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rarity of a DNA value, ready for presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rarity {
    pub tier: RarityTier,
    pub color: String,
    pub unique_values: usize,
}

impl Rarity {
    pub fn classify(dna: &Dna) -> Self {
        let unique_values = dna.unique_segments();
        let tier = RarityTier::from_unique_count(unique_values);
        Self {
            tier,
            color: tier.color().to_string(),
            unique_values,
        }
    }
}
