//! FeatureSet — visual and gameplay attributes derived from DNA
//!
//! Each segment drives one attribute through a fixed modulus/offset rule.
//! Extraction is pure: the same DNA and palette always give the same set.

use super::Dna;
use serde::{Deserialize, Serialize};

/// Number of color options per palette table
pub const PALETTE_SIZE: usize = 5;

/// Color tables used for zombie features
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub skin: [String; PALETTE_SIZE],
    pub hair: [String; PALETTE_SIZE],
    pub eyes: [String; PALETTE_SIZE],
    pub clothes: [String; PALETTE_SIZE],
    pub blood: [String; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        fn table(colors: [&str; PALETTE_SIZE]) -> [String; PALETTE_SIZE] {
            colors.map(String::from)
        }

        Self {
            skin: table(["#8B4513", "#D2691E", "#CD853F", "#DEB887", "#F5DEB3"]),
            hair: table(["#8B4513", "#A0522D", "#654321", "#2F1B14", "#000000"]),
            eyes: table(["#228B22", "#32CD32", "#00FF00", "#ADFF2F", "#90EE90"]),
            clothes: table(["#800080", "#4B0082", "#8B008B", "#9932CC", "#9400D3"]),
            blood: table(["#8B0000", "#DC143C", "#FF0000", "#B22222", "#A52A2A"]),
        }
    }
}

impl Palette {
    fn pick(table: &[String; PALETTE_SIZE], segment: u8) -> String {
        table[segment as usize % PALETTE_SIZE].clone()
    }
}

/// Attributes extracted from a DNA value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub skin_color: String,
    pub hair_color: String,
    pub eye_color: String,
    pub clothes_color: String,
    pub blood_color: String,
    /// Head radius at the reference size
    pub head_size: u32,
    /// Eye radius at the reference size
    pub eye_size: u32,
    /// Mouth width at the reference size
    pub mouth_size: u32,
    pub wound_count: u32,
    /// Coarse level estimate, always >= 1
    pub level: u32,
}

impl FeatureSet {
    /// Extract the feature set for a DNA value
    pub fn extract(dna: &Dna, palette: &Palette) -> Self {
        let s = dna.segments().map(u32::from);
        Self {
            skin_color: Palette::pick(&palette.skin, dna.segment(0)),
            hair_color: Palette::pick(&palette.hair, dna.segment(1)),
            eye_color: Palette::pick(&palette.eyes, dna.segment(2)),
            clothes_color: Palette::pick(&palette.clothes, dna.segment(3)),
            blood_color: Palette::pick(&palette.blood, dna.segment(4)),
            head_size: 60 + s[5] % 20,
            eye_size: 8 + s[6] % 8,
            mouth_size: 20 + s[7] % 15,
            wound_count: s[0] % 5,
            level: (s[1] / 10 + 1).max(1),
        }
    }

    /// Number of scars drawn around the head
    pub fn scar_count(&self) -> u32 {
        2 + self.wound_count % 3
    }
}
