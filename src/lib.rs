//! Zombie DNA — procedural avatars for collectible ledger tokens
//!
//! A zombie's DNA (a number of at most 16 digits) is split into 8 two-digit
//! segments which deterministically pick its colors, proportions, wound
//! count, level estimate and rarity. The renderer turns that into an SVG
//! avatar; the dashboard wraps an injected ledger client for the front-end.

pub mod dna;
pub mod render;
pub mod ledger;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use dna::{Dna, DnaError, FeatureSet, Palette, Rarity, RarityTier};
pub use render::{zombie_emoji, AvatarConfig, AvatarRenderer, RenderConfig, ScarMode};
pub use ledger::{Dashboard, MemoryLedger, ZombieCard, ZombieLedger, ZombieRecord};
