//! DNA — the opaque numeric identifier behind every zombie
//!
//! A DNA value comes from the ledger as an unsigned integer of at most
//! 16 decimal digits. Everything visual about a zombie (colors, sizes,
//! wounds, level, rarity) is derived from its 8 two-digit segments.

mod parse;
mod features;
mod rarity;

pub use parse::{Dna, DnaError, DNA_DIGITS, SEGMENT_COUNT};
pub use features::{FeatureSet, Palette, PALETTE_SIZE};
pub use rarity::{Rarity, RarityTier};
