//! Compact emoji form of a zombie, for lists and notifications

use crate::dna::FeatureSet;

const ZOMBIE: &str = "\u{1F9DF}";
const CROWN: &str = "\u{1F451}";
const BOLT: &str = "\u{26A1}";

/// Zombie glyph with a crown above level 5 and a bolt above level 3
pub fn zombie_emoji(features: &FeatureSet) -> String {
    let badge = match features.level {
        6.. => CROWN,
        4..=5 => BOLT,
        _ => "",
    };
    format!("{ZOMBIE}{badge}")
}
