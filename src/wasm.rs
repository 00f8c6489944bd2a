//! Browser bindings for the front-end
//!
//! Errors surface to JavaScript as `Error` objects.

use crate::dna::{Dna, Rarity};
use crate::render::{zombie_emoji, AvatarRenderer, RenderConfig};
use wasm_bindgen::prelude::*;

fn parse(dna: &str) -> Result<Dna, JsValue> {
    Dna::parse(dna).map_err(|e| js_sys::Error::new(&e.to_string()).into())
}

/// SVG markup for a zombie avatar
#[wasm_bindgen(js_name = generateZombieSvg)]
pub fn generate_zombie_svg(dna: &str, size: Option<f64>) -> Result<String, JsValue> {
    let dna = parse(dna)?;
    let config = RenderConfig::with_size(size.unwrap_or(crate::render::REFERENCE_SIZE));
    config
        .validate()
        .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;
    Ok(AvatarRenderer::with_render_config(config).render(&dna))
}

/// `{ tier, color, unique_values }` as a JSON string
#[wasm_bindgen(js_name = getZombieRarity)]
pub fn get_zombie_rarity(dna: &str) -> Result<String, JsValue> {
    let rarity = Rarity::classify(&parse(dna)?);
    serde_json::to_string(&rarity).map_err(|e| js_sys::Error::new(&e.to_string()).into())
}

#[wasm_bindgen(js_name = generateZombieEmoji)]
pub fn generate_zombie_emoji(dna: &str) -> Result<String, JsValue> {
    let dna = parse(dna)?;
    let features = AvatarRenderer::default().features(&dna);
    Ok(zombie_emoji(&features))
}
