//! AvatarRenderer — procedural SVG zombie avatars
//!
//! The document is built from independent layers in a fixed z-order:
//! background, body, head, eyes, hair, mouth, wounds/scars, clothing and
//! the level badge. Geometry is defined on a 200px reference drawing and
//! scaled by `size / 200`. Only the wounds/scars layer reads from the
//! random source.

use super::config::{AvatarConfig, RenderConfig, ScarMode, REFERENCE_SIZE};
use crate::dna::{Dna, FeatureSet, Palette};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::borrow::Cow;
use std::f64::consts::PI;

const BACKGROUND_FROM: &str = "#1a1a2e";
const BACKGROUND_TO: &str = "#16213e";
const BADGE_FILL: &str = "#892cdc";
const BADGE_STROKE: &str = "#16c172";

/// Renders DNA values into SVG documents
#[derive(Debug, Clone, Default)]
pub struct AvatarRenderer {
    palette: Palette,
    config: RenderConfig,
}

impl AvatarRenderer {
    pub fn new(config: AvatarConfig) -> Self {
        Self {
            palette: config.palette,
            config: config.render,
        }
    }

    /// Renderer with the default palette and the given render settings
    pub fn with_render_config(config: RenderConfig) -> Self {
        Self {
            palette: Palette::default(),
            config,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn features(&self, dna: &Dna) -> FeatureSet {
        FeatureSet::extract(dna, &self.palette)
    }

    /// Render using the configured scar mode.
    ///
    /// `ScarMode::Random` draws from the thread RNG, `ScarMode::Stable`
    /// seeds from the DNA fingerprint.
    pub fn render(&self, dna: &Dna) -> String {
        match self.config.scars {
            ScarMode::Random => self.render_with(dna, &mut rand::thread_rng()),
            ScarMode::Stable => {
                let mut rng = StdRng::seed_from_u64(dna.render_seed());
                self.render_with(dna, &mut rng)
            }
        }
    }

    /// Render with an explicit random source; a seeded RNG gives identical output
    pub fn render_with<R: Rng + ?Sized>(&self, dna: &Dna, rng: &mut R) -> String {
        let features = self.features(dna);
        log::debug!(
            "Rendering DNA {} at {}px (level {}, {} wounds)",
            dna,
            self.config.effective_size(),
            features.level,
            features.wound_count
        );
        self.render_features_with(&features, rng)
    }

    /// Render an already extracted feature set
    pub fn render_features_with<R: Rng + ?Sized>(
        &self,
        features: &FeatureSet,
        rng: &mut R,
    ) -> String {
        let canvas = Canvas::new(self.config.effective_size());
        let s = fmt_num(canvas.size);

        let mut svg = String::with_capacity(4096);
        svg.push_str(&format!(
            concat!(
                r#"<svg width="{s}" height="{s}" viewBox="0 0 {s} {s}" "#,
                r#"xmlns="http://www.w3.org/2000/svg">"#
            ),
            s = s
        ));
        svg.push_str(&canvas.defs());
        for (name, layer) in [
            ("Background", canvas.background()),
            ("Body", canvas.body(features)),
            ("Head", canvas.head(features)),
            ("Eyes", canvas.eyes(features)),
            ("Hair", canvas.hair(features)),
            ("Mouth", canvas.mouth(features)),
            ("Wounds", canvas.wounds(features, rng)),
            ("Clothing", canvas.clothing(features)),
            ("Level", canvas.level_badge(features.level)),
        ] {
            svg.push_str(&format!("<!-- {name} -->"));
            svg.push_str(&layer);
        }
        svg.push_str("</svg>");
        svg
    }
}

/// Drawing surface of a given pixel size
struct Canvas {
    size: f64,
    /// Scale from the reference drawing
    k: f64,
}

impl Canvas {
    fn new(size: f64) -> Self {
        Self {
            size,
            k: size / REFERENCE_SIZE,
        }
    }

    fn center_x(&self) -> f64 {
        self.size / 2.0
    }

    fn head_y(&self) -> f64 {
        self.size * 0.3
    }

    fn body_y(&self) -> f64 {
        self.size * 0.6
    }

    fn defs(&self) -> String {
        format!(
            concat!(
                r#"<defs><linearGradient id="bgGradient" x1="0%" y1="0%" x2="100%" y2="100%">"#,
                r#"<stop offset="0%" style="stop-color:{};stop-opacity:1"/>"#,
                r#"<stop offset="100%" style="stop-color:{};stop-opacity:1"/>"#,
                r#"</linearGradient><filter id="glow">"#,
                r#"<feGaussianBlur stdDeviation="{}" result="coloredBlur"/>"#,
                r#"<feMerge><feMergeNode in="coloredBlur"/>"#,
                r#"<feMergeNode in="SourceGraphic"/></feMerge>"#,
                r#"</filter></defs>"#
            ),
            BACKGROUND_FROM,
            BACKGROUND_TO,
            fmt_num(3.0 * self.k)
        )
    }

    fn background(&self) -> String {
        let s = fmt_num(self.size);
        format!(
            r#"<rect width="{s}" height="{s}" fill="url(#bgGradient)" rx="{}"/>"#,
            fmt_num(10.0 * self.k)
        )
    }

    fn body(&self, f: &FeatureSet) -> String {
        let cx = self.center_x();
        let body_y = self.body_y();
        let width = self.size * 0.4;
        let height = self.size * 0.35;
        format!(
            concat!(
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="{}" "#,
                r#"opacity="0.8" filter="url(#glow)"/>"#,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" opacity="0.7" rx="{}"/>"#
            ),
            fmt_num(cx),
            fmt_num(body_y),
            fmt_num(width / 2.0),
            fmt_num(height / 2.0),
            attr(&f.skin_color),
            fmt_num(cx - width / 4.0),
            fmt_num(body_y - height / 4.0),
            fmt_num(width / 2.0),
            fmt_num(height / 2.0),
            attr(&f.clothes_color),
            fmt_num(5.0 * self.k)
        )
    }

    fn head(&self, f: &FeatureSet) -> String {
        format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" opacity="0.9" filter="url(#glow)"/>"#,
            fmt_num(self.center_x()),
            fmt_num(self.head_y()),
            fmt_num(f64::from(f.head_size) * self.k),
            attr(&f.skin_color)
        )
    }

    fn eyes(&self, f: &FeatureSet) -> String {
        let eye_y = fmt_num(self.head_y() - 10.0 * self.k);
        let spacing = f64::from(f.head_size) * 0.4 * self.k;
        let radius = f64::from(f.eye_size) * self.k;
        let mut out = String::new();
        for x in [self.center_x() - spacing, self.center_x() + spacing] {
            out.push_str(&format!(
                r#"<circle cx="{}" cy="{eye_y}" r="{}" fill="{}" filter="url(#glow)"/>"#,
                fmt_num(x),
                fmt_num(radius),
                attr(&f.eye_color)
            ));
        }
        for x in [self.center_x() - spacing, self.center_x() + spacing] {
            out.push_str(&format!(
                r##"<circle cx="{}" cy="{eye_y}" r="{}" fill="#000000"/>"##,
                fmt_num(x),
                fmt_num(radius / 3.0)
            ));
        }
        out
    }

    fn hair(&self, f: &FeatureSet) -> String {
        let cx = self.center_x();
        let h = f64::from(f.head_size) * self.k;
        let hair_y = self.head_y() - h * 0.7;
        let peak = hair_y - 20.0 * self.k;
        format!(
            r#"<path d="M {} {} Q {} {} {} {} Q {} {} {} {} Z" fill="{}" opacity="0.8"/>"#,
            fmt_num(cx - h * 0.8),
            fmt_num(hair_y),
            fmt_num(cx - h * 0.4),
            fmt_num(peak),
            fmt_num(cx),
            fmt_num(hair_y - 15.0 * self.k),
            fmt_num(cx + h * 0.4),
            fmt_num(peak),
            fmt_num(cx + h * 0.8),
            fmt_num(hair_y),
            attr(&f.hair_color)
        )
    }

    fn mouth(&self, f: &FeatureSet) -> String {
        let cx = self.center_x();
        let mouth_y = self.head_y() + 15.0 * self.k;
        let m = f64::from(f.mouth_size) * self.k;
        let tooth_y = fmt_num(mouth_y - m / 8.0);
        let tooth_w = fmt_num(m / 6.0);
        let tooth_h = fmt_num(m / 4.0);
        format!(
            concat!(
                r##"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="#000000" opacity="0.8"/>"##,
                r##"<rect x="{}" y="{ty}" width="{tw}" height="{th}" fill="#FFFFFF"/>"##,
                r##"<rect x="{}" y="{ty}" width="{tw}" height="{th}" fill="#FFFFFF"/>"##
            ),
            fmt_num(cx),
            fmt_num(mouth_y),
            fmt_num(m / 2.0),
            fmt_num(m / 4.0),
            fmt_num(cx - m / 4.0),
            fmt_num(cx + m / 12.0),
            ty = tooth_y,
            tw = tooth_w,
            th = tooth_h
        )
    }

    /// Blood splatters anywhere on the avatar, then scars ringed around the head
    fn wounds<R: Rng + ?Sized>(&self, f: &FeatureSet, rng: &mut R) -> String {
        let mut out = String::new();
        for _ in 0..f.wound_count {
            let x = self.size * 0.2 + self.size * 0.6 * rng.gen::<f64>();
            let y = self.size * 0.2 + self.size * 0.6 * rng.gen::<f64>();
            let r = (3.0 + rng.gen::<f64>() * 5.0) * self.k;
            out.push_str(&format!(
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}" opacity="0.7"/>"#,
                fmt_num(x),
                fmt_num(y),
                fmt_num(r),
                attr(&f.blood_color)
            ));
        }

        let scars = f.scar_count();
        let ring = f64::from(f.head_size) * 0.7 * self.k;
        for i in 0..scars {
            let angle = f64::from(i) * PI * 2.0 / f64::from(scars);
            let x = self.center_x() + angle.cos() * ring;
            let y = fmt_num(self.head_y() + angle.sin() * ring);
            let len = (8.0 + rng.gen::<f64>() * 12.0) * self.k;
            out.push_str(&format!(
                concat!(
                    r#"<line x1="{}" y1="{y}" x2="{}" y2="{y}" "#,
                    r#"stroke="{}" stroke-width="{}" opacity="0.8"/>"#
                ),
                fmt_num(x - len / 2.0),
                fmt_num(x + len / 2.0),
                attr(&f.blood_color),
                fmt_num(2.0 * self.k),
                y = y
            ));
        }
        out
    }

    fn clothing(&self, f: &FeatureSet) -> String {
        let cx = self.center_x();
        let top = self.body_y() - self.size * 0.1;
        let left = cx - self.size * 0.15;
        format!(
            concat!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{c}" opacity="0.8" rx="{}"/>"#,
                r#"<path d="M {} {} L {} {} L {} {} L {} {} Z" fill="{c}" opacity="0.6"/>"#
            ),
            fmt_num(left),
            fmt_num(top),
            fmt_num(self.size * 0.3),
            fmt_num(self.size * 0.2),
            fmt_num(5.0 * self.k),
            fmt_num(left),
            fmt_num(top),
            fmt_num(cx - self.size * 0.18),
            fmt_num(top + 5.0 * self.k),
            fmt_num(cx - self.size * 0.12),
            fmt_num(top + 8.0 * self.k),
            fmt_num(left),
            fmt_num(top + 10.0 * self.k),
            c = attr(&f.clothes_color)
        )
    }

    fn level_badge(&self, level: u32) -> String {
        let badge = 30.0 * self.k;
        let x = fmt_num(self.size - badge - 10.0 * self.k);
        let y = 10.0 * self.k;
        format!(
            concat!(
                r#"<circle cx="{x}" cy="{}" r="{}" fill="{}" opacity="0.9" "#,
                r#"stroke="{}" stroke-width="{}"/>"#,
                r##"<text x="{x}" y="{}" text-anchor="middle" fill="#ffffff" "##,
                r#"font-family="Roboto" font-weight="bold" font-size="{}">{}</text>"#
            ),
            fmt_num(y),
            fmt_num(badge / 2.0),
            BADGE_FILL,
            BADGE_STROKE,
            fmt_num(2.0 * self.k),
            fmt_num(y + 5.0 * self.k),
            fmt_num(12.0 * self.k),
            level,
            x = x
        )
    }
}

/// Escape a value for use inside a double-quoted attribute
fn attr(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Format a coordinate with at most 3 decimals and no trailing zeros
fn fmt_num(value: f64) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
