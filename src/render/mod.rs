//! Rendering — turns DNA into presentable output
//!
//! SVG avatars for cards and detail views, and a compact emoji form.

mod config;
mod emoji;
mod svg;

pub use config::{AvatarConfig, ConfigError, RenderConfig, ScarMode, REFERENCE_SIZE};
pub use emoji::zombie_emoji;
pub use svg::AvatarRenderer;
