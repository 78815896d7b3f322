//! Flat key-value presets stored as TOML.
//!
//! Every [`WalkConfig`] and [`ColorPolicy`] field is one top-level key, so a
//! preset reads like a settings panel. Keys missing from a file take the
//! defaults of [`WalkConfig::default`] and [`ColorPolicy::default`].

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;
use vello::peniko::color::{Srgb, parse_color};

use crate::{
    Color, ColorPolicy, Dimension, Interval, Point3, PresetError, StepDistribution, WalkConfig,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preset {
    pub step_count: usize,
    pub step_min: f64,
    pub step_max: f64,
    pub step_distribution: String,
    pub origin_x: f64,
    pub origin_y: f64,
    pub origin_z: f64,
    pub drift_x: f64,
    pub drift_y: f64,
    pub drift_z: f64,
    pub dimension: String,
    pub jump_probability_percent: f64,
    pub jump_min: f64,
    pub jump_max: f64,
    pub hide_jump_seams: bool,
    pub color_mode: String,
    pub color: String,
    pub color_start: String,
    pub color_mid: String,
    pub color_end: String,
    pub mid_position_percent: f64,
}

impl Default for Preset {
    fn default() -> Self {
        Self::from_parts(&WalkConfig::default(), &ColorPolicy::default())
    }
}

impl Preset {
    pub fn from_parts(walk: &WalkConfig, policy: &ColorPolicy) -> Self {
        let mut preset = Self {
            step_count: walk.step_count,
            step_min: walk.step_range.min,
            step_max: walk.step_range.max,
            step_distribution: match walk.step_distribution {
                StepDistribution::Continuous => "continuous",
                StepDistribution::Lattice => "lattice",
            }
            .to_string(),
            origin_x: walk.origin.x,
            origin_y: walk.origin.y,
            origin_z: walk.origin.z,
            drift_x: walk.drift.x,
            drift_y: walk.drift.y,
            drift_z: walk.drift.z,
            dimension: match walk.dimension {
                Dimension::Two => "2d",
                Dimension::Three => "3d",
            }
            .to_string(),
            jump_probability_percent: walk.jump_probability_percent,
            jump_min: walk.jump_distance_range.min,
            jump_max: walk.jump_distance_range.max,
            hide_jump_seams: walk.hide_jump_seams,
            color_mode: String::new(),
            color: css(Color::BLACK),
            color_start: css(Color::BLACK),
            color_mid: css(Color::BLACK),
            color_end: css(Color::BLACK),
            mid_position_percent: 50.0,
        };

        match *policy {
            ColorPolicy::Solid { color } => {
                preset.color_mode = "solid".to_string();
                preset.color = css(color);
            }
            ColorPolicy::Gradient2 { start, end } => {
                preset.color_mode = "gradient2".to_string();
                preset.color_start = css(start);
                preset.color_end = css(end);
            }
            ColorPolicy::Gradient3 {
                start,
                mid,
                end,
                mid_position_percent,
            } => {
                preset.color_mode = "gradient3".to_string();
                preset.color_start = css(start);
                preset.color_mid = css(mid);
                preset.color_end = css(end);
                preset.mid_position_percent = mid_position_percent;
            }
        }
        preset
    }

    pub fn walk_config(&self) -> Result<WalkConfig, PresetError> {
        let step_distribution = match self.step_distribution.as_str() {
            "continuous" => StepDistribution::Continuous,
            "lattice" => StepDistribution::Lattice,
            other => return Err(mode("step_distribution", other)),
        };
        let dimension = match self.dimension.as_str() {
            "2d" => Dimension::Two,
            "3d" => Dimension::Three,
            other => return Err(mode("dimension", other)),
        };

        let config = WalkConfig {
            step_count: self.step_count,
            step_range: Interval {
                min: self.step_min,
                max: self.step_max,
            },
            step_distribution,
            origin: Point3::new(self.origin_x, self.origin_y, self.origin_z),
            drift: Point3::new(self.drift_x, self.drift_y, self.drift_z),
            dimension,
            jump_probability_percent: self.jump_probability_percent,
            jump_distance_range: Interval {
                min: self.jump_min,
                max: self.jump_max,
            },
            hide_jump_seams: self.hide_jump_seams,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn color_policy(&self) -> Result<ColorPolicy, PresetError> {
        let policy = match self.color_mode.as_str() {
            "solid" => ColorPolicy::Solid {
                color: color("color", &self.color)?,
            },
            "gradient2" => ColorPolicy::Gradient2 {
                start: color("color_start", &self.color_start)?,
                end: color("color_end", &self.color_end)?,
            },
            "gradient3" => ColorPolicy::Gradient3 {
                start: color("color_start", &self.color_start)?,
                mid: color("color_mid", &self.color_mid)?,
                end: color("color_end", &self.color_end)?,
                mid_position_percent: self.mid_position_percent,
            },
            other => return Err(mode("color_mode", other)),
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Reads and validates a preset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        let path = path.as_ref();
        let preset: Self = toml::from_str(&fs::read_to_string(path)?)?;
        preset.walk_config()?;
        preset.color_policy()?;
        debug!(path = %path.display(), "loaded preset");
        Ok(preset)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PresetError> {
        let path = path.as_ref();
        fs::write(path, toml::to_string_pretty(self)?)?;
        debug!(path = %path.display(), "saved preset");
        Ok(())
    }
}

/// CSS text that parses back to exactly `color`.
///
/// Colors on the 8-bit grid are written as hex, everything else as an
/// sRGB `color()` function with full-precision channels and alpha.
fn css(color: Color) -> String {
    let rgba = color.to_rgba8();
    if Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a) != color {
        let [r, g, b, a] = color.components;
        return format!("color(srgb {r} {g} {b} / {a})");
    }
    if rgba.a == u8::MAX {
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

fn color(key: &'static str, value: &str) -> Result<Color, PresetError> {
    parse_color(value)
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|_| PresetError::Color {
            key,
            value: value.to_string(),
        })
}

fn mode(key: &'static str, value: &str) -> PresetError {
    PresetError::Mode {
        key,
        value: value.to_string(),
    }
}
