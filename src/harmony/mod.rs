//! Harmony palette generation
//!
//! Derives palettes from a base color by rotating its hue through a fixed
//! rule table:
//!
//! | Rule | Hue offsets |
//! |---|---|
//! | complementary | 0, 180 |
//! | analogous | 0, -30, +30, -60, +60, ... |
//! | triadic | 0, 120, 240 |
//! | tetradic | 0, 90, 180, 270 |
//! | split complementary | 0, 150, 210 |
//! | monochromatic | constant hue, lightness ramp |
//!
//! When more colors are requested than a rule has stops, the stops repeat and
//! each repetition shifts lightness by `cycle_lightness_step` so repeated hues
//! stay distinguishable. Generation is deterministic.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{Color, Hsl};
use crate::color_palette::ColorPalette;
use crate::config::HarmonyConfig;
use crate::constants::harmony::ANALOGOUS_STEP_DEGREES;
use crate::{PaletteError, Result};

/// Lightness limits for generated variations
const MIN_VARIATION_LIGHTNESS: f32 = 0.05;
const MAX_VARIATION_LIGHTNESS: f32 = 0.95;

/// Hue relationship used to build a palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HarmonyType {
    Complementary,
    Analogous,
    Triadic,
    Tetradic,
    SplitComplementary,
    Monochromatic,
}

impl HarmonyType {
    pub const ALL: [HarmonyType; 6] = [
        HarmonyType::Complementary,
        HarmonyType::Analogous,
        HarmonyType::Triadic,
        HarmonyType::Tetradic,
        HarmonyType::SplitComplementary,
        HarmonyType::Monochromatic,
    ];

    /// Machine name, stable across versions
    pub fn name(&self) -> &'static str {
        match self {
            HarmonyType::Complementary => "complementary",
            HarmonyType::Analogous => "analogous",
            HarmonyType::Triadic => "triadic",
            HarmonyType::Tetradic => "tetradic",
            HarmonyType::SplitComplementary => "splitComplementary",
            HarmonyType::Monochromatic => "monochromatic",
        }
    }

    /// Human-readable name used for palette titles
    pub fn display_name(&self) -> &'static str {
        match self {
            HarmonyType::Complementary => "Complementary",
            HarmonyType::Analogous => "Analogous",
            HarmonyType::Triadic => "Triadic",
            HarmonyType::Tetradic => "Tetradic",
            HarmonyType::SplitComplementary => "Split Complementary",
            HarmonyType::Monochromatic => "Monochromatic",
        }
    }

    /// Fixed hue stops for rotation rules; empty for analogous and monochromatic
    pub fn stops(&self) -> &'static [f32] {
        match self {
            HarmonyType::Complementary => &[0.0, 180.0],
            HarmonyType::Triadic => &[0.0, 120.0, 240.0],
            HarmonyType::Tetradic => &[0.0, 90.0, 180.0, 270.0],
            HarmonyType::SplitComplementary => &[0.0, 150.0, 210.0],
            HarmonyType::Analogous | HarmonyType::Monochromatic => &[],
        }
    }
}

impl fmt::Display for HarmonyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Offset of the i-th analogous color: 0, -30, +30, -60, +60, ...
fn analogous_offset(i: usize) -> f32 {
    if i == 0 {
        return 0.0;
    }
    let ring = i.div_ceil(2) as f32;
    let sign = if i % 2 == 1 { -1.0 } else { 1.0 };
    sign * ring * ANALOGOUS_STEP_DEGREES
}

/// Harmony palette generator
#[derive(Debug, Clone, Default)]
pub struct HarmonyGenerator {
    config: HarmonyConfig,
}

impl HarmonyGenerator {
    pub fn new(config: HarmonyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarmonyConfig {
        &self.config
    }

    /// Choose a rule from the base color's own saturation and lightness
    ///
    /// - muted bases (saturation below `adaptive_low_saturation`) stay
    ///   cohesive with a monochromatic ramp
    /// - vivid bases (saturation at or above `adaptive_high_saturation`) get
    ///   triadic at mid lightness, complementary otherwise
    /// - everything in between gets analogous
    pub fn select_adaptive(&self, base: &Color) -> HarmonyType {
        let hsl = base.to_hsl();
        let cfg = &self.config;
        if hsl.saturation < cfg.adaptive_low_saturation {
            HarmonyType::Monochromatic
        } else if hsl.saturation >= cfg.adaptive_high_saturation {
            if (cfg.adaptive_mid_lightness_min..=cfg.adaptive_mid_lightness_max)
                .contains(&hsl.lightness)
            {
                HarmonyType::Triadic
            } else {
                HarmonyType::Complementary
            }
        } else {
            HarmonyType::Analogous
        }
    }

    /// Generate `count` colors following `harmony`
    ///
    /// Position 0 is the base color itself for every rotation rule.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCount` when `count` is zero.
    pub fn generate(&self, base: &Color, harmony: HarmonyType, count: usize) -> Result<ColorPalette> {
        if count == 0 {
            return Err(PaletteError::InvalidCount { count });
        }

        let colors = match harmony {
            HarmonyType::Monochromatic => self.monochromatic(base, count),
            HarmonyType::Analogous => self.analogous(base, count),
            rule => self.rotate_stops(base, rule.stops(), count),
        };

        debug!(
            base = %base,
            harmony = harmony.name(),
            count,
            "generated harmony palette"
        );
        Ok(ColorPalette::from_nonempty(harmony.display_name(), colors))
    }

    /// Adaptive rule at the configured default size
    ///
    /// Returns the palette together with the name of the rule that was used.
    pub fn generate_harmonized(&self, base: &Color) -> Result<(ColorPalette, String)> {
        let harmony = self.select_adaptive(base);
        let palette = self.generate(base, harmony, self.config.default_palette_size)?;
        Ok((palette, harmony.name().to_string()))
    }

    /// Snap each supporting color's hue delta from the hero onto the harmonic grid
    ///
    /// Saturation, lightness and alpha are kept; achromatic colors are left
    /// alone because their hue carries no information.
    pub fn harmonize(&self, colors: &[Color]) -> Vec<Color> {
        let Some(hero) = colors.first() else {
            return Vec::new();
        };
        let hero_hue = hero.hue();
        let grid = self.config.harmonic_snap_degrees;

        let mut result = Vec::with_capacity(colors.len());
        result.push(*hero);
        for color in &colors[1..] {
            let hsl = color.to_hsl();
            if hsl.saturation == 0.0 {
                result.push(*color);
                continue;
            }
            let mut delta = (hsl.hue - hero_hue).rem_euclid(360.0);
            if delta > 180.0 {
                delta -= 360.0;
            }
            let snapped = (delta / grid).round() * grid;
            result.push(Color::from_hsla(
                hero_hue + snapped,
                hsl.saturation,
                hsl.lightness,
                color.alpha(),
            ));
        }
        result
    }

    fn rotate_stops(&self, base: &Color, stops: &[f32], count: usize) -> Vec<Color> {
        let hsl = base.to_hsl();
        (0..count)
            .map(|i| {
                let stop = stops[i % stops.len()];
                let cycle = i / stops.len();
                if i == 0 {
                    *base
                } else {
                    self.variation(base, &hsl, stop, cycle)
                }
            })
            .collect()
    }

    fn analogous(&self, base: &Color, count: usize) -> Vec<Color> {
        let hsl = base.to_hsl();
        (0..count)
            .map(|i| {
                let offset = analogous_offset(i);
                if i == 0 {
                    *base
                } else {
                    // a full turn brings hues back around; shift lightness then
                    let cycle = (offset.abs() / 360.0) as usize;
                    self.variation(base, &hsl, offset, cycle)
                }
            })
            .collect()
    }

    fn monochromatic(&self, base: &Color, count: usize) -> Vec<Color> {
        if count == 1 {
            return vec![*base];
        }
        let hsl = base.to_hsl();
        let min = self.config.monochrome_lightness_min;
        let max = self.config.monochrome_lightness_max;
        let step = (max - min) / (count - 1) as f32;
        (0..count)
            .map(|i| {
                Color::from_hsla(hsl.hue, hsl.saturation, min + step * i as f32, base.alpha())
            })
            .collect()
    }

    /// Hue-rotated copy of the base, lightness shifted for repeated cycles
    ///
    /// Cycles alternate direction, starting toward the side with more room:
    /// +1, -1, +2, -2, ... steps for a dark base, the mirror for a light one.
    fn variation(&self, base: &Color, hsl: &Hsl, offset: f32, cycle: usize) -> Color {
        let mut lightness = hsl.lightness;
        if cycle > 0 {
            let magnitude = cycle.div_ceil(2) as f32 * self.config.cycle_lightness_step;
            let toward_light = hsl.lightness < 0.5;
            let first_direction = if toward_light { 1.0 } else { -1.0 };
            let direction = if cycle % 2 == 1 {
                first_direction
            } else {
                -first_direction
            };
            lightness = (lightness + direction * magnitude)
                .clamp(MIN_VARIATION_LIGHTNESS, MAX_VARIATION_LIGHTNESS);
        }
        Color::from_hsla(hsl.hue + offset, hsl.saturation, lightness, base.alpha())
    }
}
