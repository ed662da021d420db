//! Configuration structures for the palette engine.
//!
//! This module defines all tunable parameters, organized per component.
//! WCAG contrast thresholds are standard values and deliberately absent.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use chroma_palette::EngineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = EngineConfig::from_json_file(Path::new("engine.json"))?;
//!
//! // Or use defaults
//! let config = EngineConfig::default();
//! # Ok::<(), chroma_palette::PaletteError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`ExtractionConfig`]: pixel sampling and bucketing
//! - [`HarmonyConfig`]: rule table tuning and adaptive thresholds
//! - [`AnalysisConfig`]: harmony scoring and observation thresholds
//! - [`OptimizationConfig`]: optimizer step sizes and bounds

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{analysis, extraction, harmony, optimization};
use crate::{PaletteError, Result};

/// Complete engine configuration.
///
/// Every section falls back to its defaults when missing from a JSON file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pixel extraction configuration
    pub extraction: ExtractionConfig,

    /// Harmony generation configuration
    pub harmony: HarmonyConfig,

    /// Palette analysis configuration
    pub analysis: AnalysisConfig,

    /// Palette optimization configuration
    pub optimization: OptimizationConfig,
}

/// Pixel extraction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// HSL lightness below which a pixel is "dark" (0.0-1.0)
    pub dark_threshold: f32,

    /// Resampling attempts per slot before a dark pixel is accepted
    pub dark_retry_budget: usize,

    /// Bits kept per channel when bucketing (1-6)
    pub bucket_bits: u8,

    /// Pixel count at which prominent-color scanning uses rayon
    pub parallel_threshold: usize,

    /// Seed for random sampling; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            dark_threshold: extraction::DARK_LIGHTNESS_THRESHOLD,
            dark_retry_budget: extraction::DARK_RETRY_BUDGET,
            bucket_bits: extraction::BUCKET_BITS,
            parallel_threshold: extraction::PARALLEL_THRESHOLD,
            seed: Some(extraction::DEFAULT_SEED),
        }
    }
}

/// Harmony generation parameters.
///
/// The adaptive thresholds are heuristics; they are exposed so the rule
/// selection stays explainable and testable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonyConfig {
    /// Palette size used by `generate_harmonized_palette`
    pub default_palette_size: usize,

    /// Lightness ramp for monochromatic palettes
    pub monochrome_lightness_min: f32,
    pub monochrome_lightness_max: f32,

    /// Lightness shift per repetition of a rule's stops
    pub cycle_lightness_step: f32,

    /// Adaptive selection thresholds
    pub adaptive_low_saturation: f32,
    pub adaptive_high_saturation: f32,
    pub adaptive_mid_lightness_min: f32,
    pub adaptive_mid_lightness_max: f32,

    /// Hue grid for the harmonic style, in degrees
    pub harmonic_snap_degrees: f32,
}

impl Default for HarmonyConfig {
    fn default() -> Self {
        Self {
            default_palette_size: harmony::DEFAULT_PALETTE_SIZE,
            monochrome_lightness_min: harmony::MONOCHROME_LIGHTNESS_MIN,
            monochrome_lightness_max: harmony::MONOCHROME_LIGHTNESS_MAX,
            cycle_lightness_step: harmony::CYCLE_LIGHTNESS_STEP,
            adaptive_low_saturation: harmony::ADAPTIVE_LOW_SATURATION,
            adaptive_high_saturation: harmony::ADAPTIVE_HIGH_SATURATION,
            adaptive_mid_lightness_min: harmony::ADAPTIVE_MID_LIGHTNESS_MIN,
            adaptive_mid_lightness_max: harmony::ADAPTIVE_MID_LIGHTNESS_MAX,
            harmonic_snap_degrees: harmony::HARMONIC_SNAP_DEGREES,
        }
    }
}

/// Palette analysis parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Allowed deviation from a nice hue angle, in degrees
    pub harmony_tolerance: f32,

    /// Average saturation above which a neutral is suggested
    pub high_saturation: f32,

    /// Saturation below which a member counts as neutral
    pub neutral_saturation: f32,

    /// Average saturation below which an accent is suggested
    pub low_saturation: f32,

    /// Lightness spread reported as a strength
    pub good_lightness_spread: f32,

    /// Lightness spread below which more variation is suggested
    pub flat_lightness_spread: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            harmony_tolerance: analysis::HARMONY_TOLERANCE_DEGREES,
            high_saturation: analysis::HIGH_SATURATION_THRESHOLD,
            neutral_saturation: analysis::NEUTRAL_SATURATION_THRESHOLD,
            low_saturation: analysis::LOW_SATURATION_THRESHOLD,
            good_lightness_spread: analysis::GOOD_LIGHTNESS_SPREAD,
            flat_lightness_spread: analysis::FLAT_LIGHTNESS_SPREAD,
        }
    }
}

/// Palette optimization parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationConfig {
    /// Lightness change per iteration
    pub lightness_step: f32,

    /// Lightness bounds for adjusted colors
    pub min_lightness: f32,
    pub max_lightness: f32,

    /// Largest total lightness shift for one color in the accessible pass
    pub max_lightness_shift: f32,

    /// Iteration cap for the accessible pass
    pub max_iterations: usize,

    /// Half-width of the branding saturation band
    pub branding_saturation_band: f32,

    /// Minimum RGB distance kept between branding colors
    pub min_distinct_distance: f32,

    /// Hue separation below which branding colors count as the same hue
    pub min_hue_separation: f32,

    /// Deviation multiplier for the artistic pass (> 1.0)
    pub artistic_spread_factor: f32,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            lightness_step: optimization::LIGHTNESS_STEP,
            min_lightness: optimization::MIN_LIGHTNESS,
            max_lightness: optimization::MAX_LIGHTNESS,
            max_lightness_shift: optimization::MAX_LIGHTNESS_SHIFT,
            max_iterations: optimization::MAX_ITERATIONS,
            branding_saturation_band: optimization::BRANDING_SATURATION_BAND,
            min_distinct_distance: optimization::MIN_DISTINCT_DISTANCE,
            min_hue_separation: optimization::MIN_HUE_SEPARATION_DEGREES,
            artistic_spread_factor: optimization::ARTISTIC_SPREAD_FACTOR,
        }
    }
}

fn check_unit(parameter: &str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PaletteError::invalid_parameter(parameter, value))
    }
}

impl EngineConfig {
    /// Check every value is inside its supported range
    pub fn validate(&self) -> Result<()> {
        let ex = &self.extraction;
        check_unit("extraction.dark_threshold", ex.dark_threshold)?;
        if ex.bucket_bits == 0 || ex.bucket_bits > extraction::MAX_BUCKET_BITS {
            return Err(PaletteError::invalid_parameter(
                "extraction.bucket_bits",
                ex.bucket_bits,
            ));
        }

        let hm = &self.harmony;
        if hm.default_palette_size == 0 {
            return Err(PaletteError::invalid_parameter(
                "harmony.default_palette_size",
                hm.default_palette_size,
            ));
        }
        check_unit("harmony.monochrome_lightness_min", hm.monochrome_lightness_min)?;
        check_unit("harmony.monochrome_lightness_max", hm.monochrome_lightness_max)?;
        if hm.monochrome_lightness_min > hm.monochrome_lightness_max {
            return Err(PaletteError::invalid_parameter(
                "harmony.monochrome_lightness_min",
                hm.monochrome_lightness_min,
            ));
        }
        check_unit("harmony.cycle_lightness_step", hm.cycle_lightness_step)?;
        check_unit("harmony.adaptive_low_saturation", hm.adaptive_low_saturation)?;
        check_unit("harmony.adaptive_high_saturation", hm.adaptive_high_saturation)?;
        if hm.harmonic_snap_degrees <= 0.0 || hm.harmonic_snap_degrees > 180.0 {
            return Err(PaletteError::invalid_parameter(
                "harmony.harmonic_snap_degrees",
                hm.harmonic_snap_degrees,
            ));
        }

        let an = &self.analysis;
        if !(0.0..15.0).contains(&an.harmony_tolerance) {
            return Err(PaletteError::invalid_parameter(
                "analysis.harmony_tolerance",
                an.harmony_tolerance,
            ));
        }

        let op = &self.optimization;
        if op.lightness_step <= 0.0 || op.lightness_step > 0.5 {
            return Err(PaletteError::invalid_parameter(
                "optimization.lightness_step",
                op.lightness_step,
            ));
        }
        check_unit("optimization.min_lightness", op.min_lightness)?;
        check_unit("optimization.max_lightness", op.max_lightness)?;
        if op.min_lightness >= op.max_lightness {
            return Err(PaletteError::invalid_parameter(
                "optimization.min_lightness",
                op.min_lightness,
            ));
        }
        check_unit("optimization.max_lightness_shift", op.max_lightness_shift)?;
        check_unit("optimization.branding_saturation_band", op.branding_saturation_band)?;
        if op.artistic_spread_factor < 1.0 {
            return Err(PaletteError::invalid_parameter(
                "optimization.artistic_spread_factor",
                op.artistic_spread_factor,
            ));
        }
        Ok(())
    }

    /// Load and validate configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PaletteError::config(format!("cannot read {}", path.display()), e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| PaletteError::config(format!("cannot parse {}", path.display()), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PaletteError::config("cannot serialize configuration", e))?;
        std::fs::write(path, json)
            .map_err(|e| PaletteError::config(format!("cannot write {}", path.display()), e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_defaults_follow_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.extraction.bucket_bits, extraction::BUCKET_BITS);
        assert_eq!(config.extraction.seed, Some(extraction::DEFAULT_SEED));
        assert_eq!(config.harmony.default_palette_size, harmony::DEFAULT_PALETTE_SIZE);
    }

    #[test]
    fn test_invalid_bucket_bits() {
        let mut config = EngineConfig::default();
        config.extraction.bucket_bits = 9;
        assert!(matches!(
            config.validate(),
            Err(PaletteError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_invalid_lightness_bounds() {
        let mut config = EngineConfig::default();
        config.optimization.min_lightness = 0.9;
        config.optimization.max_lightness = 0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "extraction": { "bucket_bits": 3 } }"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.extraction.bucket_bits, 3);
        assert_eq!(
            config.extraction.dark_threshold,
            extraction::DARK_LIGHTNESS_THRESHOLD
        );
        assert_eq!(config.harmony, HarmonyConfig::default());
    }

    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");

        let mut config = EngineConfig::default();
        config.extraction.seed = None;
        config.to_json_file(&path).unwrap();

        let loaded = EngineConfig::from_json_file(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = EngineConfig::from_json_file(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(PaletteError::Config { .. })));
    }
}
