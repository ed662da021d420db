//! Engine facade
//!
//! `PaletteEngine` bundles one [`EngineConfig`] with the extractors, the
//! harmony generator, the analyzer and the optimizer, and exposes the
//! engine's operations as methods. It holds no mutable state, so a shared
//! reference can serve any number of threads.

use std::sync::Arc;

use tracing::debug;

use crate::analysis::{PaletteAnalysis, PaletteAnalyzer};
use crate::color::Color;
use crate::color_palette::{ColorPalette, PalettePurpose, PaletteStyle};
use crate::config::EngineConfig;
use crate::extract::{self, ExtractionMode, ExtractionTask, PixelBuffer, Region};
use crate::harmony::{HarmonyGenerator, HarmonyType};
use crate::optimize::PaletteOptimizer;
use crate::{PaletteError, Result};

/// Palette engine with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct PaletteEngine {
    config: EngineConfig,
    generator: HarmonyGenerator,
    analyzer: PaletteAnalyzer,
    optimizer: PaletteOptimizer,
}

impl PaletteEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if any configuration value is out of range.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            generator: HarmonyGenerator::new(config.harmony.clone()),
            analyzer: PaletteAnalyzer::with_config(config.analysis.clone()),
            optimizer: PaletteOptimizer::new(config.optimization.clone()),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Sample `count` colors at random pixel positions
    ///
    /// See [`extract::extract_random_colors`].
    pub fn extract_random_colors(
        &self,
        pixels: &PixelBuffer,
        count: usize,
        avoid_dark: bool,
    ) -> Result<Vec<Color>> {
        extract::extract_random_colors(pixels, count, avoid_dark, &self.config.extraction)
    }

    /// The `count` most frequent colors, optionally inside `region`
    ///
    /// See [`extract::extract_prominent_colors`].
    pub fn extract_prominent_colors(
        &self,
        pixels: &PixelBuffer,
        region: Option<Region>,
        count: usize,
        avoid_dark: bool,
    ) -> Result<Vec<Color>> {
        extract::extract_prominent_colors(
            pixels,
            region,
            count,
            avoid_dark,
            &self.config.extraction,
        )
    }

    /// Run an extraction on the rayon pool
    ///
    /// The returned task delivers the colors once; drop it to discard a
    /// superseded request.
    pub fn spawn_extraction(
        &self,
        pixels: Arc<PixelBuffer>,
        mode: ExtractionMode,
        region: Option<Region>,
        count: usize,
        avoid_dark: bool,
    ) -> ExtractionTask {
        ExtractionTask::spawn_in_region(
            pixels,
            mode,
            region,
            count,
            avoid_dark,
            self.config.extraction.clone(),
        )
    }

    /// Adaptive palette at the default size
    ///
    /// # Returns
    ///
    /// The palette and the machine name of the harmony rule that built it.
    pub fn generate_harmonized_palette(&self, base: &Color) -> Result<(ColorPalette, String)> {
        self.generator.generate_harmonized(base)
    }

    /// Palette of an explicit harmony rule
    pub fn generate_harmony(
        &self,
        base: &Color,
        harmony: HarmonyType,
        count: usize,
    ) -> Result<ColorPalette> {
        self.generator.generate(base, harmony, count)
    }

    /// Build a palette from an image
    ///
    /// The dominant non-dark color seeds every rule-based style. `Harmonic`
    /// keeps the image's own prominent colors instead and snaps their hues.
    ///
    /// # Arguments
    ///
    /// * `pixels` - Decoded RGBA image
    /// * `style` - How the palette relates to the image
    /// * `count` - Number of colors wanted
    ///
    /// # Errors
    ///
    /// - `InvalidCount` when `count` is zero
    /// - any extraction error for the image
    pub fn generate_palette(
        &self,
        pixels: &PixelBuffer,
        style: PaletteStyle,
        count: usize,
    ) -> Result<ColorPalette> {
        if count == 0 {
            return Err(PaletteError::InvalidCount { count });
        }

        let fixed = match style {
            PaletteStyle::Harmonic => return self.harmonic_palette(pixels, count),
            PaletteStyle::Adaptive => None,
            PaletteStyle::Monochromatic => Some(HarmonyType::Monochromatic),
            PaletteStyle::Complementary => Some(HarmonyType::Complementary),
            PaletteStyle::Triadic => Some(HarmonyType::Triadic),
            PaletteStyle::Analogous => Some(HarmonyType::Analogous),
        };
        let base = self.dominant_color(pixels)?;
        let harmony = fixed.unwrap_or_else(|| self.generator.select_adaptive(&base));
        debug!(
            style = style.name(),
            harmony = harmony.name(),
            base = %base,
            "generating palette from image"
        );
        self.generator.generate(&base, harmony, count)
    }

    /// Score a palette
    pub fn analyze_palette(&self, palette: &ColorPalette) -> PaletteAnalysis {
        self.analyzer.analyze(palette)
    }

    /// Optimize a palette for `purpose`
    pub fn optimize_palette(&self, palette: &ColorPalette, purpose: PalettePurpose) -> ColorPalette {
        self.optimizer.optimize(palette, purpose)
    }

    /// Optimize, then analyze the result
    pub fn analyze_optimized(
        &self,
        palette: &ColorPalette,
        purpose: PalettePurpose,
    ) -> (ColorPalette, PaletteAnalysis) {
        let optimized = self.optimize_palette(palette, purpose);
        let analysis = self.analyze_palette(&optimized);
        (optimized, analysis)
    }

    /// Objective value `optimize_palette` maximises for `purpose`
    pub fn purpose_score(&self, palette: &ColorPalette, purpose: PalettePurpose) -> f32 {
        self.optimizer.purpose_score(palette, purpose)
    }

    /// Prominent image colors with their hues snapped onto the harmonic grid
    fn harmonic_palette(&self, pixels: &PixelBuffer, count: usize) -> Result<ColorPalette> {
        let prominent = self.extract_prominent_colors(pixels, None, count, true)?;
        let colors = self.generator.harmonize(&prominent);
        debug!(count, "generated harmonic palette from image");
        ColorPalette::new("Harmonic", colors)
    }

    fn dominant_color(&self, pixels: &PixelBuffer) -> Result<Color> {
        self.extract_prominent_colors(pixels, None, 1, true)?
            .into_iter()
            .next()
            .ok_or_else(|| PaletteError::empty("no dominant color in image"))
    }
}
