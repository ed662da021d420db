//! # Chroma Palette
//!
//! A Rust crate for building, scoring and tuning color palettes.
//!
//! The engine provides:
//! - Representative color extraction from decoded RGBA pixels
//! - Harmony palette generation from a seed color
//! - Harmony and WCAG accessibility analysis of any palette
//! - Purpose-driven optimization (UI, branding, artistic, accessible)
//!
//! Every operation is a deterministic function of its inputs. Image decoding,
//! persistence and rendering belong to the caller.
//!
//! ## Example
//!
//! ```rust
//! use chroma_palette::{analyze_palette, generate_harmonized_palette, Color};
//!
//! let base = Color::from_hex("#3366CC")?;
//! let (palette, harmony) = generate_harmonized_palette(&base)?;
//! let analysis = analyze_palette(&palette);
//! println!("{} ({}): harmony {:.0}", palette, harmony, analysis.harmony_score);
//! # Ok::<(), chroma_palette::PaletteError>(())
//! ```

pub mod analysis;
pub mod color;
pub mod color_palette;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod extract;
pub mod harmony;
pub mod optimize;

pub use analysis::{AccessibilityIssue, IssueSeverity, PaletteAnalysis, PaletteAnalyzer};
pub use color::{Color, Hsb, Hsl};
pub use color_palette::{ColorPalette, PalettePurpose, PaletteStyle};
pub use config::{AnalysisConfig, EngineConfig, ExtractionConfig, HarmonyConfig, OptimizationConfig};
pub use engine::PaletteEngine;
pub use error::{PaletteError, Result};
pub use extract::{ExtractionMode, ExtractionTask, PixelBuffer, Region};
pub use harmony::{HarmonyGenerator, HarmonyType};
pub use optimize::PaletteOptimizer;

/// Sample `count` colors from random pixel positions
///
/// Uses the default engine configuration, including its fixed seed, so the
/// same image always yields the same colors.
///
/// # Arguments
///
/// * `pixels` - Decoded RGBA image
/// * `count` - Number of colors wanted; more than the pixel count is allowed
/// * `avoid_dark` - Resample pixels darker than the dark threshold
///
/// # Errors
///
/// Returns `PaletteError::InvalidCount` if `count` is zero.
pub fn extract_random_colors(
    pixels: &PixelBuffer,
    count: usize,
    avoid_dark: bool,
) -> Result<Vec<Color>> {
    PaletteEngine::new().extract_random_colors(pixels, count, avoid_dark)
}

/// The `count` most frequent colors of an image or of one region of it
///
/// # Errors
///
/// Returns `PaletteError` if:
/// - `count` is zero
/// - the region is empty or outside the image
pub fn extract_prominent_colors(
    pixels: &PixelBuffer,
    region: Option<Region>,
    count: usize,
    avoid_dark: bool,
) -> Result<Vec<Color>> {
    PaletteEngine::new().extract_prominent_colors(pixels, region, count, avoid_dark)
}

/// Palette from the rule best suited to `base`, with the rule's name
pub fn generate_harmonized_palette(base: &Color) -> Result<(ColorPalette, String)> {
    PaletteEngine::new().generate_harmonized_palette(base)
}

/// Palette of `count` colors derived from an image in the given style
pub fn generate_palette(
    pixels: &PixelBuffer,
    style: PaletteStyle,
    count: usize,
) -> Result<ColorPalette> {
    PaletteEngine::new().generate_palette(pixels, style, count)
}

/// Harmony, contrast and accessibility report for a palette
pub fn analyze_palette(palette: &ColorPalette) -> PaletteAnalysis {
    PaletteEngine::new().analyze_palette(palette)
}

/// Palette tuned for `purpose`; never scores below the input
pub fn optimize_palette(palette: &ColorPalette, purpose: PalettePurpose) -> ColorPalette {
    PaletteEngine::new().optimize_palette(palette, purpose)
}
