//! Color science constants and tunable defaults
//!
//! WCAG values are literal standard breakpoints. Everything else is a
//! heuristic default that `EngineConfig` can override.

/// WCAG 2.x contrast and luminance constants
///
/// Source: Web Content Accessibility Guidelines 2.1, success criteria 1.4.3
/// and the relative luminance definition.
pub mod wcag {
    /// Minimum contrast for normal body text (level AA)
    pub const AA_NORMAL_TEXT: f32 = 4.5;

    /// Minimum contrast for large text and UI components (level AA)
    pub const AA_LARGE_TEXT: f32 = 3.0;

    /// Enhanced contrast for normal text (level AAA)
    pub const AAA_NORMAL_TEXT: f32 = 7.0;

    /// Maximum possible contrast ratio (black on white)
    pub const MAX_CONTRAST_RATIO: f32 = 21.0;

    /// Linearization knee of the sRGB transfer curve as written in WCAG
    pub const LINEAR_THRESHOLD: f32 = 0.03928;

    /// Luminance weights for linear R, G, B
    pub const LUMINANCE_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

    /// Flare term added to both luminances in the contrast ratio
    pub const CONTRAST_OFFSET: f32 = 0.05;
}

/// Pixel extraction parameters
pub mod extraction {
    /// HSL lightness below which a pixel counts as "dark"
    pub const DARK_LIGHTNESS_THRESHOLD: f32 = 0.12;

    /// Resampling attempts per slot before accepting a dark pixel
    pub const DARK_RETRY_BUDGET: usize = 16;

    /// Bits kept per channel when bucketing colors (4 bits = 4096 buckets)
    pub const BUCKET_BITS: u8 = 4;

    /// Largest supported bucket resolution
    pub const MAX_BUCKET_BITS: u8 = 6;

    /// Pixel count at which prominent-color scanning goes parallel
    pub const PARALLEL_THRESHOLD: usize = 65_536;

    /// Default seed so random sampling is reproducible
    pub const DEFAULT_SEED: u64 = 0x5EED_C010;
}

/// Harmony generation parameters
pub mod harmony {
    /// Palette size used when callers do not ask for one
    pub const DEFAULT_PALETTE_SIZE: usize = 5;

    /// Angular step used to extend analogous palettes
    pub const ANALOGOUS_STEP_DEGREES: f32 = 30.0;

    /// Monochromatic lightness ramp
    pub const MONOCHROME_LIGHTNESS_MIN: f32 = 0.25;
    pub const MONOCHROME_LIGHTNESS_MAX: f32 = 0.85;

    /// Lightness shift applied each time a rule's stops repeat
    pub const CYCLE_LIGHTNESS_STEP: f32 = 0.12;

    /// Adaptive selection: below this saturation the base is treated as muted
    pub const ADAPTIVE_LOW_SATURATION: f32 = 0.25;

    /// Adaptive selection: at or above this saturation the base is vivid
    pub const ADAPTIVE_HIGH_SATURATION: f32 = 0.6;

    /// Adaptive selection: vivid bases with mid lightness get triadic
    pub const ADAPTIVE_MID_LIGHTNESS_MIN: f32 = 0.3;
    pub const ADAPTIVE_MID_LIGHTNESS_MAX: f32 = 0.7;

    /// Hue grid used when snapping extracted colors into harmony
    pub const HARMONIC_SNAP_DEGREES: f32 = 30.0;
}

/// Palette analysis parameters
pub mod analysis {
    /// Hue deltas considered harmonious
    pub const NICE_ANGLES: [f32; 7] = [0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0];

    /// Allowed deviation from a nice angle
    pub const HARMONY_TOLERANCE_DEGREES: f32 = 10.0;

    /// Score reported for a palette with a single color
    pub const SINGLE_COLOR_HARMONY_SCORE: f32 = 100.0;

    /// Average saturation above which a neutral is suggested
    pub const HIGH_SATURATION_THRESHOLD: f32 = 0.7;

    /// A member below this saturation counts as a neutral
    pub const NEUTRAL_SATURATION_THRESHOLD: f32 = 0.2;

    /// Average saturation below which an accent is suggested
    pub const LOW_SATURATION_THRESHOLD: f32 = 0.15;

    /// Lightness range that reads as a clear hierarchy
    pub const GOOD_LIGHTNESS_SPREAD: f32 = 0.5;

    /// Lightness range below which the palette reads as flat
    pub const FLAT_LIGHTNESS_SPREAD: f32 = 0.2;

    /// Harmony score below which hue adjustments are suggested
    pub const WEAK_HARMONY_SCORE: f32 = 50.0;

    /// Saturation below which a color's hue is not meaningful
    pub const ACHROMATIC_SATURATION: f32 = 0.05;
}

/// Palette optimization parameters
pub mod optimization {
    /// Lightness change applied per optimizer iteration
    pub const LIGHTNESS_STEP: f32 = 0.02;

    /// Lightness limits keeping hue recoverable (pure black/white lose it)
    pub const MIN_LIGHTNESS: f32 = 0.05;
    pub const MAX_LIGHTNESS: f32 = 0.95;

    /// Largest total lightness shift the accessible pass may apply to one color
    pub const MAX_LIGHTNESS_SHIFT: f32 = 0.5;

    /// Iteration cap for the accessible pass
    pub const MAX_ITERATIONS: usize = 64;

    /// Half-width of the saturation band around the hero color
    pub const BRANDING_SATURATION_BAND: f32 = 0.15;

    /// Saturation floor for chromatic colors so their hue survives
    pub const MIN_CHROMATIC_SATURATION: f32 = 0.05;

    /// Minimum RGB distance between two branding colors
    pub const MIN_DISTINCT_DISTANCE: f32 = 0.1;

    /// Hue separation below which two branding colors count as the same hue
    pub const MIN_HUE_SEPARATION_DEGREES: f32 = 15.0;

    /// Multiplier applied to deviations from the mean in the artistic pass
    pub const ARTISTIC_SPREAD_FACTOR: f32 = 1.35;
}
