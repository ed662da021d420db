//! Palette scoring
//!
//! Computes, for any palette:
//! - harmony score from pairwise hue deltas
//! - maximum pairwise contrast ratio
//! - WCAG findings for pairs below 4.5:1
//! - average lightness and saturation
//! - rule-based strengths and suggestions

use tracing::debug;

use super::observations::{strengths, suggestions, PaletteStats};
use super::report::{AccessibilityIssue, IssueSeverity, PaletteAnalysis};
use crate::color::{hue_delta, Color};
use crate::color_palette::ColorPalette;
use crate::config::AnalysisConfig;
use crate::constants::{analysis, wcag};

/// Unordered index pairs (i < j) over `n` items
pub(crate) fn pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}

/// Whether a hue delta lies within `tolerance` of a harmonious angle
pub(crate) fn is_nice_angle(delta: f32, tolerance: f32) -> bool {
    analysis::NICE_ANGLES
        .iter()
        .any(|angle| (delta - angle).abs() <= tolerance)
}

/// Palette analyzer
#[derive(Debug, Clone, Default)]
pub struct PaletteAnalyzer {
    config: AnalysisConfig,
}

impl PaletteAnalyzer {
    /// Create an analyzer with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with custom thresholds
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Analyze a palette
    ///
    /// A single-color palette is the explicit boundary case: harmony is the
    /// fixed baseline, contrast is 1 (self-contrast) and there are no issues.
    pub fn analyze(&self, palette: &ColorPalette) -> PaletteAnalysis {
        let colors = palette.colors();
        let stats = PaletteStats::new(colors);

        let harmony_score = self.harmony_score(colors);
        let max_contrast_ratio = max_contrast_ratio(colors);
        let accessibility_issues = accessibility_issues(colors);

        let harmony_strengths =
            strengths(colors, &stats, harmony_score, max_contrast_ratio, &self.config);
        let harmony_suggestions =
            suggestions(&stats, harmony_score, max_contrast_ratio, &self.config);

        debug!(
            palette = palette.name(),
            colors = colors.len(),
            harmony_score,
            max_contrast_ratio,
            issues = accessibility_issues.len(),
            "analyzed palette"
        );

        PaletteAnalysis {
            harmony_score,
            max_contrast_ratio,
            accessibility_issues,
            harmony_strengths,
            harmony_suggestions,
            average_brightness: stats.average_lightness,
            average_saturation: stats.average_saturation,
        }
    }

    /// Percentage of color pairs whose hue delta sits on a harmonious angle
    ///
    /// Only chromatic members count: grays, black and white report hue 0,
    /// which says nothing about their relation to other hues. With fewer
    /// than two chromatic members the palette scores like a single color.
    pub fn harmony_score(&self, colors: &[Color]) -> f32 {
        let hues: Vec<f32> = colors
            .iter()
            .filter(|c| c.saturation() >= analysis::ACHROMATIC_SATURATION)
            .map(Color::hue)
            .collect();
        if hues.len() < 2 {
            return analysis::SINGLE_COLOR_HARMONY_SCORE;
        }
        let (nice, total) = pairs(hues.len()).fold((0usize, 0usize), |(nice, total), (i, j)| {
            let delta = hue_delta(hues[i], hues[j]);
            let hit = is_nice_angle(delta, self.config.harmony_tolerance);
            (nice + hit as usize, total + 1)
        });
        100.0 * nice as f32 / total as f32
    }
}

/// Highest contrast ratio over all pairs; 1 for fewer than two colors
pub fn max_contrast_ratio(colors: &[Color]) -> f32 {
    pairs(colors.len())
        .map(|(i, j)| colors[i].contrast_ratio(&colors[j]))
        .fold(1.0, f32::max)
}

/// One finding for every pair under WCAG AA body-text contrast
pub fn accessibility_issues(colors: &[Color]) -> Vec<AccessibilityIssue> {
    pairs(colors.len())
        .filter_map(|(i, j)| {
            let ratio = colors[i].contrast_ratio(&colors[j]);
            (ratio < wcag::AA_NORMAL_TEXT).then(|| describe_issue(colors, i, j, ratio))
        })
        .collect()
}

fn describe_issue(colors: &[Color], i: usize, j: usize, ratio: f32) -> AccessibilityIssue {
    let (a, b) = (colors[i].to_hex(), colors[j].to_hex());
    let (lighter, darker) = if colors[i].luminance() >= colors[j].luminance() {
        (&a, &b)
    } else {
        (&b, &a)
    };

    if ratio < wcag::AA_LARGE_TEXT {
        AccessibilityIssue {
            message: format!(
                "Very low contrast ({:.2}:1) between {} and {}: fails WCAG AA for all text sizes",
                ratio, a, b
            ),
            suggestion: format!(
                "Avoid pairing {} and {} for text, or make {} much lighter or {} much darker",
                a, b, lighter, darker
            ),
            severity: IssueSeverity::Severe,
            colors: (i, j),
            contrast_ratio: ratio,
        }
    } else {
        AccessibilityIssue {
            message: format!(
                "Low contrast ({:.2}:1) between {} and {}: passes WCAG AA only for large text",
                ratio, a, b
            ),
            suggestion: format!(
                "Lighten {} or darken {} to reach {:.1}:1 for body text",
                lighter,
                darker,
                wcag::AA_NORMAL_TEXT
            ),
            severity: IssueSeverity::Moderate,
            colors: (i, j),
            contrast_ratio: ratio,
        }
    }
}
