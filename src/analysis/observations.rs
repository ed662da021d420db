//! Rule-based strengths and suggestions

use super::analyzer::pairs;
use crate::color::{hue_delta, Color, Hsl};
use crate::config::AnalysisConfig;
use crate::constants::analysis::{ACHROMATIC_SATURATION, WEAK_HARMONY_SCORE};
use crate::constants::wcag;

/// HSL summary shared by the observation rules
pub(crate) struct PaletteStats {
    pub hsl: Vec<Hsl>,
    pub average_lightness: f32,
    pub average_saturation: f32,
    pub lightness_spread: f32,
}

impl PaletteStats {
    pub fn new(colors: &[Color]) -> Self {
        let hsl: Vec<Hsl> = colors.iter().map(Color::to_hsl).collect();
        if hsl.is_empty() {
            return Self {
                hsl,
                average_lightness: 0.0,
                average_saturation: 0.0,
                lightness_spread: 0.0,
            };
        }
        let n = hsl.len() as f32;
        let average_lightness = hsl.iter().map(|c| c.lightness).sum::<f32>() / n;
        let average_saturation = hsl.iter().map(|c| c.saturation).sum::<f32>() / n;
        let (min, max) = hsl.iter().fold((f32::MAX, f32::MIN), |(lo, hi), c| {
            (lo.min(c.lightness), hi.max(c.lightness))
        });
        Self {
            hsl,
            average_lightness,
            average_saturation,
            lightness_spread: max - min,
        }
    }

    fn len(&self) -> usize {
        self.hsl.len()
    }

    fn chromatic_count(&self) -> usize {
        self.hsl
            .iter()
            .filter(|c| c.saturation >= ACHROMATIC_SATURATION)
            .count()
    }

    /// First chromatic pair whose hue delta is within tolerance of `angle`
    fn find_pair(&self, angle: f32, tolerance: f32) -> Option<(usize, usize)> {
        pairs(self.len()).find(|&(i, j)| {
            let (a, b) = (&self.hsl[i], &self.hsl[j]);
            a.saturation >= ACHROMATIC_SATURATION
                && b.saturation >= ACHROMATIC_SATURATION
                && (hue_delta(a.hue, b.hue) - angle).abs() <= tolerance
        })
    }
}

pub(crate) fn strengths(
    colors: &[Color],
    stats: &PaletteStats,
    harmony_score: f32,
    max_contrast: f32,
    config: &AnalysisConfig,
) -> Vec<String> {
    let mut found = Vec::new();
    let tol = config.harmony_tolerance;

    if let Some((i, j)) = stats.find_pair(180.0, tol) {
        found.push(format!(
            "Strong complementary pairing between color {} and color {}",
            i + 1,
            j + 1
        ));
    }
    if let Some((i, j)) = stats.find_pair(120.0, tol) {
        found.push(format!(
            "Balanced triadic relationship between color {} and color {}",
            i + 1,
            j + 1
        ));
    }
    if let Some((i, j)) = stats.find_pair(30.0, tol) {
        found.push(format!(
            "Smooth analogous transition between color {} and color {}",
            i + 1,
            j + 1
        ));
    }
    if stats.chromatic_count() >= 3 && harmony_score >= 100.0 {
        found.push("Every hue pair sits on a harmonious angle".to_string());
    }
    if max_contrast >= wcag::AAA_NORMAL_TEXT {
        found.push(format!(
            "High contrast range ({:.1}:1) supports readable text",
            max_contrast
        ));
    }
    if colors.len() >= 2 && stats.lightness_spread >= config.good_lightness_spread {
        found.push("Clear lightness hierarchy from light to dark".to_string());
    }
    found
}

pub(crate) fn suggestions(
    stats: &PaletteStats,
    harmony_score: f32,
    max_contrast: f32,
    config: &AnalysisConfig,
) -> Vec<String> {
    let mut found = Vec::new();
    let multi = stats.len() >= 2;

    let has_neutral = stats
        .hsl
        .iter()
        .any(|c| c.saturation < config.neutral_saturation);
    if stats.average_saturation > config.high_saturation && !has_neutral {
        found.push("Consider adding a neutral to balance saturation".to_string());
    }
    if !stats.hsl.is_empty() && stats.average_saturation < config.low_saturation {
        found.push("Consider adding a saturated accent for visual interest".to_string());
    }
    if multi && max_contrast < wcag::AA_NORMAL_TEXT {
        found.push(
            "Add a much lighter or darker color so text has a readable background".to_string(),
        );
    }
    if multi && harmony_score < WEAK_HARMONY_SCORE {
        found.push("Shift hues toward complementary, triadic or analogous angles".to_string());
    }
    if multi && stats.lightness_spread < config.flat_lightness_spread {
        found.push("Vary lightness more to create depth and hierarchy".to_string());
    }
    found
}
