//! Purpose-driven palette optimization
//!
//! Each [`PalettePurpose`] has an objective ([`PaletteOptimizer::purpose_score`])
//! and a pass that mutates saturation and lightness toward it:
//!
//! - ui: raise contrast between the lightest and darkest member to 4.5:1
//! - branding: pull supporting saturations into the hero's band
//! - artistic: widen the saturation and lightness spread
//! - accessible: push every failing pair apart in lightness
//!
//! Hue, alpha, order and length are never changed. A pass whose result
//! scores lower than its input is discarded, so optimizing twice never
//! scores below optimizing once.

use tracing::{debug, trace, warn};

use crate::analysis::{analyzer::pairs, max_contrast_ratio};
use crate::color::{hue_delta, Color};
use crate::color_palette::{ColorPalette, PalettePurpose};
use crate::config::OptimizationConfig;
use crate::constants::{analysis::ACHROMATIC_SATURATION, optimization, wcag};

/// Slack for lightness that lands a rounding error short of a bound
const BOUND_EPSILON: f32 = 1e-4;

/// Move `value` by `delta` without leaving `[lo, hi]`
///
/// A value already at or beyond the bound in the direction of travel is
/// returned unchanged rather than being pulled back across it.
fn nudge(value: f32, delta: f32, lo: f32, hi: f32) -> f32 {
    if delta > 0.0 {
        if value >= hi - BOUND_EPSILON {
            value
        } else {
            (value + delta).min(hi)
        }
    } else if value <= lo + BOUND_EPSILON {
        value
    } else {
        (value + delta).max(lo)
    }
}

fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

fn std_dev(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f32>() / values.len() as f32;
    variance.sqrt()
}

/// Index of the lightest and darkest members by luminance
///
/// Ties resolve to the earliest index for the lightest and the latest for
/// the darkest, so the two differ whenever there are two or more colors.
fn extremes(colors: &[Color]) -> (usize, usize) {
    let mut light = 0;
    let mut dark = 0;
    for (i, color) in colors.iter().enumerate() {
        if color.luminance() > colors[light].luminance() {
            light = i;
        }
        if color.luminance() <= colors[dark].luminance() {
            dark = i;
        }
    }
    (light, dark)
}

/// Palette optimizer
#[derive(Debug, Clone, Default)]
pub struct PaletteOptimizer {
    config: OptimizationConfig,
}

impl PaletteOptimizer {
    pub fn new(config: OptimizationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizationConfig {
        &self.config
    }

    /// Optimize a palette for `purpose`
    ///
    /// # Arguments
    ///
    /// * `palette` - Palette to transform; never modified in place
    /// * `purpose` - Objective to work toward
    ///
    /// # Returns
    ///
    /// A palette with the same name and length whose purpose score is at
    /// least that of the input.
    pub fn optimize(&self, palette: &ColorPalette, purpose: PalettePurpose) -> ColorPalette {
        let colors = palette.colors();
        let candidate = match purpose {
            PalettePurpose::Ui => self.for_ui(colors),
            PalettePurpose::Branding => self.for_branding(colors),
            PalettePurpose::Artistic => self.for_artistic(colors),
            PalettePurpose::Accessible => self.for_accessibility(colors),
        };

        let before = Self::score(colors, purpose);
        let after = Self::score(&candidate, purpose);
        debug!(
            palette = palette.name(),
            purpose = purpose.name(),
            before,
            after,
            "optimized palette"
        );

        if after < before {
            debug!(purpose = purpose.name(), "pass regressed, keeping input");
            return palette.clone();
        }
        palette.with_colors(candidate)
    }

    /// Objective maximised for `purpose`
    ///
    /// | Purpose | Score |
    /// |---|---|
    /// | ui | contrast between the lightest and darkest member |
    /// | branding | 1 - mean saturation distance of supporting colors to the hero |
    /// | artistic | saturation std-dev + lightness std-dev |
    /// | accessible | mean over pairs of min(ratio, 4.5) / 4.5 |
    pub fn purpose_score(&self, palette: &ColorPalette, purpose: PalettePurpose) -> f32 {
        Self::score(palette.colors(), purpose)
    }

    fn score(colors: &[Color], purpose: PalettePurpose) -> f32 {
        match purpose {
            PalettePurpose::Ui => max_contrast_ratio(colors),
            PalettePurpose::Branding => {
                let Some(hero) = colors.first() else {
                    return 1.0;
                };
                if colors.len() < 2 {
                    return 1.0;
                }
                let hero_saturation = hero.saturation();
                let gaps: Vec<f32> = colors[1..]
                    .iter()
                    .map(|c| (c.saturation() - hero_saturation).abs())
                    .collect();
                1.0 - mean(&gaps)
            }
            PalettePurpose::Artistic => {
                let saturation: Vec<f32> = colors.iter().map(Color::saturation).collect();
                let lightness: Vec<f32> = colors.iter().map(Color::lightness).collect();
                std_dev(&saturation) + std_dev(&lightness)
            }
            PalettePurpose::Accessible => {
                let ratios: Vec<f32> = pairs(colors.len())
                    .map(|(i, j)| {
                        colors[i].contrast_ratio(&colors[j]).min(wcag::AA_NORMAL_TEXT)
                            / wcag::AA_NORMAL_TEXT
                    })
                    .collect();
                if ratios.is_empty() {
                    1.0
                } else {
                    mean(&ratios)
                }
            }
        }
    }

    /// Separate the lightest and darkest members until they reach 4.5:1
    ///
    /// The later member of the pair moves first; the earlier one only moves
    /// once the later one is pinned at its lightness bound.
    fn for_ui(&self, colors: &[Color]) -> Vec<Color> {
        let mut result = colors.to_vec();
        if result.len() < 2 {
            return result;
        }
        let cfg = &self.config;
        let (light, dark) = extremes(&result);
        let order = if light > dark {
            [(light, 1.0), (dark, -1.0)]
        } else {
            [(dark, -1.0), (light, 1.0)]
        };

        for iteration in 0..cfg.max_iterations {
            let ratio = result[light].contrast_ratio(&result[dark]);
            if ratio >= wcag::AA_NORMAL_TEXT {
                trace!(iteration, ratio, "ui contrast reached");
                return result;
            }
            let moved = order.iter().any(|&(index, direction)| {
                let current = result[index].lightness();
                let next = nudge(
                    current,
                    direction * cfg.lightness_step,
                    cfg.min_lightness,
                    cfg.max_lightness,
                );
                if next == current {
                    return false;
                }
                result[index] = result[index].with_lightness(next);
                true
            });
            if !moved {
                break;
            }
        }

        let ratio = result[light].contrast_ratio(&result[dark]);
        if ratio < wcag::AA_NORMAL_TEXT {
            warn!(ratio, "ui pass stopped at lightness bounds below 4.5:1");
        }
        result
    }

    /// Pull supporting saturations into the hero's band, then keep
    /// same-hue members apart in lightness
    fn for_branding(&self, colors: &[Color]) -> Vec<Color> {
        let Some(hero) = colors.first() else {
            return Vec::new();
        };
        let cfg = &self.config;
        let hero_saturation = hero.saturation();
        let band_lo = (hero_saturation - cfg.branding_saturation_band).max(0.0);
        let band_hi = (hero_saturation + cfg.branding_saturation_band).min(1.0);

        let mut result = Vec::with_capacity(colors.len());
        result.push(*hero);
        for color in &colors[1..] {
            let saturation = color.saturation();
            // grays carry no hue; giving them saturation would invent one
            if saturation < ACHROMATIC_SATURATION {
                result.push(*color);
                continue;
            }
            let lo = band_lo.max(optimization::MIN_CHROMATIC_SATURATION);
            let target = saturation.clamp(lo, band_hi.max(lo));
            let mut adjusted = color.with_saturation(target);
            adjusted = self.separate(&result, adjusted);
            result.push(adjusted);
        }
        result
    }

    /// Shift `color` in lightness until it is distinguishable from every
    /// earlier member sharing its hue
    fn separate(&self, earlier: &[Color], color: Color) -> Color {
        let cfg = &self.config;
        let too_close = |candidate: &Color| {
            earlier.iter().any(|other| {
                hue_delta(other.hue(), candidate.hue()) < cfg.min_hue_separation
                    && other.distance(candidate) < cfg.min_distinct_distance
            })
        };
        if !too_close(&color) {
            return color;
        }

        let start = color.lightness();
        let direction = if start < 0.5 { 1.0 } else { -1.0 };
        let mut lightness = start;
        let mut candidate = color;
        for _ in 0..cfg.max_iterations {
            let next = nudge(
                lightness,
                direction * cfg.lightness_step,
                cfg.min_lightness,
                cfg.max_lightness,
            );
            if next == lightness || (next - start).abs() > cfg.max_lightness_shift {
                warn!(color = %color, "branding color could not be separated from its family");
                break;
            }
            lightness = next;
            candidate = color.with_lightness(lightness);
            if !too_close(&candidate) {
                break;
            }
        }
        candidate
    }

    /// Scale each member's saturation and lightness deviation from the mean
    fn for_artistic(&self, colors: &[Color]) -> Vec<Color> {
        if colors.len() < 2 {
            return colors.to_vec();
        }
        let cfg = &self.config;
        let saturation: Vec<f32> = colors.iter().map(Color::saturation).collect();
        let lightness: Vec<f32> = colors.iter().map(Color::lightness).collect();
        let mean_saturation = mean(&saturation);
        let mean_lightness = mean(&lightness);
        let factor = cfg.artistic_spread_factor;

        colors
            .iter()
            .zip(saturation.iter().zip(&lightness))
            .map(|(color, (&s, &l))| {
                let hsl = color.to_hsl();
                let s = if s < ACHROMATIC_SATURATION {
                    s
                } else {
                    (mean_saturation + (s - mean_saturation) * factor)
                        .clamp(optimization::MIN_CHROMATIC_SATURATION, 1.0)
                };
                let l = (mean_lightness + (l - mean_lightness) * factor)
                    .clamp(cfg.min_lightness, cfg.max_lightness);
                Color::from_hsla(hsl.hue, s, l, color.alpha())
            })
            .collect()
    }

    /// Push every sub-4.5:1 pair apart, lighter member up and darker down
    ///
    /// Each member stays within `max_lightness_shift` of where it started
    /// so the palette does not collapse into black and white.
    fn for_accessibility(&self, colors: &[Color]) -> Vec<Color> {
        let cfg = &self.config;
        let mut result = colors.to_vec();
        let origin: Vec<f32> = colors.iter().map(Color::lightness).collect();
        let bounds: Vec<(f32, f32)> = origin
            .iter()
            .map(|&l| {
                (
                    (l - cfg.max_lightness_shift).max(cfg.min_lightness),
                    (l + cfg.max_lightness_shift).min(cfg.max_lightness),
                )
            })
            .collect();

        for iteration in 0..cfg.max_iterations {
            let mut failing = 0;
            let mut moved = false;
            for (i, j) in pairs(result.len()) {
                if result[i].contrast_ratio(&result[j]) >= wcag::AA_NORMAL_TEXT {
                    continue;
                }
                failing += 1;
                let (lighter, darker) = if result[i].luminance() >= result[j].luminance() {
                    (i, j)
                } else {
                    (j, i)
                };
                for (index, direction) in [(lighter, 1.0), (darker, -1.0)] {
                    let current = result[index].lightness();
                    let (lo, hi) = bounds[index];
                    let next = nudge(current, direction * cfg.lightness_step, lo, hi);
                    if next != current {
                        result[index] = result[index].with_lightness(next);
                        moved = true;
                    }
                }
            }
            trace!(iteration, failing, "accessibility pass");
            if failing == 0 {
                return result;
            }
            if !moved {
                warn!(failing, "accessibility pass hit its lightness bound");
                return result;
            }
        }
        warn!(
            iterations = cfg.max_iterations,
            "accessibility pass reached its iteration cap"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(hexes: &[&str]) -> ColorPalette {
        ColorPalette::from_hex("test", hexes).unwrap()
    }

    fn samples() -> Vec<ColorPalette> {
        vec![
            palette(&["#3366CC"]),
            palette(&["#FFFFFF", "#F5F5F5"]),
            palette(&["#777777", "#888888"]),
            palette(&["#3366CC", "#CC9933", "#6688DD", "#DDEEFF"]),
            palette(&["#D94F30", "#F2C14E", "#5FAD56", "#4D9078", "#B4436C"]),
            ColorPalette::new(
                "translucent",
                vec![
                    Color::rgba(0.2, 0.4, 0.8, 0.5),
                    Color::rgba(0.25, 0.45, 0.75, 0.25),
                    Color::rgba(0.9, 0.9, 0.85, 0.8),
                ],
            )
            .unwrap(),
        ]
    }

    #[test]
    fn test_nudge_respects_bounds() {
        assert!((nudge(0.5, 0.1, 0.05, 0.95) - 0.6).abs() < 1e-6);
        assert_eq!(nudge(0.94, 0.1, 0.05, 0.95), 0.95);
        // already past the bound: never pulled back
        assert_eq!(nudge(1.0, 0.1, 0.05, 0.95), 1.0);
        assert_eq!(nudge(0.0, -0.1, 0.05, 0.95), 0.0);
    }

    #[test]
    fn test_extremes_distinct() {
        let same = [Color::WHITE, Color::WHITE];
        assert_eq!(extremes(&same), (0, 1));
        let mixed = [Color::new(0.5, 0.5, 0.5), Color::BLACK, Color::WHITE];
        assert_eq!(extremes(&mixed), (2, 1));
    }

    #[test]
    fn test_shape_hue_and_alpha_preserved() {
        let optimizer = PaletteOptimizer::default();
        for input in samples() {
            for purpose in PalettePurpose::ALL {
                let output = optimizer.optimize(&input, purpose);
                assert_eq!(output.len(), input.len());
                assert_eq!(output.name(), input.name());
                for (before, after) in input.colors().iter().zip(output.colors()) {
                    assert!((before.alpha() - after.alpha()).abs() < 1e-6);
                    if before.saturation() >= ACHROMATIC_SATURATION && after.saturation() > 0.05 {
                        assert!(
                            hue_delta(before.hue(), after.hue()) < 1.0,
                            "{} changed hue {} -> {}",
                            purpose,
                            before.hue(),
                            after.hue()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_never_regresses() {
        let optimizer = PaletteOptimizer::default();
        for input in samples() {
            for purpose in PalettePurpose::ALL {
                let once = optimizer.optimize(&input, purpose);
                let twice = optimizer.optimize(&once, purpose);
                let base = optimizer.purpose_score(&input, purpose);
                let first = optimizer.purpose_score(&once, purpose);
                let second = optimizer.purpose_score(&twice, purpose);
                assert!(first >= base, "{} regressed on first pass", purpose);
                assert!(second >= first, "{} regressed on second pass", purpose);
            }
        }
    }

    #[test]
    fn test_ui_reaches_contrast() {
        let optimizer = PaletteOptimizer::default();
        let output = optimizer.optimize(&palette(&["#777777", "#888888"]), PalettePurpose::Ui);
        assert!(max_contrast_ratio(output.colors()) >= wcag::AA_NORMAL_TEXT);
    }

    #[test]
    fn test_ui_leaves_good_palette_alone() {
        let optimizer = PaletteOptimizer::default();
        let input = palette(&["#000000", "#3366CC", "#FFFFFF"]);
        let output = optimizer.optimize(&input, PalettePurpose::Ui);
        assert_eq!(output, input);
    }

    #[test]
    fn test_branding_keeps_hero() {
        let optimizer = PaletteOptimizer::default();
        let hero = Color::from_hsl(210.0, 0.8, 0.45);
        let input = ColorPalette::new(
            "brand",
            vec![
                hero,
                Color::from_hsl(30.0, 0.2, 0.5),
                Color::from_hsl(120.0, 0.3, 0.6),
            ],
        )
        .unwrap();
        let output = optimizer.optimize(&input, PalettePurpose::Branding);
        assert_eq!(output.colors()[0], hero);
        for color in &output.colors()[1..] {
            assert!(color.saturation() >= 0.8 - 0.15 - 0.01);
        }
        assert!(
            optimizer.purpose_score(&output, PalettePurpose::Branding)
                > optimizer.purpose_score(&input, PalettePurpose::Branding)
        );
    }

    #[test]
    fn test_branding_separates_same_hue() {
        let optimizer = PaletteOptimizer::default();
        let hero = Color::from_hsl(210.0, 0.8, 0.45);
        // same hue and lightness, only saturation differs
        let input = ColorPalette::new("brand", vec![hero, Color::from_hsl(210.0, 0.6, 0.45)]).unwrap();
        let output = optimizer.optimize(&input, PalettePurpose::Branding);
        let distance = output.colors()[0].distance(&output.colors()[1]);
        assert!(distance >= optimization::MIN_DISTINCT_DISTANCE - 1e-3);
    }

    #[test]
    fn test_branding_leaves_grays() {
        let optimizer = PaletteOptimizer::default();
        let gray = Color::new(0.5, 0.5, 0.5);
        let input = ColorPalette::new("brand", vec![Color::from_hsl(10.0, 0.9, 0.5), gray]).unwrap();
        let output = optimizer.optimize(&input, PalettePurpose::Branding);
        assert_eq!(output.colors()[1], gray);
    }

    #[test]
    fn test_artistic_widens_range() {
        let optimizer = PaletteOptimizer::default();
        let input = ColorPalette::new(
            "art",
            vec![
                Color::from_hsl(0.0, 0.5, 0.45),
                Color::from_hsl(120.0, 0.7, 0.6),
                Color::from_hsl(240.0, 0.4, 0.5),
            ],
        )
        .unwrap();
        let output = optimizer.optimize(&input, PalettePurpose::Artistic);
        assert!(
            optimizer.purpose_score(&output, PalettePurpose::Artistic)
                > optimizer.purpose_score(&input, PalettePurpose::Artistic)
        );
    }

    #[test]
    fn test_accessible_improves_contrast() {
        let optimizer = PaletteOptimizer::default();
        let input = palette(&["#3366CC", "#5577DD"]);
        let output = optimizer.optimize(&input, PalettePurpose::Accessible);
        let before = input.colors()[0].contrast_ratio(&input.colors()[1]);
        let after = output.colors()[0].contrast_ratio(&output.colors()[1]);
        assert!(after > before);
    }

    #[test]
    fn test_accessible_respects_shift_bound() {
        let optimizer = PaletteOptimizer::default();
        let input = palette(&["#FFFFFF", "#F5F5F5"]);
        let output = optimizer.optimize(&input, PalettePurpose::Accessible);
        for (before, after) in input.colors().iter().zip(output.colors()) {
            assert!((before.lightness() - after.lightness()).abs() <= 0.5 + 1e-4);
        }
        assert!(
            output.colors()[0].contrast_ratio(&output.colors()[1])
                > input.colors()[0].contrast_ratio(&input.colors()[1])
        );
    }

    #[test]
    fn test_single_color_scores() {
        let optimizer = PaletteOptimizer::default();
        let single = palette(&["#3366CC"]);
        assert_eq!(optimizer.purpose_score(&single, PalettePurpose::Ui), 1.0);
        assert_eq!(optimizer.purpose_score(&single, PalettePurpose::Branding), 1.0);
        assert_eq!(optimizer.purpose_score(&single, PalettePurpose::Accessible), 1.0);
        for purpose in PalettePurpose::ALL {
            assert_eq!(optimizer.optimize(&single, purpose), single);
        }
    }
}
