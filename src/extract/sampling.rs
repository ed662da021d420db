//! Random pixel sampling
//!
//! Draws pixel coordinates uniformly. Sampling is without replacement while
//! the image has enough pixels, and falls back to drawing with replacement
//! once every pixel has been used. Replacements for dark picks come from the
//! pixels no slot has taken, so dark resampling never repeats a position
//! while a fresh one is left.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use super::pixels::PixelBuffer;
use crate::color::Color;
use crate::config::ExtractionConfig;
use crate::{PaletteError, Result};

/// Uniform draws tried before shuffling the remaining pixels
const REJECTION_TRIES: usize = 32;

/// Build the sampling RNG from the configured seed
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Per-call sampling state
struct Sampler<'a> {
    pixels: &'a PixelBuffer,
    config: &'a ExtractionConfig,
    avoid_dark: bool,
    rng: StdRng,
    /// Every position a slot has taken or is queued to take
    used: HashSet<usize>,
    /// Shuffled untaken positions, built once the image is half used
    pool: Option<Vec<usize>>,
    resampled: usize,
    fallbacks: usize,
}

impl<'a> Sampler<'a> {
    fn is_dark(&self, color: &Color) -> bool {
        color.lightness() < self.config.dark_threshold
    }

    /// Take a position nothing has used yet; `None` once every pixel is taken
    fn draw_fresh(&mut self) -> Option<usize> {
        let area = self.pixels.area();
        if self.used.len() >= area {
            return None;
        }

        if self.pool.is_none() && self.used.len() * 2 <= area {
            for _ in 0..REJECTION_TRIES {
                let candidate = self.rng.gen_range(0..area);
                if self.used.insert(candidate) {
                    return Some(candidate);
                }
            }
        }

        let used = &self.used;
        let rng = &mut self.rng;
        let pool = self.pool.get_or_insert_with(|| {
            let mut rest: Vec<usize> = (0..area).filter(|idx| !used.contains(idx)).collect();
            rest.shuffle(rng);
            rest
        });
        while let Some(idx) = pool.pop() {
            if self.used.insert(idx) {
                return Some(idx);
            }
        }
        None
    }

    /// Resolve one slot whose first pick was `first`
    ///
    /// Dark picks are resampled up to the retry budget; if every attempt is
    /// dark the lightest one seen is kept so the slot is never left empty.
    fn fill_slot(&mut self, first: usize) -> Color {
        let color = self.pixels.color_at(first);
        if !self.avoid_dark || !self.is_dark(&color) {
            return color;
        }

        let area = self.pixels.area();
        let mut best = color;
        for _ in 0..self.config.dark_retry_budget {
            self.resampled += 1;
            let idx = match self.draw_fresh() {
                Some(idx) => idx,
                None => self.rng.gen_range(0..area),
            };
            let candidate = self.pixels.color_at(idx);
            if !self.is_dark(&candidate) {
                return candidate;
            }
            if candidate.lightness() > best.lightness() {
                best = candidate;
            }
        }
        self.fallbacks += 1;
        best
    }
}

/// Sample `count` colors from random pixel positions
///
/// When `avoid_dark` is set, pixels whose HSL lightness is below
/// `config.dark_threshold` are resampled (bounded by
/// `config.dark_retry_budget`).
///
/// # Errors
///
/// Returns `InvalidCount` when `count` is zero.
pub fn extract_random_colors(
    pixels: &PixelBuffer,
    count: usize,
    avoid_dark: bool,
    config: &ExtractionConfig,
) -> Result<Vec<Color>> {
    if count == 0 {
        return Err(PaletteError::InvalidCount { count });
    }

    let area = pixels.area();
    let mut sampler = Sampler {
        pixels,
        config,
        avoid_dark,
        rng: make_rng(config.seed),
        used: HashSet::with_capacity(count.min(area)),
        pool: None,
        resampled: 0,
        fallbacks: 0,
    };

    // Distinct positions first; anything beyond the image area repeats pixels.
    let distinct = count.min(area);
    let mut picks = index::sample(&mut sampler.rng, area, distinct).into_vec();
    sampler.used.extend(picks.iter().copied());
    while picks.len() < count {
        picks.push(sampler.rng.gen_range(0..area));
    }

    let colors: Vec<Color> = picks.into_iter().map(|idx| sampler.fill_slot(idx)).collect();

    if sampler.fallbacks > 0 {
        warn!(
            fallbacks = sampler.fallbacks,
            "dark filter relaxed: no light pixel found within retry budget"
        );
    }
    debug!(
        count,
        area,
        avoid_dark,
        resampled = sampler.resampled,
        "sampled random colors"
    );
    Ok(colors)
}
