//! Dominant color extraction by bucket frequency
//!
//! Every pixel in the region is quantized to a coarse RGB bucket. Buckets are
//! ranked by pixel count and each winner is reported as the mean of the
//! pixels that fell into it.
//!
//! Large regions are scanned row-parallel with rayon. Partial histograms are
//! merged by addition (first-seen index by minimum), so the result does not
//! depend on how rows were split across threads.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, warn};

use super::pixels::{PixelBuffer, Region, CHANNELS};
use crate::color::Color;
use crate::config::ExtractionConfig;
use crate::{PaletteError, Result};

/// Running totals for one quantization bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BucketStats {
    count: u64,
    sums: [u64; 4],
    /// Lowest linear pixel index that landed here, for stable tie-breaking
    first_index: usize,
}

impl BucketStats {
    fn new(index: usize) -> Self {
        Self {
            count: 0,
            sums: [0; 4],
            first_index: index,
        }
    }

    fn add_pixel(&mut self, rgba: &[u8], index: usize) {
        self.count += 1;
        for (sum, &sample) in self.sums.iter_mut().zip(rgba) {
            *sum += sample as u64;
        }
        self.first_index = self.first_index.min(index);
    }

    fn merge(&mut self, other: &BucketStats) {
        self.count += other.count;
        for (sum, add) in self.sums.iter_mut().zip(other.sums) {
            *sum += add;
        }
        self.first_index = self.first_index.min(other.first_index);
    }

    fn mean_color(&self) -> Color {
        let mean = |i: usize| (self.sums[i] as f64 / self.count as f64).round() as u8;
        Color::from_rgba8(mean(0), mean(1), mean(2), mean(3))
    }
}

type Histogram = HashMap<u32, BucketStats>;

fn bucket_key(rgba: &[u8], bits: u8) -> u32 {
    let shift = 8 - bits;
    let r = (rgba[0] >> shift) as u32;
    let g = (rgba[1] >> shift) as u32;
    let b = (rgba[2] >> shift) as u32;
    (r << (2 * bits)) | (g << bits) | b
}

fn accumulate_row(mut hist: Histogram, pixels: &PixelBuffer, region: &Region, row: u32, bits: u8) -> Histogram {
    let bytes = pixels.as_bytes();
    for index in region.row_indices(row, pixels.width()) {
        let offset = index * CHANNELS;
        let rgba = &bytes[offset..offset + CHANNELS];
        hist.entry(bucket_key(rgba, bits))
            .or_insert_with(|| BucketStats::new(index))
            .add_pixel(rgba, index);
    }
    hist
}

fn merge_histograms(mut left: Histogram, right: Histogram) -> Histogram {
    // fold into the larger map
    if left.len() < right.len() {
        return merge_histograms(right, left);
    }
    for (key, stats) in right {
        left.entry(key)
            .and_modify(|existing| existing.merge(&stats))
            .or_insert(stats);
    }
    left
}

fn build_histogram(pixels: &PixelBuffer, region: &Region, config: &ExtractionConfig) -> Histogram {
    let bits = config.bucket_bits;
    let rows = region.y..region.y + region.height;
    if region.area() >= config.parallel_threshold {
        rows.into_par_iter()
            .fold(Histogram::new, |hist, row| accumulate_row(hist, pixels, region, row, bits))
            .reduce(Histogram::new, merge_histograms)
    } else {
        rows.fold(Histogram::new(), |hist, row| accumulate_row(hist, pixels, region, row, bits))
    }
}

/// Return the `count` most frequent bucket colors in `region`
///
/// `region` defaults to the whole image. With `avoid_dark`, buckets whose
/// mean lightness is below `config.dark_threshold` are dropped before
/// ranking, unless that would drop every bucket. Ties keep the bucket first
/// met in row-major order. If the image has fewer distinct buckets than
/// `count`, the ranking repeats so the result always has `count` colors.
///
/// # Errors
///
/// - `InvalidCount` when `count` is zero
/// - `EmptyInput` / `InvalidRegion` for an unusable region
/// - `InvalidParameter` when `config.bucket_bits` is outside 1..=6
pub fn extract_prominent_colors(
    pixels: &PixelBuffer,
    region: Option<Region>,
    count: usize,
    avoid_dark: bool,
    config: &ExtractionConfig,
) -> Result<Vec<Color>> {
    if count == 0 {
        return Err(PaletteError::InvalidCount { count });
    }
    if !(1..=crate::constants::extraction::MAX_BUCKET_BITS).contains(&config.bucket_bits) {
        return Err(PaletteError::invalid_parameter(
            "extraction.bucket_bits",
            config.bucket_bits,
        ));
    }
    let region = pixels.clip(region)?;

    let histogram = build_histogram(pixels, &region, config);
    let mut ranked: Vec<(BucketStats, Color)> = histogram
        .into_values()
        .map(|stats| (stats, stats.mean_color()))
        .collect();
    ranked.sort_by(|(a, _), (b, _)| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.first_index.cmp(&b.first_index))
    });
    let bucket_count = ranked.len();

    if avoid_dark {
        let light: Vec<(BucketStats, Color)> = ranked
            .iter()
            .filter(|(_, color)| color.lightness() >= config.dark_threshold)
            .copied()
            .collect();
        if light.is_empty() {
            warn!(buckets = bucket_count, "every bucket is dark; dark filter relaxed");
        } else {
            ranked = light;
        }
    }

    let colors: Vec<Color> = ranked
        .iter()
        .map(|(_, color)| *color)
        .cycle()
        .take(count)
        .collect();

    debug!(
        count,
        buckets = bucket_count,
        candidates = ranked.len(),
        pixels = region.area(),
        "ranked prominent colors"
    );
    Ok(colors)
}
