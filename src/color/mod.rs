//! Color value and conversion module
//!
//! This module holds the `Color` value type, its HSL/HSB views, WCAG
//! luminance and contrast, and the hex codec.

pub mod conversion;
pub mod model;

pub use conversion::{contrast_ratio, distance, parse_hex, relative_luminance};
pub use model::{Color, Hsb, Hsl};

/// Circular distance between two hues in degrees, in [0, 180]
pub fn hue_delta(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hue_delta_wraps() {
        assert!((hue_delta(10.0, 350.0) - 20.0).abs() < 1e-4);
        assert!((hue_delta(0.0, 180.0) - 180.0).abs() < 1e-4);
        assert!((hue_delta(90.0, 90.0)).abs() < 1e-4);
        assert!((hue_delta(300.0, 60.0) - 120.0).abs() < 1e-4);
    }
}
