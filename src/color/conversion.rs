//! Color space conversion utilities
//!
//! Provides:
//! - RGB to/from HSL and HSB (via the `palette` crate)
//! - WCAG relative luminance and contrast ratio
//! - Euclidean RGB distance
//! - Hex color representation
//!
//! All inputs are clamped into range before conversion.

use palette::{FromColor, Srgb};

use super::model::{unit, wrap_hue, Color, Hsb, Hsl};
use crate::constants::wcag;
use crate::{PaletteError, Result};

/// Convert a color to HSL
///
/// Achromatic colors (max == min) report hue 0 and saturation 0.
pub fn to_hsl(color: &Color) -> Hsl {
    let srgb = Srgb::new(color.red(), color.green(), color.blue());
    let hsl: palette::Hsl = palette::Hsl::from_color(srgb);
    Hsl {
        hue: wrap_hue(hsl.hue.into_positive_degrees()),
        saturation: unit(hsl.saturation),
        lightness: unit(hsl.lightness),
    }
}

/// Convert HSL components back to RGB with the given alpha
pub fn from_hsl(hsl: Hsl, alpha: f32) -> Color {
    let hsl: palette::Hsl = palette::Hsl::new(
        wrap_hue(hsl.hue),
        unit(hsl.saturation),
        unit(hsl.lightness),
    );
    let srgb: Srgb = Srgb::from_color(hsl);
    Color::rgba(srgb.red, srgb.green, srgb.blue, alpha)
}

/// Convert a color to HSB (HSV)
pub fn to_hsb(color: &Color) -> Hsb {
    let srgb = Srgb::new(color.red(), color.green(), color.blue());
    let hsv: palette::Hsv = palette::Hsv::from_color(srgb);
    Hsb {
        hue: wrap_hue(hsv.hue.into_positive_degrees()),
        saturation: unit(hsv.saturation),
        brightness: unit(hsv.value),
    }
}

/// Convert HSB components back to RGB with the given alpha
pub fn from_hsb(hsb: Hsb, alpha: f32) -> Color {
    let hsv: palette::Hsv = palette::Hsv::new(
        wrap_hue(hsb.hue),
        unit(hsb.saturation),
        unit(hsb.brightness),
    );
    let srgb: Srgb = Srgb::from_color(hsv);
    Color::rgba(srgb.red, srgb.green, srgb.blue, alpha)
}

fn linearize(channel: f32) -> f32 {
    if channel <= wcag::LINEAR_THRESHOLD {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG 2.x relative luminance in [0, 1]
pub fn relative_luminance(color: &Color) -> f32 {
    let [wr, wg, wb] = wcag::LUMINANCE_WEIGHTS;
    wr * linearize(color.red()) + wg * linearize(color.green()) + wb * linearize(color.blue())
}

/// WCAG contrast ratio, independent of argument order, in [1, 21]
pub fn contrast_ratio(a: &Color, b: &Color) -> f32 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    let ratio = (lighter + wcag::CONTRAST_OFFSET) / (darker + wcag::CONTRAST_OFFSET);
    ratio.clamp(1.0, wcag::MAX_CONTRAST_RATIO)
}

/// Euclidean distance over normalized RGB, ignoring alpha
///
/// Used for clustering and uniqueness checks, not perceptual accuracy.
pub fn distance(a: &Color, b: &Color) -> f32 {
    let dr = a.red() - b.red();
    let dg = a.green() - b.green();
    let db = a.blue() - b.blue();
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Convert a color to an uppercase `#RRGGBB` string
pub fn to_hex(color: &Color) -> String {
    let [r, g, b, _] = color.to_rgba8();
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Convert a color to an uppercase `#AARRGGBB` string
pub fn to_hex_argb(color: &Color) -> String {
    let [r, g, b, a] = color.to_rgba8();
    format!("#{:02X}{:02X}{:02X}{:02X}", a, r, g, b)
}

/// Parse a hexadecimal color string
///
/// Accepts `RGB`, `RRGGBB` and `AARRGGBB`, each with an optional leading `#`.
///
/// # Errors
///
/// Returns `PaletteError::InvalidFormat` for any other length or for a
/// non-hex character.
pub fn parse_hex(hex: &str) -> Result<Color> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(PaletteError::invalid_format(
            hex,
            format!("non-hex character '{}'", bad),
        ));
    }

    let byte = |range: std::ops::Range<usize>| -> Result<u8> {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|e| PaletteError::invalid_format(hex, e.to_string()))
    };

    match digits.len() {
        3 => {
            let nibble = |i: usize| -> Result<u8> { Ok(byte(i..i + 1)? * 17) };
            Ok(Color::from_rgba8(nibble(0)?, nibble(1)?, nibble(2)?, 255))
        }
        6 => Ok(Color::from_rgba8(byte(0..2)?, byte(2..4)?, byte(4..6)?, 255)),
        8 => Ok(Color::from_rgba8(
            byte(2..4)?,
            byte(4..6)?,
            byte(6..8)?,
            byte(0..2)?,
        )),
        len => Err(PaletteError::invalid_format(
            hex,
            format!("expected 3, 6 or 8 hex digits, got {}", len),
        )),
    }
}
