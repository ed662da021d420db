//! Color value type and its cylindrical views
//!
//! `Color` stores normalized RGBA; hue, saturation, lightness, brightness and
//! luminance are always derived on demand.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::conversion;
use crate::{PaletteError, Result};

/// Clamp a component into [0, 1], mapping NaN to 0
pub(crate) fn unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Wrap an angle in degrees into [0, 360)
pub(crate) fn wrap_hue(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Immutable RGBA color with every component in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawColor")]
pub struct Color {
    red: f32,
    green: f32,
    blue: f32,
    alpha: f32,
}

/// Unvalidated wire form; components are clamped on the way in
#[derive(Deserialize)]
struct RawColor {
    red: f32,
    green: f32,
    blue: f32,
    #[serde(default = "opaque")]
    alpha: f32,
}

fn opaque() -> f32 {
    1.0
}

impl From<RawColor> for Color {
    fn from(raw: RawColor) -> Self {
        Color::rgba(raw.red, raw.green, raw.blue, raw.alpha)
    }
}

/// Hue (degrees), saturation and lightness of a color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue angle in [0, 360)
    pub hue: f32,
    /// Saturation in [0, 1]
    pub saturation: f32,
    /// Lightness in [0, 1]
    pub lightness: f32,
}

impl Hsl {
    /// Build HSL components, wrapping hue and clamping the rest
    pub fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue: wrap_hue(hue),
            saturation: unit(saturation),
            lightness: unit(lightness),
        }
    }
}

/// Hue (degrees), saturation and brightness of a color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsb {
    /// Hue angle in [0, 360)
    pub hue: f32,
    /// Saturation in [0, 1]
    pub saturation: f32,
    /// Brightness (HSV value) in [0, 1]
    pub brightness: f32,
}

impl Hsb {
    /// Build HSB components, wrapping hue and clamping the rest
    pub fn new(hue: f32, saturation: f32, brightness: f32) -> Self {
        Self {
            hue: wrap_hue(hue),
            saturation: unit(saturation),
            brightness: unit(brightness),
        }
    }
}

impl Color {
    /// Opaque black
    pub const BLACK: Color = Color {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 1.0,
    };

    /// Opaque white
    pub const WHITE: Color = Color {
        red: 1.0,
        green: 1.0,
        blue: 1.0,
        alpha: 1.0,
    };

    /// Create an opaque color; components are clamped to [0, 1]
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Create a color with explicit alpha; components are clamped to [0, 1]
    pub fn rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red: unit(red),
            green: unit(green),
            blue: unit(blue),
            alpha: unit(alpha),
        }
    }

    /// Create a color from 8-bit RGBA samples
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: alpha as f32 / 255.0,
        }
    }

    /// Quantize to 8-bit RGBA samples
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            to_byte(self.red),
            to_byte(self.green),
            to_byte(self.blue),
            to_byte(self.alpha),
        ]
    }

    /// Create an opaque color from HSL components
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        conversion::from_hsl(Hsl::new(hue, saturation, lightness), 1.0)
    }

    /// Create a color from HSL components and alpha
    pub fn from_hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        conversion::from_hsl(Hsl::new(hue, saturation, lightness), alpha)
    }

    /// Create an opaque color from HSB components
    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        conversion::from_hsb(Hsb::new(hue, saturation, brightness), 1.0)
    }

    /// Parse `#RGB`, `#RRGGBB` or `#AARRGGBB` (the `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Self> {
        conversion::parse_hex(hex)
    }

    pub fn red(&self) -> f32 {
        self.red
    }

    pub fn green(&self) -> f32 {
        self.green
    }

    pub fn blue(&self) -> f32 {
        self.blue
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// HSL view of this color
    pub fn to_hsl(&self) -> Hsl {
        conversion::to_hsl(self)
    }

    /// HSB (HSV) view of this color
    pub fn to_hsb(&self) -> Hsb {
        conversion::to_hsb(self)
    }

    /// Hue in degrees, 0 for achromatic colors
    pub fn hue(&self) -> f32 {
        self.to_hsl().hue
    }

    /// HSL saturation
    pub fn saturation(&self) -> f32 {
        self.to_hsl().saturation
    }

    /// HSL lightness
    pub fn lightness(&self) -> f32 {
        self.to_hsl().lightness
    }

    /// HSB brightness (max channel)
    pub fn brightness(&self) -> f32 {
        self.red.max(self.green).max(self.blue)
    }

    /// WCAG relative luminance
    pub fn luminance(&self) -> f32 {
        conversion::relative_luminance(self)
    }

    /// WCAG contrast ratio against another color, in [1, 21]
    pub fn contrast_ratio(&self, other: &Color) -> f32 {
        conversion::contrast_ratio(self, other)
    }

    /// Euclidean RGB distance to another color, ignoring alpha
    pub fn distance(&self, other: &Color) -> f32 {
        conversion::distance(self, other)
    }

    /// `#RRGGBB`, uppercase
    pub fn to_hex(&self) -> String {
        conversion::to_hex(self)
    }

    /// `#AARRGGBB`, uppercase
    pub fn to_hex_argb(&self) -> String {
        conversion::to_hex_argb(self)
    }

    /// Same hue and saturation at a different lightness; alpha is kept
    pub fn with_lightness(&self, lightness: f32) -> Self {
        let hsl = self.to_hsl();
        conversion::from_hsl(Hsl::new(hsl.hue, hsl.saturation, lightness), self.alpha)
    }

    /// Same hue and lightness at a different saturation; alpha is kept
    pub fn with_saturation(&self, saturation: f32) -> Self {
        let hsl = self.to_hsl();
        conversion::from_hsl(Hsl::new(hsl.hue, saturation, hsl.lightness), self.alpha)
    }

    /// Rotate the hue by `degrees`, wrapping modulo 360; alpha is kept
    pub fn rotate_hue(&self, degrees: f32) -> Self {
        let hsl = self.to_hsl();
        conversion::from_hsl(
            Hsl::new(hsl.hue + degrees, hsl.saturation, hsl.lightness),
            self.alpha,
        )
    }
}

fn to_byte(component: f32) -> u8 {
    (unit(component) * 255.0).round() as u8
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        conversion::parse_hex(s)
    }
}

impl From<(f32, f32, f32, f32)> for Color {
    fn from((red, green, blue, alpha): (f32, f32, f32, f32)) -> Self {
        Color::rgba(red, green, blue, alpha)
    }
}

impl From<(f32, f32, f32)> for Color {
    fn from((red, green, blue): (f32, f32, f32)) -> Self {
        Color::new(red, green, blue)
    }
}

impl From<Color> for (f32, f32, f32, f32) {
    fn from(color: Color) -> Self {
        (color.red, color.green, color.blue, color.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components_are_clamped() {
        let color = Color::rgba(1.2, -0.1, 0.5, 2.0);
        assert_eq!(color.red(), 1.0);
        assert_eq!(color.green(), 0.0);
        assert_eq!(color.blue(), 0.5);
        assert_eq!(color.alpha(), 1.0);

        let nan = Color::new(f32::NAN, 0.5, 0.5);
        assert_eq!(nan.red(), 0.0);
    }

    #[test]
    fn test_wrap_hue() {
        assert_eq!(wrap_hue(370.0), 10.0);
        assert_eq!(wrap_hue(-30.0), 330.0);
        assert_eq!(wrap_hue(360.0), 0.0);
        assert_eq!(wrap_hue(f32::NAN), 0.0);
    }

    #[test]
    fn test_rgba8_roundtrip() {
        let color = Color::from_rgba8(51, 102, 204, 128);
        assert_eq!(color.to_rgba8(), [51, 102, 204, 128]);
    }

    #[test]
    fn test_tuple_conversions() {
        let color: Color = (0.2, 0.4, 0.8, 1.0).into();
        let tuple: (f32, f32, f32, f32) = color.into();
        assert_eq!(tuple, (0.2, 0.4, 0.8, 1.0));
    }

    #[test]
    fn test_rotate_hue_keeps_alpha() {
        let color = Color::from_hsla(200.0, 0.8, 0.5, 0.5);
        let rotated = color.rotate_hue(180.0);
        assert!((rotated.hue() - 20.0).abs() < 0.5);
        assert_eq!(rotated.alpha(), 0.5);
    }

    #[test]
    fn test_with_lightness_keeps_hue() {
        let color = Color::from_hsl(120.0, 0.6, 0.5);
        let lighter = color.with_lightness(0.8);
        assert!((lighter.hue() - 120.0).abs() < 0.5);
        assert!((lighter.lightness() - 0.8).abs() < 1e-3);
    }

    #[test]
    fn test_brightness_is_max_channel() {
        let color = Color::new(0.2, 0.7, 0.4);
        assert!((color.brightness() - 0.7).abs() < 1e-6);
        assert!((color.to_hsb().brightness - 0.7).abs() < 1e-4);
    }

    #[test]
    fn test_serialization_clamps() {
        let json = r#"{"red":1.5,"green":0.5,"blue":0.0}"#;
        let color: Color = serde_json::from_str(json).unwrap();
        assert_eq!(color.red(), 1.0);
        assert_eq!(color.alpha(), 1.0);

        let back = serde_json::to_string(&color).unwrap();
        let again: Color = serde_json::from_str(&back).unwrap();
        assert_eq!(color, again);
    }
}
