//! Palette value type and the style/purpose selectors

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::{PaletteError, Result};

/// Named, ordered sequence of colors
///
/// Position 0 is the hero (dominant) color; the order is meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    name: String,
    colors: Vec<Color>,
}

impl ColorPalette {
    /// Create a palette
    ///
    /// # Errors
    ///
    /// Returns `PaletteError::EmptyInput` if `colors` is empty.
    pub fn new(name: impl Into<String>, colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(PaletteError::empty("a palette needs at least one color"));
        }
        Ok(Self {
            name: name.into(),
            colors,
        })
    }

    /// Build a palette from hex strings, failing on the first bad entry
    pub fn from_hex<S: AsRef<str>>(name: impl Into<String>, hexes: &[S]) -> Result<Self> {
        let colors = hexes
            .iter()
            .map(|hex| Color::from_hex(hex.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(name, colors)
    }

    /// Internal constructor for code paths that already guarantee a color
    pub(crate) fn from_nonempty(name: impl Into<String>, colors: Vec<Color>) -> Self {
        debug_assert!(!colors.is_empty());
        Self {
            name: name.into(),
            colors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The dominant color at position 0
    pub fn hero(&self) -> Option<&Color> {
        self.colors.first()
    }

    /// Uppercase `#RRGGBB` strings in palette order
    pub fn hex_codes(&self) -> Vec<String> {
        self.colors.iter().map(Color::to_hex).collect()
    }

    /// Same colors under a different name
    pub fn renamed(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colors: self.colors,
        }
    }

    pub(crate) fn with_colors(&self, colors: Vec<Color>) -> Self {
        Self {
            name: self.name.clone(),
            colors,
        }
    }
}

impl fmt::Display for ColorPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}]", self.name, self.hex_codes().join(", "))
    }
}

/// Generation rule requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteStyle {
    /// Pick a harmony rule from the dominant color's saturation and lightness
    Adaptive,
    /// Keep the image's prominent colors, snapping their hues into harmony
    Harmonic,
    Monochromatic,
    Complementary,
    Triadic,
    Analogous,
}

impl PaletteStyle {
    pub const ALL: [PaletteStyle; 6] = [
        PaletteStyle::Adaptive,
        PaletteStyle::Harmonic,
        PaletteStyle::Monochromatic,
        PaletteStyle::Complementary,
        PaletteStyle::Triadic,
        PaletteStyle::Analogous,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PaletteStyle::Adaptive => "adaptive",
            PaletteStyle::Harmonic => "harmonic",
            PaletteStyle::Monochromatic => "monochromatic",
            PaletteStyle::Complementary => "complementary",
            PaletteStyle::Triadic => "triadic",
            PaletteStyle::Analogous => "analogous",
        }
    }
}

impl fmt::Display for PaletteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Objective the optimizer works toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PalettePurpose {
    /// Interface surfaces and text: needs a light and a dark member
    Ui,
    /// Brand identity: one saturation family around the hero
    Branding,
    /// Illustration: maximal saturation/lightness range
    Artistic,
    /// Every pair readable as body text where reachable
    Accessible,
}

impl PalettePurpose {
    pub const ALL: [PalettePurpose; 4] = [
        PalettePurpose::Ui,
        PalettePurpose::Branding,
        PalettePurpose::Artistic,
        PalettePurpose::Accessible,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PalettePurpose::Ui => "ui",
            PalettePurpose::Branding => "branding",
            PalettePurpose::Artistic => "artistic",
            PalettePurpose::Accessible => "accessible",
        }
    }
}

impl fmt::Display for PalettePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
