//! Decoded pixel input
//!
//! The engine never decodes images. Callers hand over a flat RGBA8 buffer,
//! row-major, four bytes per pixel.

use std::ops::Range;

use crate::color::Color;
use crate::{PaletteError, Result};

/// Bytes per RGBA pixel
pub const CHANNELS: usize = 4;

/// Owned RGBA8 pixel buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap decoded RGBA bytes
    ///
    /// # Errors
    ///
    /// - `EmptyInput` if width or height is zero
    /// - `InvalidParameter` if `data.len() != width * height * 4`
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PaletteError::empty(format!(
                "image has zero area ({}x{})",
                width, height
            )));
        }
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(PaletteError::invalid_parameter(
                "pixels.len",
                format!("{} (expected {} for {}x{} RGBA)", data.len(), expected, width, height),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer from colors in row-major order
    pub fn from_colors(width: u32, height: u32, colors: &[Color]) -> Result<Self> {
        let data = colors.iter().flat_map(|c| c.to_rgba8()).collect();
        Self::new(width, height, data)
    }

    /// Solid image of one color
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self> {
        let count = width as usize * height as usize;
        Self::from_colors(width, height, &vec![color; count])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// RGBA samples of the pixel at linear index `index`
    pub fn rgba_at(&self, index: usize) -> [u8; 4] {
        let start = index * CHANNELS;
        [
            self.data[start],
            self.data[start + 1],
            self.data[start + 2],
            self.data[start + 3],
        ]
    }

    /// Color of the pixel at linear index `index`
    pub fn color_at(&self, index: usize) -> Color {
        let [r, g, b, a] = self.rgba_at(index);
        Color::from_rgba8(r, g, b, a)
    }

    /// Clip `region` (or the whole image) to the buffer bounds
    ///
    /// # Errors
    ///
    /// - `EmptyInput` if the region has zero area
    /// - `InvalidRegion` if it does not overlap the image
    pub fn clip(&self, region: Option<Region>) -> Result<Region> {
        let Some(region) = region else {
            return Ok(Region::new(0, 0, self.width, self.height));
        };
        if region.width == 0 || region.height == 0 {
            return Err(PaletteError::empty(format!(
                "region has zero area ({}x{})",
                region.width, region.height
            )));
        }
        if region.x >= self.width || region.y >= self.height {
            return Err(PaletteError::InvalidRegion {
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
                image_width: self.width,
                image_height: self.height,
            });
        }
        let right = region.x.saturating_add(region.width).min(self.width);
        let bottom = region.y.saturating_add(region.height).min(self.height);
        Ok(Region::new(region.x, region.y, right - region.x, bottom - region.y))
    }
}

/// Axis-aligned rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Linear pixel indices of one image row inside this region
    ///
    /// The region must already be clipped to an image `image_width` wide.
    pub fn row_indices(&self, row: u32, image_width: u32) -> Range<usize> {
        let start = row as usize * image_width as usize + self.x as usize;
        start..start + self.width as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_area_rejected() {
        assert!(matches!(
            PixelBuffer::new(0, 10, vec![]),
            Err(PaletteError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        assert!(matches!(
            PixelBuffer::new(2, 2, vec![0; 15]),
            Err(PaletteError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_color_at() {
        let buffer = PixelBuffer::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 128]).unwrap();
        assert_eq!(buffer.color_at(0).to_hex(), "#FF0000");
        assert_eq!(buffer.color_at(1).to_hex(), "#0000FF");
        assert_eq!(buffer.rgba_at(1)[3], 128);
    }

    #[test]
    fn test_clip_defaults_to_whole_image() {
        let buffer = PixelBuffer::filled(4, 3, Color::WHITE).unwrap();
        assert_eq!(buffer.clip(None).unwrap(), Region::new(0, 0, 4, 3));
    }

    #[test]
    fn test_clip_trims_overhang() {
        let buffer = PixelBuffer::filled(4, 3, Color::WHITE).unwrap();
        let clipped = buffer.clip(Some(Region::new(2, 1, 10, 10))).unwrap();
        assert_eq!(clipped, Region::new(2, 1, 2, 2));
    }

    #[test]
    fn test_clip_outside_fails() {
        let buffer = PixelBuffer::filled(4, 3, Color::WHITE).unwrap();
        assert!(matches!(
            buffer.clip(Some(Region::new(4, 0, 1, 1))),
            Err(PaletteError::InvalidRegion { .. })
        ));
        assert!(matches!(
            buffer.clip(Some(Region::new(0, 0, 0, 1))),
            Err(PaletteError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_region_row_indices() {
        let region = Region::new(1, 1, 2, 2);
        assert_eq!(region.row_indices(1, 4), 5..7);
        assert_eq!(region.row_indices(2, 4), 9..11);
    }
}
