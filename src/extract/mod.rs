//! Representative color extraction from decoded pixels
//!
//! Two strategies reduce an image to a requested number of colors:
//! - random sampling of pixel positions
//! - dominance ranking of quantized color buckets
//!
//! Both can skip dark pixels and both always return exactly the requested
//! count once the image has at least one pixel.

pub mod background;
pub mod pixels;
pub mod prominent;
pub mod sampling;

pub use background::{ExtractionMode, ExtractionTask};
pub use pixels::{PixelBuffer, Region};
pub use prominent::extract_prominent_colors;
pub use sampling::extract_random_colors;
