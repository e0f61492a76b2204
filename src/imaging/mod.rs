//! Image decoding, resizing, grayscale conversion and encoding.

mod encode;
mod grayscale;
mod resize;

pub use encode::{open, save, OutputFormat, DEFAULT_JPEG_QUALITY};
pub use grayscale::{grayscale_palette, luminance, to_grayscale, to_grayscale8};
pub use resize::{resize, LOW_RES_HEIGHT, LOW_RES_WIDTH};
