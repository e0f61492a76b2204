//! 8-bit luminance conversion.

use image::{DynamicImage, GrayImage, RgbImage};

/// `round(0.3·R + 0.59·G + 0.11·B)`, rounding halves up.
///
/// Computed in integer hundredths so the result is exact: the largest
/// intermediate value is 25 550, and the quotient never exceeds 255.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let weighted = 30 * u32::from(r) + 59 * u32::from(g) + 11 * u32::from(b);
    ((weighted + 50) / 100).min(255) as u8
}

/// Convert an RGB image to a single-channel, one-byte-per-pixel image.
pub fn to_grayscale8(img: &RgbImage) -> GrayImage {
    let mut out = GrayImage::new(img.width(), img.height());
    for (src, dst) in img.pixels().zip(out.pixels_mut()) {
        let [r, g, b] = src.0;
        dst.0[0] = luminance(r, g, b);
    }
    out
}

/// Convert any decoded image to `ImageLuma8`.
pub fn to_grayscale(img: &DynamicImage) -> DynamicImage {
    DynamicImage::ImageLuma8(to_grayscale8(&img.to_rgb8()))
}

/// Palette for indexed 8bpp output: entry `i` is `(i, i, i)`.
pub fn grayscale_palette() -> [[u8; 3]; 256] {
    let mut palette = [[0u8; 3]; 256];
    for (i, entry) in palette.iter_mut().enumerate() {
        let v = i as u8;
        *entry = [v, v, v];
    }
    palette
}
