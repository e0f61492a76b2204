//! Fixed-size resampling.

use image::{imageops::FilterType, DynamicImage};

use crate::error::{Error, Result};

/// Default width of the low-resolution tree.
pub const LOW_RES_WIDTH: u32 = 320;

/// Default height of the low-resolution tree.
pub const LOW_RES_HEIGHT: u32 = 240;

/// Resize `img` to exactly `width × height` with bicubic (Catmull-Rom) filtering.
///
/// The image is stretched edge to edge; aspect ratio is not preserved and
/// nothing is cropped or padded.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if either dimension is zero.
pub fn resize(img: &DynamicImage, width: u32, height: u32) -> Result<DynamicImage> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidParameter {
            name: "size".into(),
            reason: format!("target {width}x{height} must be non-zero"),
        });
    }
    Ok(img.resize_exact(width, height, FilterType::CatmullRom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    #[test]
    fn test_exact_dimensions() {
        for &(w, h) in &[(100, 100), (50, 50), (7, 300), (1, 1)] {
            let img = DynamicImage::new_rgb8(w, h);
            let out = resize(&img, LOW_RES_WIDTH, LOW_RES_HEIGHT).unwrap();
            assert_eq!(out.dimensions(), (320, 240));
        }
    }

    #[test]
    fn test_downscale() {
        let img = DynamicImage::new_rgb8(640, 480);
        assert_eq!(resize(&img, 3, 2).unwrap().dimensions(), (3, 2));
    }

    #[test]
    fn test_deterministic() {
        let src = DynamicImage::ImageRgb8(RgbImage::from_fn(17, 11, |x, y| {
            Rgb([(x * 13) as u8, (y * 21) as u8, ((x + y) * 5) as u8])
        }));
        let a = resize(&src, 40, 30).unwrap();
        let b = resize(&src, 40, 30).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_zero_size_rejected() {
        let img = DynamicImage::new_rgb8(4, 4);
        assert!(matches!(resize(&img, 0, 10), Err(Error::InvalidParameter { .. })));
    }
}
