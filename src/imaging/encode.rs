//! Image loading and saving.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, GenericImageView, ImageError, ImageFormat};

use crate::error::{Error, Result};

use super::grayscale::grayscale_palette;

/// JPEG quality used for every re-encoded file unless overridden.
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Formats the tools can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Bmp,
}

impl OutputFormat {
    /// Look up the encoder for a file extension (case-insensitive).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical file extension.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Bmp => "bmp",
        }
    }

    /// Whether single-channel output must go through an explicit palette.
    #[must_use]
    pub const fn is_palette_indexed(&self) -> bool {
        matches!(self, Self::Bmp)
    }
}

/// Decode an image file.
///
/// # Errors
///
/// Returns [`Error::ImageLoad`] if the file cannot be read or decoded.
pub fn open<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode `img` to `path`, picking the format from the extension.
///
/// JPEG output uses `quality` (1-100). Single-channel images are written as
/// native grayscale JPEG/PNG, or as an 8bpp BMP with a `(i, i, i)` palette.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] for unknown extensions and
/// [`Error::ImageSave`] if the file cannot be created or encoded.
pub fn save<P: AsRef<Path>>(img: &DynamicImage, path: P, quality: u8) -> Result<()> {
    let path = path.as_ref();
    let format = OutputFormat::from_path(path).ok_or_else(|| Error::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    write_encoded(img, path, format, quality).map_err(|source| Error::ImageSave {
        path: path.to_path_buf(),
        source,
    })
}

fn write_encoded(
    img: &DynamicImage,
    path: &Path,
    format: OutputFormat,
    quality: u8,
) -> std::result::Result<(), ImageError> {
    let (width, height) = (img.width(), img.height());
    let is_gray = matches!(img, DynamicImage::ImageLuma8(_));

    match format {
        OutputFormat::Jpeg => {
            let mut writer = BufWriter::new(File::create(path)?);
            {
                let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
                if is_gray {
                    encoder.encode(&img.to_luma8(), width, height, ColorType::L8)?;
                } else {
                    encoder.encode(&img.to_rgb8(), width, height, ColorType::Rgb8)?;
                }
            }
            writer.flush()?;
        }
        OutputFormat::Bmp if is_gray && format.is_palette_indexed() => {
            let mut writer = BufWriter::new(File::create(path)?);
            let palette = grayscale_palette();
            BmpEncoder::new(&mut writer).encode_with_palette(
                &img.to_luma8(),
                width,
                height,
                ColorType::L8,
                Some(&palette[..]),
            )?;
            writer.flush()?;
        }
        OutputFormat::Bmp => {
            DynamicImage::ImageRgb8(img.to_rgb8()).save_with_format(path, ImageFormat::Bmp)?;
        }
        OutputFormat::Png => {
            img.save_with_format(path, ImageFormat::Png)?;
        }
    }

    Ok(())
}
