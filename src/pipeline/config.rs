use crate::imaging::{DEFAULT_JPEG_QUALITY, LOW_RES_HEIGHT, LOW_RES_WIDTH};

/// Which preprocessing stages run, and their parameters.
///
/// Every stage is off by default; manifests are always written for the
/// trees that exist at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessConfig {
    /// Print every image path before anything else runs.
    pub print_files: bool,
    /// Rename images in place to random unique names.
    pub rename: bool,
    /// Re-encode `.bmp` files as `.jpg` and remove the originals.
    pub bmp_to_jpg: bool,
    /// Build the low-resolution tree.
    pub lowres: bool,
    /// Build the grayscale tree.
    pub gray: bool,
    /// Low-resolution target width.
    pub width: u32,
    /// Low-resolution target height.
    pub height: u32,
    /// JPEG quality (1-100) for every file written.
    pub quality: u8,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            print_files: false,
            rename: false,
            bmp_to_jpg: false,
            lowres: false,
            gray: false,
            width: LOW_RES_WIDTH,
            height: LOW_RES_HEIGHT,
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}
