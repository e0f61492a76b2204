use serde::{Deserialize, Serialize};

/// Describes how to interpret the input fed to a Network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputType {
    /// Comma-separated f64 values. Not usable for image classification.
    Numeric,
    /// Grayscale image resized to width×height, normalized to [0, 1].
    ImageGrayscale { width: u32, height: u32 },
    /// RGB image resized to width×height, normalized to [0, 1], flattened as R,G,B,...
    ImageRgb { width: u32, height: u32 },
}

impl InputType {
    /// Length of the flattened input vector this type produces, if it is an image type.
    pub fn image_input_len(&self) -> Option<usize> {
        match *self {
            InputType::Numeric => None,
            InputType::ImageGrayscale { width, height } => Some(width as usize * height as usize),
            InputType::ImageRgb { width, height } => Some(width as usize * height as usize * 3),
        }
    }
}

/// Optional annotations attached to a saved Network.
/// All fields are Option<> so models without metadata deserialize cleanly.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModelMetadata {
    pub description: Option<String>,
    pub input_type: Option<InputType>,
    /// Human-readable class labels for the output layer (e.g. ["cat", "dog"]).
    pub output_labels: Option<Vec<String>>,
}
