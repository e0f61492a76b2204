//! Binary image classification over a directory of test images.

mod classifier;
mod runner;

pub use classifier::{image_to_input, NetworkClassifier};
pub use runner::{format_line, run_directory};

use image::DynamicImage;

use crate::error::Result;

/// Outcome of classifying one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub scores: [f64; 2],
}

/// Anything that can score an image against two classes.
pub trait Predictor {
    fn predict(&self, image: &DynamicImage) -> Result<Prediction>;
}
