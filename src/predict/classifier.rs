use std::path::Path;

use image::DynamicImage;

use crate::error::{Error, Result};
use crate::imaging;
use crate::network::{InputType, Network};

use super::{Prediction, Predictor};

/// Resizes `img` to the model's input size and flattens it to [0, 1] floats.
///
/// Grayscale inputs use the same luminance weights as the preprocessor so
/// the classifier sees what the training set saw. RGB inputs are flattened
/// as R, G, B, R, G, B, ...
pub fn image_to_input(img: &DynamicImage, input_type: InputType) -> Result<Vec<f64>> {
    match input_type {
        InputType::ImageGrayscale { width, height } => {
            let resized = imaging::resize(img, width, height)?;
            let gray = imaging::to_grayscale8(&resized.to_rgb8());
            Ok(gray.pixels().map(|p| f64::from(p.0[0]) / 255.0).collect())
        }
        InputType::ImageRgb { width, height } => {
            let resized = imaging::resize(img, width, height)?;
            let rgb = resized.to_rgb8();
            Ok(rgb.pixels().flat_map(|p| p.0.iter().map(|&c| f64::from(c) / 255.0)).collect())
        }
        InputType::Numeric => Err(Error::InvalidParameter {
            name: "input_type".into(),
            reason: "model takes numeric input, not an image".into(),
        }),
    }
}

/// A two-output dense network loaded from JSON.
#[derive(Debug, Clone)]
pub struct NetworkClassifier {
    network: Network,
    input_type: InputType,
    labels: [String; 2],
}

impl NetworkClassifier {
    /// Loads and checks a model: it must declare an image input type whose
    /// size matches the first layer, and produce exactly two outputs.
    ///
    /// Output labels default to `"0"` and `"1"` when the model has none.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_network(Network::load_json(path)?)
    }

    pub fn from_network(network: Network) -> Result<Self> {
        network.validate()?;
        let metadata = network.metadata.clone().unwrap_or_default();

        let input_type = metadata.input_type.ok_or_else(|| Error::InvalidParameter {
            name: "input_type".into(),
            reason: "model metadata does not declare an image input type".into(),
        })?;
        let input_len = input_type.image_input_len().ok_or_else(|| Error::InvalidParameter {
            name: "input_type".into(),
            reason: "model takes numeric input, not an image".into(),
        })?;
        if input_len != network.input_size() {
            return Err(Error::ModelShape {
                expected: format!("first layer input of {input_len} for {input_type:?}"),
                actual: network.input_size().to_string(),
            });
        }
        if network.output_size() != 2 {
            return Err(Error::ModelShape {
                expected: "2 outputs".into(),
                actual: network.output_size().to_string(),
            });
        }

        let labels = match metadata.output_labels {
            Some(labels) => {
                let found = labels.len();
                <[String; 2]>::try_from(labels).map_err(|_| Error::ModelShape {
                    expected: "2 output labels".into(),
                    actual: found.to_string(),
                })?
            }
            None => ["0".to_owned(), "1".to_owned()],
        };

        Ok(Self { network, input_type, labels })
    }

    pub fn labels(&self) -> &[String; 2] {
        &self.labels
    }
}

impl Predictor for NetworkClassifier {
    fn predict(&self, image: &DynamicImage) -> Result<Prediction> {
        let input = image_to_input(image, self.input_type)?;
        let output = self.network.forward(input)?;
        let scores = [output[0], output[1]];
        let winner = usize::from(scores[1] > scores[0]);
        Ok(Prediction {
            label: self.labels[winner].clone(),
            scores,
        })
    }
}
