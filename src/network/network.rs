use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::layers::dense::Layer;
use crate::network::metadata::ModelMetadata;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

impl Network {
    pub fn new(layers: Vec<Layer>) -> Network {
        Network { layers, metadata: None }
    }

    pub fn with_metadata(mut self, metadata: ModelMetadata) -> Network {
        self.metadata = Some(metadata);
        self
    }

    /// Width of the first layer's input, or 0 for an empty network.
    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::input_size)
    }

    /// Width of the last layer's output, or 0 for an empty network.
    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |l| l.size)
    }

    /// Checks that every layer is well formed and feeds the next one.
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(Error::ModelShape {
                expected: "at least one layer".into(),
                actual: "0 layers".into(),
            });
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if !layer.is_consistent() {
                return Err(Error::ModelShape {
                    expected: format!("layer {i} weights (n×{0}) and biases (1×{0})", layer.size),
                    actual: format!(
                        "weights {}×{}, biases {}×{}",
                        layer.weights.rows, layer.weights.cols, layer.biases.rows, layer.biases.cols
                    ),
                });
            }
        }
        for (i, pair) in self.layers.windows(2).enumerate() {
            if pair[1].input_size() != pair[0].size {
                return Err(Error::ModelShape {
                    expected: format!("layer {} input size {}", i + 1, pair[0].size),
                    actual: pair[1].input_size().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Forward pass through every layer.
    pub fn forward(&self, input: Vec<f64>) -> Result<Vec<f64>> {
        if input.len() != self.input_size() {
            return Err(Error::ModelShape {
                expected: format!("input of length {}", self.input_size()),
                actual: input.len().to_string(),
            });
        }
        let mut current = input;
        for layer in &self.layers {
            current = layer.feed_from(current);
        }
        Ok(current)
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))
    }

    /// Deserializes and validates a network from a JSON file previously written by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Network> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let network: Network = serde_json::from_reader(reader).map_err(|source| Error::ModelLoad {
            path: path.to_path_buf(),
            source,
        })?;
        network.validate()?;
        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::math::matrix::Matrix;

    fn two_layer() -> Network {
        Network::new(vec![
            Layer::from_parameters(Matrix::zeros(3, 2), Matrix::zeros(1, 2), ActivationFunction::ReLU),
            Layer::from_parameters(Matrix::zeros(2, 2), Matrix::row(vec![1.0, 0.0]), ActivationFunction::Softmax),
        ])
    }

    #[test]
    fn forward_checks_input_length() {
        let net = two_layer();
        assert!(net.validate().is_ok());
        assert!(matches!(net.forward(vec![0.0; 2]), Err(Error::ModelShape { .. })));
        let out = net.forward(vec![0.0; 3]).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out[0] > out[1]);
    }

    #[test]
    fn validate_rejects_broken_chain() {
        let net = Network::new(vec![
            Layer::from_parameters(Matrix::zeros(3, 2), Matrix::zeros(1, 2), ActivationFunction::ReLU),
            Layer::from_parameters(Matrix::zeros(4, 2), Matrix::zeros(1, 2), ActivationFunction::Sigmoid),
        ]);
        assert!(matches!(net.validate(), Err(Error::ModelShape { .. })));
        assert!(Network::new(vec![]).validate().is_err());
    }

    #[test]
    fn json_round_trip_keeps_metadata() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        let net = two_layer().with_metadata(ModelMetadata {
            output_labels: Some(vec!["a".into(), "b".into()]),
            ..ModelMetadata::default()
        });
        net.save_json(&path).unwrap();

        let loaded = Network::load_json(&path).unwrap();
        assert_eq!(loaded.input_size(), 3);
        assert_eq!(loaded.output_size(), 2);
        let labels = loaded.metadata.and_then(|m| m.output_labels).unwrap();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn load_json_reports_parse_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Network::load_json(&path), Err(Error::ModelLoad { .. })));
    }
}
