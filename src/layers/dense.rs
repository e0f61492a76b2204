use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer{
    pub size: usize,
    /// Shape (input_size, size).
    pub weights: Matrix,
    /// Shape (1, size).
    pub biases: Matrix,
    pub activator: ActivationFunction
}

impl Layer {
    pub fn from_parameters(weights: Matrix, biases: Matrix, activation: ActivationFunction) -> Layer {
        Layer {
            size: weights.cols,
            weights,
            biases,
            activator: activation
        }
    }

    /// Number of inputs this layer expects.
    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// a = σ(xW + b)
    pub fn feed_from(&self, input: Vec<f64>) -> Vec<f64> {
        let z = &Matrix::row(input) * &self.weights + &self.biases;
        self.activator.apply(&z.data[0])
    }

    /// Checks that weights and biases agree with `size` and each other.
    pub fn is_consistent(&self) -> bool {
        self.weights.is_rectangular()
            && self.biases.is_rectangular()
            && self.weights.cols == self.size
            && self.biases.rows == 1
            && self.biases.cols == self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_layer_is_affine() {
        let layer = Layer::from_parameters(
            Matrix::from_data(vec![vec![2.0], vec![-1.0]]),
            Matrix::row(vec![0.5]),
            ActivationFunction::Identity,
        );
        assert_eq!(layer.input_size(), 2);
        assert_eq!(layer.feed_from(vec![1.0, 1.0]), vec![1.5]);
    }

    #[test]
    fn bias_width_must_match() {
        let mut layer = Layer::from_parameters(
            Matrix::zeros(2, 3),
            Matrix::zeros(1, 3),
            ActivationFunction::ReLU,
        );
        assert!(layer.is_consistent());
        layer.biases = Matrix::zeros(1, 2);
        assert!(!layer.is_consistent());
    }
}
