//! # dataset-prep
//!
//! Tools for turning a directory of labelled images into a training set and
//! for running a trained binary classifier over a test set.
//!
//! The preprocessing side renames files, converts BMP to JPEG, builds
//! mirrored low-resolution and 8-bit grayscale trees, and writes
//! `Label\tImageSource` manifests. The classification side loads a dense
//! network from JSON and scores every `.jpg` in a directory.
//!
//! ```no_run
//! use dataset_prep::{Pipeline, PreprocessConfig};
//!
//! # fn main() -> dataset_prep::Result<()> {
//! let config = PreprocessConfig { lowres: true, gray: true, ..PreprocessConfig::default() };
//! Pipeline::new(config)?.run("imgs".as_ref())?;
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod error;
pub mod imaging;
pub mod layers;
pub mod manifest;
pub mod math;
pub mod network;
pub mod pipeline;
pub mod predict;
pub mod rename;
pub mod walk;

pub use error::{Error, Result};
pub use network::{InputType, ModelMetadata, Network};
pub use pipeline::{Pipeline, PreprocessConfig, RunSummary};
pub use predict::{NetworkClassifier, Prediction, Predictor};
