//! Dataset preprocessing pipeline.

mod config;
mod preprocess;

pub use config::PreprocessConfig;
pub use preprocess::{Pipeline, RunSummary, GRAYSCALE_SUFFIX, LOW_RES_SUFFIX};
