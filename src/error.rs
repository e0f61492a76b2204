//! Error types for dataset-prep.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the dataset-prep library.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to decode an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to encode or write an image file.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The output path has an extension no encoder is registered for.
    #[error("no encoder for {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Two source files map to the same file in a derived tree.
    #[error("output {path} would be written twice")]
    OutputCollision { path: PathBuf },

    /// A directory given on the command line does not exist.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read or parse a model file.
    #[error("failed to load model {path}: {source}")]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The model's layer dimensions don't line up with its input or output.
    #[error("model shape mismatch: expected {expected}, got {actual}")]
    ModelShape { expected: String, actual: String },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A manifest file is malformed.
    #[error("malformed manifest {path} (line {line}): {reason}")]
    Manifest {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Failed to walk a directory tree.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for dataset-prep operations.
pub type Result<T> = std::result::Result<T, Error>;
