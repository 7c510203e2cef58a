//! Error types for satviz

use thiserror::Error;

/// Main error type for satviz operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Batch index {index} out of bounds for batch of {len}")]
    BatchIndexOutOfBounds { index: usize, len: usize },

    #[error("Band {band} out of range for item with {bands} bands")]
    BandOutOfRange { band: usize, bands: usize },

    #[error("Invalid shape {shape:?}: {reason}")]
    InvalidShape { shape: Vec<usize>, reason: String },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(String),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Image encoding error: {0}")]
    Image(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for satviz operations
pub type Result<T> = std::result::Result<T, Error>;
