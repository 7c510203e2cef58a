//! Imagery algorithms
//!
//! - Spectral indices: normalized difference, NDVI
//! - Batch preparation: append NDVI as a channel, threshold predictions

mod batch;
mod indices;

pub use batch::{append_ndvi, threshold, NdviParams};
pub use indices::{ndvi, normalized_difference};
