//! # satviz algorithms
//!
//! Band algorithms used to prepare batches before they are rendered.
//!
//! - **imagery**: normalized difference / NDVI, appending NDVI as an extra
//!   channel, binarizing model outputs

pub mod imagery;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::imagery::{append_ndvi, ndvi, normalized_difference, threshold, NdviParams};
    pub use satviz_core::prelude::*;
}
