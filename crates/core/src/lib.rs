//! # satviz core
//!
//! Core types, errors and I/O shared by the satviz crates.
//!
//! This crate provides:
//! - `Raster<T>`: a single 2D band with an optional nodata value
//! - `Batch`: the `(n, channels, height, width)` array every renderer input
//!   is normalized into
//! - `RasterElement`: the numeric cell types accepted at the boundary
//! - TIFF band I/O

pub mod batch;
pub mod error;
pub mod io;
pub mod raster;

pub use batch::Batch;
pub use error::{Error, Result};
pub use raster::{Raster, RasterElement};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::batch::Batch;
    pub use crate::error::{Error, Result};
    pub use crate::raster::{Raster, RasterElement};
}
