//! I/O for multi-band imagery
//!
//! Bands are read from chunky (pixel-interleaved) TIFF files with the `tiff`
//! crate and returned as `(bands, height, width)` arrays, ready to be stacked
//! into a [`Batch`](crate::Batch).

mod bands;

pub use bands::{read_bands, read_bands_from_buffer, write_bands, write_bands_to_buffer};
