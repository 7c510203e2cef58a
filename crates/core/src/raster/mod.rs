//! Single-band raster grid and cell element trait

mod element;
mod grid;

pub use element::RasterElement;
pub use grid::{Raster, RasterStatistics};
