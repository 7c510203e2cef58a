//! # satviz colormap
//!
//! Color mapping and band-to-RGBA rendering for satviz.
//!
//! Provides the three schemes the renderer needs (grayscale, viridis and the
//! diverging RdYlGn used for NDVI) on top of a multi-stop interpolation
//! engine, plus percentile contrast stretching for RGB composites.
//!
//! ## Usage
//!
//! ```ignore
//! use satviz_colormap::{auto_params, raster_to_rgba, ColorScheme};
//!
//! let params = auto_params(&mask, ColorScheme::Grayscale);
//! let rgba = raster_to_rgba(&mask, &params);
//! ```

mod render;
mod scheme;
mod stretch;

pub use render::{auto_params, raster_to_rgba, ColormapParams};
pub use scheme::{evaluate, ColorScheme, ColorStop, Rgb};
pub use stretch::{composite_to_rgba, contrast_stretch, percentile, percentile_range, STRETCH_EPSILON};
