//! # satviz render
//!
//! Renders a batch of multi-band satellite images, optionally alongside
//! ground-truth masks and model predictions, as a grid of panels.
//!
//! One row per image (capped by [`RenderParams::max_images`]) and one column
//! per supplied input: image, then mask, then prediction. Images with three or
//! more channels are drawn as a percentile-stretched RGB composite of their
//! first three channels; five or more channels add an NDVI inset from
//! channel 4. Fewer than three channels draws channel 0 in grayscale.
//!
//! [`render`] performs no I/O. The returned [`Figure`] is composed into a
//! single canvas with [`Figure::compose`] or written with [`Figure::save_png`].
//!
//! ```ignore
//! use satviz_core::Batch;
//! use satviz_render::{render, RenderParams};
//!
//! let images = Batch::from_array(tensor.view())?;
//! let masks = Batch::from_array(labels.view())?;
//! let figure = render(&images, Some(&masks), None, &RenderParams::default())?;
//! figure.save_png("val_batch.png")?;
//! ```

mod figure;
mod params;
mod renderer;

pub use figure::{Figure, Inset, InsetBounds, Panel, PanelKind};
pub use params::RenderParams;
pub use renderer::{render, NDVI_MIN_CHANNELS, RGB_MIN_CHANNELS};
