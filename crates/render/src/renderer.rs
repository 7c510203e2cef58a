//! Batch-to-figure rendering

use crate::figure::{Figure, Inset, Panel, PanelKind};
use crate::params::RenderParams;
use image::RgbaImage;
use ndarray::{s, ArrayView2, Axis};
use satviz_colormap::{
    auto_params, composite_to_rgba, contrast_stretch, raster_to_rgba, ColorScheme, ColormapParams,
};
use satviz_core::raster::Raster;
use satviz_core::{Batch, Error, Result};
use tracing::debug;

/// Channels needed for an RGB composite; fewer draws channel 0 alone.
pub const RGB_MIN_CHANNELS: usize = 3;

/// Channels needed before the NDVI inset is drawn.
pub const NDVI_MIN_CHANNELS: usize = 5;

const NODATA_COLOR: [u8; 4] = [0, 0, 0, 0];

/// Render images, and optionally masks and predictions, as a grid.
///
/// Produces `min(images.len(), params.max_images)` rows and one column per
/// supplied input, in the order image, mask, prediction.
///
/// # Errors
/// - empty image batch, `max_images == 0` or `cell_size == 0`
/// - masks/predictions with fewer items than rows drawn
/// - masks/predictions with more than one channel per item
/// - `params.ndvi_band` missing on an image that gets an NDVI inset
pub fn render(
    images: &Batch,
    masks: Option<&Batch>,
    predictions: Option<&Batch>,
    params: &RenderParams,
) -> Result<Figure> {
    if images.is_empty() {
        let (n, c, h, w) = images.shape();
        return Err(Error::InvalidShape {
            shape: vec![n, c, h, w],
            reason: "image batch is empty".to_string(),
        });
    }
    if params.max_images == 0 {
        return Err(Error::InvalidParameter {
            name: "max_images",
            value: "0".to_string(),
            reason: "at least one image must be drawn".to_string(),
        });
    }
    if params.cell_size == 0 {
        return Err(Error::InvalidParameter {
            name: "cell_size",
            value: "0".to_string(),
            reason: "cells must be at least one pixel wide".to_string(),
        });
    }

    let rows = images.len().min(params.max_images);
    let cols = 1 + usize::from(masks.is_some()) + usize::from(predictions.is_some());
    debug!(
        batch = images.len(),
        channels = images.channels(),
        rows,
        cols,
        "rendering figure"
    );

    let mut panels = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        panels.push(image_panel(images, i, params)?);

        if let Some(masks) = masks {
            panels.push(plane_panel(
                masks,
                i,
                1,
                PanelKind::GroundTruth,
                "Ground Truth",
                params.mask_scheme,
            )?);
        }

        if let Some(predictions) = predictions {
            let col = if masks.is_some() { 2 } else { 1 };
            panels.push(plane_panel(
                predictions,
                i,
                col,
                PanelKind::Prediction,
                "Prediction",
                params.prediction_scheme,
            )?);
        }
    }

    Ok(Figure::new(rows, cols, panels, params.cell_size, params.padding))
}

fn image_panel(images: &Batch, index: usize, params: &RenderParams) -> Result<Panel> {
    let item = images.item(index)?;
    let channels = images.channels();

    if channels < RGB_MIN_CHANNELS {
        let band = images.band(index, 0)?;
        return Ok(Panel {
            row: index,
            col: 0,
            title: format!("Image {} (1-channel)", index),
            kind: PanelKind::SingleBand,
            pixels: colorize(band, |r| auto_params(r, ColorScheme::Grayscale))?,
            inset: None,
        });
    }

    // (channel, h, w) -> (h, w, channel)
    let composite = item.slice_move(s![..RGB_MIN_CHANNELS, .., ..]).permuted_axes([1, 2, 0]);
    let stretched = contrast_stretch(composite, params.stretch.0, params.stretch.1);
    let (h, w, _) = stretched.dim();
    let pixels = to_image(w, h, composite_to_rgba(stretched.view(), NODATA_COLOR))?;

    let inset = if channels >= NDVI_MIN_CHANNELS {
        let band = images.band(index, params.ndvi_band)?;
        let (lo, hi) = params.ndvi_range;
        Some(Inset {
            title: "NDVI".to_string(),
            bounds: params.inset_bounds,
            pixels: colorize(band, |_| ColormapParams::with_range(params.ndvi_scheme, lo, hi))?,
        })
    } else {
        None
    };

    Ok(Panel {
        row: index,
        col: 0,
        title: format!("Image {}", index),
        kind: PanelKind::Composite,
        pixels,
        inset,
    })
}

/// Mask or prediction panel. A singleton channel axis is squeezed away.
fn plane_panel(
    batch: &Batch,
    index: usize,
    col: usize,
    kind: PanelKind,
    title: &str,
    scheme: ColorScheme,
) -> Result<Panel> {
    let item = batch.item(index)?;
    if batch.channels() != 1 {
        return Err(Error::InvalidShape {
            shape: item.shape().to_vec(),
            reason: "mask and prediction items must have a single channel".to_string(),
        });
    }
    let plane = item.index_axis_move(Axis(0), 0);

    Ok(Panel {
        row: index,
        col,
        title: title.to_string(),
        kind,
        pixels: colorize(plane, |r| auto_params(r, scheme))?,
        inset: None,
    })
}

fn colorize<F>(band: ArrayView2<'_, f64>, params: F) -> Result<RgbaImage>
where
    F: FnOnce(&Raster<f64>) -> ColormapParams,
{
    let raster = Raster::from_array(band.to_owned());
    let mut cm = params(&raster);
    cm.nodata_color = NODATA_COLOR;
    to_image(raster.cols(), raster.rows(), raster_to_rgba(&raster, &cm))
}

fn to_image(width: usize, height: usize, rgba: Vec<u8>) -> Result<RgbaImage> {
    RgbaImage::from_raw(width as u32, height as u32, rgba).ok_or(Error::InvalidDimensions {
        width,
        height,
    })
}
