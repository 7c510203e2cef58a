//! Raster-to-RGBA rendering using color schemes.

use crate::scheme::{evaluate, ColorScheme, Rgb};
use satviz_core::raster::{Raster, RasterElement};

/// Parameters for colormap rendering.
#[derive(Debug, Clone)]
pub struct ColormapParams {
    /// Color scheme to use.
    pub scheme: ColorScheme,
    /// Value mapped to the start of the scheme. Values below are clamped.
    pub min: f64,
    /// Value mapped to the end of the scheme. Values above are clamped.
    pub max: f64,
    /// Color for nodata pixels (RGBA). Default: fully transparent.
    pub nodata_color: [u8; 4],
}

impl ColormapParams {
    /// Create params with explicit min/max range.
    pub fn with_range(scheme: ColorScheme, min: f64, max: f64) -> Self {
        Self {
            scheme,
            min,
            max,
            nodata_color: [0, 0, 0, 0],
        }
    }
}

/// Auto-detect min/max from a raster, returning `ColormapParams` ready to use.
///
/// Scans all valid (non-nodata, finite) cells to find the data range.
pub fn auto_params<T: RasterElement>(raster: &Raster<T>, scheme: ColorScheme) -> ColormapParams {
    let nodata = raster.nodata();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for val in raster.data().iter() {
        if val.is_nodata(nodata) {
            continue;
        }
        if let Some(v) = val.to_f64() {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
    }

    // All nodata, or a constant raster
    if !min.is_finite() || !max.is_finite() {
        min = 0.0;
        max = 1.0;
    } else if (max - min).abs() < f64::EPSILON {
        max = min + 1.0;
    }

    ColormapParams::with_range(scheme, min, max)
}

/// Convert a raster to an RGBA pixel buffer.
///
/// Returns a `Vec<u8>` of length `rows * cols * 4` in row-major order.
/// Nodata pixels are rendered with `params.nodata_color`.
pub fn raster_to_rgba<T: RasterElement>(raster: &Raster<T>, params: &ColormapParams) -> Vec<u8> {
    let nodata = raster.nodata();
    let range = params.max - params.min;
    let inv_range = if range.abs() > f64::EPSILON {
        1.0 / range
    } else {
        1.0
    };

    let mut rgba = vec![0u8; raster.len() * 4];

    for (px, val) in rgba.chunks_exact_mut(4).zip(raster.data().iter()) {
        let value = if val.is_nodata(nodata) {
            None
        } else {
            val.to_f64().filter(|v| v.is_finite())
        };

        match value {
            Some(v) => {
                let Rgb { r, g, b } = evaluate(params.scheme, (v - params.min) * inv_range);
                px.copy_from_slice(&[r, g, b, 255]);
            }
            None => px.copy_from_slice(&params.nodata_color),
        }
    }

    rgba
}
