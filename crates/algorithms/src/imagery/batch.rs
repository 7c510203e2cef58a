//! Batch preparation before rendering

use ndarray::{concatenate, Array4, Axis};
use satviz_core::raster::Raster;
use satviz_core::{Batch, Error, Result};
use tracing::debug;

use super::indices::ndvi;

/// Band positions used to derive NDVI.
#[derive(Debug, Clone, Copy)]
pub struct NdviParams {
    /// Red band index
    pub red: usize,
    /// Near-infrared band index
    pub nir: usize,
}

impl Default for NdviParams {
    /// R, G, B, NIR ordering: red first, NIR fourth.
    fn default() -> Self {
        Self { red: 0, nir: 3 }
    }
}

/// Compute NDVI for every item and append it as a new last channel.
///
/// A 4-band R, G, B, NIR batch becomes a 5-band batch whose channel 4 is
/// NDVI, which is the layout the renderer draws as an inset.
pub fn append_ndvi(batch: &Batch, params: NdviParams) -> Result<Batch> {
    let (n, channels, rows, cols) = batch.shape();
    for band in [params.red, params.nir] {
        if band >= channels {
            return Err(Error::BandOutOfRange {
                band,
                bands: channels,
            });
        }
    }

    let mut index = Array4::<f64>::zeros((n, 1, rows, cols));
    for i in 0..n {
        let red = Raster::from_array(batch.band(i, params.red)?.to_owned());
        let nir = Raster::from_array(batch.band(i, params.nir)?.to_owned());
        let result = ndvi(&nir, &red)?;
        index
            .index_axis_mut(Axis(0), i)
            .index_axis_move(Axis(0), 0)
            .assign(result.data());
    }

    debug!(
        items = n,
        red = params.red,
        nir = params.nir,
        "appended NDVI as channel {}",
        channels
    );

    let data = concatenate(Axis(1), &[batch.view(), index.view()])
        .map_err(|e| Error::Other(e.to_string()))?;
    Ok(Batch::from(data))
}

/// Binarize a batch: 1.0 where the value exceeds `cutoff`, else 0.0.
///
/// NaN stays NaN.
pub fn threshold(batch: &Batch, cutoff: f64) -> Batch {
    batch.map(|v| {
        if v.is_nan() {
            v
        } else if v > cutoff {
            1.0
        } else {
            0.0
        }
    })
}
