//! Batch of multi-band items
//!
//! Every array handed to the renderer is converted once, at the boundary,
//! into a [`Batch`]: an owned `(n, channels, height, width)` array of `f64`.
//! Integer and float inputs of any [`RasterElement`] type are accepted; the
//! conversion copies, so the caller's data is never touched.

use crate::error::{Error, Result};
use crate::raster::RasterElement;
use ndarray::{Array4, ArrayView, ArrayView2, ArrayView3, ArrayView4, Axis, Dimension};

/// An ordered collection of same-shaped items, `(n, channels, height, width)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    data: Array4<f64>,
}

impl Batch {
    /// Convert an array of rank 3 or 4 into a batch.
    ///
    /// - `(n, h, w)`: each item gets a single channel
    /// - `(n, c, h, w)`: taken as is
    ///
    /// Values that cannot be represented as `f64` become NaN.
    pub fn from_array<T, D>(array: ArrayView<'_, T, D>) -> Result<Self>
    where
        T: RasterElement,
        D: Dimension,
    {
        let shape = array.shape().to_vec();
        let dims = match shape.len() {
            3 => (shape[0], 1, shape[1], shape[2]),
            4 => (shape[0], shape[1], shape[2], shape[3]),
            _ => {
                return Err(Error::InvalidShape {
                    shape,
                    reason: "expected (n, h, w) or (n, c, h, w)".to_string(),
                })
            }
        };

        let values: Vec<f64> = array.iter().map(|v| v.to_f64_or_nan()).collect();
        let data =
            Array4::from_shape_vec(dims, values).map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self { data })
    }

    /// Stack `(c, h, w)` items into a batch. All items must share one shape.
    pub fn from_items<T: RasterElement>(items: &[ArrayView3<'_, T>]) -> Result<Self> {
        let first = items.first().ok_or_else(|| Error::InvalidShape {
            shape: vec![0],
            reason: "batch needs at least one item".to_string(),
        })?;
        let (c, h, w) = first.dim();

        let mut values = Vec::with_capacity(items.len() * c * h * w);
        for item in items {
            if item.dim() != (c, h, w) {
                return Err(Error::ShapeMismatch {
                    expected: vec![c, h, w],
                    actual: item.shape().to_vec(),
                });
            }
            values.extend(item.iter().map(|v| v.to_f64_or_nan()));
        }

        let data = Array4::from_shape_vec((items.len(), c, h, w), values)
            .map_err(|e| Error::Other(e.to_string()))?;
        Ok(Self { data })
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// Whether the batch has no items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Channels per item
    pub fn channels(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    /// Item height in cells
    pub fn height(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    /// Item width in cells
    pub fn width(&self) -> usize {
        self.data.len_of(Axis(3))
    }

    /// Dimensions as (n, channels, height, width)
    pub fn shape(&self) -> (usize, usize, usize, usize) {
        self.data.dim()
    }

    /// View of the whole batch
    pub fn view(&self) -> ArrayView4<'_, f64> {
        self.data.view()
    }

    /// Item `index` as `(channels, height, width)`
    pub fn item(&self, index: usize) -> Result<ArrayView3<'_, f64>> {
        if index >= self.len() {
            return Err(Error::BatchIndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(self.data.index_axis(Axis(0), index))
    }

    /// Channel `band` of item `index` as `(height, width)`
    pub fn band(&self, index: usize, band: usize) -> Result<ArrayView2<'_, f64>> {
        let item = self.item(index)?;
        if band >= self.channels() {
            return Err(Error::BandOutOfRange {
                band,
                bands: self.channels(),
            });
        }
        Ok(item.index_axis_move(Axis(0), band))
    }

    /// Apply `f` to every value, producing a new batch
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            data: self.data.mapv(f),
        }
    }

    /// Consume the batch and return the underlying array
    pub fn into_array(self) -> Array4<f64> {
        self.data
    }
}

impl From<Array4<f64>> for Batch {
    fn from(data: Array4<f64>) -> Self {
        Self { data }
    }
}
