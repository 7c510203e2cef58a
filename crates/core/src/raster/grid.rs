//! Single-band raster

use crate::raster::RasterElement;
use ndarray::Array2;

/// One band of an item, with an optional no-data value.
///
/// Bands are sliced out of a [`Batch`](crate::Batch) and wrapped in a
/// `Raster` whenever a colormap or spectral index needs to know which cells
/// are valid.
#[derive(Debug, Clone)]
pub struct Raster<T: RasterElement> {
    data: Array2<T>,
    nodata: Option<T>,
}

impl<T: RasterElement> Raster<T> {
    /// Wrap an array, with no no-data value
    pub fn from_array(data: Array2<T>) -> Self {
        Self { data, nodata: None }
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    pub fn nodata(&self) -> Option<T> {
        self.nodata
    }

    pub fn set_nodata(&mut self, nodata: Option<T>) {
        self.nodata = nodata;
    }

    /// Whether `value` is no-data for this band (always true for NaN/inf)
    pub fn is_nodata(&self, value: T) -> bool {
        value.is_nodata(self.nodata)
    }

    /// Min, max and mean over valid cells
    pub fn statistics(&self) -> RasterStatistics {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count: usize = 0;

        for v in self
            .data
            .iter()
            .filter(|&&v| !self.is_nodata(v))
            .filter_map(|&v| v.to_f64())
        {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            count += 1;
        }

        let valid = count > 0;
        RasterStatistics {
            min: valid.then_some(min),
            max: valid.then_some(max),
            mean: valid.then(|| sum / count as f64),
            valid_count: count,
            nodata_count: self.len() - count,
        }
    }
}

/// Per-band statistics printed by `satviz info`
#[derive(Debug, Clone)]
pub struct RasterStatistics {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub valid_count: usize,
    pub nodata_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn statistics_skip_nan() {
        let raster = Raster::from_array(array![[f32::NAN, 1.0, 2.0], [3.0, 4.0, 9.0]]);

        let stats = raster.statistics();
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.max, Some(9.0));
        assert_eq!(stats.mean, Some(19.0 / 5.0));
        assert_eq!(stats.valid_count, 5);
        assert_eq!(stats.nodata_count, 1);
    }

    #[test]
    fn statistics_honour_integer_nodata() {
        let mut raster = Raster::from_array(array![[0u8, 10], [20, 0]]);
        raster.set_nodata(Some(0));

        let stats = raster.statistics();
        assert_eq!((stats.min, stats.max), (Some(10.0), Some(20.0)));
        assert_eq!(stats.valid_count, 2);
    }

    #[test]
    fn all_nodata_band_has_no_range() {
        let raster = Raster::from_array(array![[f64::NAN, f64::INFINITY]]);
        let stats = raster.statistics();
        assert!(stats.min.is_none() && stats.mean.is_none());
        assert_eq!(stats.nodata_count, 2);
        assert_eq!(raster.shape(), (1, 2));
    }
}
