//! Spectral indices
//!
//! Indices operate on single-band rasters (one band per raster).

use ndarray::Array2;
use satviz_core::raster::Raster;
use satviz_core::{Error, Result};

/// Sums with a smaller magnitude than this are treated as zero.
const ZERO_SUM: f64 = 1e-10;

/// Compute the normalized difference between two bands:
///
/// `(band_a - band_b) / (band_a + band_b)`
///
/// Result is in the range [-1, 1] for non-negative inputs. Pixels where the
/// bands sum to zero or either is nodata are set to NaN.
///
/// # Arguments
/// * `band_a` - Numerator positive band
/// * `band_b` - Numerator negative band
pub fn normalized_difference(band_a: &Raster<f64>, band_b: &Raster<f64>) -> Result<Raster<f64>> {
    check_dimensions(band_a, band_b)?;

    let data = ndarray::Zip::from(band_a.data())
        .and(band_b.data())
        .map_collect(|&a, &b| {
            if band_a.is_nodata(a) || band_b.is_nodata(b) {
                return f64::NAN;
            }
            let sum = a + b;
            if sum.abs() < ZERO_SUM {
                return f64::NAN;
            }
            (a - b) / sum
        });

    Ok(build_output(data))
}

/// Normalized Difference Vegetation Index
///
/// `NDVI = (NIR - Red) / (NIR + Red)`
///
/// Values range from -1 to 1:
/// - Dense vegetation: 0.6 to 0.9
/// - Sparse vegetation: 0.2 to 0.5
/// - Bare soil: 0.1 to 0.2
/// - Water/clouds: -1.0 to 0.0
pub fn ndvi(nir: &Raster<f64>, red: &Raster<f64>) -> Result<Raster<f64>> {
    normalized_difference(nir, red)
}

fn check_dimensions(a: &Raster<f64>, b: &Raster<f64>) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(Error::ShapeMismatch {
            expected: vec![a.rows(), a.cols()],
            actual: vec![b.rows(), b.cols()],
        });
    }
    Ok(())
}

fn build_output(data: Array2<f64>) -> Raster<f64> {
    let mut output = Raster::from_array(data);
    output.set_nodata(Some(f64::NAN));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_band(rows: usize, cols: usize, value: f64) -> Raster<f64> {
        Raster::from_array(Array2::from_elem((rows, cols), value))
    }

    fn at(raster: &Raster<f64>, row: usize, col: usize) -> f64 {
        raster.data()[[row, col]]
    }

    #[test]
    fn test_ndvi_vegetation() {
        let nir = make_band(5, 5, 0.8);
        let red = make_band(5, 5, 0.1);

        let result = ndvi(&nir, &red).unwrap();
        let val = at(&result, 2, 2);

        let expected = (0.8 - 0.1) / (0.8 + 0.1);
        assert!(
            (val - expected).abs() < 1e-10,
            "Expected {}, got {}",
            expected,
            val
        );
    }

    #[test]
    fn test_ndvi_water_is_negative() {
        let nir = make_band(3, 3, 0.05);
        let red = make_band(3, 3, 0.2);

        let val = at(&ndvi(&nir, &red).unwrap(), 1, 1);
        assert!(val < 0.0, "Water should have negative NDVI, got {}", val);
    }

    #[test]
    fn test_zero_sum_is_nan() {
        let a = make_band(3, 3, 0.0);
        let b = make_band(3, 3, 0.0);

        let val = at(&normalized_difference(&a, &b).unwrap(), 0, 0);
        assert!(val.is_nan(), "Zero sum should produce NaN, got {}", val);
    }

    #[test]
    fn test_nodata_propagates() {
        let mut values = Array2::from_elem((5, 5), 0.5);
        values[[2, 2]] = f64::NAN;
        let nir = Raster::from_array(values);
        let red = make_band(5, 5, 0.2);

        let result = ndvi(&nir, &red).unwrap();
        assert!(at(&result, 2, 2).is_nan());
        assert!(!at(&result, 0, 0).is_nan());
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = make_band(5, 5, 1.0);
        let b = make_band(5, 10, 1.0);

        let result = normalized_difference(&a, &b);
        assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
    }
}
