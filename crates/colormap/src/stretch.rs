//! Percentile contrast stretching for RGB composites.

use ndarray::{Array3, ArrayView3, Axis};

/// Added to the percentile span so a flat composite does not divide by zero.
pub const STRETCH_EPSILON: f64 = 1e-8;

/// Percentile `p` (0..=100) of already sorted, finite values.
///
/// Linear interpolation between the two closest ranks, with rank
/// `p / 100 * (n - 1)`. Returns `None` for an empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Lower and upper percentiles over the finite values of `values`.
pub fn percentile_range<I>(values: I, low: f64, high: f64) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    Some((percentile(&sorted, low)?, percentile(&sorted, high)?))
}

/// Stretch a `(height, width, channel)` composite to [0, 1].
///
/// The `low`/`high` percentiles are taken over all channels together, then
/// every value is mapped with `(v - p_low) / (p_high - p_low + eps)` and
/// clipped. Non-finite values (NaN and ±inf) come out as NaN.
pub fn contrast_stretch(composite: ArrayView3<'_, f64>, low: f64, high: f64) -> Array3<f64> {
    let (p_low, p_high) =
        percentile_range(composite.iter().copied(), low, high).unwrap_or((0.0, 1.0));
    let span = p_high - p_low + STRETCH_EPSILON;

    composite.mapv(|v| {
        if !v.is_finite() {
            return f64::NAN;
        }
        ((v - p_low) / span).clamp(0.0, 1.0)
    })
}

/// Convert a stretched `(height, width, channel)` composite into RGBA bytes.
///
/// The first three channels become R, G, B. Pixels with any non-finite
/// channel get `nodata_color`.
pub fn composite_to_rgba(stretched: ArrayView3<'_, f64>, nodata_color: [u8; 4]) -> Vec<u8> {
    let (rows, cols, _) = stretched.dim();
    let mut rgba = Vec::with_capacity(rows * cols * 4);

    for row in stretched.axis_iter(Axis(0)) {
        for px in row.axis_iter(Axis(0)) {
            if px.iter().take(3).any(|v| !v.is_finite()) {
                rgba.extend_from_slice(&nodata_color);
                continue;
            }
            for &v in px.iter().take(3) {
                rgba.push((v.clamp(0.0, 1.0) * 255.0).round() as u8);
            }
            rgba.push(255);
        }
    }

    rgba
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array;

    #[test]
    fn percentile_interpolates_between_ranks() {
        let sorted: Vec<f64> = (0..=100).map(|v| v as f64).collect();
        assert_relative_eq!(percentile(&sorted, 2.0).unwrap(), 2.0);
        assert_relative_eq!(percentile(&sorted, 98.0).unwrap(), 98.0);

        // rank = 0.5 * 3 = 1.5
        assert_relative_eq!(percentile(&[1.0, 2.0, 4.0, 8.0], 50.0).unwrap(), 3.0);
        assert!(percentile(&[], 50.0).is_none());
    }

    #[test]
    fn percentile_range_skips_nan() {
        let values = vec![f64::NAN, 1.0, 3.0, f64::INFINITY, 5.0];
        let (lo, hi) = percentile_range(values, 0.0, 100.0).unwrap();
        assert_relative_eq!(lo, 1.0);
        assert_relative_eq!(hi, 5.0);
    }

    #[test]
    fn stretched_values_lie_in_unit_interval() {
        let composite = Array::from_shape_fn((16, 16, 3), |(r, c, b)| {
            ((r * 31 + c * 17 + b * 7) % 997) as f64 * 12.5 - 300.0
        });
        let out = contrast_stretch(composite.view(), 2.0, 98.0);
        assert_eq!(out.dim(), (16, 16, 3));
        assert!(out.iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert!(out.iter().any(|&v| v == 0.0));
        assert!(out.iter().any(|&v| v == 1.0));
    }

    #[test]
    fn flat_composite_maps_to_zero() {
        let composite = Array3::<f64>::from_elem((4, 4, 3), 0.7);
        let out = contrast_stretch(composite.view(), 2.0, 98.0);
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn infinite_values_become_nodata() {
        let mut composite = Array::from_shape_fn((2, 2, 3), |(r, c, b)| (r * 6 + c * 3 + b) as f64);
        for b in 0..3 {
            composite[[0, 0, b]] = f64::INFINITY;
        }
        composite[[1, 1, 0]] = f64::NEG_INFINITY;

        let out = contrast_stretch(composite.view(), 2.0, 98.0);
        assert!(out[[0, 0, 0]].is_nan());
        assert!(out[[1, 1, 0]].is_nan());
        assert!(out[[0, 1, 0]].is_finite());

        let rgba = composite_to_rgba(out.view(), [0, 0, 0, 0]);
        assert_eq!(&rgba[0..4], &[0, 0, 0, 0]);
        assert_eq!(&rgba[12..16], &[0, 0, 0, 0]);
        assert_eq!(rgba[7], 255);
    }

    #[test]
    fn rgba_marks_nan_pixels() {
        let mut composite = Array3::<f64>::from_elem((1, 2, 3), 1.0);
        composite[[0, 1, 2]] = f64::NAN;
        let rgba = composite_to_rgba(composite.view(), [0, 0, 0, 0]);
        assert_eq!(rgba, vec![255, 255, 255, 255, 0, 0, 0, 0]);
    }
}
