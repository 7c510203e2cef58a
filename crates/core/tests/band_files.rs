//! File round-trips for TIFF band I/O and batch stacking.

use ndarray::{Array, Array3};
use satviz_core::io::{read_bands, write_bands};
use satviz_core::Batch;

#[test]
fn rgba_file_roundtrip_stacks_into_batch() {
    let dir = tempfile::tempdir().unwrap();

    let mut paths = Vec::new();
    for i in 0..2 {
        let bands = Array::from_shape_fn((4, 6, 6), |(b, r, c)| (i * 1000 + b * 100 + r * 6 + c) as f32);
        let path = dir.path().join(format!("tile_{i}.tif"));
        write_bands(bands.view(), &path).expect("write failed");
        paths.push(path);
    }

    let items: Vec<Array3<f64>> = paths
        .iter()
        .map(|p| read_bands(p).expect("read failed"))
        .collect();
    let views: Vec<_> = items.iter().map(|a| a.view()).collect();
    let batch = Batch::from_items(&views).unwrap();

    assert_eq!(batch.shape(), (2, 4, 6, 6));
    approx::assert_relative_eq!(batch.band(1, 3).unwrap()[[5, 5]], 1335.0);
}

#[test]
fn missing_file_is_io_error() {
    let err = read_bands::<f32, _>("/nonexistent/satviz/tile.tif").unwrap_err();
    assert!(matches!(err, satviz_core::Error::Io(_)));
}
