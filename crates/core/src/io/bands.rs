//! Native TIFF band reading/writing
//!
//! Uses the `tiff` crate. Samples of every pixel are stored interleaved on
//! disk and de-interleaved into one plane per band here.

use crate::error::{Error, Result};
use crate::raster::RasterElement;
use ndarray::{Array3, ArrayView3};
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::{Gray32Float, RGB32Float, RGBA32Float};
use tiff::encoder::TiffEncoder;

/// Read every band of a TIFF file as `(bands, height, width)`
pub fn read_bands<T, P>(path: P) -> Result<Array3<T>>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    decode_bands(BufReader::new(file))
}

/// Read every band of an in-memory TIFF as `(bands, height, width)`
pub fn read_bands_from_buffer<T>(data: &[u8]) -> Result<Array3<T>>
where
    T: RasterElement,
{
    decode_bands(Cursor::new(data))
}

fn cast_all<S, T>(buf: Vec<S>) -> Vec<T>
where
    S: num_traits::NumCast + Copy,
    T: RasterElement,
{
    buf.into_iter()
        .map(|v| num_traits::cast(v).unwrap_or(T::default_nodata()))
        .collect()
}

/// Internal: decode a TIFF from any `Read + Seek` source
fn decode_bands<T, R>(reader: R) -> Result<Array3<T>>
where
    T: RasterElement,
    R: std::io::Read + std::io::Seek,
{
    let mut decoder =
        Decoder::new(reader).map_err(|e| Error::Other(format!("TIFF decode error: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| Error::Other(format!("Cannot read dimensions: {}", e)))?;

    let rows = height as usize;
    let cols = width as usize;

    let result = decoder
        .read_image()
        .map_err(|e| Error::Other(format!("Cannot read image data: {}", e)))?;

    let samples: Vec<T> = match result {
        DecodingResult::U8(buf) => cast_all(buf),
        DecodingResult::U16(buf) => cast_all(buf),
        DecodingResult::U32(buf) => cast_all(buf),
        DecodingResult::U64(buf) => cast_all(buf),
        DecodingResult::I8(buf) => cast_all(buf),
        DecodingResult::I16(buf) => cast_all(buf),
        DecodingResult::I32(buf) => cast_all(buf),
        DecodingResult::I64(buf) => cast_all(buf),
        DecodingResult::F32(buf) => cast_all(buf),
        DecodingResult::F64(buf) => cast_all(buf),
        #[allow(unreachable_patterns)]
        _ => {
            return Err(Error::UnsupportedDataType(
                "Unsupported TIFF sample format".to_string(),
            ))
        }
    };

    let pixels = rows * cols;
    if pixels == 0 || samples.len() % pixels != 0 {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }
    let bands = samples.len() / pixels;

    let interleaved = Array3::from_shape_vec((rows, cols, bands), samples)
        .map_err(|e| Error::Other(e.to_string()))?;

    Ok(interleaved
        .permuted_axes([2, 0, 1])
        .as_standard_layout()
        .into_owned())
}

/// Write a `(bands, height, width)` array to a TIFF file as 32-bit float.
///
/// 1, 3 and 4 bands are supported (gray, RGB, RGBA sample layouts).
pub fn write_bands<T, P>(bands: ArrayView3<'_, T>, path: P) -> Result<()>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let file = File::create(path.as_ref())?;
    encode_bands(bands, BufWriter::new(file))
}

/// Write a `(bands, height, width)` array to an in-memory TIFF buffer
pub fn write_bands_to_buffer<T>(bands: ArrayView3<'_, T>) -> Result<Vec<u8>>
where
    T: RasterElement,
{
    let mut buf = Vec::new();
    encode_bands(bands, Cursor::new(&mut buf))?;
    Ok(buf)
}

/// Internal: encode bands into any `Write + Seek` sink
fn encode_bands<T, W>(bands: ArrayView3<'_, T>, writer: W) -> Result<()>
where
    T: RasterElement,
    W: std::io::Write + std::io::Seek,
{
    let (count, rows, cols) = bands.dim();

    // (bands, h, w) -> (h, w, bands) so samples come out pixel-interleaved
    let interleaved = bands.permuted_axes([1, 2, 0]);

    let data: Vec<f32> = interleaved
        .iter()
        .map(|&v| num_traits::cast(v).unwrap_or(f32::NAN))
        .collect();

    let mut encoder =
        TiffEncoder::new(writer).map_err(|e| Error::Other(format!("TIFF encoder error: {}", e)))?;

    let (w, h) = (cols as u32, rows as u32);
    let written = match count {
        1 => encoder.write_image::<Gray32Float>(w, h, &data),
        3 => encoder.write_image::<RGB32Float>(w, h, &data),
        4 => encoder.write_image::<RGBA32Float>(w, h, &data),
        n => {
            return Err(Error::UnsupportedDataType(format!(
                "cannot write {} bands (supported: 1, 3, 4)",
                n
            )))
        }
    };

    written.map_err(|e| Error::Other(format!("Cannot write image data: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;

    #[test]
    fn roundtrip_three_bands_in_memory() {
        let bands = Array::from_shape_fn((3, 4, 5), |(b, r, c)| (b * 100 + r * 10 + c) as f32);
        let buf = write_bands_to_buffer(bands.view()).unwrap();
        let back: Array3<f32> = read_bands_from_buffer(&buf).unwrap();

        assert_eq!(back.dim(), (3, 4, 5));
        assert_eq!(back, bands);
    }

    #[test]
    fn single_band_reads_as_one_plane() {
        let bands = Array3::<f64>::from_elem((1, 2, 3), 0.25);
        let buf = write_bands_to_buffer(bands.view()).unwrap();
        let back: Array3<f64> = read_bands_from_buffer(&buf).unwrap();
        assert_eq!(back.dim(), (1, 2, 3));
        assert!((back[[0, 1, 2]] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn five_bands_cannot_be_written() {
        let bands = Array3::<f32>::zeros((5, 2, 2));
        let err = write_bands_to_buffer(bands.view()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedDataType(_)));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = read_bands_from_buffer::<f32>(b"not a tiff").unwrap_err();
        assert!(matches!(err, Error::Other(_)));
    }
}
