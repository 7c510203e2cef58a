//! Render parameters

use crate::figure::InsetBounds;
use satviz_colormap::ColorScheme;

/// Parameters for [`render`](crate::render).
#[derive(Debug, Clone)]
pub struct RenderParams {
    /// Maximum number of rows (images) drawn
    pub max_images: usize,
    /// Lower and upper percentiles of the RGB contrast stretch
    pub stretch: (f64, f64),
    /// Channel drawn in the NDVI inset
    pub ndvi_band: usize,
    /// Fixed value range of the NDVI inset
    pub ndvi_range: (f64, f64),
    /// Inset placement in panel fractions
    pub inset_bounds: InsetBounds,
    /// Colormap for ground-truth masks
    pub mask_scheme: ColorScheme,
    /// Colormap for predictions
    pub prediction_scheme: ColorScheme,
    /// Colormap for the NDVI inset
    pub ndvi_scheme: ColorScheme,
    /// Edge length of one grid cell in the composed canvas, in pixels
    pub cell_size: u32,
    /// Gutter between cells, in pixels
    pub padding: u32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            max_images: 4,
            stretch: (2.0, 98.0),
            ndvi_band: 4,
            ndvi_range: (-1.0, 1.0),
            inset_bounds: InsetBounds::default(),
            mask_scheme: ColorScheme::Grayscale,
            prediction_scheme: ColorScheme::Viridis,
            ndvi_scheme: ColorScheme::RdYlGn,
            cell_size: 256,
            padding: 8,
        }
    }
}

impl RenderParams {
    /// Default parameters with a different row cap
    pub fn with_max_images(max_images: usize) -> Self {
        Self {
            max_images,
            ..Self::default()
        }
    }
}
