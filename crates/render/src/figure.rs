//! Figure model and composition onto a single canvas

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use satviz_core::{Error, Result};
use std::io::Cursor;
use std::path::Path;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// What a panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    /// Stretched RGB composite of the first three channels
    Composite,
    /// Channel 0 in grayscale (images with fewer than three channels)
    SingleBand,
    /// Ground-truth mask
    GroundTruth,
    /// Model prediction
    Prediction,
}

/// Inset placement as fractions of the host panel: `(x0, y0)` is the inset's
/// lower-left corner measured from the panel's lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsetBounds {
    /// Left edge, as a fraction of panel width
    pub x0: f64,
    /// Bottom edge, as a fraction of panel height
    pub y0: f64,
    /// Width, as a fraction of panel width
    pub width: f64,
    /// Height, as a fraction of panel height
    pub height: f64,
}

impl Default for InsetBounds {
    fn default() -> Self {
        Self {
            x0: 0.65,
            y0: 0.65,
            width: 0.3,
            height: 0.3,
        }
    }
}

impl InsetBounds {
    /// Pixel box `(left, top, width, height)` inside a `w × h` panel, with
    /// a top-left origin.
    pub fn to_pixels(&self, w: u32, h: u32) -> (u32, u32, u32, u32) {
        let (w, h) = (w as f64, h as f64);
        let left = (self.x0 * w).round();
        let top = ((1.0 - self.y0 - self.height) * h).round();
        let bw = (self.width * w).round().max(1.0);
        let bh = (self.height * h).round().max(1.0);
        (left.max(0.0) as u32, top.max(0.0) as u32, bw as u32, bh as u32)
    }
}

/// A small image drawn on top of a panel.
#[derive(Debug, Clone)]
pub struct Inset {
    pub(crate) title: String,
    pub(crate) bounds: InsetBounds,
    pub(crate) pixels: RgbaImage,
}

impl Inset {
    /// Inset title ("NDVI")
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Placement within the host panel
    pub fn bounds(&self) -> InsetBounds {
        self.bounds
    }

    /// Inset pixels at native raster resolution
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// One cell of the grid. Pixels are at native raster resolution.
#[derive(Debug, Clone)]
pub struct Panel {
    pub(crate) row: usize,
    pub(crate) col: usize,
    pub(crate) title: String,
    pub(crate) kind: PanelKind,
    pub(crate) pixels: RgbaImage,
    pub(crate) inset: Option<Inset>,
}

impl Panel {
    /// Grid row (batch index)
    pub fn row(&self) -> usize {
        self.row
    }

    /// Grid column
    pub fn col(&self) -> usize {
        self.col
    }

    /// Panel title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// What the panel shows
    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    /// Panel pixels at native raster resolution
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// NDVI inset, if drawn
    pub fn inset(&self) -> Option<&Inset> {
        self.inset.as_ref()
    }

    /// Panel content scaled to fit a `cell × cell` box, inset drawn in.
    fn placed(&self, cell: u32) -> RgbaImage {
        let mut img = fit(&self.pixels, cell, cell);
        if let Some(inset) = &self.inset {
            let (left, top, bw, bh) = inset.bounds.to_pixels(img.width(), img.height());
            let small = fit(&inset.pixels, bw, bh);
            let x = left + (bw - small.width()) / 2;
            let y = top + (bh - small.height()) / 2;
            imageops::overlay(&mut img, &small, x as i64, y as i64);
        }
        img
    }
}

/// A grid of panels, row-major.
///
/// Returned by [`render`](crate::render); nothing is drawn or written until
/// the caller asks for it.
#[derive(Debug, Clone)]
pub struct Figure {
    rows: usize,
    cols: usize,
    panels: Vec<Panel>,
    cell_size: u32,
    padding: u32,
}

impl Figure {
    pub(crate) fn new(
        rows: usize,
        cols: usize,
        panels: Vec<Panel>,
        cell_size: u32,
        padding: u32,
    ) -> Self {
        Self {
            rows,
            cols,
            panels,
            cell_size,
            padding,
        }
    }

    /// Number of grid rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of grid columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// All panels, row-major
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Panel at (row, col)
    pub fn panel(&self, row: usize, col: usize) -> Option<&Panel> {
        self.panels.iter().find(|p| p.row == row && p.col == col)
    }

    /// Panel titles, row-major
    pub fn titles(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.title()).collect()
    }

    /// Canvas size in pixels as (width, height)
    pub fn canvas_size(&self) -> (u32, u32) {
        let span = |n: usize| n as u32 * self.cell_size + (n as u32 + 1) * self.padding;
        (span(self.cols), span(self.rows))
    }

    /// Draw every panel onto one canvas.
    ///
    /// Each panel is scaled (nearest neighbour, aspect kept) to fit its cell
    /// and centred in it; the background is white.
    pub fn compose(&self) -> RgbaImage {
        let (width, height) = self.canvas_size();
        let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);
        let step = self.cell_size + self.padding;

        for panel in &self.panels {
            let placed = panel.placed(self.cell_size);
            let x = self.padding + panel.col as u32 * step + (self.cell_size - placed.width()) / 2;
            let y = self.padding + panel.row as u32 * step + (self.cell_size - placed.height()) / 2;
            imageops::overlay(&mut canvas, &placed, x as i64, y as i64);
        }

        canvas
    }

    /// Compose and encode as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(self.compose())
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .map_err(|e| Error::Image(e.to_string()))?;
        Ok(buf)
    }

    /// Compose and write as PNG
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.compose()
            .save_with_format(path.as_ref(), ImageFormat::Png)
            .map_err(|e| Error::Image(format!("{}: {}", path.as_ref().display(), e)))
    }
}

/// Scale `img` to the largest size fitting `max_w × max_h`, keeping aspect.
fn fit(img: &RgbaImage, max_w: u32, max_h: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return img.clone();
    }
    let scale = (max_w as f64 / w as f64).min(max_h as f64 / h as f64);
    let nw = ((w as f64 * scale).round() as u32).clamp(1, max_w.max(1));
    let nh = ((h as f64 * scale).round() as u32).clamp(1, max_h.max(1));
    imageops::resize(img, nw, nh, FilterType::Nearest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, c: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(c))
    }

    fn panel(row: usize, col: usize, pixels: RgbaImage) -> Panel {
        Panel {
            row,
            col,
            title: format!("{row},{col}"),
            kind: PanelKind::GroundTruth,
            pixels,
            inset: None,
        }
    }

    #[test]
    fn inset_box_sits_top_right() {
        let (left, top, w, h) = InsetBounds::default().to_pixels(100, 100);
        assert_eq!((left, top, w, h), (65, 5, 30, 30));
    }

    #[test]
    fn fit_keeps_aspect() {
        let out = fit(&solid(20, 10, [0, 0, 0, 255]), 100, 100);
        assert_eq!(out.dimensions(), (100, 50));
    }

    #[test]
    fn compose_places_cells_with_padding() {
        let fig = Figure::new(
            1,
            2,
            vec![
                panel(0, 0, solid(4, 4, [255, 0, 0, 255])),
                panel(0, 1, solid(4, 4, [0, 0, 255, 255])),
            ],
            10,
            2,
        );
        let canvas = fig.compose();
        assert_eq!(canvas.dimensions(), (26, 14));
        assert_eq!(canvas.get_pixel(0, 0), &BACKGROUND);
        assert_eq!(canvas.get_pixel(2, 2), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(14, 2), &Rgba([0, 0, 255, 255]));
        assert_eq!(canvas.get_pixel(13, 2), &BACKGROUND);
    }

    #[test]
    fn inset_is_drawn_over_panel() {
        let mut p = panel(0, 0, solid(10, 10, [0, 0, 0, 255]));
        p.inset = Some(Inset {
            title: "NDVI".to_string(),
            bounds: InsetBounds::default(),
            pixels: solid(2, 2, [0, 255, 0, 255]),
        });
        let placed = p.placed(100);
        assert_eq!(placed.get_pixel(80, 20), &Rgba([0, 255, 0, 255]));
        assert_eq!(placed.get_pixel(10, 80), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn encode_png_has_signature() {
        let fig = Figure::new(1, 1, vec![panel(0, 0, solid(3, 3, [1, 2, 3, 255]))], 8, 1);
        let png = fig.encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
