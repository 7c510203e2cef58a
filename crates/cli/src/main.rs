//! satviz CLI - render satellite imagery batches as panel grids

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::Array3;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use satviz_algorithms::imagery::{append_ndvi, threshold, NdviParams};
use satviz_colormap::ColorScheme;
use satviz_core::io::read_bands;
use satviz_core::{Batch, Raster};
use satviz_render::{render, RenderParams};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "satviz")]
#[command(author, version, about = "Render satellite imagery, masks and predictions as a grid", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show bands, dimensions and per-band statistics of a TIFF
    Info {
        /// Input TIFF file
        input: PathBuf,
    },
    /// Render images (and optional masks / predictions) to a PNG grid
    Render {
        /// Image files, one multi-band TIFF per batch item
        #[arg(long, required = true, num_args = 1..)]
        images: Vec<PathBuf>,
        /// Ground-truth mask files, one per image
        #[arg(long, num_args = 1..)]
        masks: Vec<PathBuf>,
        /// Prediction files, one per image
        #[arg(long, num_args = 1..)]
        predictions: Vec<PathBuf>,
        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,
        /// Maximum number of rows
        #[arg(short = 'n', long, default_value = "4")]
        max_images: usize,
        /// Compute NDVI from --red/--nir and append it as a channel
        #[arg(long)]
        append_ndvi: bool,
        /// Red band index used with --append-ndvi
        #[arg(long, default_value = "0")]
        red: usize,
        /// NIR band index used with --append-ndvi
        #[arg(long, default_value = "3")]
        nir: usize,
        /// Binarize predictions at this cutoff
        #[arg(short, long)]
        threshold: Option<f64>,
        /// Cell edge length in pixels
        #[arg(long, default_value = "256")]
        cell_size: u32,
        /// Prediction colormap: gray, viridis, rdylgn
        #[arg(long, default_value = "viridis")]
        prediction_scheme: String,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_item(path: &Path) -> Result<Array3<f64>> {
    read_bands(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Read one file per item and stack them; `None` when no files were given.
fn read_batch(paths: &[PathBuf], what: &str) -> Result<Option<Batch>> {
    if paths.is_empty() {
        return Ok(None);
    }
    let pb = spinner(&format!("Reading {}...", what));
    let items = paths
        .iter()
        .map(|p| read_item(p))
        .collect::<Result<Vec<_>>>()?;
    pb.finish_and_clear();

    let views: Vec<_> = items.iter().map(|a| a.view()).collect();
    let batch = Batch::from_items(&views).with_context(|| format!("Failed to stack {}", what))?;
    let (n, c, h, w) = batch.shape();
    info!("{}: {} item(s), {} band(s), {} x {}", what, n, c, w, h);
    Ok(Some(batch))
}

fn done(name: &str, path: &Path, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Info { input } => {
            let bands = read_item(&input)?;
            let (count, rows, cols) = bands.dim();

            println!("File: {}", input.display());
            println!("Dimensions: {} x {} ({} cells)", cols, rows, rows * cols);
            println!("Bands: {}", count);

            for (b, band) in bands.outer_iter().enumerate() {
                let stats = Raster::from_array(band.to_owned()).statistics();
                println!("\nBand {}:", b);
                if let (Some(min), Some(max)) = (stats.min, stats.max) {
                    println!("  Min: {:.4}", min);
                    println!("  Max: {:.4}", max);
                }
                if let Some(mean) = stats.mean {
                    println!("  Mean: {:.4}", mean);
                }
                println!(
                    "  Valid cells: {} ({:.1}%)",
                    stats.valid_count,
                    100.0 * stats.valid_count as f64 / (rows * cols).max(1) as f64
                );
            }
        }

        Commands::Render {
            images,
            masks,
            predictions,
            output,
            max_images,
            append_ndvi: with_ndvi,
            red,
            nir,
            threshold: cutoff,
            cell_size,
            prediction_scheme,
        } => {
            let prediction_scheme: ColorScheme = prediction_scheme
                .parse()
                .context("Invalid prediction colormap")?;

            let mut image_batch =
                read_batch(&images, "images")?.context("At least one image is required")?;
            if with_ndvi {
                image_batch = append_ndvi(&image_batch, NdviParams { red, nir })
                    .context("Failed to append NDVI")?;
            }
            let mask_batch = read_batch(&masks, "masks")?;
            let mut prediction_batch = read_batch(&predictions, "predictions")?;
            if let (Some(batch), Some(cutoff)) = (prediction_batch.as_mut(), cutoff) {
                *batch = threshold(batch, cutoff);
            }

            let params = RenderParams {
                max_images,
                cell_size,
                prediction_scheme,
                ..RenderParams::default()
            };

            let start = Instant::now();
            let pb = spinner("Rendering...");
            let figure = render(
                &image_batch,
                mask_batch.as_ref(),
                prediction_batch.as_ref(),
                &params,
            )
            .context("Failed to render figure")?;
            figure.save_png(&output).context("Failed to write output")?;
            pb.finish_and_clear();
            let elapsed = start.elapsed();

            println!("Grid: {} row(s) x {} column(s)", figure.rows(), figure.cols());
            for panel in figure.panels() {
                let inset = panel
                    .inset()
                    .map(|i| format!(" + {}", i.title()))
                    .unwrap_or_default();
                println!("  [{}, {}] {}{}", panel.row(), panel.col(), panel.title(), inset);
            }
            done("Figure", &output, elapsed);
        }
    }

    Ok(())
}
