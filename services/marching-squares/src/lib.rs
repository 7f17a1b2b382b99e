//! Marching-squares contour extraction command.
//!
//! Reads a PPM image, draws the contour tile of every grid cell using a fixed
//! pool of worker threads, and writes the result back out as PPM.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use contour_common::{read_ppm, write_ppm};
use renderer::{ContourOutput, ContourPipeline, PipelineConfig, TileSet};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "marching-squares")]
#[command(about = "Extract iso-contours from a PPM image with marching squares")]
pub struct Args {
    /// Input PPM (P6, 8-bit) image
    pub input: PathBuf,

    /// Output PPM image
    pub output: PathBuf,

    /// Number of worker threads
    pub threads: NonZeroUsize,

    /// Directory holding the contour tiles 0.ppm .. 15.ppm
    #[arg(long, env = "CONTOUR_TILES_DIR")]
    pub tiles_dir: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Grid sampling step (both axes); must match the tile size
    #[arg(long)]
    pub step: Option<usize>,

    /// Luminance threshold (0-255)
    #[arg(long)]
    pub sigma: Option<u8>,

    /// Log level
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

/// Resolve configuration: defaults, then the YAML file, then environment
/// variables, then command-line flags.
pub fn load_config(args: &Args) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?
            .with_env_overrides(),
        None => PipelineConfig::from_env(),
    };

    if let Some(step) = args.step {
        config.step_x = step;
        config.step_y = step;
    }
    if let Some(sigma) = args.sigma {
        config.sigma = sigma;
    }
    if let Some(dir) = &args.tiles_dir {
        config.tiles_dir = dir.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Load inputs, run the pipeline and write the output image.
pub fn run(args: &Args) -> Result<ContourOutput> {
    let config = load_config(args)?;

    let image = read_ppm(&args.input).map_err(|e| {
        let reason = if e.is_format_error() {
            "not an 8-bit binary PPM image"
        } else {
            "could not be read"
        };
        anyhow::Error::new(e).context(format!(
            "Failed to load input '{}': {}",
            args.input.display(),
            reason
        ))
    })?;
    info!(
        path = %args.input.display(),
        width = image.width(),
        height = image.height(),
        "Loaded input image"
    );

    let tiles = TileSet::load(&config.tiles_dir, config.step_x, config.step_y).with_context(|| {
        format!(
            "Failed to load contour tiles from '{}'",
            config.tiles_dir.display()
        )
    })?;

    let output = ContourPipeline::new(&config, &tiles).run(image, args.threads.get())?;

    write_ppm(&output.image, &args.output)
        .with_context(|| format!("Failed to write output '{}'", args.output.display()))?;
    info!(
        path = %args.output.display(),
        width = output.image.width(),
        height = output.image.height(),
        resampled = output.resampled,
        elapsed_ms = output.elapsed.as_millis() as u64,
        "Wrote contour image"
    );

    Ok(output)
}
