//! Configuration for the contour pipeline.

use std::path::{Path, PathBuf};

use contour_common::{ContourError, ContourResult};
use serde::{Deserialize, Serialize};

use crate::occupancy::SIGMA;

/// Default sampling step in pixels (both axes)
pub const DEFAULT_STEP: usize = 8;

/// Images larger than this in either dimension are resampled
pub const RESCALE_WIDTH: usize = 2048;
pub const RESCALE_HEIGHT: usize = 2048;

/// Configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Grid sampling step along x; must match the contour tile width.
    pub step_x: usize,

    /// Grid sampling step along y; must match the contour tile height.
    pub step_y: usize,

    /// Luminance threshold; samples at or below it are inside the contour.
    pub sigma: u8,

    /// Resample target width, also the width limit that triggers resampling.
    pub rescale_width: usize,

    /// Resample target height, also the height limit that triggers resampling.
    pub rescale_height: usize,

    /// Directory holding `0.ppm` .. `15.ppm`.
    pub tiles_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            step_x: DEFAULT_STEP,
            step_y: DEFAULT_STEP,
            sigma: SIGMA,
            rescale_width: RESCALE_WIDTH,
            rescale_height: RESCALE_HEIGHT,
            tiles_dir: PathBuf::from("./contours"),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a YAML file. Missing keys keep their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ContourResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ContourError::io(path, e))?;
        Self::from_yaml_str(&text)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> ContourResult<Self> {
        serde_yaml::from_str(text).map_err(|e| ContourError::config(e.to_string()))
    }

    /// Load configuration from environment variables on top of the defaults.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment variable overrides.
    ///
    /// Unparseable values are ignored, the same as unset ones.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(step) = env_parse::<usize>("CONTOUR_STEP") {
            self.step_x = step;
            self.step_y = step;
        }

        if let Some(step) = env_parse("CONTOUR_STEP_X") {
            self.step_x = step;
        }

        if let Some(step) = env_parse("CONTOUR_STEP_Y") {
            self.step_y = step;
        }

        if let Some(sigma) = env_parse("CONTOUR_SIGMA") {
            self.sigma = sigma;
        }

        if let Some(width) = env_parse("CONTOUR_RESCALE_WIDTH") {
            self.rescale_width = width;
        }

        if let Some(height) = env_parse("CONTOUR_RESCALE_HEIGHT") {
            self.rescale_height = height;
        }

        if let Ok(dir) = std::env::var("CONTOUR_TILES_DIR") {
            self.tiles_dir = PathBuf::from(dir);
        }

        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ContourResult<()> {
        if self.step_x == 0 || self.step_y == 0 {
            return Err(ContourError::config("step_x and step_y must be > 0"));
        }

        if self.rescale_width == 0 || self.rescale_height == 0 {
            return Err(ContourError::config(
                "rescale_width and rescale_height must be > 0",
            ));
        }

        Ok(())
    }

    /// Whether an image of this size must be resampled before contouring.
    pub fn needs_rescale(&self, width: usize, height: usize) -> bool {
        width > self.rescale_width || height > self.rescale_height
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.parse().ok()
}
