//! Error types for contour extraction.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using ContourError.
pub type ContourResult<T> = Result<T, ContourError>;

/// Primary error type for loading, validating and rendering contours.
#[derive(Debug, Error)]
pub enum ContourError {
    // === Resource Errors ===
    #[error("Unable to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format Errors ===
    #[error("Invalid image format: {0}")]
    InvalidFormat(String),

    #[error("Invalid image size: {0}")]
    InvalidSize(String),

    #[error("Unsupported channel depth {0} (expected 8-bit components, maxval 255)")]
    UnsupportedDepth(u32),

    #[error("Truncated pixel data: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    // === Pipeline Errors ===
    #[error("Contour tile set error: {0}")]
    TileSet(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(
        "Image {width}x{height} cannot be sampled with step {step_x}x{step_y}"
    )]
    IncompatibleDimensions {
        width: usize,
        height: usize,
        step_x: usize,
        step_y: usize,
    },
}

impl ContourError {
    /// Create an Io error tagged with the path that failed.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an InvalidFormat error.
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    /// Create an InvalidSize error.
    pub fn invalid_size(msg: impl Into<String>) -> Self {
        Self::InvalidSize(msg.into())
    }

    /// Create a TileSet error.
    pub fn tile_set(msg: impl Into<String>) -> Self {
        Self::TileSet(msg.into())
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error came from malformed input rather than the environment.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            ContourError::InvalidFormat(_)
                | ContourError::InvalidSize(_)
                | ContourError::UnsupportedDepth(_)
                | ContourError::Truncated { .. }
        )
    }
}
