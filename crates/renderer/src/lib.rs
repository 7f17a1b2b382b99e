//! Parallel marching-squares contour rendering.
//!
//! Pipeline stages:
//! - Bicubic resampling of oversized input (`interpolation`)
//! - Luminance thresholding into an occupancy grid (`occupancy`)
//! - Per-cell configuration codes and contour tile compositing (`contour`)
//! - Fixed worker pool with barrier-separated phases (`pipeline`)

pub mod config;
pub mod contour;
pub mod interpolation;
pub mod occupancy;
pub mod partition;
pub mod pipeline;
mod shared;
pub mod tiles;

pub use config::PipelineConfig;
pub use partition::{WorkerRange, WorkerRanges};
pub use pipeline::{ContourOutput, ContourPipeline};
pub use tiles::TileSet;
