//! Common types shared by the contour renderer and its command-line front end.

pub mod error;
pub mod grid;
pub mod image;
pub mod ppm;

pub use error::{ContourError, ContourResult};
pub use grid::{GridDims, OccupancyGrid};
pub use image::{RasterView, Rgb, RgbImage};
pub use ppm::{decode_ppm, encode_ppm, read_ppm, write_ppm};
