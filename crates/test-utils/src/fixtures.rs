//! Contour tile fixtures.
//!
//! Real contour tiles are small line drawings. For tests it is more useful
//! for every tile to be a solid color that encodes its configuration code,
//! so the code drawn into any output block can be read straight back.

use std::path::{Path, PathBuf};

use contour_common::{write_ppm, ContourResult, Rgb, RgbImage};
use tempfile::TempDir;

/// Solid color used for the tile of configuration `code`.
///
/// Distinct for every code in `0..16`.
pub fn tile_color(code: u8) -> Rgb {
    Rgb::new(code * 16, 255 - code * 16, 100 + code)
}

/// Configuration code whose tile has `color`, if any.
pub fn code_for_color(color: Rgb) -> Option<u8> {
    (0..16u8).find(|&code| tile_color(code) == color)
}

/// The 16 solid tiles, indexed by configuration code.
pub fn tile_images(step_x: usize, step_y: usize) -> Vec<RgbImage> {
    (0..16u8)
        .map(|code| RgbImage::filled(step_x, step_y, tile_color(code)))
        .collect()
}

/// Write `tiles` as `{dir}/0.ppm` .. `{dir}/N.ppm`.
pub fn write_tiles(dir: &Path, tiles: &[RgbImage]) -> ContourResult<()> {
    for (code, tile) in tiles.iter().enumerate() {
        write_ppm(tile, dir.join(format!("{}.ppm", code)))?;
    }
    Ok(())
}

/// Temporary directory holding a solid tile set; removed on drop.
pub struct TileDir {
    dir: TempDir,
}

impl TileDir {
    /// Create a directory with the 16 solid tiles of size `step_x x step_y`.
    ///
    /// # Panics
    /// If the directory or any tile cannot be written.
    pub fn new(step_x: usize, step_y: usize) -> Self {
        let dir = tempfile::tempdir().expect("create temp tile dir");
        write_tiles(dir.path(), &tile_images(step_x, step_y)).expect("write tile fixtures");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the tile for `code`.
    pub fn tile_path(&self, code: u8) -> PathBuf {
        self.dir.path().join(format!("{}.ppm", code))
    }
}
