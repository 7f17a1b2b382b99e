//! The 16 contour tiles, one per marching-squares configuration.
//!
//! Tiles live in a directory as `0.ppm` through `15.ppm`; the file name is the
//! configuration code the tile is drawn for.

use std::path::Path;

use contour_common::{read_ppm, ContourError, ContourResult, RgbImage};
use rayon::prelude::*;

/// Number of marching-squares configurations
pub const CONTOUR_CONFIG_COUNT: usize = 16;

/// Immutable set of contour tiles, all the same size.
#[derive(Debug, Clone)]
pub struct TileSet {
    tiles: Vec<RgbImage>,
    width: usize,
    height: usize,
}

impl TileSet {
    /// Load `{dir}/0.ppm` .. `{dir}/15.ppm` and check each is `step_x x step_y`.
    pub fn load(dir: impl AsRef<Path>, step_x: usize, step_y: usize) -> ContourResult<Self> {
        let dir = dir.as_ref();

        let tiles = (0..CONTOUR_CONFIG_COUNT)
            .into_par_iter()
            .map(|code| {
                let path = dir.join(format!("{}.ppm", code));
                read_ppm(&path).map_err(|e| match e {
                    ContourError::Io { .. } => ContourError::tile_set(format!(
                        "missing contour tile {}: {}",
                        code, e
                    )),
                    other => other,
                })
            })
            .collect::<ContourResult<Vec<_>>>()?;

        let set = Self::from_tiles(tiles)?;
        if set.width != step_x || set.height != step_y {
            return Err(ContourError::tile_set(format!(
                "tiles are {}x{}, grid step is {}x{}",
                set.width, set.height, step_x, step_y
            )));
        }

        tracing::debug!(
            dir = %dir.display(),
            tile_width = set.width,
            tile_height = set.height,
            "Loaded contour tiles"
        );

        Ok(set)
    }

    /// Build a set from 16 in-memory tiles indexed by configuration code.
    pub fn from_tiles(tiles: Vec<RgbImage>) -> ContourResult<Self> {
        if tiles.len() != CONTOUR_CONFIG_COUNT {
            return Err(ContourError::tile_set(format!(
                "expected {} tiles, got {}",
                CONTOUR_CONFIG_COUNT,
                tiles.len()
            )));
        }

        let width = tiles[0].width();
        let height = tiles[0].height();
        if width == 0 || height == 0 {
            return Err(ContourError::tile_set("tiles must not be empty"));
        }
        if let Some((code, tile)) = tiles
            .iter()
            .enumerate()
            .find(|(_, t)| t.width() != width || t.height() != height)
        {
            return Err(ContourError::tile_set(format!(
                "tile {} is {}x{}, expected {}x{}",
                code,
                tile.width(),
                tile.height(),
                width,
                height
            )));
        }

        Ok(Self {
            tiles,
            width,
            height,
        })
    }

    /// Tile for configuration `code`.
    ///
    /// # Panics
    /// If `code >= 16`.
    #[inline]
    pub fn tile(&self, code: u8) -> &RgbImage {
        &self.tiles[code as usize]
    }

    pub fn tile_width(&self) -> usize {
        self.width
    }

    pub fn tile_height(&self) -> usize {
        self.height
    }
}
