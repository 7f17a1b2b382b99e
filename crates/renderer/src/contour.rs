//! Step 2 of marching squares: classifying cells and drawing contour tiles.
//!
//! Each interior cell is described by its four grid corners, packed into a
//! 4-bit configuration code:
//!
//! ```text
//!   (x, y) ---- (x, y+1)        8 ---- 4
//!     |            |            |      |
//!   (x+1, y) -- (x+1, y+1)      1 ---- 2
//! ```
//!
//! The code selects one of the 16 contour tiles, which is copied verbatim
//! over the cell's `step_x x step_y` block of the output image.

use contour_common::{GridDims, OccupancyGrid, Rgb, RgbImage};

use crate::partition::WorkerRange;
use crate::tiles::TileSet;

/// Corner weights in code order: top-left, top-right, bottom-right, bottom-left
pub const CORNER_WEIGHTS: [u8; 4] = [8, 4, 2, 1];

/// Configuration code of interior cell `(x, y)` from raw grid cells.
#[inline]
pub fn config_code(cells: &[u8], dims: GridDims, x: usize, y: usize) -> u8 {
    let top_left = cells[dims.index(x, y)];
    let top_right = cells[dims.index(x, y + 1)];
    let bottom_right = cells[dims.index(x + 1, y + 1)];
    let bottom_left = cells[dims.index(x + 1, y)];

    CORNER_WEIGHTS[0] * top_left
        + CORNER_WEIGHTS[1] * top_right
        + CORNER_WEIGHTS[2] * bottom_right
        + CORNER_WEIGHTS[3] * bottom_left
}

/// Configuration code of interior cell `(x, y)` of an owned grid.
pub fn cell_code(grid: &OccupancyGrid, x: usize, y: usize) -> u8 {
    config_code(grid.cells(), grid.dims(), x, y)
}

/// Pixel writes that stamp `tile` onto an image of height `dst_height` with
/// its top-left pixel at `(origin_x, origin_y)`.
///
/// Yields `(linear_index, pixel)` pairs in the destination's indexing.
pub fn tile_writes<'a>(
    tile: &'a RgbImage,
    origin_x: usize,
    origin_y: usize,
    dst_height: usize,
) -> impl Iterator<Item = (usize, Rgb)> + 'a {
    (0..tile.width()).flat_map(move |i| {
        (0..tile.height()).map(move |j| {
            let dst = (origin_x + i) * dst_height + origin_y + j;
            (dst, tile.get(i, j))
        })
    })
}

/// All pixel writes for the interior cells in `range`.
pub fn composite_writes<'a>(
    cells: &'a [u8],
    dims: GridDims,
    tiles: &'a TileSet,
    dst_height: usize,
    range: WorkerRange,
) -> impl Iterator<Item = (usize, Rgb)> + 'a {
    range.into_iter().flat_map(move |linear| {
        let (x, y) = dims.interior_cell(linear);
        let code = config_code(cells, dims, x, y);
        tile_writes(
            tiles.tile(code),
            x * dims.step_x,
            y * dims.step_y,
            dst_height,
        )
    })
}

/// Composite every interior cell onto `image` on the calling thread.
pub fn composite(image: &mut RgbImage, grid: &OccupancyGrid, tiles: &TileSet) {
    let dims = grid.dims();
    let height = image.height();
    let range = WorkerRange::for_worker(0, 1, dims.interior_count());
    let pixels = image.pixels_mut();
    for (idx, px) in composite_writes(grid.cells(), dims, tiles, height, range) {
        pixels[idx] = px;
    }
}

/// Histogram of configuration codes over all interior cells.
pub fn code_histogram(grid: &OccupancyGrid) -> [usize; 16] {
    let dims = grid.dims();
    let mut counts = [0usize; 16];
    for linear in 0..dims.interior_count() {
        let (x, y) = dims.interior_cell(linear);
        counts[cell_code(grid, x, y) as usize] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_writes_positions() {
        let tile = RgbImage::from_fn(2, 2, |i, j| Rgb::new(i as u8, j as u8, 7));
        let writes: Vec<_> = tile_writes(&tile, 2, 4, 10).collect();
        assert_eq!(
            writes,
            vec![
                (24, Rgb::new(0, 0, 7)),
                (25, Rgb::new(0, 1, 7)),
                (34, Rgb::new(1, 0, 7)),
                (35, Rgb::new(1, 1, 7)),
            ]
        );
    }

    #[test]
    fn test_code_uses_all_corners() {
        let dims = GridDims::for_image(2, 2, 1, 1);
        let mut grid = OccupancyGrid::new(dims);
        for (x, y) in [(0, 0), (0, 1), (1, 1), (1, 0)] {
            grid.set(x, y, 1);
        }
        assert_eq!(cell_code(&grid, 0, 0), 15);
        // Only its top-left corner (1, 1) is set
        assert_eq!(cell_code(&grid, 1, 1), 8);
    }
}
