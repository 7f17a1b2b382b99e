//! Tests for configuration codes and tile compositing.

use contour_common::{GridDims, OccupancyGrid, Rgb, RgbImage};
use renderer::contour::{cell_code, code_histogram, composite, config_code, tile_writes};
use renderer::tiles::TileSet;
use test_utils::{code_for_color, tile_color, tile_images};

// ============================================================================
// Helper functions
// ============================================================================

/// 1x1 interior grid with the given corners set
fn single_cell_grid(corners: &[(usize, usize)]) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(GridDims::for_image(1, 1, 1, 1));
    for &(x, y) in corners {
        grid.set(x, y, 1);
    }
    grid
}

// ============================================================================
// Configuration code tests
// ============================================================================

#[test]
fn test_code_all_corners_clear() {
    assert_eq!(cell_code(&single_cell_grid(&[]), 0, 0), 0);
}

#[test]
fn test_code_all_corners_set() {
    let grid = single_cell_grid(&[(0, 0), (0, 1), (1, 1), (1, 0)]);
    assert_eq!(cell_code(&grid, 0, 0), 15);
}

#[test]
fn test_code_single_corner_bits() {
    // top-left = 8, top-right = 4, bottom-right = 2, bottom-left = 1
    assert_eq!(cell_code(&single_cell_grid(&[(0, 0)]), 0, 0), 8);
    assert_eq!(cell_code(&single_cell_grid(&[(0, 1)]), 0, 0), 4);
    assert_eq!(cell_code(&single_cell_grid(&[(1, 1)]), 0, 0), 2);
    assert_eq!(cell_code(&single_cell_grid(&[(1, 0)]), 0, 0), 1);
}

#[test]
fn test_code_every_combination() {
    let corners = [(0, 0), (0, 1), (1, 1), (1, 0)];
    for code in 0..16u8 {
        let set: Vec<_> = corners
            .iter()
            .enumerate()
            .filter(|(bit, _)| code & (8 >> bit) != 0)
            .map(|(_, &c)| c)
            .collect();
        let grid = single_cell_grid(&set);
        assert_eq!(config_code(grid.cells(), grid.dims(), 0, 0), code);
    }
}

#[test]
fn test_histogram_counts_interior_cells() {
    let dims = GridDims::for_image(3, 2, 1, 1);
    let grid = OccupancyGrid::new(dims);
    let hist = code_histogram(&grid);
    assert_eq!(hist[0], 6);
    assert_eq!(hist.iter().sum::<usize>(), dims.interior_count());
}

// ============================================================================
// Compositing tests
// ============================================================================

#[test]
fn test_tile_writes_cover_block() {
    let tile = RgbImage::filled(3, 2, Rgb::new(1, 2, 3));
    let writes: Vec<_> = tile_writes(&tile, 3, 4, 8).map(|(idx, _)| idx).collect();
    let expected: Vec<_> = (3..6)
        .flat_map(|x| (4..6).map(move |y| x * 8 + y))
        .collect();
    assert_eq!(writes, expected);
}

#[test]
fn test_tile_copied_without_blending() {
    let mut tiles = tile_images(2, 2);
    tiles[0] = RgbImage::from_fn(2, 2, |i, j| Rgb::new(10 * i as u8, 10 * j as u8, 77));
    let tiles = TileSet::from_tiles(tiles).unwrap();

    let mut image = RgbImage::filled(4, 4, Rgb::WHITE);
    let grid = OccupancyGrid::new(GridDims::for_image(4, 4, 2, 2));
    composite(&mut image, &grid, &tiles);

    for bx in 0..2 {
        for by in 0..2 {
            assert_eq!(image.get(bx * 2 + 1, by * 2), Rgb::new(10, 0, 77));
            assert_eq!(image.get(bx * 2, by * 2 + 1), Rgb::new(0, 10, 77));
        }
    }
}

#[test]
fn test_composite_picks_tile_per_cell() {
    let dims = GridDims::for_image(4, 4, 2, 2);
    let mut grid = OccupancyGrid::new(dims);
    // Cell (0, 0): only bottom-right corner (1, 1) set -> 2
    // Cell (1, 1): only top-left corner (1, 1) set -> 8
    // Cell (0, 1): corner (1, 1) is its bottom-left -> 1
    // Cell (1, 0): corner (1, 1) is its top-right -> 4
    grid.set(1, 1, 1);

    let tiles = TileSet::from_tiles(tile_images(2, 2)).unwrap();
    let mut image = RgbImage::new(4, 4);
    composite(&mut image, &grid, &tiles);

    assert_eq!(code_for_color(image.get(0, 0)), Some(2));
    assert_eq!(code_for_color(image.get(2, 2)), Some(8));
    assert_eq!(code_for_color(image.get(1, 3)), Some(1));
    assert_eq!(code_for_color(image.get(3, 0)), Some(4));
}

#[test]
fn test_composite_leaves_remainder_untouched() {
    // 5x5 image with step 2 only covers the top-left 4x4
    let tiles = TileSet::from_tiles(tile_images(2, 2)).unwrap();
    let grid = OccupancyGrid::new(GridDims::for_image(5, 5, 2, 2));
    let mut image = RgbImage::filled(5, 5, Rgb::WHITE);
    composite(&mut image, &grid, &tiles);

    assert_eq!(image.get(3, 3), tile_color(0));
    assert_eq!(image.get(4, 0), Rgb::WHITE);
    assert_eq!(image.get(0, 4), Rgb::WHITE);
}
