//! Step 1 of marching squares: sampling the image into a binary grid.
//!
//! Sample points are taken every `step_x`/`step_y` pixels. A point is
//! "inside" (1) when its average luminance is at most `sigma`, and "outside"
//! (0) otherwise.
//!
//! The last grid column and row have no pixel at their nominal position, so
//! they are sampled from the image edge instead:
//! - bottom row `(i, Q)` reads linear pixel `i * step_x * H + (W - 1)`
//! - right column `(P, i)` reads linear pixel `(W - 1) * H + i * step_y`
//! - the corner `(P, Q)` is never sampled and is always 0
//!
//! Each pass yields `(cell_index, value)` pairs rather than writing directly,
//! so the sequential builder and the parallel workers share the same code.

use contour_common::{GridDims, OccupancyGrid, RasterView, Rgb};

use crate::partition::WorkerRange;

/// Default luminance threshold
pub const SIGMA: u8 = 200;

/// Classify one sample point.
#[inline]
pub fn classify(pixel: Rgb, sigma: u8) -> u8 {
    if pixel.luminance() > sigma {
        0
    } else {
        1
    }
}

/// Interior cells `(x, y)` for the grid-linear indices in `range`.
pub fn interior_cells<'a>(
    image: RasterView<'a>,
    dims: GridDims,
    sigma: u8,
    range: WorkerRange,
) -> impl Iterator<Item = (usize, u8)> + 'a {
    range.into_iter().map(move |linear| {
        let (x, y) = dims.interior_cell(linear);
        let pixel = image.get(x * dims.step_x, y * dims.step_y);
        (dims.index(x, y), classify(pixel, sigma))
    })
}

/// Bottom boundary cells `(i, Q)` for `i` in `range`.
pub fn boundary_row_cells<'a>(
    image: RasterView<'a>,
    dims: GridDims,
    sigma: u8,
    range: WorkerRange,
) -> impl Iterator<Item = (usize, u8)> + 'a {
    range.into_iter().map(move |i| {
        let linear = i * dims.step_x * image.height() + image.width() - 1;
        (dims.index(i, dims.rows), classify(image.at(linear), sigma))
    })
}

/// Right boundary cells `(P, i)` for `i` in `range`.
pub fn boundary_col_cells<'a>(
    image: RasterView<'a>,
    dims: GridDims,
    sigma: u8,
    range: WorkerRange,
) -> impl Iterator<Item = (usize, u8)> + 'a {
    range.into_iter().map(move |i| {
        let linear = (image.width() - 1) * image.height() + i * dims.step_y;
        (dims.index(dims.cols, i), classify(image.at(linear), sigma))
    })
}

/// Build the full grid on the calling thread.
pub fn build_grid(image: RasterView<'_>, dims: GridDims, sigma: u8) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(dims);
    let cells = grid.cells_mut();

    let whole = |total| WorkerRange::for_worker(0, 1, total);
    let writes = interior_cells(image, dims, sigma, whole(dims.interior_count()))
        .chain(boundary_row_cells(image, dims, sigma, whole(dims.cols)))
        .chain(boundary_col_cells(image, dims, sigma, whole(dims.rows)));
    for (idx, value) in writes {
        cells[idx] = value;
    }
    cells[dims.corner_index()] = 0;

    grid
}
