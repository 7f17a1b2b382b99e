//! Occupancy grid for marching squares.

/// Grid geometry derived from an image size and a sampling step.
///
/// `cols = width / step_x` and `rows = height / step_y` count the interior
/// cells. The grid itself stores one extra column and row for the boundary
/// samples, so it holds `(cols + 1) * (rows + 1)` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
    /// Interior cells along x (P)
    pub cols: usize,
    /// Interior cells along y (Q)
    pub rows: usize,
    pub step_x: usize,
    pub step_y: usize,
}

impl GridDims {
    /// Geometry for an image of `width x height` sampled every `step_x`/`step_y`.
    ///
    /// # Panics
    /// If a step is zero.
    pub fn for_image(width: usize, height: usize, step_x: usize, step_y: usize) -> Self {
        assert!(step_x > 0 && step_y > 0, "grid step must be non-zero");
        Self {
            cols: width / step_x,
            rows: height / step_y,
            step_x,
            step_y,
        }
    }

    /// Number of interior cells (`P * Q`).
    pub fn interior_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Number of stored cells including the boundary row and column.
    pub fn cell_count(&self) -> usize {
        (self.cols + 1) * (self.rows + 1)
    }

    /// Flat index of cell `(x, y)`, `x` in `0..=cols`, `y` in `0..=rows`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x * (self.rows + 1) + y
    }

    /// Interior cell coordinates for a grid-linear index in `0..interior_count()`.
    #[inline]
    pub fn interior_cell(&self, linear: usize) -> (usize, usize) {
        (linear / self.rows, linear % self.rows)
    }

    /// Flat index of the fixed sentinel corner `(cols, rows)`.
    pub fn corner_index(&self) -> usize {
        self.index(self.cols, self.rows)
    }
}

/// Binary `(P+1) x (Q+1)` matrix stored as one flat buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    dims: GridDims,
    cells: Vec<u8>,
}

impl OccupancyGrid {
    /// Grid with every cell cleared.
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            cells: vec![0; dims.cell_count()],
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[self.dims.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        let idx = self.dims.index(x, y);
        self.cells[idx] = value;
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Number of cells set to 1.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dims_for_image() {
        let dims = GridDims::for_image(10, 10, 2, 2);
        assert_eq!(dims.cols, 5);
        assert_eq!(dims.rows, 5);
        assert_eq!(dims.interior_count(), 25);
        assert_eq!(dims.cell_count(), 36);
        assert_eq!(dims.corner_index(), 35);
    }

    #[test]
    fn test_dims_truncate() {
        let dims = GridDims::for_image(17, 9, 8, 4);
        assert_eq!((dims.cols, dims.rows), (2, 2));
    }

    #[test]
    fn test_interior_cell_roundtrip() {
        let dims = GridDims::for_image(24, 16, 8, 8);
        for linear in 0..dims.interior_count() {
            let (x, y) = dims.interior_cell(linear);
            assert!(x < dims.cols && y < dims.rows);
            assert_eq!(x * dims.rows + y, linear);
        }
    }

    #[test]
    fn test_grid_set_get() {
        let mut grid = OccupancyGrid::new(GridDims::for_image(8, 8, 4, 4));
        grid.set(2, 1, 1);
        assert_eq!(grid.get(2, 1), 1);
        assert_eq!(grid.get(1, 2), 0);
        assert_eq!(grid.occupied(), 1);
    }
}
