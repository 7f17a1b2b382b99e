//! Parallel contour pipeline.
//!
//! A fixed number of scoped worker threads run the same three phases, each
//! over its own statically computed index ranges:
//!
//! 1. resample the source into the working image (only for oversized input)
//! 2. sample the working image into the occupancy grid
//! 3. classify each cell and stamp its contour tile onto the working image
//!
//! One shared barrier separates the phases. After the first rendezvous no
//! worker is still writing the working image, so it can be read whole; after
//! the second no worker is still writing the grid. Within a phase, writes
//! never overlap because every worker's range is disjoint from the others.

use std::sync::Barrier;
use std::time::{Duration, Instant};

use contour_common::{
    ContourError, ContourResult, GridDims, OccupancyGrid, RasterView, Rgb, RgbImage,
};

use crate::config::PipelineConfig;
use crate::contour::{code_histogram, composite_writes};
use crate::interpolation::resample_pixel;
use crate::occupancy::{boundary_col_cells, boundary_row_cells, interior_cells};
use crate::partition::WorkerRanges;
use crate::shared::SharedSlice;
use crate::tiles::TileSet;

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct ContourOutput {
    /// Working image with every contour tile drawn
    pub image: RgbImage,
    /// Occupancy grid the contours were derived from
    pub grid: OccupancyGrid,
    /// Whether the input was resampled before contouring
    pub resampled: bool,
    pub elapsed: Duration,
}

/// Marching-squares pipeline bound to a configuration and a tile set.
pub struct ContourPipeline<'a> {
    config: &'a PipelineConfig,
    tiles: &'a TileSet,
}

impl<'a> ContourPipeline<'a> {
    pub fn new(config: &'a PipelineConfig, tiles: &'a TileSet) -> Self {
        Self { config, tiles }
    }

    /// Run the pipeline over `source` with `threads` workers.
    ///
    /// All validation happens before any worker is spawned; once the workers
    /// are running there is no error path.
    pub fn run(&self, source: RgbImage, threads: usize) -> ContourResult<ContourOutput> {
        let started = Instant::now();

        if threads == 0 {
            return Err(ContourError::config("worker count must be > 0"));
        }
        self.config.validate()?;
        // Tiles larger than a cell would overlap a neighbour's block, which
        // another worker may be writing at the same time.
        if self.tiles.tile_width() != self.config.step_x
            || self.tiles.tile_height() != self.config.step_y
        {
            return Err(ContourError::tile_set(format!(
                "tiles are {}x{}, grid step is {}x{}",
                self.tiles.tile_width(),
                self.tiles.tile_height(),
                self.config.step_x,
                self.config.step_y
            )));
        }
        if source.is_empty() {
            return Err(ContourError::invalid_size(format!(
                "cannot contour an empty {}x{} image",
                source.width(),
                source.height()
            )));
        }

        let resampled = self.config.needs_rescale(source.width(), source.height());

        // Without resampling the source becomes the working image as-is
        let (original, mut working) = if resampled {
            let working = RgbImage::new(self.config.rescale_width, self.config.rescale_height);
            (Some(source), working)
        } else {
            (None, source)
        };

        let dims = GridDims::for_image(
            working.width(),
            working.height(),
            self.config.step_x,
            self.config.step_y,
        );
        check_boundary_sampling(&working, dims)?;

        let mut grid = OccupancyGrid::new(dims);

        tracing::info!(
            width = working.width(),
            height = working.height(),
            threads,
            resampled,
            grid_cols = dims.cols,
            grid_rows = dims.rows,
            "Running contour pipeline"
        );

        {
            let width = working.width();
            let height = working.height();
            let pixels = SharedSlice::new(working.pixels_mut());
            let cells = SharedSlice::new(grid.cells_mut());
            let barrier = Barrier::new(threads);

            let shared = SharedState {
                source: original.as_ref().map(RgbImage::view),
                width,
                height,
                pixels,
                dims,
                cells,
                sigma: self.config.sigma,
                tiles: self.tiles,
                barrier: &barrier,
            };

            std::thread::scope(|s| {
                for id in 0..threads {
                    let worker = Worker {
                        id,
                        ranges: WorkerRanges::new(
                            id,
                            threads,
                            width * height,
                            dims.cols,
                            dims.rows,
                        ),
                        shared: &shared,
                    };
                    s.spawn(move || worker.run());
                }
            });
        }

        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!(codes = ?code_histogram(&grid), "Contour configuration histogram");
        }

        let elapsed = started.elapsed();
        tracing::info!(
            elapsed_ms = elapsed.as_millis() as u64,
            occupied = grid.occupied(),
            "Contour pipeline complete"
        );

        Ok(ContourOutput {
            image: working,
            grid,
            resampled,
            elapsed,
        })
    }
}

/// The bottom boundary row reads linear pixel `i * step_x * H + W - 1` for
/// every `i < cols`. Only the last of those reads can leave the buffer.
fn check_boundary_sampling(image: &RgbImage, dims: GridDims) -> ContourResult<()> {
    if dims.cols == 0 {
        return Ok(());
    }
    let last_read = (dims.cols - 1) * dims.step_x * image.height() + image.width() - 1;
    if last_read >= image.len() {
        return Err(ContourError::IncompatibleDimensions {
            width: image.width(),
            height: image.height(),
            step_x: dims.step_x,
            step_y: dims.step_y,
        });
    }
    Ok(())
}

/// Everything the workers share for one run.
struct SharedState<'s> {
    /// Original image, present only when resampling
    source: Option<RasterView<'s>>,
    width: usize,
    height: usize,
    pixels: SharedSlice<'s, Rgb>,
    dims: GridDims,
    cells: SharedSlice<'s, u8>,
    sigma: u8,
    tiles: &'s TileSet,
    barrier: &'s Barrier,
}

struct Worker<'w, 's> {
    id: usize,
    ranges: WorkerRanges,
    shared: &'w SharedState<'s>,
}

impl Worker<'_, '_> {
    fn run(self) {
        let shared = self.shared;
        tracing::debug!(worker = self.id, ranges = ?self.ranges, "Worker started");

        if let Some(source) = shared.source {
            for linear in self.ranges.pixels {
                let px = resample_pixel(source, linear, shared.width, shared.height);
                // SAFETY: pixel ranges are disjoint across workers and nobody
                // reads the working image before the barrier below.
                unsafe { shared.pixels.write(linear, px) };
            }
            tracing::debug!(worker = self.id, pixels = self.ranges.pixels.len(), "Resample phase done");
        }

        shared.barrier.wait();
        self.build_grid();
        tracing::debug!(worker = self.id, cells = self.ranges.cells.len(), "Grid phase done");
        shared.barrier.wait();
        self.composite();

        tracing::debug!(worker = self.id, "Worker finished");
    }

    fn build_grid(&self) {
        let shared = self.shared;
        let dims = shared.dims;
        debug_assert_eq!(shared.cells.len(), dims.cell_count());

        // SAFETY: every resample write happened before the first barrier and
        // the working image is not written again until after the second.
        let image = RasterView::new(shared.width, shared.height, unsafe {
            shared.pixels.as_slice()
        });

        let writes = interior_cells(image, dims, shared.sigma, self.ranges.cells)
            .chain(boundary_row_cells(image, dims, shared.sigma, self.ranges.boundary_row))
            .chain(boundary_col_cells(image, dims, shared.sigma, self.ranges.boundary_col));
        for (idx, value) in writes {
            // SAFETY: the three sub-ranges cover disjoint cells, and each is
            // partitioned disjointly across workers.
            unsafe { shared.cells.write(idx, value) };
        }

        if self.id == 0 {
            // SAFETY: the corner belongs to no sub-range; only worker 0 writes it.
            unsafe { shared.cells.write(dims.corner_index(), 0) };
        }
    }

    fn composite(&self) {
        let shared = self.shared;

        // SAFETY: every grid write happened before the second barrier and the
        // grid is never written again.
        let cells = unsafe { shared.cells.as_slice() };

        for (idx, px) in composite_writes(
            cells,
            shared.dims,
            shared.tiles,
            shared.height,
            self.ranges.cells,
        ) {
            // SAFETY: each cell maps to its own step_x x step_y block and the
            // cell ranges are disjoint, so no pixel is written twice.
            unsafe { shared.pixels.write(idx, px) };
        }
    }
}
