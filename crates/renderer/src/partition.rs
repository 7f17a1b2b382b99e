//! Static work partitioning across a fixed number of workers.
//!
//! Every phase of the pipeline splits a linear index space into one
//! contiguous range per worker. Worker `i` of `n` gets
//! `[i * total / n, min((i + 1) * total / n, total))`, so the ranges are
//! disjoint, cover `0..total` exactly, and differ in length by at most one.

use std::ops::Range;

/// Contiguous slice of a linear index space owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerRange {
    pub start: usize,
    pub end: usize,
}

impl WorkerRange {
    /// Range owned by `worker_id` out of `workers` over `0..total`.
    ///
    /// # Panics
    /// If `workers` is zero or `worker_id >= workers`.
    pub fn for_worker(worker_id: usize, workers: usize, total: usize) -> Self {
        assert!(workers > 0, "partition needs at least one worker");
        assert!(worker_id < workers, "worker {} out of {}", worker_id, workers);

        let start = worker_id * total / workers;
        let end = ((worker_id + 1) * total / workers).min(total);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl IntoIterator for WorkerRange {
    type Item = usize;
    type IntoIter = Range<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_range()
    }
}

/// The four ranges one worker owns for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerRanges {
    /// Output pixels (`W * H`), used while resampling
    pub pixels: WorkerRange,
    /// Interior grid cells (`P * Q`), used for sampling and compositing
    pub cells: WorkerRange,
    /// Bottom boundary row (`P`)
    pub boundary_row: WorkerRange,
    /// Right boundary column (`Q`)
    pub boundary_col: WorkerRange,
}

impl WorkerRanges {
    pub fn new(
        worker_id: usize,
        workers: usize,
        pixel_count: usize,
        cols: usize,
        rows: usize,
    ) -> Self {
        Self {
            pixels: WorkerRange::for_worker(worker_id, workers, pixel_count),
            cells: WorkerRange::for_worker(worker_id, workers, cols * rows),
            boundary_row: WorkerRange::for_worker(worker_id, workers, cols),
            boundary_col: WorkerRange::for_worker(worker_id, workers, rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        let ranges: Vec<_> = (0..4).map(|i| WorkerRange::for_worker(i, 4, 100)).collect();
        assert_eq!(ranges[0], WorkerRange { start: 0, end: 25 });
        assert_eq!(ranges[3], WorkerRange { start: 75, end: 100 });
    }

    #[test]
    fn test_more_workers_than_items() {
        let lens: Vec<_> = (0..5).map(|i| WorkerRange::for_worker(i, 5, 2).len()).collect();
        assert_eq!(lens.iter().sum::<usize>(), 2);
        assert!(lens.iter().all(|&l| l <= 1));
    }

    #[test]
    fn test_empty_space() {
        let range = WorkerRange::for_worker(2, 3, 0);
        assert!(range.is_empty());
        assert_eq!(range.into_iter().count(), 0);
    }

    #[test]
    #[should_panic(expected = "at least one worker")]
    fn test_zero_workers_panics() {
        WorkerRange::for_worker(0, 0, 10);
    }
}
