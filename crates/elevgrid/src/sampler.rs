//! Grid sweep: one elevation lookup per cell.
//!
//! The sampler walks the `width x width` grid of a [`GridRequest`], converts
//! each cell's offset from the center into an absolute coordinate and asks
//! the [`ElevationProvider`] for its elevation. Because the provider absorbs
//! every failure, a sweep always completes with a full matrix.
//!
//! ## Execution
//!
//! - [`SweepStrategy::Sequential`] performs one blocking lookup at a time,
//!   `y` outer and `x` inner.
//! - [`SweepStrategy::Parallel`] runs lookups on a dedicated pool of
//!   `workers` threads. Results are collected by cell index, so the matrix
//!   is identical to the sequential one regardless of completion order.
//!
//! Progress is reported after every cell and never decreases.

use crate::matrix::{AbsoluteMatrix, AbsoluteSample, ElevationMatrix, GridRequest};
use crate::provider::{ElevationLookup, ElevationProvider};
use rayon::prelude::*;
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// How cell lookups are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepStrategy {
    /// One lookup at a time, in row-major order.
    #[default]
    Sequential,
    /// Lookups spread over a bounded pool of worker threads.
    Parallel {
        /// Number of worker threads.
        workers: usize,
    },
}

impl SweepStrategy {
    /// Strategy for a worker count: sequential for 0 or 1 workers.
    pub fn from_workers(workers: usize) -> Self {
        if workers <= 1 {
            SweepStrategy::Sequential
        } else {
            SweepStrategy::Parallel { workers }
        }
    }
}

/// Snapshot of sweep progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepProgress {
    /// Cells completed so far.
    pub completed: usize,
    /// Total cells in the sweep.
    pub total: usize,
}

impl SweepProgress {
    /// Completion fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Callback for sweep progress.
pub type ProgressCallback = Box<dyn Fn(SweepProgress) + Send + Sync>;

/// Counts completed cells and forwards each count to the callback in order.
struct ProgressTracker<'a> {
    completed: Mutex<usize>,
    total: usize,
    callback: Option<&'a ProgressCallback>,
}

impl<'a> ProgressTracker<'a> {
    fn new(total: usize, callback: Option<&'a ProgressCallback>) -> Self {
        Self {
            completed: Mutex::new(0),
            total,
            callback,
        }
    }

    fn cell_done(&self) {
        let Some(callback) = self.callback else {
            return;
        };
        // The lock is held across the callback so reports stay ordered.
        let mut completed = match self.completed.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *completed += 1;
        callback(SweepProgress {
            completed: *completed,
            total: self.total,
        });
    }
}

/// Samples elevation grids through an [`ElevationProvider`].
#[derive(Debug)]
pub struct GridSampler<L> {
    provider: ElevationProvider<L>,
    strategy: SweepStrategy,
}

impl<L: ElevationLookup> GridSampler<L> {
    /// Create a sequential sampler.
    pub fn new(provider: ElevationProvider<L>) -> Self {
        Self {
            provider,
            strategy: SweepStrategy::Sequential,
        }
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: SweepStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> SweepStrategy {
        self.strategy
    }

    /// Sample every cell of the grid.
    pub fn sample(&self, request: &GridRequest) -> AbsoluteMatrix {
        self.sample_with_callback(request, None)
    }

    /// Sample every cell of the grid, reporting progress after each cell.
    pub fn sample_with_callback(
        &self,
        request: &GridRequest,
        callback: Option<&ProgressCallback>,
    ) -> AbsoluteMatrix {
        let width = request.width();
        let total = request.total_cells();
        let progress = ProgressTracker::new(total, callback);

        info!(
            "Sampling {}x{} grid around ({}, {}) with spacing {}",
            width,
            width,
            request.center_latitude(),
            request.center_longitude(),
            request.spacing()
        );

        let cells = match self.strategy {
            SweepStrategy::Sequential => self.sweep_sequential(request, &progress),
            SweepStrategy::Parallel { workers } => {
                match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
                    Ok(pool) => {
                        debug!("Sweeping with {} worker threads", workers);
                        pool.install(|| self.sweep_parallel(request, &progress))
                    }
                    Err(e) => {
                        warn!("Could not start worker pool ({}), sampling sequentially", e);
                        self.sweep_sequential(request, &progress)
                    }
                }
            }
        };

        ElevationMatrix::from_row_major(cells, width)
    }

    fn sweep_sequential(&self, request: &GridRequest, progress: &ProgressTracker<'_>) -> Vec<AbsoluteSample> {
        let width = request.width();
        let mut cells = Vec::with_capacity(request.total_cells());
        for y_index in 0..width {
            for x_index in 0..width {
                cells.push(self.sample_cell(request, x_index, y_index));
                progress.cell_done();
            }
        }
        cells
    }

    fn sweep_parallel(&self, request: &GridRequest, progress: &ProgressTracker<'_>) -> Vec<AbsoluteSample> {
        let width = request.width();
        (0..request.total_cells())
            .into_par_iter()
            .map(|cell| {
                let sample = self.sample_cell(request, cell % width, cell / width);
                progress.cell_done();
                sample
            })
            .collect()
    }

    fn sample_cell(&self, request: &GridRequest, x_index: usize, y_index: usize) -> AbsoluteSample {
        let (latitude, longitude) = request.coordinate_of(x_index, y_index);
        let elevation = self.provider.lookup(latitude, longitude);
        AbsoluteSample {
            x_index,
            y_index,
            latitude,
            longitude,
            elevation,
        }
    }
}

/// Sample a grid sequentially.
pub fn sample_grid<L: ElevationLookup>(request: &GridRequest, provider: ElevationProvider<L>) -> AbsoluteMatrix {
    GridSampler::new(provider).sample(request)
}
