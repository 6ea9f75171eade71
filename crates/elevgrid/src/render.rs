//! Flattening of relative matrices for render consumers.
//!
//! Renderers take three equal-length sequences of x, y and z values. The
//! grid indices are scaled by the physical length of one grid step.

use crate::matrix::{GridSample, RelativeMatrix, SENTINEL_ELEVATION};
use serde::Serialize;

/// Flat coordinate sequences in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderPoints {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl RenderPoints {
    pub fn len(&self) -> usize {
        self.z.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    /// Iterate over `(x, y, z)` triples.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((&x, &y), &z)| (x, y, z))
    }
}

/// Flatten a matrix, scaling grid indices by `scale` (meters per step).
pub fn flatten(matrix: &RelativeMatrix, scale: f64) -> RenderPoints {
    let cells = matrix.width() * matrix.width();
    let mut points = RenderPoints {
        x: Vec::with_capacity(cells),
        y: Vec::with_capacity(cells),
        z: Vec::with_capacity(cells),
    };
    for sample in matrix.iter() {
        points.x.push(sample.x_index as f64 * scale);
        points.y.push(sample.y_index as f64 * scale);
        points.z.push(sample.elevation);
    }
    points
}

/// Summary figures for a matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationSummary {
    pub cells: usize,
    pub min_elevation: f64,
    pub max_elevation: f64,
    /// Cells holding the sentinel elevation.
    pub sentinel_cells: usize,
}

/// Compute cell count, elevation range and sentinel count.
pub fn summarize<S: GridSample>(samples: impl IntoIterator<Item = S>) -> ElevationSummary {
    let mut summary = ElevationSummary {
        cells: 0,
        min_elevation: f64::INFINITY,
        max_elevation: f64::NEG_INFINITY,
        sentinel_cells: 0,
    };
    for sample in samples {
        let elevation = sample.elevation();
        summary.cells += 1;
        summary.min_elevation = summary.min_elevation.min(elevation);
        summary.max_elevation = summary.max_elevation.max(elevation);
        if elevation == SENTINEL_ELEVATION {
            summary.sentinel_cells += 1;
        }
    }
    summary
}
