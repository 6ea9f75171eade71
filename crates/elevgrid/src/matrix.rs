//! Grid request and elevation matrix types.
//!
//! A grid of width `2 * radius + 1` is laid out row-major: rows are indexed
//! by `y_index`, columns by `x_index`, and `matrix[y][x]` always holds the
//! sample whose indices are `(x, y)`. Index `radius` on both axes is the
//! requested center coordinate.

use crate::{GridError, Result};
use serde::{Deserialize, Serialize};

/// Elevation substituted for a cell whose real elevation could not be obtained.
pub const SENTINEL_ELEVATION: f64 = 0.0;

/// Decimal places kept on absolute grid coordinates (micro-degree precision).
pub const COORDINATE_DECIMALS: i32 = 6;

/// Parameters of one sweep: a square grid centered on a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridRequest {
    center_latitude: f64,
    center_longitude: f64,
    radius: u32,
    spacing: f64,
}

impl GridRequest {
    /// Create a validated request.
    ///
    /// # Arguments
    /// * `center_latitude`, `center_longitude` - Grid center in degrees
    /// * `radius` - Number of cells on each side of the center
    /// * `spacing` - Degrees between adjacent cells (must be > 0)
    pub fn new(center_latitude: f64, center_longitude: f64, radius: u32, spacing: f64) -> Result<Self> {
        if !center_latitude.is_finite() || !center_longitude.is_finite() {
            return Err(GridError::InvalidRequest(format!(
                "center ({}, {}) is not a finite coordinate",
                center_latitude, center_longitude
            )));
        }
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(GridError::InvalidRequest(format!(
                "spacing must be a positive number of degrees, got {}",
                spacing
            )));
        }
        Ok(Self {
            center_latitude,
            center_longitude,
            radius,
            spacing,
        })
    }

    pub fn center_latitude(&self) -> f64 {
        self.center_latitude
    }

    pub fn center_longitude(&self) -> f64 {
        self.center_longitude
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Number of cells along each axis.
    pub fn width(&self) -> usize {
        2 * self.radius as usize + 1
    }

    /// Total number of cells in the grid.
    pub fn total_cells(&self) -> usize {
        self.width() * self.width()
    }

    /// Absolute `(latitude, longitude)` of the cell at `(x_index, y_index)`.
    ///
    /// The x offset moves latitude and the y offset moves longitude. Off-center
    /// coordinates are rounded to [`COORDINATE_DECIMALS`] places.
    pub fn coordinate_of(&self, x_index: usize, y_index: usize) -> (f64, f64) {
        let radius = self.radius as i64;
        let dx = x_index as i64 - radius;
        let dy = y_index as i64 - radius;
        (
            offset_coordinate(self.center_latitude, dx, self.spacing),
            offset_coordinate(self.center_longitude, dy, self.spacing),
        )
    }
}

/// Move `steps` cells away from `center`. The center itself is never rounded.
fn offset_coordinate(center: f64, steps: i64, spacing: f64) -> f64 {
    if steps == 0 {
        center
    } else {
        round_coordinate(center + steps as f64 * spacing)
    }
}

/// Round a coordinate to [`COORDINATE_DECIMALS`] places.
///
/// Values that already have fewer decimals come back unchanged.
pub fn round_coordinate(value: f64) -> f64 {
    let factor = 10f64.powi(COORDINATE_DECIMALS);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

/// Common accessors for the sample types stored in an [`ElevationMatrix`].
pub trait GridSample {
    fn x_index(&self) -> usize;
    fn y_index(&self) -> usize;
    fn elevation(&self) -> f64;
}

/// A sample carrying its geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AbsoluteSample {
    pub x_index: usize,
    pub y_index: usize,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// A sample positioned by grid indices only, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelativeSample {
    pub x_index: usize,
    pub y_index: usize,
    pub elevation: f64,
}

impl GridSample for AbsoluteSample {
    fn x_index(&self) -> usize {
        self.x_index
    }
    fn y_index(&self) -> usize {
        self.y_index
    }
    fn elevation(&self) -> f64 {
        self.elevation
    }
}

impl GridSample for RelativeSample {
    fn x_index(&self) -> usize {
        self.x_index
    }
    fn y_index(&self) -> usize {
        self.y_index
    }
    fn elevation(&self) -> f64 {
        self.elevation
    }
}

/// Square, row-major matrix of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElevationMatrix<S> {
    rows: Vec<Vec<S>>,
}

/// Matrix produced by the grid sampler.
pub type AbsoluteMatrix = ElevationMatrix<AbsoluteSample>;

/// Matrix with geographic coordinates stripped.
pub type RelativeMatrix = ElevationMatrix<RelativeSample>;

impl<S: GridSample> ElevationMatrix<S> {
    /// Build a matrix from rows, checking that it is square and that every
    /// sample sits at the position its indices name.
    pub fn from_rows(rows: Vec<Vec<S>>) -> Result<Self> {
        let matrix = Self { rows };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Check the shape and index invariants.
    pub fn validate(&self) -> Result<()> {
        let width = self.rows.len();
        if width == 0 {
            return Err(GridError::Format("matrix has no rows".into()));
        }
        for (y, row) in self.rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::Format(format!(
                    "matrix is not square: row {} has {} columns, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            for (x, sample) in row.iter().enumerate() {
                if sample.x_index() != x || sample.y_index() != y {
                    return Err(GridError::Format(format!(
                        "sample at row {} column {} carries indices ({}, {})",
                        y,
                        x,
                        sample.x_index(),
                        sample.y_index()
                    )));
                }
            }
        }
        Ok(())
    }
}

impl<S> ElevationMatrix<S> {
    /// Number of rows (equal to the number of columns).
    pub fn width(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<S>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<S>> {
        self.rows
    }

    /// Sample at grid position `(x_index, y_index)`.
    pub fn get(&self, x_index: usize, y_index: usize) -> Option<&S> {
        self.rows.get(y_index).and_then(|row| row.get(x_index))
    }

    /// Iterate over all samples in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.rows.iter().flatten()
    }

    /// Wrap rows already known to satisfy the matrix invariants.
    pub(crate) fn from_rows_unchecked(rows: Vec<Vec<S>>) -> Self {
        Self { rows }
    }

    /// Split a row-major cell list into rows of `width`.
    ///
    /// Callers guarantee `cells.len() == width * width`.
    pub(crate) fn from_row_major(cells: Vec<S>, width: usize) -> Self {
        let mut rows = Vec::with_capacity(width);
        let mut cells = cells.into_iter();
        for _ in 0..width {
            rows.push(cells.by_ref().take(width).collect());
        }
        Self { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relative(width: usize) -> Vec<Vec<RelativeSample>> {
        (0..width)
            .map(|y| {
                (0..width)
                    .map(|x| RelativeSample {
                        x_index: x,
                        y_index: y,
                        elevation: (x + y) as f64,
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_request_width() {
        assert_eq!(GridRequest::new(0.0, 0.0, 0, 1.0).unwrap().width(), 1);
        assert_eq!(GridRequest::new(0.0, 0.0, 50, 0.0005).unwrap().width(), 101);
        assert_eq!(GridRequest::new(0.0, 0.0, 2, 0.1).unwrap().total_cells(), 25);
    }

    #[test]
    fn test_request_rejects_bad_spacing() {
        assert!(GridRequest::new(0.0, 0.0, 1, 0.0).is_err());
        assert!(GridRequest::new(0.0, 0.0, 1, -0.5).is_err());
        assert!(GridRequest::new(0.0, 0.0, 1, f64::NAN).is_err());
        assert!(GridRequest::new(f64::INFINITY, 0.0, 1, 0.1).is_err());
    }

    #[test]
    fn test_center_maps_to_request_coordinate() {
        for radius in [0, 1, 2, 7] {
            let request = GridRequest::new(47.12345678, -122.65432109, radius, 0.0005).unwrap();
            let r = radius as usize;
            assert_eq!(request.coordinate_of(r, r), (47.12345678, -122.65432109));
        }
    }

    #[test]
    fn test_coordinate_axes() {
        let request = GridRequest::new(10.0, 20.0, 1, 0.5).unwrap();
        assert_eq!(request.coordinate_of(0, 1), (9.5, 20.0));
        assert_eq!(request.coordinate_of(1, 2), (10.0, 20.5));
    }

    #[test]
    fn test_round_coordinate() {
        assert_eq!(round_coordinate(47.0), 47.0);
        assert_eq!(round_coordinate(1.23456789), 1.234568);
        assert_eq!(round_coordinate(-0.0000004), 0.0);
    }

    #[test]
    fn test_from_rows_validates_shape() {
        assert!(RelativeMatrix::from_rows(relative(3)).is_ok());

        let mut ragged = relative(3);
        ragged[1].pop();
        assert!(matches!(RelativeMatrix::from_rows(ragged), Err(GridError::Format(_))));

        assert!(RelativeMatrix::from_rows(Vec::new()).is_err());
    }

    #[test]
    fn test_from_rows_validates_indices() {
        let mut rows = relative(2);
        rows[0].swap(0, 1);
        assert!(matches!(RelativeMatrix::from_rows(rows), Err(GridError::Format(_))));
    }

    #[test]
    fn test_from_row_major() {
        let cells: Vec<RelativeSample> = relative(3).into_iter().flatten().collect();
        let matrix = ElevationMatrix::from_row_major(cells, 3);
        assert!(matrix.validate().is_ok());
        assert_eq!(matrix.get(2, 1).unwrap().elevation, 3.0);
        assert!(matrix.get(3, 0).is_none());
    }
}
