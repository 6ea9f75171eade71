//! # elevgrid
//!
//! Terrain elevation sampling over a square geographic grid.
//!
//! A [`GridRequest`] names a center coordinate, a radius in cells and the
//! spacing between cells in degrees. The [`GridSampler`] asks an elevation
//! service for every cell of the `(2 * radius + 1)` square grid and builds an
//! [`AbsoluteMatrix`]; [`to_relative`] strips the coordinates for rendering,
//! and the [`store`] module persists the result for later use.
//!
//! ## Pipeline
//!
//! 1. **Sample** - one lookup per cell through an [`ElevationProvider`].
//!    Unreachable or unresolved points get [`SENTINEL_ELEVATION`] instead of
//!    failing the sweep.
//! 2. **Normalize** - keep only `(x_index, y_index, elevation)`.
//! 3. **Store** - write a versioned artifact that loads back identically.
//!
//! ## Example
//!
//! ```no_run
//! use elevgrid::{store, to_relative, ElevationProvider, GridRequest, GridSampler, HttpElevationLookup};
//!
//! let request = GridRequest::new(47.6062, -122.3321, 50, 0.0005)?;
//! let provider = ElevationProvider::new(HttpElevationLookup::new("API_KEY")?);
//!
//! let matrix = GridSampler::new(provider).sample(&request);
//! store::save(&to_relative(&matrix), "matrix.bin")?;
//! # Ok::<(), elevgrid::GridError>(())
//! ```

mod error;
pub mod geodesic;
mod matrix;
mod normalize;
pub mod provider;
pub mod render;
mod sampler;
pub mod store;

pub use error::GridError;
pub use matrix::{
    round_coordinate, AbsoluteMatrix, AbsoluteSample, ElevationMatrix, GridRequest, GridSample,
    RelativeMatrix, RelativeSample, COORDINATE_DECIMALS, SENTINEL_ELEVATION,
};
pub use normalize::to_relative;
pub use provider::{decode_elevation, ElevationLookup, ElevationProvider, HttpElevationLookup};
pub use render::{flatten, RenderPoints};
pub use sampler::{sample_grid, GridSampler, ProgressCallback, SweepProgress, SweepStrategy};

/// Result type for elevgrid operations.
pub type Result<T> = std::result::Result<T, GridError>;
