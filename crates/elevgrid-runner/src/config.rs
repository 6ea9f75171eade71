//! Sweep configuration.
//!
//! Defaults match a 101 x 101 grid at 0.0005 degree spacing. A YAML file can
//! override any subset of fields:
//!
//! ```yaml
//! radius: 20
//! spacing: 0.001
//! endpoint: http://localhost:8080/elevation
//! workers: 4
//! ```

use elevgrid::provider::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use elevgrid::{GridError, GridRequest, SweepStrategy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default grid radius in cells.
pub const DEFAULT_RADIUS: u32 = 50;

/// Default spacing between cells in degrees.
pub const DEFAULT_SPACING: f64 = 0.0005;

/// Default artifact path.
pub const DEFAULT_OUTPUT: &str = "matrix.bin";

/// Settings for an acquisition run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Cells on each side of the center.
    pub radius: u32,
    /// Degrees between adjacent cells.
    pub spacing: f64,
    /// Elevation service endpoint.
    pub endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Where the artifact is written.
    pub output: PathBuf,
    /// Lookup worker threads; 1 means sequential.
    pub workers: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            spacing: DEFAULT_SPACING,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            output: PathBuf::from(DEFAULT_OUTPUT),
            workers: 1,
        }
    }
}

impl SweepConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GridError> {
        serde_yaml::from_str(yaml).map_err(|e| GridError::Format(format!("config: {}", e)))
    }

    /// Load a configuration file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, GridError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&yaml)
            .map_err(|e| GridError::Format(format!("{}: {}", path.display(), e)))
    }

    /// Grid request centered on a coordinate.
    pub fn request(&self, latitude: f64, longitude: f64) -> Result<GridRequest, GridError> {
        GridRequest::new(latitude, longitude, self.radius, self.spacing)
    }

    pub fn strategy(&self) -> SweepStrategy {
        SweepStrategy::from_workers(self.workers)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SweepConfig::default();
        assert_eq!(config.radius, 50);
        assert_eq!(config.spacing, 0.0005);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.strategy(), SweepStrategy::Sequential);
        assert_eq!(config.request(47.0, -122.0).unwrap().width(), 101);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = SweepConfig::from_yaml_str("radius: 3\nworkers: 4\n").unwrap();
        assert_eq!(config.radius, 3);
        assert_eq!(config.workers, 4);
        assert_eq!(config.spacing, DEFAULT_SPACING);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.strategy(), SweepStrategy::Parallel { workers: 4 });
    }

    #[test]
    fn test_invalid_yaml_is_format() {
        assert!(matches!(
            SweepConfig::from_yaml_str("radius: [not, a, number]"),
            Err(GridError::Format(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io() {
        assert!(matches!(
            SweepConfig::from_yaml_file("/nonexistent/elevgrid.yaml"),
            Err(GridError::Io(_))
        ));
    }

    #[test]
    fn test_bad_spacing_rejected_at_request() {
        let config = SweepConfig {
            spacing: 0.0,
            ..SweepConfig::default()
        };
        assert!(matches!(config.request(0.0, 0.0), Err(GridError::InvalidRequest(_))));
    }
}
