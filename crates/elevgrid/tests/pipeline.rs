//! End-to-end tests of sampling, normalization and storage with stub providers.

use approx::assert_abs_diff_eq;
use elevgrid::{
    flatten, sample_grid, store, to_relative, ElevationProvider, GridError, GridRequest,
    GridSampler, RelativeMatrix, SweepStrategy, SENTINEL_ELEVATION,
};

fn sum_lookup(lat: f64, lon: f64) -> elevgrid::Result<f64> {
    Ok(lat + lon)
}

fn failing_lookup(_lat: f64, _lon: f64) -> elevgrid::Result<f64> {
    Err(GridError::Transport("connection refused".into()))
}

#[test]
fn test_three_by_three_sum_grid() {
    let request = GridRequest::new(47.0, -122.0, 1, 0.01).unwrap();
    let matrix = sample_grid(&request, ElevationProvider::new(sum_lookup));

    assert_eq!(matrix.width(), 3);
    let center = matrix.get(1, 1).unwrap();
    assert_eq!(center.latitude, 47.0);
    assert_eq!(center.longitude, -122.0);
    assert_eq!(center.elevation, -75.0);

    let corner = matrix.get(0, 0).unwrap();
    assert_abs_diff_eq!(corner.latitude, 46.99, epsilon = 1e-9);
    assert_abs_diff_eq!(corner.longitude, -122.01, epsilon = 1e-9);
    assert_abs_diff_eq!(corner.elevation, -75.02, epsilon = 1e-9);

    let far = matrix.get(2, 2).unwrap();
    assert_abs_diff_eq!(far.elevation, -74.98, epsilon = 1e-9);
}

#[test]
fn test_center_is_exact_for_any_radius() {
    for radius in [0, 1, 2, 5, 10] {
        let request = GridRequest::new(-33.8688, 151.2093, radius, 0.0005).unwrap();
        let matrix = sample_grid(&request, ElevationProvider::new(sum_lookup));
        let r = radius as usize;
        let center = matrix.get(r, r).unwrap();
        assert_eq!((center.latitude, center.longitude), (-33.8688, 151.2093));
        assert_eq!(matrix.width(), 2 * r + 1);
    }
}

#[test]
fn test_always_failing_provider_gives_sentinel_grid() {
    let request = GridRequest::new(47.0, -122.0, 1, 0.01).unwrap();
    let matrix = sample_grid(&request, ElevationProvider::new(failing_lookup));

    assert_eq!(matrix.width(), 3);
    assert_eq!(matrix.iter().count(), 9);
    assert!(matrix.iter().all(|s| s.elevation == SENTINEL_ELEVATION));
}

#[test]
fn test_partial_failures_only_affect_their_cells() {
    let request = GridRequest::new(0.0, 0.0, 2, 1.0).unwrap();
    // Fail everything north of the equator.
    let provider = ElevationProvider::new(|lat: f64, lon: f64| -> elevgrid::Result<f64> {
        if lat > 0.0 {
            Err(GridError::Format("no results".into()))
        } else {
            Ok(100.0 + lon)
        }
    });
    let matrix = sample_grid(&request, provider);

    for sample in matrix.iter() {
        if sample.latitude > 0.0 {
            assert_eq!(sample.elevation, SENTINEL_ELEVATION);
        } else {
            assert_eq!(sample.elevation, 100.0 + sample.longitude);
        }
    }
}

#[test]
fn test_sample_normalize_save_load() {
    let request = GridRequest::new(47.0, -122.0, 3, 0.001).unwrap();
    let matrix = GridSampler::new(ElevationProvider::new(sum_lookup))
        .with_strategy(SweepStrategy::Parallel { workers: 2 })
        .sample(&request);
    let relative = to_relative(&matrix);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matrix.bin");
    store::save(&relative, &path).unwrap();
    let loaded: RelativeMatrix = store::load(&path).unwrap();

    assert_eq!(loaded, relative);
    for (row, original) in loaded.rows().iter().zip(matrix.rows()) {
        for (r, a) in row.iter().zip(original) {
            assert_eq!(r.elevation, a.elevation);
        }
    }

    let points = flatten(&loaded, 10.0);
    assert_eq!(points.len(), 49);
    assert_eq!(points.x[1], 10.0);
    assert_eq!(points.y[7], 10.0);
}

#[test]
fn test_overwrite_existing_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matrix.bin");

    let small = GridRequest::new(1.0, 1.0, 0, 0.1).unwrap();
    let large = GridRequest::new(1.0, 1.0, 2, 0.1).unwrap();
    store::save(&to_relative(&sample_grid(&small, ElevationProvider::new(sum_lookup))), &path).unwrap();
    let second = to_relative(&sample_grid(&large, ElevationProvider::new(sum_lookup)));
    store::save(&second, &path).unwrap();

    let loaded: RelativeMatrix = store::load(&path).unwrap();
    assert_eq!(loaded, second);
}
