//! Great-circle distance between geographic coordinates.

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate the distance between two points using the haversine formula.
///
/// Inputs are decimal degrees. Returns whole meters, truncated.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> u64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    (EARTH_RADIUS_M * c) as u64
}

/// Physical length of one grid step: the diagonal from the center to the
/// next cell in both axes.
pub fn step_distance(latitude: f64, longitude: f64, spacing: f64) -> u64 {
    distance(latitude, longitude, latitude + spacing, longitude + spacing)
}
