//! Elevation lookup over HTTP with per-point failure absorption.
//!
//! The [`ElevationLookup`] trait is the raw capability: one coordinate in,
//! one elevation or error out. [`ElevationProvider`] wraps any lookup and
//! turns every failure into [`SENTINEL_ELEVATION`] so a single bad point
//! never aborts a sweep.
//!
//! ## Wire Format
//!
//! Requests are `GET <endpoint>?locations=<lat>,<lon>&key=<api_key>`.
//! Responses are JSON of the form
//! `{ "results": [ { "elevation": 123.4, ... } ], "status": "OK" }`.

use crate::matrix::SENTINEL_ELEVATION;
use crate::{GridError, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

/// Default elevation service endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/elevation/json";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw elevation lookup for a single coordinate.
pub trait ElevationLookup: Send + Sync {
    /// Elevation in meters at `(latitude, longitude)`.
    fn lookup(&self, latitude: f64, longitude: f64) -> Result<f64>;
}

impl<F> ElevationLookup for F
where
    F: Fn(f64, f64) -> Result<f64> + Send + Sync,
{
    fn lookup(&self, latitude: f64, longitude: f64) -> Result<f64> {
        self(latitude, longitude)
    }
}

/// Response body of the elevation service.
#[derive(Debug, Deserialize)]
struct ElevationResponse {
    #[serde(default)]
    results: Vec<ElevationResult>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ElevationResult {
    elevation: Option<f64>,
}

/// Decode a response body into the elevation of its first result.
///
/// Any shape problem (invalid JSON, a non-`OK` status, no results, a result
/// without an elevation) is a [`GridError::Format`].
pub fn decode_elevation(body: &str) -> Result<f64> {
    let response: ElevationResponse = serde_json::from_str(body)?;

    if let Some(status) = response.status.as_deref() {
        if status != "OK" {
            return Err(GridError::Format(format!("provider status {}", status)));
        }
    }

    response
        .results
        .first()
        .ok_or_else(|| GridError::Format("response contains no results".into()))?
        .elevation
        .ok_or_else(|| GridError::Format("first result has no elevation".into()))
}

/// Elevation lookup against an HTTP JSON endpoint.
pub struct HttpElevationLookup {
    /// Base URL of the elevation service.
    endpoint: String,
    /// API key appended to every request.
    api_key: String,
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for HttpElevationLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpElevationLookup")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl HttpElevationLookup {
    /// Create a lookup against the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a lookup against a specific endpoint.
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full request URL for a coordinate.
    pub fn request_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}?locations={},{}&key={}",
            self.endpoint, latitude, longitude, self.api_key
        )
    }
}

impl ElevationLookup for HttpElevationLookup {
    fn lookup(&self, latitude: f64, longitude: f64) -> Result<f64> {
        let url = self.request_url(latitude, longitude);

        let response = self.client.get(&url).send()?;

        if !response.status().is_success() {
            return Err(GridError::Transport(format!("HTTP {}", response.status())));
        }

        let body = response.text()?;
        decode_elevation(&body)
    }
}

/// Adapter that never fails: lookup errors become [`SENTINEL_ELEVATION`].
#[derive(Debug)]
pub struct ElevationProvider<L> {
    lookup: L,
}

impl<L: ElevationLookup> ElevationProvider<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    pub fn inner(&self) -> &L {
        &self.lookup
    }

    /// Elevation at a coordinate, or the sentinel if it cannot be obtained.
    pub fn lookup(&self, latitude: f64, longitude: f64) -> f64 {
        match self.lookup.lookup(latitude, longitude) {
            Ok(elevation) if elevation.is_finite() => elevation,
            Ok(elevation) => {
                warn!("Non-finite elevation {} at ({}, {}), using sentinel", elevation, latitude, longitude);
                SENTINEL_ELEVATION
            }
            Err(GridError::Transport(e)) => {
                warn!("Elevation request for ({}, {}) failed: {}", latitude, longitude, e);
                SENTINEL_ELEVATION
            }
            Err(e) => {
                warn!("Unusable elevation response for ({}, {}): {}", latitude, longitude, e);
                SENTINEL_ELEVATION
            }
        }
    }
}
