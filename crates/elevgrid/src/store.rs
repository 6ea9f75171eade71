//! Persisted matrix artifacts.
//!
//! An artifact is a serde_json envelope tagged with a format name and
//! version. Loading checks the tag, the version, that the matrix is square
//! and that every sample's indices match its position, so a file from some
//! other tool is a [`GridError::Format`] rather than a wrong matrix.
//!
//! Saves go through a sibling temporary file that is renamed into place, so
//! a failed save never leaves a truncated artifact at the target path.

use crate::matrix::{ElevationMatrix, GridSample};
use crate::{GridError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Format tag written into every artifact.
pub const ARTIFACT_FORMAT: &str = "elevgrid-matrix";

/// Current artifact version.
pub const ARTIFACT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, S> {
    format: &'a str,
    version: u32,
    width: usize,
    rows: &'a ElevationMatrix<S>,
}

#[derive(Deserialize)]
struct Envelope<S> {
    format: String,
    version: u32,
    width: usize,
    rows: Vec<Vec<S>>,
}

impl<S> Envelope<S>
where
    S: GridSample,
{
    fn into_matrix(self) -> Result<ElevationMatrix<S>> {
        if self.format != ARTIFACT_FORMAT {
            return Err(GridError::Format(format!(
                "unexpected artifact format {:?}",
                self.format
            )));
        }
        if self.version != ARTIFACT_VERSION {
            return Err(GridError::Format(format!(
                "unsupported artifact version {}",
                self.version
            )));
        }
        if self.rows.len() != self.width {
            return Err(GridError::Format(format!(
                "artifact declares width {} but holds {} rows",
                self.width,
                self.rows.len()
            )));
        }
        ElevationMatrix::from_rows(self.rows)
    }
}

/// Encode a matrix as artifact bytes.
pub fn to_bytes<S: Serialize>(matrix: &ElevationMatrix<S>) -> Result<Vec<u8>> {
    let envelope = EnvelopeRef {
        format: ARTIFACT_FORMAT,
        version: ARTIFACT_VERSION,
        width: matrix.width(),
        rows: matrix,
    };
    Ok(serde_json::to_vec(&envelope)?)
}

/// Decode artifact bytes into a validated matrix.
pub fn from_bytes<S>(bytes: &[u8]) -> Result<ElevationMatrix<S>>
where
    S: GridSample + DeserializeOwned,
{
    let envelope: Envelope<S> = serde_json::from_slice(bytes)?;
    envelope.into_matrix()
}

/// Write a matrix to `path`.
pub fn save<S, P>(matrix: &ElevationMatrix<S>, path: P) -> Result<()>
where
    S: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let tmp_path = temporary_path(path);

    let result = write_artifact(matrix, &tmp_path).and_then(|()| Ok(fs::rename(&tmp_path, path)?));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
        return result;
    }

    debug!("Saved {}x{} matrix to {}", matrix.width(), matrix.width(), path.display());
    Ok(())
}

/// Read a matrix from `path`.
pub fn load<S, P>(path: P) -> Result<ElevationMatrix<S>>
where
    S: GridSample + DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)?;
    let envelope: Envelope<S> = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        if e.is_io() {
            GridError::Io(e.into())
        } else {
            GridError::Format(format!("{}: {}", path.display(), e))
        }
    })?;
    let matrix = envelope.into_matrix()?;

    debug!("Loaded {}x{} matrix from {}", matrix.width(), matrix.width(), path.display());
    Ok(matrix)
}

fn write_artifact<S: Serialize>(matrix: &ElevationMatrix<S>, path: &Path) -> Result<()> {
    let bytes = to_bytes(matrix)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
    Ok(())
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
