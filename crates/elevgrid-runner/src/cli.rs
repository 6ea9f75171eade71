//! Command line arguments and the operations behind the two binaries.
//!
//! - `elevgrid-acquire <api_key> <latitude> <longitude>` samples a grid and
//!   saves the relative matrix.
//! - `elevgrid-plot <matrix_path>` loads a saved matrix and exports the
//!   flattened `x,y,z` points a renderer consumes.

use crate::config::SweepConfig;
use clap::Parser;
use elevgrid::render::{summarize, ElevationSummary};
use elevgrid::{
    flatten, geodesic, store, to_relative, ElevationProvider, GridError, GridSampler,
    HttpElevationLookup, ProgressCallback, RelativeMatrix, RenderPoints,
};
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// Default meters per grid step when exporting points.
pub const DEFAULT_SCALE: f64 = 300.0;

/// Sample terrain elevation on a square grid around a coordinate.
#[derive(Debug, Parser)]
#[command(name = "elevgrid-acquire", version, about, long_about = None)]
pub struct AcquireArgs {
    /// Elevation service API key.
    pub api_key: String,

    /// Center latitude in degrees.
    #[arg(allow_negative_numbers = true)]
    pub latitude: f64,

    /// Center longitude in degrees.
    #[arg(allow_negative_numbers = true)]
    pub longitude: f64,

    /// YAML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Cells on each side of the center.
    #[arg(long)]
    pub radius: Option<u32>,

    /// Degrees between adjacent cells.
    #[arg(long)]
    pub spacing: Option<f64>,

    /// Elevation service endpoint.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Artifact path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Lookup worker threads (1 = sequential).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Do not draw the progress bar.
    #[arg(short, long)]
    pub quiet: bool,
}

impl AcquireArgs {
    /// Configuration file (or defaults) with command line overrides applied.
    pub fn resolve_config(&self) -> Result<SweepConfig, GridError> {
        let mut config = match &self.config {
            Some(path) => SweepConfig::from_yaml_file(path)?,
            None => SweepConfig::default(),
        };
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
        if let Some(spacing) = self.spacing {
            config.spacing = spacing;
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        Ok(config)
    }
}

/// Export a saved elevation matrix as x,y,z points.
#[derive(Debug, Parser)]
#[command(name = "elevgrid-plot", version, about, long_about = None)]
pub struct PlotArgs {
    /// Saved matrix artifact.
    pub matrix_path: PathBuf,

    /// Meters represented by one grid step.
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    pub scale: f64,

    /// CSV output path (stdout when omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Parse acquisition arguments, including the program name.
///
/// Help and version requests also come back as `Err`; see
/// [`crate::exit_for_parse_error`].
pub fn parse_acquire<I, T>(args: I) -> Result<AcquireArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    AcquireArgs::try_parse_from(args)
}

/// Parse plot arguments, including the program name.
pub fn parse_plot<I, T>(args: I) -> Result<PlotArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    PlotArgs::try_parse_from(args)
}

/// Outcome of an acquisition run.
#[derive(Debug, Clone, PartialEq)]
pub struct AcquireReport {
    pub output: PathBuf,
    pub width: usize,
    /// Diagonal length of one grid step in meters.
    pub step_meters: u64,
    pub summary: ElevationSummary,
}

/// Sample the grid described by `args` and save the relative matrix.
pub fn run_acquire(
    args: &AcquireArgs,
    progress: Option<&ProgressCallback>,
) -> Result<AcquireReport, GridError> {
    let config = args.resolve_config()?;
    let request = config.request(args.latitude, args.longitude)?;

    let step_meters = geodesic::step_distance(args.latitude, args.longitude, config.spacing);
    info!(
        "Grid step of {} degrees is about {} m; {} lookups to perform",
        config.spacing,
        step_meters,
        request.total_cells()
    );

    let lookup = HttpElevationLookup::with_endpoint(&config.endpoint, &args.api_key, config.timeout())?;
    let sampler = GridSampler::new(ElevationProvider::new(lookup)).with_strategy(config.strategy());

    let matrix = sampler.sample_with_callback(&request, progress);
    let relative = to_relative(&matrix);
    let summary = summarize(relative.iter().copied());

    store::save(&relative, &config.output)?;
    info!(
        "Saved {}x{} matrix to {} ({} cells without elevation)",
        relative.width(),
        relative.width(),
        config.output.display(),
        summary.sentinel_cells
    );

    Ok(AcquireReport {
        output: config.output,
        width: relative.width(),
        step_meters,
        summary,
    })
}

/// Load the matrix named by `args` and write its flattened points.
pub fn run_plot(args: &PlotArgs) -> Result<RenderPoints, GridError> {
    let matrix: RelativeMatrix = store::load(&args.matrix_path)?;
    let summary = summarize(matrix.iter().copied());
    info!(
        "Loaded {} cells, elevation {} to {} m, {} without elevation",
        summary.cells, summary.min_elevation, summary.max_elevation, summary.sentinel_cells
    );

    let points = flatten(&matrix, args.scale);
    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_csv(&points, &mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_csv(&points, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(points)
}

/// Write points as `x,y,z` CSV with a header line.
pub fn write_csv<W: Write>(points: &RenderPoints, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "x,y,z")?;
    for (x, y, z) in points.points() {
        writeln!(writer, "{},{},{}", x, y, z)?;
    }
    Ok(())
}
