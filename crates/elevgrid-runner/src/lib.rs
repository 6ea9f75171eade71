//! Command line runner for elevgrid.
//!
//! Provides configuration loading, argument parsing and the acquisition and
//! export operations used by the `elevgrid-acquire` and `elevgrid-plot`
//! binaries.

pub mod cli;
pub mod config;
pub mod progress;

pub use cli::{parse_acquire, parse_plot, run_acquire, run_plot, AcquireArgs, AcquireReport, PlotArgs};
pub use config::SweepConfig;

use elevgrid::GridError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Print a clap parse error and turn it into the process exit status.
///
/// Help and version requests exit 0; usage errors exit with the
/// [`GridError::Usage`] status.
pub fn exit_for_parse_error(err: clap::Error) -> ExitCode {
    let _ = err.print();
    ExitCode::from(parse_error_status(&err))
}

/// Exit status for a clap parse error.
pub fn parse_error_status(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        let reason = err.kind().as_str().unwrap_or("invalid arguments");
        GridError::Usage(reason.to_string()).exit_code()
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_status() {
        let err = parse_acquire(["elevgrid-acquire", "KEY"]).unwrap_err();
        assert_eq!(parse_error_status(&err), 2);

        let err = parse_plot(["elevgrid-plot", "--version"]).unwrap_err();
        assert_eq!(parse_error_status(&err), 0);
    }
}
