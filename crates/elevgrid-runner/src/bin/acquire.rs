//! Sample a terrain elevation grid and save it for later rendering.
//!
//! Usage: elevgrid-acquire <api_key> <latitude> <longitude> [options]

use elevgrid_runner::progress::stderr_progress;
use elevgrid_runner::{exit_for_parse_error, init_tracing, parse_acquire, run_acquire};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = match parse_acquire(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => return exit_for_parse_error(e),
    };

    init_tracing();

    let progress = (!args.quiet).then(stderr_progress);
    match run_acquire(&args, progress.as_ref()) {
        Ok(report) => {
            info!(
                "Done: {}x{} grid, {} m per step, written to {}",
                report.width,
                report.width,
                report.step_meters,
                report.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
