//! Export a saved elevation matrix as x,y,z points for a renderer.
//!
//! Usage: elevgrid-plot <matrix_path> [--scale <meters>] [--output <csv>]

use elevgrid_runner::{exit_for_parse_error, init_tracing, parse_plot, run_plot};
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let args = match parse_plot(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => return exit_for_parse_error(e),
    };

    init_tracing();

    match run_plot(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
