//! Console progress bar for long sweeps.

use elevgrid::{ProgressCallback, SweepProgress};
use std::io::Write;

/// Width of the bar in characters.
pub const BAR_WIDTH: usize = 50;

/// Render one progress line, e.g. `Progress:  50.000% #####-----`.
pub fn render_bar(fraction: f64, width: usize) -> String {
    let fraction = fraction.clamp(0.0, 1.0);
    let filled = (fraction * width as f64) as usize;
    format!(
        "Progress: {:7.3}% {}{}",
        fraction * 100.0,
        "#".repeat(filled),
        "-".repeat(width - filled)
    )
}

/// Callback that redraws the bar in place on stderr.
pub fn stderr_progress() -> ProgressCallback {
    Box::new(|progress: SweepProgress| {
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\r{}", render_bar(progress.fraction(), BAR_WIDTH));
        if progress.completed >= progress.total {
            let _ = writeln!(stderr);
        }
        let _ = stderr.flush();
    })
}
