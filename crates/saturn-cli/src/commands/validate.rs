//! Validate command implementation.

use std::path::Path;

use anyhow::{Result, bail};
use saturn_core::Config;
use tracing::debug;

use crate::commands::process_chart;

/// Run the full pipeline and report the first consistency error
pub fn run(path: &Path, config: &Config) -> Result<()> {
    let chart = process_chart(path, &config.chart)?;
    debug!("Processed {} playable notes", chart.note_count());

    match saturn_core::validate(&chart, &config.chart) {
        Ok(()) => {
            println!("{}: OK ({} notes)", path.display(), chart.note_count());
            Ok(())
        }
        Err(e) => bail!("{}: invalid chart: {}", path.display(), e),
    }
}
