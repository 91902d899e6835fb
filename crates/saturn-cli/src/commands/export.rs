//! Export command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use saturn_core::Config;
use tracing::info;

use crate::commands::process_chart;

/// Write the validated chart as pretty JSON to a file or stdout
pub fn run(path: &Path, output: Option<&Path>, config: &Config) -> Result<()> {
    let chart = process_chart(path, &config.chart)?;
    saturn_core::validate(&chart, &config.chart)?;
    let json = chart.to_json()?;

    match output {
        Some(out) => {
            fs::write(out, json).with_context(|| format!("Failed to write {}", out.display()))?;
            info!("Exported {} to {}", path.display(), out.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
