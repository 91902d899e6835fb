//! Subcommand implementations.

pub mod export;
pub mod inspect;
pub mod simulate;
pub mod validate;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use saturn_core::{Chart, ChartConfig, ChartParser, ParsedChart};

/// Read and parse a chart file without running the timing pipeline.
pub fn parse_chart(path: &Path) -> Result<ParsedChart> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let parsed = ChartParser::parse_bytes(&bytes)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(parsed)
}

/// Parse and process a chart file. Validation is left to the caller.
pub fn process_chart(path: &Path, config: &ChartConfig) -> Result<Chart> {
    let parsed = parse_chart(path)?;
    Ok(saturn_core::process(parsed, config)?)
}
