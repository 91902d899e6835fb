//! CLI argument definitions for saturn.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "saturn")]
#[command(about = "Chart parser, timing pipeline and judgement simulator", version)]
pub struct Args {
    /// Path to config file (TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Mirror notes across the configured axis
    #[arg(long, global = true)]
    pub mirror: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print a summary of a chart's objects and timing
    Inspect {
        /// Chart file
        chart: PathBuf,
    },
    /// Check a chart for consistency errors
    Validate {
        /// Chart file
        chart: PathBuf,
        /// Reject notes placed after the audio ends
        #[arg(long, value_name = "MS")]
        audio_length_ms: Option<f32>,
    },
    /// Write the processed chart as JSON
    Export {
        /// Chart file
        chart: PathBuf,
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replay recorded inputs against a chart and print judgement counts
    Simulate {
        /// Chart file
        chart: PathBuf,
        /// Input file, one `time_ms [position]` per line
        inputs: PathBuf,
    },
}
