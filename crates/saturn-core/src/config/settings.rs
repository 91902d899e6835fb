use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{ring, scoring};
use crate::error::{Error, Result};

/// Settings consumed by the chart timing pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Reflect every note across `mirror_axis` after timing is computed.
    pub mirror_enabled: bool,
    pub mirror_axis: i32,
    /// Length of the song audio, used to reject notes placed after it ends.
    pub audio_length_ms: Option<f32>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            mirror_enabled: false,
            mirror_axis: ring::DEFAULT_MIRROR_AXIS,
            audio_length_ms: None,
        }
    }
}

/// Settings consumed by the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub ignore_past_notes_ms: f32,
    pub ignore_future_notes_ms: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ignore_past_notes_ms: scoring::IGNORE_PAST_NOTES_MS,
            ignore_future_notes_ms: scoring::IGNORE_FUTURE_NOTES_MS,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub chart: ChartConfig,
    pub scoring: ScoringConfig,
}

impl Config {
    /// Load config from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse config from TOML content. Missing keys keep their defaults.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_partial_config() {
        let content = r#"
[chart]
mirror_enabled = true

[scoring]
ignore_past_notes_ms = 800.0
"#;
        let config = Config::parse(content).unwrap();

        assert!(config.chart.mirror_enabled);
        assert_eq!(config.chart.mirror_axis, ring::DEFAULT_MIRROR_AXIS);
        assert_eq!(config.chart.audio_length_ms, None);
        assert_eq!(config.scoring.ignore_past_notes_ms, 800.0);
        assert_eq!(
            config.scoring.ignore_future_notes_ms,
            scoring::IGNORE_FUTURE_NOTES_MS
        );
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_config() {
        let result = Config::parse("[chart]\nmirror_axis = \"left\"\n");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[chart]\nmirror_axis = 15\naudio_length_ms = 120000.0").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.chart.mirror_axis, 15);
        assert_eq!(config.chart.audio_length_ms, Some(120000.0));
    }
}
