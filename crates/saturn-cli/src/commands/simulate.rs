//! Simulate command implementation.
//!
//! Replays a recorded input file through the scoring engine. Each line is
//! `time_ms [position ...]`: a line with positions is a fresh tap on those
//! ring positions, a bare time is a position-agnostic hit. Lines sharing a
//! timestamp are merged into one touch snapshot.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use saturn_core::{Config, JudgementEvent, ScoringManager, TouchState};
use tracing::debug;

use crate::commands::process_chart;

/// One replayed input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Hit with no position, judged against any note in window
    Hit { time_ms: f32 },
    /// Tap on the listed ring positions
    Touch { time_ms: f32, positions: Vec<i32> },
}

impl InputEvent {
    pub fn time_ms(&self) -> f32 {
        match self {
            Self::Hit { time_ms } | Self::Touch { time_ms, .. } => *time_ms,
        }
    }

    fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// Parse input file content. Blank lines and `#` comments are skipped.
pub fn parse_inputs(content: &str) -> Result<Vec<InputEvent>> {
    let mut events: Vec<InputEvent> = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(time_token) = tokens.next() else {
            continue;
        };
        let time_ms: f32 = time_token
            .parse()
            .with_context(|| format!("line {}: invalid time '{}'", i + 1, time_token))?;

        let mut positions = Vec::new();
        for token in tokens {
            let position: i32 = token
                .parse()
                .with_context(|| format!("line {}: invalid position '{}'", i + 1, token))?;
            positions.push(position);
        }

        if positions.is_empty() {
            events.push(InputEvent::Hit { time_ms });
        } else {
            events.push(InputEvent::Touch { time_ms, positions });
        }
    }

    // Touches sort ahead of hits at the same instant so they end up adjacent
    events.sort_by(|a, b| {
        a.time_ms()
            .total_cmp(&b.time_ms())
            .then_with(|| a.is_hit().cmp(&b.is_hit()))
    });
    Ok(merge_same_instant(events))
}

/// Fold touches sharing a timestamp into one snapshot.
fn merge_same_instant(sorted: Vec<InputEvent>) -> Vec<InputEvent> {
    let mut merged: Vec<InputEvent> = Vec::with_capacity(sorted.len());
    for event in sorted {
        let same_instant = match (&event, merged.last()) {
            (
                InputEvent::Touch { time_ms, .. },
                Some(InputEvent::Touch { time_ms: last, .. }),
            ) => last == time_ms,
            _ => false,
        };
        if !same_instant {
            merged.push(event);
            continue;
        }
        if let (
            InputEvent::Touch { positions, .. },
            Some(InputEvent::Touch {
                positions: snapshot,
                ..
            }),
        ) = (event, merged.last_mut())
        {
            snapshot.extend(positions);
        }
    }
    merged
}

/// Feed inputs to a fresh engine and return every judgement in order.
pub fn replay(manager: &mut ScoringManager, inputs: &[InputEvent]) -> Vec<JudgementEvent> {
    let mut judgements = Vec::new();
    for input in inputs {
        match input {
            InputEvent::Hit { time_ms } => judgements.extend(manager.handle_input(*time_ms)),
            InputEvent::Touch { time_ms, positions } => {
                // Release first so repeated taps on a position count as new presses
                judgements.extend(manager.new_touch_state(*time_ms, TouchState::new()));
                let state = TouchState::from_positions(positions.iter().copied());
                judgements.extend(manager.new_touch_state(*time_ms, state));
            }
        }
    }
    judgements.extend(manager.finish());
    judgements
}

/// Run the simulate command
pub fn run(chart_path: &Path, inputs_path: &Path, config: &Config) -> Result<()> {
    let chart = process_chart(chart_path, &config.chart)?;
    saturn_core::validate(&chart, &config.chart)?;

    let content = fs::read_to_string(inputs_path)
        .with_context(|| format!("Failed to read {}", inputs_path.display()))?;
    let inputs = parse_inputs(&content)?;
    if inputs.is_empty() {
        bail!("{}: no inputs", inputs_path.display());
    }

    let mut manager = ScoringManager::new(config.scoring.clone());
    manager.load_chart(Arc::new(chart));
    let judgements = replay(&mut manager, &inputs);
    debug!("Replayed {} inputs, {} judgements", inputs.len(), judgements.len());

    let counts = manager.counts();
    println!("Marvelous: {}", counts.marvelous);
    println!("Great:     {}", counts.great);
    println!("Good:      {}", counts.good);
    println!("Miss:      {}", counts.miss);
    println!("Early/Late: {}/{}", counts.early, counts.late);
    println!("Max combo: {}", counts.max_combo);
    if counts.is_all_marvelous() {
        println!("ALL MARVELOUS");
    } else if counts.is_full_combo() {
        println!("FULL COMBO");
    }

    Ok(())
}
