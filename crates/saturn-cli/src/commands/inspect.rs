//! Inspect command implementation.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use saturn_core::Config;

use crate::commands::process_chart;

/// Print a summary of the processed chart
pub fn run(path: &Path, config: &Config) -> Result<()> {
    let chart = process_chart(path, &config.chart)?;
    let meta = &chart.metadata;

    println!("Chart: {}", path.display());
    println!("  Level:           {:.1}", meta.level);
    println!("  Author:          {}", meta.author);
    println!("  Clear threshold: {:.2}", meta.clear_threshold);
    println!("  Audio offset:    {:.3}s", meta.audio_offset);
    match chart.duration_ms() {
        Some(ms) => println!("  Duration:        {:.0}ms", ms),
        None => println!("  Duration:        (no End of Chart)"),
    }
    if config.chart.mirror_enabled {
        println!("  Mirrored:        axis {}", config.chart.mirror_axis);
    }

    println!();
    println!("Objects:");
    let mut kinds: BTreeMap<&'static str, usize> = BTreeMap::new();
    for note in &chart.notes {
        *kinds.entry(note.kind.into()).or_default() += 1;
    }
    for (kind, count) in &kinds {
        println!("  {:<22} {}", kind, count);
    }
    println!("  {:<22} {}", "Hold", chart.holds.len());
    println!("  {:<22} {}", "Mask", chart.masks.len());
    println!("  {:<22} {}", "Sync", chart.syncs.len());
    println!("  {:<22} {}", "Total playable", chart.note_count());

    println!();
    println!("Timing:");
    for entry in &chart.bgm_data {
        println!(
            "  {:>4}:{:<4} {:>8.0}ms  {:.2} BPM  {}",
            entry.object.measure,
            entry.object.tick,
            entry.object.time_ms,
            entry.bpm,
            entry.time_signature,
        );
    }
    if chart.hi_speed_data.len() > 1 {
        println!("  Hi-speed changes: {}", chart.hi_speed_data.len() - 1);
    }
    if !chart.reverse_gimmicks.is_empty() {
        println!(
            "  Reverse sections: {} ({} notes, {} holds)",
            chart.reverse_gimmicks.len() / 3,
            chart.reverse_notes.len(),
            chart.reverse_holds.len()
        );
    }

    Ok(())
}
