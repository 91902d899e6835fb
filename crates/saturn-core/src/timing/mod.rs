//! Timing post-processor.
//!
//! Turns a [`ParsedChart`] into a fully time-stamped [`Chart`]. Stages run in a
//! fixed order, each depending on the previous one:
//!
//! 1. bar lines
//! 2. BGM data (tempo integration)
//! 3. hi-speed data (scaled visual timeline)
//! 4. timestamps for every object
//! 5. reverse note lists
//! 6. mirroring (if enabled)
//! 7. hit-window overlap resolution

mod bgm;
mod hispeed;
mod hit_window;
mod mirror;
mod reverse;
mod validate;

pub use hit_window::{WindowedNote, resolve_overlaps};
pub use reverse::ReverseSection;
pub use validate::validate;

use tracing::debug;

use crate::chart::{BgmData, Chart, ChartObject, HiSpeedData, ParsedChart, Timed};
use crate::config::ChartConfig;
use crate::error::Result;

/// Real and scaled time lookups for a chart's tempo and hi-speed breakpoints.
struct Timeline<'a> {
    bgm_data: &'a [BgmData],
    hi_speed_data: &'a [HiSpeedData],
}

impl Timeline<'_> {
    fn stamp(&self, object: &mut ChartObject) {
        object.time_ms = bgm::time_at(self.bgm_data, object.absolute_tick());
        object.scaled_visual_time = hispeed::scaled_time_at(self.hi_speed_data, object.time_ms);
    }
}

/// Run the full post-processing pipeline.
pub fn process(parsed: ParsedChart, config: &ChartConfig) -> Result<Chart> {
    let ParsedChart {
        metadata,
        mut notes,
        mut holds,
        mut masks,
        mut syncs,
        mut gimmicks,
        end_of_chart,
    } = parsed;
    gimmicks.sort_by_key(|g| g.absolute_tick());

    let bar_lines = generate_bar_lines(end_of_chart.as_ref());

    let bgm_data = bgm::generate(&gimmicks);
    let hi_speed_data = hispeed::generate(&gimmicks, &bgm_data);
    debug!(
        "Generated {} bar lines, {} BGM entries, {} hi-speed entries",
        bar_lines.len(),
        bgm_data.len(),
        hi_speed_data.len()
    );

    let mut chart = Chart {
        metadata,
        bar_lines,
        end_of_chart,
        ..Default::default()
    };

    let timeline = Timeline {
        bgm_data: &bgm_data,
        hi_speed_data: &hi_speed_data,
    };
    for note in &mut notes {
        timeline.stamp(note.object_mut());
    }
    for segment in holds.iter_mut().flat_map(|h| h.segments_mut()) {
        timeline.stamp(&mut segment.object);
    }
    for mask in &mut masks {
        timeline.stamp(mask.object_mut());
    }
    for sync in &mut syncs {
        timeline.stamp(sync.object_mut());
    }
    for bar_line in &mut chart.bar_lines {
        timeline.stamp(bar_line);
    }
    for gimmick in &mut gimmicks {
        timeline.stamp(gimmick.object_mut());
    }
    if let Some(end) = chart.end_of_chart.as_mut() {
        timeline.stamp(end);
    }

    chart.reverse_gimmicks = gimmicks.into_iter().filter(|g| g.kind.is_reverse()).collect();
    if !chart.reverse_gimmicks.is_empty() {
        let sections = reverse::sections(&chart.reverse_gimmicks);
        let (reverse_notes, reverse_holds) = reverse::generate(&sections, &notes, &holds);
        debug!(
            "Generated {} reverse sections with {} notes and {} holds",
            sections.len(),
            reverse_notes.len(),
            reverse_holds.len()
        );
        chart.reverse_notes = reverse_notes;
        chart.reverse_holds = reverse_holds;
    }

    chart.notes = notes;
    chart.holds = holds;
    chart.masks = masks;
    chart.syncs = syncs;
    chart.bgm_data = bgm_data;
    chart.hi_speed_data = hi_speed_data;

    if config.mirror_enabled {
        debug!("Mirroring chart across axis {}", config.mirror_axis);
        mirror::mirror_chart(&mut chart, config.mirror_axis);
    }

    hit_window::process(&mut chart.notes, &mut chart.holds);

    Ok(chart)
}

/// One bar line per measure, up to and including the End of Chart measure.
fn generate_bar_lines(end_of_chart: Option<&ChartObject>) -> Vec<ChartObject> {
    match end_of_chart {
        Some(end) => (0..=end.measure).map(|m| ChartObject::new(m, 0)).collect(),
        None => Vec::new(),
    }
}
