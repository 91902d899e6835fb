//! Tempo integration over merged BPM / time signature breakpoints.

use crate::chart::{BgmData, ChartObject, Gimmick, GimmickKind, TimeSignature, Timed};
use crate::config::timing::TICKS_PER_MEASURE;

/// Merge BPM and time signature changes into complete, time-stamped snapshots.
///
/// Changes on the same tick collapse into one entry. Returns an empty list when
/// the chart has no BPM at all.
pub(crate) fn generate(gimmicks: &[Gimmick]) -> Vec<BgmData> {
    let mut changes: Vec<&Gimmick> = gimmicks
        .iter()
        .filter(|g| {
            matches!(
                g.kind,
                GimmickKind::BeatsPerMinute(_) | GimmickKind::TimeSignature(_)
            )
        })
        .collect();
    changes.sort_by_key(|g| g.absolute_tick());

    let Some(mut bpm) = changes.iter().find_map(|g| match g.kind {
        GimmickKind::BeatsPerMinute(bpm) => Some(bpm),
        _ => None,
    }) else {
        return Vec::new();
    };
    let mut time_signature = TimeSignature::default();

    let mut data: Vec<BgmData> = Vec::with_capacity(changes.len());
    for change in changes {
        match change.kind {
            GimmickKind::BeatsPerMinute(value) => bpm = value,
            GimmickKind::TimeSignature(value) => time_signature = value,
            _ => {}
        }

        match data.last_mut() {
            Some(last) if last.absolute_tick() == change.absolute_tick() => {
                last.bpm = bpm;
                last.time_signature = time_signature;
            }
            _ => data.push(BgmData {
                object: ChartObject::new(change.object.measure, change.object.tick),
                bpm,
                time_signature,
            }),
        }
    }

    for i in 1..data.len() {
        let previous = data[i - 1];
        let measures = measures_between(previous.absolute_tick(), data[i].absolute_tick());
        data[i].object.time_ms = previous.object.time_ms + previous.measures_to_ms(measures);
    }

    data
}

fn measures_between(from_tick: i32, to_tick: i32) -> f32 {
    (to_tick - from_tick) as f32 / TICKS_PER_MEASURE as f32
}

/// Milliseconds at `absolute_tick`, integrated from the last breakpoint at or
/// before it. Ticks ahead of the first breakpoint extrapolate from it.
pub(crate) fn time_at(data: &[BgmData], absolute_tick: i32) -> f32 {
    let index = data.partition_point(|entry| entry.absolute_tick() <= absolute_tick);
    let Some(entry) = data.get(index.saturating_sub(1)) else {
        return 0.0;
    };
    let measures = measures_between(entry.absolute_tick(), absolute_tick);
    entry.object.time_ms + entry.measures_to_ms(measures)
}
