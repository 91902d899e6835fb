//! Hit-window overlap resolution.
//!
//! Every note starts with its widest window. When two notes overlap both in
//! time and on the ring, the later note's window is pushed back and the
//! earlier note's window cut short at the midpoint between them, so an input
//! can never be claimed by both.
//!
//! Only pairs are resolved exactly; three or more mutually overlapping notes
//! can leave a dead zone between truncated windows.

use crate::chart::{HitWindow, HitWindowEntry, HoldNote, MAX_WINDOW_RIGHT_MS, Note, Timed};
use crate::geometry::RingInterval;

/// A note's timing footprint during overlap resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowedNote {
    pub time_ms: f32,
    pub interval: RingInterval,
    pub window: HitWindow,
}

impl WindowedNote {
    pub fn new(time_ms: f32, interval: RingInterval, table: &[HitWindowEntry]) -> Self {
        Self {
            time_ms,
            interval,
            window: HitWindow::natural(time_ms, table),
        }
    }

    /// Overlap in both time and ring position.
    pub fn collides_with(&self, other: &WindowedNote) -> bool {
        self.window.overlaps(&other.window) && self.interval.overlaps(&other.interval)
    }
}

/// Truncate windows so no two colliding notes share any instant.
/// `notes` must be sorted by `time_ms`.
pub fn resolve_overlaps(notes: &mut [WindowedNote]) {
    let mut colliding = Vec::new();

    for i in 0..notes.len() {
        let scan_floor = notes[i].window.earliest_ms - MAX_WINDOW_RIGHT_MS;

        colliding.clear();
        for j in (0..i).rev() {
            if notes[j].time_ms < scan_floor {
                break;
            }
            if notes[j].collides_with(&notes[i]) {
                colliding.push(j);
            }
        }

        let Some(max_latest) = colliding
            .iter()
            .map(|&j| notes[j].window.latest_ms)
            .reduce(f32::max)
        else {
            continue;
        };

        for &j in &colliding {
            let mean = (notes[i].time_ms + notes[j].time_ms) / 2.0;
            let cutoff = mean.max(notes[i].window.earliest_ms).min(max_latest);

            notes[i].window.earliest_ms = cutoff;
            notes[j].window.latest_ms = notes[j].window.latest_ms.min(cutoff);
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Note(usize),
    Hold(usize),
}

/// Assign resolved hit windows to every note and hold start.
pub(crate) fn process(notes: &mut [Note], holds: &mut [HoldNote]) {
    let mut entries: Vec<(Slot, WindowedNote)> = notes
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let windowed = WindowedNote::new(n.time_ms(), n.interval(), n.hit_windows());
            (Slot::Note(i), windowed)
        })
        .chain(holds.iter().enumerate().map(|(i, h)| {
            let windowed = WindowedNote::new(h.time_ms(), h.interval(), h.hit_windows());
            (Slot::Hold(i), windowed)
        }))
        .collect();
    entries.sort_by(|a, b| a.1.time_ms.total_cmp(&b.1.time_ms));

    let mut windowed: Vec<WindowedNote> = entries.iter().map(|(_, w)| *w).collect();
    resolve_overlaps(&mut windowed);

    for ((slot, _), resolved) in entries.iter().zip(windowed) {
        match *slot {
            Slot::Note(i) => notes[i].hit_window = Some(resolved.window),
            Slot::Hold(i) => holds[i].hit_window = Some(resolved.window),
        }
    }
}
