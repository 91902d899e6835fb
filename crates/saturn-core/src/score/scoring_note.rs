use serde::{Deserialize, Serialize};

use crate::chart::{
    Chart, HitWindow, HitWindowEntry, MAX_WINDOW_RIGHT_MS, NoteKind, Timed, judge_error,
};
use crate::geometry::RingInterval;
use crate::score::judgement::{Judgement, JudgementResult};
use crate::timing::WindowedNote;

/// Which chart list a scoring note came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteSource {
    /// Index into `Chart::notes`.
    Note(usize),
    /// Index into `Chart::holds`, judged on the hold start.
    HoldStart(usize),
}

/// A note as seen by the scoring engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringNote {
    pub source: NoteSource,
    pub time_ms: f32,
    pub interval: RingInterval,
    /// Chain notes accept held positions, everything else needs a new press.
    pub accepts_held: bool,
    windows: &'static [HitWindowEntry],
    position_mask: u64,
    pub earliest_ms: f32,
    pub latest_ms: f32,
    pub result: JudgementResult,
}

impl ScoringNote {
    fn new(
        source: NoteSource,
        time_ms: f32,
        interval: RingInterval,
        windows: &'static [HitWindowEntry],
        accepts_held: bool,
    ) -> Self {
        let windowed = WindowedNote::new(time_ms, interval, windows);
        Self {
            source,
            time_ms,
            interval,
            accepts_held,
            windows,
            position_mask: interval.position_mask(),
            earliest_ms: windowed.window.earliest_ms,
            latest_ms: windowed.window.latest_ms,
            result: JudgementResult::default(),
        }
    }

    /// Scoring notes for every simple note and hold start, sorted by time.
    pub fn from_chart(chart: &Chart) -> Vec<Self> {
        let notes = chart.notes.iter().enumerate().map(|(i, note)| {
            Self::new(
                NoteSource::Note(i),
                note.time_ms(),
                note.interval(),
                note.hit_windows(),
                note.kind == NoteKind::Chain,
            )
        });
        let holds = chart.holds.iter().enumerate().map(|(i, hold)| {
            Self::new(
                NoteSource::HoldStart(i),
                hold.time_ms(),
                hold.interval(),
                hold.hit_windows(),
                false,
            )
        });

        let mut scoring: Vec<Self> = notes.chain(holds).collect();
        scoring.sort_by(|a, b| a.time_ms.total_cmp(&b.time_ms));
        scoring
    }

    pub fn windowed(&self) -> WindowedNote {
        WindowedNote {
            time_ms: self.time_ms,
            interval: self.interval,
            window: HitWindow {
                earliest_ms: self.earliest_ms,
                latest_ms: self.latest_ms,
            },
        }
    }

    pub fn is_judged(&self) -> bool {
        self.result.is_judged()
    }

    pub fn window_contains(&self, time_ms: f32) -> bool {
        self.earliest_ms <= time_ms && time_ms < self.latest_ms
    }

    /// Whether any position in `mask` lies on this note.
    pub fn touches(&self, mask: u64) -> bool {
        self.position_mask & mask != 0
    }

    /// Smallest window tier containing the input, relative to the note time.
    pub fn judge(&self, hit_time_ms: f32) -> Option<Judgement> {
        judge_error(self.windows, hit_time_ms - self.time_ms)
    }
}

/// Truncate each note's window against the nearest earlier note it collides
/// with. Only that single predecessor is considered.
pub fn truncate_against_predecessor(notes: &mut [ScoringNote]) {
    for i in 1..notes.len() {
        let current = notes[i].windowed();
        let scan_floor = current.window.earliest_ms - MAX_WINDOW_RIGHT_MS;

        let predecessor = (0..i)
            .rev()
            .take_while(|&j| notes[j].time_ms >= scan_floor)
            .find(|&j| notes[j].windowed().collides_with(&current));
        let Some(j) = predecessor else {
            continue;
        };

        let mean = (notes[i].time_ms + notes[j].time_ms) / 2.0;
        let cutoff = mean.max(notes[i].earliest_ms).min(notes[j].latest_ms);
        notes[i].earliest_ms = cutoff;
        notes[j].latest_ms = notes[j].latest_ms.min(cutoff);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{BonusType, ChartObject, Note, TOUCH_WINDOWS};

    fn note(time_ms: f32, position: i32, kind: NoteKind) -> Note {
        Note {
            object: ChartObject {
                time_ms,
                ..ChartObject::new(0, 0)
            },
            id: 0,
            position,
            size: 6,
            kind,
            bonus: BonusType::None,
            is_sync: false,
            hit_window: None,
        }
    }

    #[test]
    fn test_from_chart_sorted() {
        let chart = Chart {
            notes: vec![
                note(2000.0, 0, NoteKind::Touch),
                note(1000.0, 10, NoteKind::Chain),
            ],
            ..Default::default()
        };
        let scoring = ScoringNote::from_chart(&chart);
        assert_eq!(scoring[0].source, NoteSource::Note(1));
        assert!(scoring[0].accepts_held);
        assert_eq!(scoring[1].source, NoteSource::Note(0));
        assert!(!scoring[1].accepts_held);
        assert!(!scoring[0].is_judged());
    }

    #[test]
    fn test_touches() {
        let chart = Chart {
            notes: vec![note(0.0, 58, NoteKind::Touch)],
            ..Default::default()
        };
        let scoring = &ScoringNote::from_chart(&chart)[0];
        assert!(scoring.touches(1u64 << 59));
        assert!(scoring.touches(1u64 << 3));
        assert!(!scoring.touches(1u64 << 4));
    }

    #[test]
    fn test_judge() {
        let chart = Chart {
            notes: vec![note(1000.0, 0, NoteKind::Touch)],
            ..Default::default()
        };
        let scoring = &ScoringNote::from_chart(&chart)[0];
        assert_eq!(scoring.judge(1010.0), Some(Judgement::Marvelous));
        assert_eq!(scoring.judge(930.0), Some(Judgement::Great));
        assert_eq!(scoring.judge(910.0), Some(Judgement::Good));
        assert_eq!(scoring.judge(1200.0), None);
        assert!(scoring.window_contains(901.0));
        assert!(!scoring.window_contains(1101.0));
    }

    #[test]
    fn test_truncate_against_predecessor() {
        let chart = Chart {
            notes: vec![
                note(1000.0, 0, NoteKind::Touch),
                note(1080.0, 3, NoteKind::Touch),
                note(1080.0, 30, NoteKind::Touch),
            ],
            ..Default::default()
        };
        let mut scoring = ScoringNote::from_chart(&chart);
        truncate_against_predecessor(&mut scoring);

        assert!((scoring[0].latest_ms - 1040.0).abs() < 1e-3);
        assert!((scoring[1].earliest_ms - 1040.0).abs() < 1e-3);
        // Different position, untouched
        let natural = TOUCH_WINDOWS.last().unwrap();
        assert!((scoring[2].earliest_ms - (1080.0 + natural.left_ms)).abs() < 1e-3);
    }
}
