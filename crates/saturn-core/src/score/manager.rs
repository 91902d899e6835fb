//! Input judgement engine.
//!
//! Notes are scanned in time order from a monotonic cursor. Each call takes
//! the current playback time, finalises notes that can no longer be hit and
//! judges notes whose window contains the input. Every judgement is written
//! exactly once and reported back as a [`JudgementEvent`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::chart::Chart;
use crate::config::ScoringConfig;
use crate::score::judgement::JudgementResult;
use crate::score::scoring_note::{NoteSource, ScoringNote, truncate_against_predecessor};
use crate::score::summary::JudgementCounts;
use crate::score::touch::TouchState;

/// A judgement produced by one engine call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JudgementEvent {
    /// Index into [`ScoringManager::notes`].
    pub index: usize,
    pub source: NoteSource,
    pub result: JudgementResult,
}

/// Which notes an input may judge.
#[derive(Debug, Clone, Copy)]
enum InputFilter {
    /// Clock only, nothing can be hit.
    None,
    /// Any note in its window.
    Any,
    /// Notes under a new press, or under a held position for chains.
    Touch { newly_pressed: u64, held: u64 },
}

impl InputFilter {
    fn accepts(&self, note: &ScoringNote) -> bool {
        match *self {
            Self::None => false,
            Self::Any => true,
            Self::Touch {
                newly_pressed,
                held,
            } => {
                if note.accepts_held {
                    note.touches(held)
                } else {
                    note.touches(newly_pressed)
                }
            }
        }
    }
}

/// Single-session scoring state for one chart.
#[derive(Debug, Default)]
pub struct ScoringManager {
    config: ScoringConfig,
    chart: Option<Arc<Chart>>,
    notes: Vec<ScoringNote>,
    min_note_index: usize,
    previous_touch: TouchState,
    counts: JudgementCounts,
}

impl ScoringManager {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Start a new session on `chart`, discarding any previous judgements.
    pub fn load_chart(&mut self, chart: Arc<Chart>) {
        let mut notes = ScoringNote::from_chart(&chart);
        truncate_against_predecessor(&mut notes);
        debug!("Scoring session ready with {} notes", notes.len());

        self.notes = notes;
        self.chart = Some(chart);
        self.min_note_index = 0;
        self.previous_touch = TouchState::default();
        self.counts = JudgementCounts::default();
    }

    pub fn chart(&self) -> Option<&Arc<Chart>> {
        self.chart.as_ref()
    }

    pub fn notes(&self) -> &[ScoringNote] {
        &self.notes
    }

    /// Every note before this index is final.
    pub fn min_note_index(&self) -> usize {
        self.min_note_index
    }

    pub fn counts(&self) -> &JudgementCounts {
        &self.counts
    }

    pub fn is_finished(&self) -> bool {
        self.chart.is_some() && self.min_note_index >= self.notes.len()
    }

    /// Position-agnostic input at `hit_time_ms`.
    pub fn handle_input(&mut self, hit_time_ms: f32) -> Vec<JudgementEvent> {
        self.process(hit_time_ms, InputFilter::Any)
    }

    /// New touch ring snapshot at `time_ms`. Judges notes under newly pressed
    /// positions; chain notes also accept positions that are still held.
    pub fn new_touch_state(&mut self, time_ms: f32, state: TouchState) -> Vec<JudgementEvent> {
        let filter = InputFilter::Touch {
            newly_pressed: state.newly_pressed(&self.previous_touch),
            held: state.position_mask(),
        };
        self.previous_touch = state;
        self.process(time_ms, filter)
    }

    /// Clock tick with no input: only finalises misses.
    pub fn advance(&mut self, time_ms: f32) -> Vec<JudgementEvent> {
        self.process(time_ms, InputFilter::None)
    }

    /// Finalise every remaining note as Miss, e.g. when the song ends.
    pub fn finish(&mut self) -> Vec<JudgementEvent> {
        let mut events = Vec::new();
        for index in self.min_note_index..self.notes.len() {
            self.miss(index, &mut events);
        }
        self.min_note_index = self.notes.len();
        events
    }

    fn process(&mut self, time_ms: f32, filter: InputFilter) -> Vec<JudgementEvent> {
        let mut events = Vec::new();
        if self.chart.is_none() {
            error!("Input at {:.1}ms ignored: no chart loaded", time_ms);
            return events;
        }

        self.skip_past_notes(time_ms, &mut events);

        for index in self.min_note_index..self.notes.len() {
            let note = &self.notes[index];
            if note.time_ms > time_ms + self.config.ignore_future_notes_ms {
                break;
            }
            if note.is_judged() {
                continue;
            }
            if time_ms >= note.latest_ms {
                self.miss(index, &mut events);
                continue;
            }
            if !note.window_contains(time_ms) || !filter.accepts(note) {
                continue;
            }

            match note.judge(time_ms) {
                Some(judgement) => {
                    let result = JudgementResult::hit(judgement, time_ms, note.time_ms);
                    self.record(index, result, &mut events);
                }
                None => debug!(
                    "Input at {:.1}ms inside note {} window but outside every tier",
                    time_ms, index
                ),
            }
        }

        events
    }

    /// Move the cursor past final notes, missing any that are too old to hit.
    fn skip_past_notes(&mut self, time_ms: f32, events: &mut Vec<JudgementEvent>) {
        while let Some(note) = self.notes.get(self.min_note_index) {
            if note.is_judged() {
                self.min_note_index += 1;
            } else if note.time_ms + self.config.ignore_past_notes_ms < time_ms {
                self.miss(self.min_note_index, events);
                self.min_note_index += 1;
            } else {
                break;
            }
        }
    }

    fn miss(&mut self, index: usize, events: &mut Vec<JudgementEvent>) {
        let time_ms = self.notes[index].time_ms;
        self.record(index, JudgementResult::miss(time_ms), events);
    }

    fn record(&mut self, index: usize, result: JudgementResult, events: &mut Vec<JudgementEvent>) {
        let note = &mut self.notes[index];
        if note.is_judged() {
            return;
        }
        note.result = result;
        self.counts.record(&result);
        events.push(JudgementEvent {
            index,
            source: note.source,
            result,
        });
    }
}
