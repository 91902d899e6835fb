use serde::{Deserialize, Serialize};

use crate::score::judgement::{Judgement, JudgementResult};

/// Running judgement totals for a play session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgementCounts {
    pub marvelous: u32,
    pub great: u32,
    pub good: u32,
    pub miss: u32,
    /// Non-marvelous hits ahead of the note.
    pub early: u32,
    /// Non-marvelous hits behind the note.
    pub late: u32,
    pub combo: u32,
    pub max_combo: u32,
}

impl JudgementCounts {
    /// Accumulate results in the order they were judged.
    pub fn from_results<'a, I: IntoIterator<Item = &'a JudgementResult>>(results: I) -> Self {
        let mut counts = Self::default();
        for result in results {
            counts.record(result);
        }
        counts
    }

    pub fn record(&mut self, result: &JudgementResult) {
        match result.judgement {
            Judgement::None => return,
            Judgement::Miss => self.miss += 1,
            Judgement::Good => self.good += 1,
            Judgement::Great => self.great += 1,
            Judgement::Marvelous => self.marvelous += 1,
        }

        if result.judgement != Judgement::Marvelous {
            match result.time_error_ms() {
                Some(error) if error < 0.0 => self.early += 1,
                Some(error) if error > 0.0 => self.late += 1,
                _ => {}
            }
        }

        if result.judgement.is_hit() {
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
        } else {
            self.combo = 0;
        }
    }

    /// Judged note count
    pub fn total(&self) -> u32 {
        self.marvelous + self.great + self.good + self.miss
    }

    pub fn is_full_combo(&self) -> bool {
        self.total() > 0 && self.miss == 0
    }

    pub fn is_all_marvelous(&self) -> bool {
        self.is_full_combo() && self.great == 0 && self.good == 0
    }
}
