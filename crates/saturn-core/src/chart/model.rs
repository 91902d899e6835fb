use serde::{Deserialize, Serialize};

use crate::chart::gimmick::{BgmData, Gimmick, HiSpeedData};
use crate::chart::metadata::ChartMetadata;
use crate::chart::note::{HoldNote, Note};
use crate::chart::object::{ChartObject, Mask, SyncIndicator};
use crate::error::Result;

/// Parser output: every object placed on the tick grid, no timestamps yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedChart {
    pub metadata: ChartMetadata,
    pub notes: Vec<Note>,
    pub holds: Vec<HoldNote>,
    pub masks: Vec<Mask>,
    pub syncs: Vec<SyncIndicator>,
    /// BPM, time signature, hi-speed and reverse gimmicks sorted by tick.
    /// Stops are already normalised into hi-speed changes.
    pub gimmicks: Vec<Gimmick>,
    pub end_of_chart: Option<ChartObject>,
}

/// A fully time-stamped chart, read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub metadata: ChartMetadata,
    pub notes: Vec<Note>,
    pub holds: Vec<HoldNote>,
    pub masks: Vec<Mask>,
    pub syncs: Vec<SyncIndicator>,
    pub bar_lines: Vec<ChartObject>,
    pub bgm_data: Vec<BgmData>,
    pub hi_speed_data: Vec<HiSpeedData>,
    pub reverse_gimmicks: Vec<Gimmick>,
    /// Clones of notes inside reverse sections, remapped onto the reversed timeline.
    pub reverse_notes: Vec<Note>,
    pub reverse_holds: Vec<HoldNote>,
    pub end_of_chart: Option<ChartObject>,
}

impl Chart {
    /// Playable notes, counting each hold once.
    pub fn note_count(&self) -> usize {
        self.notes.len() + self.holds.len()
    }

    /// Time of the End of Chart marker, if present.
    pub fn duration_ms(&self) -> Option<f32> {
        self.end_of_chart.map(|end| end.time_ms)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
