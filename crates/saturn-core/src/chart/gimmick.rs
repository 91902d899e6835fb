use serde::{Deserialize, Serialize};
use strum::{FromRepr, IntoStaticStr};

use crate::chart::object::{ChartObject, TimeSignature, Timed};

/// Gimmick object ids as they appear in chart files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, IntoStaticStr)]
#[repr(i32)]
pub enum GimmickId {
    BeatsPerMinute = 2,
    TimeSignature = 3,
    HiSpeed = 5,
    ReverseEffectStart = 6,
    ReverseEffectEnd = 7,
    ReverseNoteEnd = 8,
    StopStart = 9,
    StopEnd = 10,
}

impl GimmickId {
    pub fn from_i32(value: i32) -> Option<Self> {
        Self::from_repr(value)
    }
}

/// Gimmick payload, keyed on kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, IntoStaticStr)]
pub enum GimmickKind {
    BeatsPerMinute(f32),
    TimeSignature(TimeSignature),
    HiSpeed(f32),
    StopStart,
    StopEnd,
    ReverseEffectStart,
    ReverseEffectEnd,
    ReverseNoteEnd,
}

impl GimmickKind {
    pub fn is_reverse(&self) -> bool {
        matches!(
            self,
            Self::ReverseEffectStart | Self::ReverseEffectEnd | Self::ReverseNoteEnd
        )
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gimmick {
    pub object: ChartObject,
    pub kind: GimmickKind,
}

impl Gimmick {
    pub fn new(measure: i32, tick: i32, kind: GimmickKind) -> Self {
        Self {
            object: ChartObject::new(measure, tick),
            kind,
        }
    }
}

impl Timed for Gimmick {
    fn object(&self) -> &ChartObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut ChartObject {
        &mut self.object
    }
}

/// Complete tempo snapshot at a BPM/time signature breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BgmData {
    pub object: ChartObject,
    pub bpm: f32,
    pub time_signature: TimeSignature,
}

impl BgmData {
    /// Milliseconds covered by `measures` at this entry's tempo.
    pub fn measures_to_ms(&self, measures: f32) -> f32 {
        use crate::config::timing::{BEATS_PER_WHOLE_MEASURE, MS_PER_MINUTE};

        if self.bpm == 0.0 {
            return 0.0;
        }
        measures * BEATS_PER_WHOLE_MEASURE * self.time_signature.ratio() * (MS_PER_MINUTE / self.bpm)
    }
}

impl Timed for BgmData {
    fn object(&self) -> &ChartObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut ChartObject {
        &mut self.object
    }
}

/// Scroll speed breakpoint. `object.scaled_visual_time` holds the warped
/// timeline position reached at this breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HiSpeedData {
    pub object: ChartObject,
    pub multiplier: f32,
}

impl Timed for HiSpeedData {
    fn object(&self) -> &ChartObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut ChartObject {
        &mut self.object
    }
}
