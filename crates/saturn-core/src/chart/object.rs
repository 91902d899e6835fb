use serde::{Deserialize, Serialize};
use strum::{FromRepr, IntoStaticStr};

use crate::config::ring::POSITIONS;
use crate::config::timing::TICKS_PER_MEASURE;
use crate::geometry::{RingInterval, ring_position};

/// Placement of any chart event on the measure/tick grid.
///
/// `time_ms` and `scaled_visual_time` are zero until the timing pipeline has
/// run; only a [`Chart`](crate::chart::Chart) returned by the pipeline carries
/// meaningful values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartObject {
    pub measure: i32,
    pub tick: i32,
    pub time_ms: f32,
    pub scaled_visual_time: f32,
}

impl ChartObject {
    pub fn new(measure: i32, tick: i32) -> Self {
        Self {
            measure,
            tick,
            ..Default::default()
        }
    }

    pub fn absolute_tick(&self) -> i32 {
        self.measure * TICKS_PER_MEASURE + self.tick
    }

    /// Same instant on the tick grid.
    pub fn same_tick(&self, other: &ChartObject) -> bool {
        self.measure == other.measure && self.tick == other.tick
    }
}

/// Anything placed on the chart timeline.
pub trait Timed {
    fn object(&self) -> &ChartObject;
    fn object_mut(&mut self) -> &mut ChartObject;

    fn absolute_tick(&self) -> i32 {
        self.object().absolute_tick()
    }

    fn time_ms(&self) -> f32 {
        self.object().time_ms
    }

    fn scaled_visual_time(&self) -> f32 {
        self.object().scaled_visual_time
    }
}

impl Timed for ChartObject {
    fn object(&self) -> &ChartObject {
        self
    }

    fn object_mut(&mut self) -> &mut ChartObject {
        self
    }
}

/// Reflect a position/size pair across `axis` on the ring.
pub fn mirror_position(position: i32, size: i32, axis: i32) -> i32 {
    ring_position(axis - size - position)
}

/// Beats-per-measure scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    pub upper: i32,
    pub lower: i32,
}

impl TimeSignature {
    pub fn new(upper: i32, lower: i32) -> Self {
        Self { upper, lower }
    }

    /// Measure length relative to 4/4.
    pub fn ratio(&self) -> f32 {
        if self.lower == 0 {
            return 1.0;
        }
        self.upper as f32 / self.lower as f32
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

impl std::fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.upper, self.lower)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, FromRepr, IntoStaticStr,
)]
#[repr(i32)]
pub enum MaskDirection {
    Counterclockwise = 0,
    Clockwise = 1,
    Center = 2,
    #[default]
    None = 3,
}

impl MaskDirection {
    /// Unknown wire values fall back to `None`.
    pub fn from_wire(value: i32) -> Self {
        Self::from_repr(value).unwrap_or(Self::None)
    }

    pub fn mirrored(self) -> Self {
        match self {
            Self::Clockwise => Self::Counterclockwise,
            Self::Counterclockwise => Self::Clockwise,
            other => other,
        }
    }
}

/// Visual lane mask. Adds or removes ring coverage; never judged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mask {
    pub object: ChartObject,
    pub position: i32,
    pub size: i32,
    pub direction: MaskDirection,
    pub add: bool,
}

impl Mask {
    pub fn mirror(&mut self, axis: i32) {
        self.position = mirror_position(self.position, self.size, axis);
        self.direction = self.direction.mirrored();
    }
}

impl Timed for Mask {
    fn object(&self) -> &ChartObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut ChartObject {
        &mut self.object
    }
}

/// Connector drawn between two notes that share a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncIndicator {
    pub object: ChartObject,
    pub position: i32,
    pub size: i32,
}

impl SyncIndicator {
    /// Build the connector spanning both notes along the shorter way round.
    ///
    /// The two candidates run from the start of one note to the end of the
    /// other. Ties go to the lower start position, so the result does not
    /// depend on argument order.
    pub fn connecting(object: ChartObject, a: RingInterval, b: RingInterval) -> Self {
        let (position, size) = [spanning_arc(a, b), spanning_arc(b, a)]
            .into_iter()
            .min_by_key(|&(position, size)| (size, position))
            .unwrap_or((a.left, a.size));

        Self {
            object,
            position,
            size,
        }
    }

    pub fn mirror(&mut self, axis: i32) {
        self.position = mirror_position(self.position, self.size, axis);
    }
}

impl Timed for SyncIndicator {
    fn object(&self) -> &ChartObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut ChartObject {
        &mut self.object
    }
}

/// Arc from the start of `from` running clockwise until both notes are covered.
fn spanning_arc(from: RingInterval, to: RingInterval) -> (i32, i32) {
    let to_end = ring_position(to.left - from.left) + to.size;
    let size = to_end.max(from.size).min(POSITIONS);
    (from.left, size)
}
