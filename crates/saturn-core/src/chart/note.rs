use serde::{Deserialize, Serialize};
use strum::{FromRepr, IntoStaticStr};

use crate::chart::object::{ChartObject, Timed, mirror_position};
use crate::config::timing::FRAME_MS;
use crate::geometry::RingInterval;
use crate::score::Judgement;

/// Note type ids as they appear in chart files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, IntoStaticStr)]
#[repr(i32)]
pub enum NoteTypeId {
    Touch = 1,
    TouchBonus = 2,
    SnapForward = 3,
    SnapBackward = 4,
    SwipeClockwise = 5,
    SwipeClockwiseBonus = 6,
    SwipeCounterclockwise = 7,
    SwipeCounterclockwiseBonus = 8,
    HoldStart = 9,
    HoldSegment = 10,
    HoldEnd = 11,
    MaskAdd = 12,
    MaskRemove = 13,
    EndOfChart = 14,
    Chain = 16,
    TouchRNote = 20,
    SnapForwardRNote = 21,
    SnapBackwardRNote = 22,
    SwipeClockwiseRNote = 23,
    SwipeCounterclockwiseRNote = 24,
    HoldStartRNote = 25,
    ChainRNote = 26,
}

impl NoteTypeId {
    pub fn from_i32(value: i32) -> Option<Self> {
        Self::from_repr(value)
    }

    /// Simple (non-hold, non-mask) note kind and bonus for this id.
    pub fn simple_note(self) -> Option<(NoteKind, BonusType)> {
        use BonusType::{Bonus, None as Plain, RNote};
        let pair = match self {
            Self::Touch => (NoteKind::Touch, Plain),
            Self::TouchBonus => (NoteKind::Touch, Bonus),
            Self::TouchRNote => (NoteKind::Touch, RNote),
            Self::SnapForward => (NoteKind::SnapForward, Plain),
            Self::SnapForwardRNote => (NoteKind::SnapForward, RNote),
            Self::SnapBackward => (NoteKind::SnapBackward, Plain),
            Self::SnapBackwardRNote => (NoteKind::SnapBackward, RNote),
            Self::SwipeClockwise => (NoteKind::SwipeClockwise, Plain),
            Self::SwipeClockwiseBonus => (NoteKind::SwipeClockwise, Bonus),
            Self::SwipeClockwiseRNote => (NoteKind::SwipeClockwise, RNote),
            Self::SwipeCounterclockwise => (NoteKind::SwipeCounterclockwise, Plain),
            Self::SwipeCounterclockwiseBonus => (NoteKind::SwipeCounterclockwise, Bonus),
            Self::SwipeCounterclockwiseRNote => (NoteKind::SwipeCounterclockwise, RNote),
            Self::Chain => (NoteKind::Chain, Plain),
            Self::ChainRNote => (NoteKind::Chain, RNote),
            _ => return None,
        };
        Some(pair)
    }

    pub fn is_hold_start(self) -> bool {
        matches!(self, Self::HoldStart | Self::HoldStartRNote)
    }

    pub fn is_hold_segment(self) -> bool {
        matches!(self, Self::HoldSegment | Self::HoldEnd)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, IntoStaticStr,
)]
pub enum BonusType {
    #[default]
    None,
    Bonus,
    RNote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr)]
pub enum NoteKind {
    Touch,
    SnapForward,
    SnapBackward,
    SwipeClockwise,
    SwipeCounterclockwise,
    Chain,
}

impl NoteKind {
    pub fn is_swipe(self) -> bool {
        matches!(self, Self::SwipeClockwise | Self::SwipeCounterclockwise)
    }

    pub fn hit_windows(self) -> &'static [HitWindowEntry] {
        match self {
            Self::Touch => TOUCH_WINDOWS,
            Self::SnapForward => SNAP_FORWARD_WINDOWS,
            Self::SnapBackward => SNAP_BACKWARD_WINDOWS,
            Self::SwipeClockwise | Self::SwipeCounterclockwise => SWIPE_WINDOWS,
            Self::Chain => CHAIN_WINDOWS,
        }
    }

    pub fn mirrored(self) -> Self {
        match self {
            Self::SwipeClockwise => Self::SwipeCounterclockwise,
            Self::SwipeCounterclockwise => Self::SwipeClockwise,
            other => other,
        }
    }
}

/// One tier of a hit-window table, relative to the note's time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitWindowEntry {
    pub left_ms: f32,
    pub right_ms: f32,
    pub judgement: Judgement,
}

impl HitWindowEntry {
    const fn frames(left: f32, right: f32, judgement: Judgement) -> Self {
        Self {
            left_ms: left * FRAME_MS,
            right_ms: right * FRAME_MS,
            judgement,
        }
    }

    pub fn contains(&self, error_ms: f32) -> bool {
        self.left_ms <= error_ms && error_ms < self.right_ms
    }
}

// Tables run narrowest to widest; the last entry is the Miss boundary.
pub const TOUCH_WINDOWS: &[HitWindowEntry] = &[
    HitWindowEntry::frames(-3.0, 3.0, Judgement::Marvelous),
    HitWindowEntry::frames(-5.0, 5.0, Judgement::Great),
    HitWindowEntry::frames(-6.0, 6.0, Judgement::Good),
];

pub const SNAP_FORWARD_WINDOWS: &[HitWindowEntry] = &[
    HitWindowEntry::frames(-5.0, 7.0, Judgement::Marvelous),
    HitWindowEntry::frames(-8.0, 10.0, Judgement::Great),
    HitWindowEntry::frames(-10.0, 10.0, Judgement::Good),
];

pub const SNAP_BACKWARD_WINDOWS: &[HitWindowEntry] = &[
    HitWindowEntry::frames(-7.0, 5.0, Judgement::Marvelous),
    HitWindowEntry::frames(-10.0, 8.0, Judgement::Great),
    HitWindowEntry::frames(-10.0, 10.0, Judgement::Good),
];

pub const SWIPE_WINDOWS: &[HitWindowEntry] = &[
    HitWindowEntry::frames(-5.0, 5.0, Judgement::Marvelous),
    HitWindowEntry::frames(-8.0, 10.0, Judgement::Great),
    HitWindowEntry::frames(-10.0, 10.0, Judgement::Good),
];

pub const CHAIN_WINDOWS: &[HitWindowEntry] =
    &[HitWindowEntry::frames(-4.0, 4.0, Judgement::Marvelous)];

/// Hold starts are judged like touch notes.
pub const HOLD_START_WINDOWS: &[HitWindowEntry] = TOUCH_WINDOWS;

/// Largest late bound across all tables.
pub const MAX_WINDOW_RIGHT_MS: f32 = 10.0 * FRAME_MS;

/// The widest (Miss boundary) tier of a table.
pub fn maximal_window(table: &[HitWindowEntry]) -> Option<&HitWindowEntry> {
    table.last()
}

/// Smallest tier whose range contains `error_ms`.
pub fn judge_error(table: &[HitWindowEntry], error_ms: f32) -> Option<Judgement> {
    table
        .iter()
        .find(|entry| entry.contains(error_ms))
        .map(|entry| entry.judgement)
}

/// Absolute hit window after overlap resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitWindow {
    pub earliest_ms: f32,
    pub latest_ms: f32,
}

impl HitWindow {
    /// Natural (untruncated) window of a note at `time_ms`.
    pub fn natural(time_ms: f32, table: &[HitWindowEntry]) -> Self {
        match maximal_window(table) {
            Some(entry) => Self {
                earliest_ms: time_ms + entry.left_ms,
                latest_ms: time_ms + entry.right_ms,
            },
            None => Self {
                earliest_ms: time_ms,
                latest_ms: time_ms,
            },
        }
    }

    pub fn contains(&self, time_ms: f32) -> bool {
        self.earliest_ms <= time_ms && time_ms < self.latest_ms
    }

    pub fn overlaps(&self, other: &HitWindow) -> bool {
        self.earliest_ms < other.latest_ms && other.earliest_ms < self.latest_ms
    }
}

/// A simple (non-hold) playable note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub object: ChartObject,
    /// Note index field from the chart file.
    pub id: i32,
    pub position: i32,
    pub size: i32,
    pub kind: NoteKind,
    pub bonus: BonusType,
    pub is_sync: bool,
    /// Set by hit-window processing.
    pub hit_window: Option<HitWindow>,
}

impl Note {
    pub fn interval(&self) -> RingInterval {
        RingInterval::new(self.position, self.size)
    }

    pub fn is_full_circle_swipe(&self) -> bool {
        self.kind.is_swipe() && self.interval().is_full_circle()
    }

    pub fn hit_windows(&self) -> &'static [HitWindowEntry] {
        self.kind.hit_windows()
    }

    pub fn mirror(&mut self, axis: i32) {
        self.position = mirror_position(self.position, self.size, axis);
        self.kind = self.kind.mirrored();
    }
}

impl Timed for Note {
    fn object(&self) -> &ChartObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut ChartObject {
        &mut self.object
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr)]
pub enum HoldSegmentKind {
    Start,
    Segment,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldSegment {
    pub object: ChartObject,
    pub id: i32,
    pub position: i32,
    pub size: i32,
    pub kind: HoldSegmentKind,
    /// Whether the renderer draws this segment as a visible vertex.
    pub render: bool,
}

impl HoldSegment {
    pub fn interval(&self) -> RingInterval {
        RingInterval::new(self.position, self.size)
    }

    pub fn mirror(&mut self, axis: i32) {
        self.position = mirror_position(self.position, self.size, axis);
    }
}

impl Timed for HoldSegment {
    fn object(&self) -> &ChartObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut ChartObject {
        &mut self.object
    }
}

/// A hold note: start segment, zero or more middle segments, end segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldNote {
    segments: Vec<HoldSegment>,
    pub bonus: BonusType,
    pub is_sync: bool,
    pub hit_window: Option<HitWindow>,
}

impl HoldNote {
    pub fn new(start: HoldSegment, rest: Vec<HoldSegment>, bonus: BonusType) -> Self {
        let mut segments = Vec::with_capacity(rest.len() + 1);
        segments.push(start);
        segments.extend(rest);
        Self {
            segments,
            bonus,
            is_sync: false,
            hit_window: None,
        }
    }

    pub fn segments(&self) -> &[HoldSegment] {
        &self.segments
    }

    pub fn segments_mut(&mut self) -> &mut [HoldSegment] {
        &mut self.segments
    }

    pub fn start(&self) -> &HoldSegment {
        &self.segments[0]
    }

    pub fn end(&self) -> &HoldSegment {
        &self.segments[self.segments.len() - 1]
    }

    /// Widest segment, used for rendering bounds.
    pub fn max_size(&self) -> i32 {
        self.segments.iter().map(|s| s.size).max().unwrap_or(0)
    }

    pub fn interval(&self) -> RingInterval {
        self.start().interval()
    }

    pub fn hit_windows(&self) -> &'static [HitWindowEntry] {
        HOLD_START_WINDOWS
    }

    /// Put segments in playback order after a time remap that reversed them.
    /// The first and last segments keep their Start/End roles.
    pub(crate) fn reverse_segments(&mut self) {
        self.segments.reverse();
        let last = self.segments.len() - 1;
        if last > 0 {
            self.segments[0].kind = HoldSegmentKind::Start;
            self.segments[last].kind = HoldSegmentKind::End;
        }
    }

    pub fn mirror(&mut self, axis: i32) {
        for segment in &mut self.segments {
            segment.mirror(axis);
        }
    }
}

impl Timed for HoldNote {
    fn object(&self) -> &ChartObject {
        &self.start().object
    }

    fn object_mut(&mut self) -> &mut ChartObject {
        &mut self.segments[0].object
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(measure: i32, id: i32, kind: HoldSegmentKind, size: i32) -> HoldSegment {
        HoldSegment {
            object: ChartObject::new(measure, 0),
            id,
            position: 10,
            size,
            kind,
            render: true,
        }
    }

    #[test]
    fn test_note_type_table() {
        assert_eq!(
            NoteTypeId::from_i32(2).and_then(NoteTypeId::simple_note),
            Some((NoteKind::Touch, BonusType::Bonus))
        );
        assert_eq!(
            NoteTypeId::from_i32(24).and_then(NoteTypeId::simple_note),
            Some((NoteKind::SwipeCounterclockwise, BonusType::RNote))
        );
        assert_eq!(NoteTypeId::from_i32(9).and_then(NoteTypeId::simple_note), None);
        assert!(NoteTypeId::HoldStartRNote.is_hold_start());
        assert!(NoteTypeId::HoldEnd.is_hold_segment());
        assert_eq!(NoteTypeId::from_i32(15), None);
    }

    #[test]
    fn test_tables_sorted_by_width() {
        for table in [
            TOUCH_WINDOWS,
            SNAP_FORWARD_WINDOWS,
            SNAP_BACKWARD_WINDOWS,
            SWIPE_WINDOWS,
            CHAIN_WINDOWS,
        ] {
            for pair in table.windows(2) {
                assert!(pair[0].left_ms >= pair[1].left_ms);
                assert!(pair[0].right_ms <= pair[1].right_ms);
            }
            let widest = maximal_window(table).unwrap();
            assert!(widest.right_ms <= MAX_WINDOW_RIGHT_MS + 1e-3);
        }
    }

    #[test]
    fn test_judge_error_picks_smallest_window() {
        assert_eq!(judge_error(TOUCH_WINDOWS, 0.0), Some(Judgement::Marvelous));
        assert_eq!(judge_error(TOUCH_WINDOWS, 60.0), Some(Judgement::Great));
        assert_eq!(judge_error(TOUCH_WINDOWS, -95.0), Some(Judgement::Good));
        assert_eq!(judge_error(TOUCH_WINDOWS, 100.0), None);
        // Snap forward is lenient on the late side
        assert_eq!(
            judge_error(SNAP_FORWARD_WINDOWS, 100.0),
            Some(Judgement::Marvelous)
        );
    }

    #[test]
    fn test_natural_window() {
        let window = HitWindow::natural(1000.0, TOUCH_WINDOWS);
        assert!((window.earliest_ms - 900.0).abs() < 1e-3);
        assert!((window.latest_ms - 1100.0).abs() < 1e-3);
        assert!(window.contains(901.0));
        assert!(!window.contains(window.latest_ms));
    }

    #[test]
    fn test_swipe_mirror_swaps_direction() {
        let mut note = Note {
            object: ChartObject::new(0, 0),
            id: 0,
            position: 0,
            size: 60,
            kind: NoteKind::SwipeClockwise,
            bonus: BonusType::None,
            is_sync: false,
            hit_window: None,
        };
        assert!(note.is_full_circle_swipe());
        note.mirror(30);
        assert_eq!(note.kind, NoteKind::SwipeCounterclockwise);
        assert_eq!(note.position, 30);
    }

    #[test]
    fn test_hold_note_shape() {
        let hold = HoldNote::new(
            segment(0, 1, HoldSegmentKind::Start, 4),
            vec![
                segment(1, 2, HoldSegmentKind::Segment, 12),
                segment(2, 3, HoldSegmentKind::End, 6),
            ],
            BonusType::None,
        );
        assert_eq!(hold.start().id, 1);
        assert_eq!(hold.end().kind, HoldSegmentKind::End);
        assert_eq!(hold.max_size(), 12);
        assert_eq!(hold.absolute_tick(), 0);
    }
}
