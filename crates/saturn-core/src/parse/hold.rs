//! Hold chain resolution.
//!
//! Hold lines reference each other through note ids: a start (or middle)
//! segment names the id of the next segment, ending at a hold-end line.
//! Segments are first indexed by id, then each chain is walked from its start
//! into an owned, ordered segment list.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::chart::{BonusType, HoldNote, HoldSegment, HoldSegmentKind, NoteTypeId};
use crate::error::ParseError;
use crate::parse::line::BodyLine;

/// Hold segment and hold end lines keyed by their note id.
pub(crate) struct SegmentIndex {
    by_id: HashMap<i32, usize>,
}

impl SegmentIndex {
    pub fn build(lines: &[BodyLine<'_>]) -> Result<Self, ParseError> {
        let mut by_id = HashMap::new();

        for (index, line) in lines.iter().enumerate() {
            let is_segment = line
                .note_type_if_note()
                .and_then(NoteTypeId::from_i32)
                .is_some_and(NoteTypeId::is_hold_segment);
            if !is_segment {
                continue;
            }

            let id = line.note_id()?;
            if by_id.contains_key(&id) {
                warn!(
                    "Line {}: duplicate hold segment id {}, keeping the first definition",
                    line.line, id
                );
                continue;
            }
            by_id.insert(id, index);
        }

        Ok(Self { by_id })
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    fn get(&self, id: i32) -> Option<usize> {
        self.by_id.get(&id).copied()
    }
}

fn segment_from_line(line: &BodyLine<'_>, kind: HoldSegmentKind) -> Result<HoldSegment, ParseError> {
    let (position, size) = line.position_and_size()?;
    Ok(HoldSegment {
        object: line.object()?,
        id: line.note_id()?,
        position,
        size,
        kind,
        render: line.render_flag()?,
    })
}

/// Walk the chain starting at `start` and build the hold note.
pub(crate) fn resolve_hold(
    start: &BodyLine<'_>,
    lines: &[BodyLine<'_>],
    index: &SegmentIndex,
    bonus: BonusType,
) -> Result<HoldNote, ParseError> {
    let first = segment_from_line(start, HoldSegmentKind::Start)?;
    let mut rest = Vec::new();
    let mut visited = HashSet::new();
    let mut next_id = start.next_id()?;

    loop {
        let Some(line_index) = index.get(next_id) else {
            return Err(ParseError::UnresolvedHoldSegment {
                line: start.line,
                next_id,
            });
        };
        if !visited.insert(line_index) {
            return Err(ParseError::CyclicHoldChain {
                line: start.line,
                next_id,
            });
        }

        let line = &lines[line_index];
        let is_end = line.note_type_if_note() == Some(NoteTypeId::HoldEnd as i32);

        if is_end {
            rest.push(segment_from_line(line, HoldSegmentKind::End)?);
            break;
        }

        rest.push(segment_from_line(line, HoldSegmentKind::Segment)?);
        next_id = line.next_id()?;
    }

    let mut previous_tick = first.object.absolute_tick();
    for segment in &rest {
        let tick = segment.object.absolute_tick();
        if tick < previous_tick {
            warn!(
                "Line {}: hold segment {} goes back in time ({} < {})",
                start.line, segment.id, tick, previous_tick
            );
        }
        previous_tick = tick;
    }

    Ok(HoldNote::new(first, rest, bonus))
}
