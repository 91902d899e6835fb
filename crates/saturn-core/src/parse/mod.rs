//! Chart text parser.
//!
//! Turns the line-oriented chart format into a [`ParsedChart`]: a `#TAG value`
//! metadata header, a `#BODY` marker, then one whitespace-separated object per
//! line (`measure tick objectId ...`).

mod hold;
mod line;

use std::borrow::Cow;

use tracing::{debug, warn};

use crate::chart::{
    BonusType, ChartMetadata, ChartObject, Gimmick, GimmickId, GimmickKind, HoldNote, Mask,
    MaskDirection, MetadataTag, Note, NoteKind, NoteTypeId, ParsedChart, SyncIndicator, TimeSignature,
    Timed,
};
use crate::error::{Error, ParseError, Result};
use crate::geometry::RingInterval;

use hold::{SegmentIndex, resolve_hold};
use line::{
    BodyLine, FIELD_RENDER, FIELD_VALUE_1, FIELD_VALUE_2, NOOP_OBJECT_ID, NOTE_OBJECT_ID,
};

const BODY_MARKER: &str = "#BODY";

/// Denominator used when a time signature line omits it or gives zero.
const DEFAULT_TIME_SIGNATURE_LOWER: i32 = 4;

/// Chart file decoder
pub struct ChartParser;

/// Where the previously parsed note lives, for sync marking.
#[derive(Debug, Clone, Copy)]
enum NoteSlot {
    Note(usize),
    Hold(usize),
}

/// The previously parsed note, compared against each new one for syncs.
#[derive(Debug, Clone, Copy)]
struct SyncCandidate {
    object: ChartObject,
    interval: RingInterval,
    slot: NoteSlot,
    is_chain: bool,
}

impl SyncCandidate {
    fn is_hold(&self) -> bool {
        matches!(self.slot, NoteSlot::Hold(_))
    }
}

impl ChartParser {
    /// Decode raw chart bytes (UTF-8, falling back to Shift_JIS) and parse them.
    pub fn parse_bytes(bytes: &[u8]) -> Result<ParsedChart> {
        let content = decode_chart_bytes(bytes)?;
        Self::parse_str(&content)
    }

    /// Parse chart text. A leading byte order mark is ignored.
    pub fn parse_str(content: &str) -> Result<ParsedChart> {
        let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
        let lines: Vec<&str> = content.lines().collect();
        Self::parse_lines(&lines)
    }

    pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Result<ParsedChart> {
        let body_start = lines
            .iter()
            .position(|l| l.as_ref().trim() == BODY_MARKER)
            .ok_or(ParseError::MissingBody)?;

        let metadata = parse_metadata(&lines[..body_start])?;

        let body: Vec<BodyLine<'_>> = lines[body_start + 1..]
            .iter()
            .enumerate()
            .map(|(i, l)| BodyLine::new(body_start + i + 2, l.as_ref()))
            .filter(|l| !l.is_empty())
            .collect();

        let mut chart = parse_body(&body)?;
        chart.metadata = metadata;

        debug!(
            "Parsed chart: {} notes, {} holds, {} masks, {} syncs, {} gimmicks",
            chart.notes.len(),
            chart.holds.len(),
            chart.masks.len(),
            chart.syncs.len(),
            chart.gimmicks.len()
        );

        Ok(chart)
    }
}

/// Decode chart bytes as UTF-8, or as Shift_JIS for legacy files.
pub fn decode_chart_bytes(bytes: &[u8]) -> Result<Cow<'_, str>> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(Cow::Borrowed(text));
    }

    let (text, _, had_errors) = encoding_rs::SHIFT_JIS.decode(bytes);
    if had_errors {
        return Err(Error::Encoding(
            "chart is neither valid UTF-8 nor Shift_JIS".to_string(),
        ));
    }
    Ok(text)
}

fn parse_metadata<S: AsRef<str>>(lines: &[S]) -> Result<ChartMetadata> {
    let mut metadata = ChartMetadata::default();

    for (index, line) in lines.iter().enumerate() {
        let Some(rest) = line.as_ref().trim().strip_prefix('#') else {
            continue;
        };
        let (tag, value) = rest
            .split_once(char::is_whitespace)
            .map(|(t, v)| (t, v.trim()))
            .unwrap_or((rest, ""));

        let Some(tag) = MetadataTag::from_tag(tag) else {
            continue;
        };

        if let Some(field) = metadata.numeric_field(tag) {
            *field = value.parse().map_err(|_| ParseError::MalformedNumber {
                line: index + 1,
                token: value.to_string(),
            })?;
        } else if let Some(field) = metadata.text_field(tag) {
            *field = value.to_string();
        }
    }

    Ok(metadata)
}

fn parse_body(body: &[BodyLine<'_>]) -> Result<ParsedChart> {
    let index = SegmentIndex::build(body)?;
    debug!("Indexed {} hold segments", index.len());

    let mut chart = ParsedChart::default();
    let mut last_note: Option<SyncCandidate> = None;

    for line in body {
        match line.object_id()? {
            NOOP_OBJECT_ID => {}
            NOTE_OBJECT_ID => {
                let candidate = parse_note_line(line, body, &index, &mut chart)?;
                if let Some(candidate) = candidate {
                    if let Some(previous) = last_note {
                        link_sync(&previous, &candidate, &mut chart);
                    }
                    last_note = Some(candidate);
                }
            }
            gimmick_id => {
                if let Some(gimmick) = parse_gimmick_line(line, gimmick_id)? {
                    chart.gimmicks.push(gimmick);
                }
            }
        }
    }

    normalize_stops(&mut chart.gimmicks);
    Ok(chart)
}

/// Parse one note line into the chart. Returns the sync candidate for
/// notes and holds, `None` for everything else.
fn parse_note_line(
    line: &BodyLine<'_>,
    body: &[BodyLine<'_>],
    index: &SegmentIndex,
    chart: &mut ParsedChart,
) -> Result<Option<SyncCandidate>> {
    let type_id = line.note_type()?;
    let Some(note_type) = NoteTypeId::from_i32(type_id) else {
        return Err(ParseError::UnknownNoteType {
            line: line.line,
            type_id,
        }
        .into());
    };

    if let Some((kind, bonus)) = note_type.simple_note() {
        let (position, size) = line.position_and_size()?;
        let note = Note {
            object: line.object()?,
            id: line.note_id()?,
            position,
            size,
            kind,
            bonus,
            is_sync: false,
            hit_window: None,
        };
        let candidate = SyncCandidate {
            object: note.object,
            interval: note.interval(),
            slot: NoteSlot::Note(chart.notes.len()),
            is_chain: kind == NoteKind::Chain,
        };
        chart.notes.push(note);
        return Ok(Some(candidate));
    }

    match note_type {
        NoteTypeId::HoldStart | NoteTypeId::HoldStartRNote => {
            let bonus = if note_type == NoteTypeId::HoldStartRNote {
                BonusType::RNote
            } else {
                BonusType::None
            };
            let hold: HoldNote = resolve_hold(line, body, index, bonus)?;
            let candidate = SyncCandidate {
                object: *hold.object(),
                interval: hold.interval(),
                slot: NoteSlot::Hold(chart.holds.len()),
                is_chain: false,
            };
            chart.holds.push(hold);
            Ok(Some(candidate))
        }
        NoteTypeId::MaskAdd | NoteTypeId::MaskRemove => {
            let (position, size) = line.position_and_size()?;
            let direction = line.optional_int(FIELD_RENDER)?.unwrap_or(MaskDirection::None as i32);
            chart.masks.push(Mask {
                object: line.object()?,
                position,
                size,
                direction: MaskDirection::from_wire(direction),
                add: note_type == NoteTypeId::MaskAdd,
            });
            Ok(None)
        }
        NoteTypeId::EndOfChart => {
            chart.end_of_chart = Some(line.object()?);
            Ok(None)
        }
        // Consumed while resolving hold chains.
        _ => Ok(None),
    }
}

/// Mark two simultaneous notes as synced and add the connector between them.
fn link_sync(previous: &SyncCandidate, current: &SyncCandidate, chart: &mut ParsedChart) {
    if !previous.object.same_tick(&current.object) {
        return;
    }
    if previous.is_chain || current.is_chain {
        return;
    }
    // Overlapping holds already read as one shape.
    if previous.is_hold() && current.is_hold() && previous.interval == current.interval {
        return;
    }

    for slot in [previous.slot, current.slot] {
        match slot {
            NoteSlot::Note(i) => chart.notes[i].is_sync = true,
            NoteSlot::Hold(i) => chart.holds[i].is_sync = true,
        }
    }

    chart.syncs.push(SyncIndicator::connecting(
        current.object,
        previous.interval,
        current.interval,
    ));
}

fn parse_gimmick_line(line: &BodyLine<'_>, gimmick_id: i32) -> Result<Option<Gimmick>> {
    let Some(id) = GimmickId::from_i32(gimmick_id) else {
        warn!("Line {}: skipping unknown gimmick id {}", line.line, gimmick_id);
        return Ok(None);
    };

    let kind = match id {
        GimmickId::BeatsPerMinute => GimmickKind::BeatsPerMinute(line.float(FIELD_VALUE_1, "bpm")?),
        GimmickId::TimeSignature => {
            let upper = line.int(FIELD_VALUE_1, "time signature upper")?;
            let lower = match line.optional_int(FIELD_VALUE_2)? {
                Some(lower) if lower > 0 => lower,
                _ => DEFAULT_TIME_SIGNATURE_LOWER,
            };
            GimmickKind::TimeSignature(TimeSignature::new(upper, lower))
        }
        GimmickId::HiSpeed => GimmickKind::HiSpeed(line.float(FIELD_VALUE_1, "hi-speed")?),
        GimmickId::ReverseEffectStart => GimmickKind::ReverseEffectStart,
        GimmickId::ReverseEffectEnd => GimmickKind::ReverseEffectEnd,
        GimmickId::ReverseNoteEnd => GimmickKind::ReverseNoteEnd,
        GimmickId::StopStart => GimmickKind::StopStart,
        GimmickId::StopEnd => GimmickKind::StopEnd,
    };

    Ok(Some(Gimmick {
        object: line.object()?,
        kind,
    }))
}

/// Replace stops with hi-speed changes: a stop start freezes scrolling
/// (hi-speed 0) and a stop end restores the last hi-speed in effect.
fn normalize_stops(gimmicks: &mut [Gimmick]) {
    gimmicks.sort_by_key(|g| g.object.absolute_tick());

    let mut last_hi_speed = 1.0;
    for gimmick in gimmicks.iter_mut() {
        match gimmick.kind {
            GimmickKind::HiSpeed(value) => last_hi_speed = value,
            GimmickKind::StopStart => gimmick.kind = GimmickKind::HiSpeed(0.0),
            GimmickKind::StopEnd => gimmick.kind = GimmickKind::HiSpeed(last_hi_speed),
            _ => {}
        }
    }
}
