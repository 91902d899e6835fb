use std::str::FromStr;

use crate::chart::ChartObject;
use crate::config::timing::{MAX_MEASURE, TICKS_PER_MEASURE};
use crate::error::ParseError;
use crate::geometry::ring_position;

/// Object id that introduces a note line.
pub(crate) const NOTE_OBJECT_ID: i32 = 1;

/// Object id that does nothing.
pub(crate) const NOOP_OBJECT_ID: i32 = 0;

// Field layout: measure tick objectId typeId noteId position size renderFlag nextId
pub(crate) const FIELD_MEASURE: usize = 0;
pub(crate) const FIELD_TICK: usize = 1;
pub(crate) const FIELD_OBJECT_ID: usize = 2;
pub(crate) const FIELD_NOTE_TYPE: usize = 3;
pub(crate) const FIELD_NOTE_ID: usize = 4;
pub(crate) const FIELD_POSITION: usize = 5;
pub(crate) const FIELD_SIZE: usize = 6;
pub(crate) const FIELD_RENDER: usize = 7;
pub(crate) const FIELD_NEXT_ID: usize = 8;

// Gimmick values follow the object id.
pub(crate) const FIELD_VALUE_1: usize = 3;
pub(crate) const FIELD_VALUE_2: usize = 4;

/// A whitespace-tokenized body line with its 1-based file line number.
#[derive(Debug, Clone)]
pub(crate) struct BodyLine<'a> {
    pub line: usize,
    fields: Vec<&'a str>,
}

impl<'a> BodyLine<'a> {
    pub fn new(line: usize, text: &'a str) -> Self {
        Self {
            line,
            fields: text.split_whitespace().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn parse<T: FromStr>(&self, index: usize, field: &'static str) -> Result<T, ParseError> {
        let token = self.fields.get(index).ok_or(ParseError::MissingField {
            line: self.line,
            field,
        })?;
        token.parse().map_err(|_| ParseError::MalformedNumber {
            line: self.line,
            token: token.to_string(),
        })
    }

    fn parse_optional<T: FromStr>(&self, index: usize) -> Result<Option<T>, ParseError> {
        match self.fields.get(index) {
            None => Ok(None),
            Some(token) => token
                .parse()
                .map(Some)
                .map_err(|_| ParseError::MalformedNumber {
                    line: self.line,
                    token: token.to_string(),
                }),
        }
    }

    pub fn int(&self, index: usize, field: &'static str) -> Result<i32, ParseError> {
        self.parse(index, field)
    }

    pub fn optional_int(&self, index: usize) -> Result<Option<i32>, ParseError> {
        self.parse_optional(index)
    }

    pub fn float(&self, index: usize, field: &'static str) -> Result<f32, ParseError> {
        self.parse(index, field)
    }

    /// Measure in `0..=MAX_MEASURE`, tick in `0..TICKS_PER_MEASURE`.
    pub fn object(&self) -> Result<ChartObject, ParseError> {
        let measure = self.int(FIELD_MEASURE, "measure")?;
        let tick = self.int(FIELD_TICK, "tick")?;
        if !(0..=MAX_MEASURE).contains(&measure) || !(0..TICKS_PER_MEASURE).contains(&tick) {
            return Err(ParseError::ObjectOutOfRange {
                line: self.line,
                measure,
                tick,
            });
        }
        Ok(ChartObject::new(measure, tick))
    }

    pub fn object_id(&self) -> Result<i32, ParseError> {
        self.int(FIELD_OBJECT_ID, "object id")
    }

    pub fn note_type(&self) -> Result<i32, ParseError> {
        self.int(FIELD_NOTE_TYPE, "note type")
    }

    pub fn note_id(&self) -> Result<i32, ParseError> {
        self.int(FIELD_NOTE_ID, "note id")
    }

    /// Position wrapped onto the ring, and size checked to 1..=60.
    pub fn position_and_size(&self) -> Result<(i32, i32), ParseError> {
        let position = self.int(FIELD_POSITION, "position")?;
        let size = self.int(FIELD_SIZE, "size")?;
        if !(1..=60).contains(&size) {
            return Err(ParseError::InvalidSize {
                line: self.line,
                size,
            });
        }
        Ok((ring_position(position), size))
    }

    /// Render flag; absent means visible.
    pub fn render_flag(&self) -> Result<bool, ParseError> {
        Ok(self.optional_int(FIELD_RENDER)?.is_none_or(|flag| flag != 0))
    }

    pub fn next_id(&self) -> Result<i32, ParseError> {
        self.int(FIELD_NEXT_ID, "next segment id")
    }

    /// Note type of a note line, `None` for gimmick and no-op lines.
    pub fn note_type_if_note(&self) -> Option<i32> {
        match self.object_id() {
            Ok(NOTE_OBJECT_ID) => self.note_type().ok(),
            _ => None,
        }
    }
}
