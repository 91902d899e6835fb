use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Chart validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("A chart is already being loaded")]
    AlreadyLoading,

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Structural errors raised while turning chart text into objects.
///
/// Any of these aborts the load; no partial chart is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Chart has no #BODY marker")]
    MissingBody,

    #[error("Line {line}: malformed number {token:?}")]
    MalformedNumber { line: usize, token: String },

    #[error("Line {line}: missing field {field}")]
    MissingField { line: usize, field: &'static str },

    #[error("Line {line}: unknown note type {type_id}")]
    UnknownNoteType { line: usize, type_id: i32 },

    #[error("Line {line}: measure {measure} tick {tick} is outside the chart timeline")]
    ObjectOutOfRange { line: usize, measure: i32, tick: i32 },

    #[error("Line {line}: note size {size} is outside 1..=60")]
    InvalidSize { line: usize, size: i32 },

    #[error("Line {line}: hold segment {next_id} is never defined")]
    UnresolvedHoldSegment { line: usize, next_id: i32 },

    #[error("Line {line}: hold chain revisits segment {next_id}")]
    CyclicHoldChain { line: usize, next_id: i32 },
}

/// Consistency failures detected after the timing pipeline has run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Chart is missing an End of Chart note")]
    MissingEndOfChart,

    #[error("Object at measure {measure} tick {tick} is placed after the End of Chart note")]
    ObjectAfterEndOfChart { measure: i32, tick: i32 },

    #[error("Note at {time_ms:.1}ms is placed after the end of the audio ({audio_length_ms:.1}ms)")]
    NoteAfterAudioEnd { time_ms: f32, audio_length_ms: f32 },

    #[error("Chart has no BPM data")]
    MissingBgmData,

    #[error("First BPM/time signature change is not at measure 0 tick 0")]
    BgmDataNotAtStart,

    #[error("Reverse gimmicks come in groups of 3, found {count}")]
    ReverseGimmickCount { count: usize },

    #[error("Reverse gimmick at measure {measure} tick {tick} is out of order (expected {expected})")]
    ReverseGimmickOrder {
        measure: i32,
        tick: i32,
        expected: &'static str,
    },
}
