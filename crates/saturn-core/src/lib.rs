pub mod chart;
pub mod config;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod parse;
pub mod score;
pub mod timing;

pub use chart::{
    BgmData, BonusType, Chart, ChartMetadata, ChartObject, Gimmick, GimmickKind, HiSpeedData,
    HitWindow, HoldNote, HoldSegment, HoldSegmentKind, Mask, MaskDirection, Note, NoteKind,
    ParsedChart, SyncIndicator, TimeSignature, Timed,
};
pub use config::{ChartConfig, Config, ScoringConfig};
pub use error::{Error, ParseError, Result, ValidationError};
pub use geometry::RingInterval;
pub use loader::{ChartLoader, build_chart};
pub use parse::ChartParser;
pub use score::{
    Judgement, JudgementCounts, JudgementEvent, JudgementResult, NoteSource, ScoringManager,
    ScoringNote, TouchState,
};
pub use timing::{process, validate};
