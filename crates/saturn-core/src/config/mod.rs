//! Configuration and shared constants.
//!
//! This module contains:
//! - `Config`, `ChartConfig`, `ScoringConfig` - host-resolved settings passed
//!   into the chart pipeline and scoring engine
//! - Timing, ring and scoring constants

mod settings;

pub use settings::*;

/// Chart timing constants.
pub mod timing {
    /// Ticks in one measure.
    pub const TICKS_PER_MEASURE: i32 = 1920;

    /// Highest measure accepted by the parser. Keeps absolute ticks well inside `i32`.
    pub const MAX_MEASURE: i32 = 9999;

    /// Length of one 60Hz frame in milliseconds. Hit windows are defined in frames.
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Milliseconds per minute, used when integrating tempo.
    pub const MS_PER_MINUTE: f32 = 60_000.0;

    /// Beats in a measure of ratio 1.0 (4/4).
    pub const BEATS_PER_WHOLE_MEASURE: f32 = 4.0;
}

/// Play surface geometry.
pub mod ring {
    /// Number of positions around the ring.
    pub const POSITIONS: i32 = 60;

    /// Number of depth layers sensed per position.
    pub const DEPTH_LAYERS: usize = 4;

    /// Axis that leaves a chart visually unchanged left-to-right when mirrored.
    pub const DEFAULT_MIRROR_AXIS: i32 = 30;
}

/// Scoring engine defaults.
///
/// Both thresholds must exceed the widest Miss boundary of any note type
/// (10 frames, ~167ms) so a note is never discarded while still hittable.
pub mod scoring {
    /// Notes this far behind the input time are finalised as Miss and skipped.
    pub const IGNORE_PAST_NOTES_MS: f32 = 500.0;

    /// Notes this far ahead of the input time stop the scan.
    pub const IGNORE_FUTURE_NOTES_MS: f32 = 500.0;
}
