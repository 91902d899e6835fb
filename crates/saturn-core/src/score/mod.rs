//! Scoring and judgement types.
//!
//! This module contains the input judgement engine and its results:
//! - `Judgement`, `JudgementResult` - timing tiers and per-note outcomes
//! - `TouchState` - 60 x 4 touch ring snapshot
//! - `ScoringNote` - a note with its scoring-time hit window
//! - `ScoringManager`, `JudgementEvent` - the engine and its judgement stream
//! - `JudgementCounts` - session totals and combo

mod judgement;
mod manager;
mod scoring_note;
mod summary;
mod touch;

pub use judgement::*;
pub use manager::*;
pub use scoring_note::*;
pub use summary::*;
pub use touch::*;
