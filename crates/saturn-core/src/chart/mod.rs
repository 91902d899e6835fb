//! Chart object model.
//!
//! This module contains the types a chart is built from:
//! - `ChartObject` - measure/tick placement plus computed timestamps
//! - `Note`, `HoldNote`, `HoldSegment` - playable notes and their hit-window tables
//! - `Mask`, `SyncIndicator`, `TimeSignature` - visual and tempo helpers
//! - `Gimmick`, `BgmData`, `HiSpeedData` - tempo, scroll and reverse events
//! - `ParsedChart`, `Chart` - parser output and the fully processed chart

mod gimmick;
mod metadata;
mod model;
mod note;
mod object;

pub use gimmick::*;
pub use metadata::*;
pub use model::*;
pub use note::*;
pub use object::*;
