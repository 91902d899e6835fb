use serde::{Deserialize, Serialize};
use strum::{FromRepr, IntoStaticStr};

/// Timing judgement tiers, worst to best.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    FromRepr,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum Judgement {
    #[default]
    #[strum(serialize = "NONE")]
    None = 0,
    #[strum(serialize = "MISS")]
    Miss = 1,
    #[strum(serialize = "GOOD")]
    Good = 2,
    #[strum(serialize = "GREAT")]
    Great = 3,
    #[strum(serialize = "MARVELOUS")]
    Marvelous = 4,
}

impl Judgement {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }

    /// Anything but None and Miss keeps the combo going.
    pub fn is_hit(&self) -> bool {
        *self >= Self::Good
    }
}

impl std::fmt::Display for Judgement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Outcome recorded against a single note. Set once, never overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JudgementResult {
    pub judgement: Judgement,
    /// Input time that produced the judgement; `None` for misses.
    pub hit_time_ms: Option<f32>,
    pub note_time_ms: f32,
}

impl JudgementResult {
    pub fn hit(judgement: Judgement, hit_time_ms: f32, note_time_ms: f32) -> Self {
        Self {
            judgement,
            hit_time_ms: Some(hit_time_ms),
            note_time_ms,
        }
    }

    pub fn miss(note_time_ms: f32) -> Self {
        Self {
            judgement: Judgement::Miss,
            hit_time_ms: None,
            note_time_ms,
        }
    }

    /// Signed timing error: negative is early, positive is late.
    pub fn time_error_ms(&self) -> Option<f32> {
        self.hit_time_ms.map(|hit| hit - self.note_time_ms)
    }

    pub fn is_judged(&self) -> bool {
        self.judgement != Judgement::None
    }
}
