//! Reverse effect sections.
//!
//! A reverse triple `(EffectStart, EffectEnd, NoteEnd)` replays the notes in
//! `[EffectEnd, NoteEnd)` backwards during `[EffectStart, EffectEnd)`. Only the
//! scaled visual time of the clones changes; judgement still uses the
//! original notes.

use tracing::warn;

use crate::chart::{Gimmick, GimmickKind, HoldNote, Note, Timed};
use crate::geometry::remap;

/// Expected kind order within each reverse triple.
pub(crate) const TRIPLE_ORDER: [GimmickKind; 3] = [
    GimmickKind::ReverseEffectStart,
    GimmickKind::ReverseEffectEnd,
    GimmickKind::ReverseNoteEnd,
];

/// Scaled visual times of one well-formed reverse triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverseSection {
    pub effect_start: f32,
    pub effect_end: f32,
    pub note_end: f32,
}

impl ReverseSection {
    /// Notes in `[effect_end, note_end)` get a reversed clone.
    pub fn contains(&self, scaled_visual_time: f32) -> bool {
        self.effect_end <= scaled_visual_time && scaled_visual_time < self.note_end
    }

    /// Map a scaled time in the reversed range onto the effect range, backwards.
    pub fn remap(&self, scaled_visual_time: f32) -> f32 {
        let mirror_time = self.effect_start + (self.note_end - self.effect_end);
        remap(
            scaled_visual_time,
            self.effect_end,
            self.note_end,
            mirror_time,
            self.effect_start,
        )
    }
}

/// Well-formed sections from time-stamped reverse gimmicks in tick order.
/// Malformed groups are skipped here and reported by validation.
pub(crate) fn sections(reverse_gimmicks: &[Gimmick]) -> Vec<ReverseSection> {
    let mut sections = Vec::with_capacity(reverse_gimmicks.len() / 3);

    for group in reverse_gimmicks.chunks(TRIPLE_ORDER.len()) {
        let first = group[0].object;
        let in_order = group.len() == TRIPLE_ORDER.len()
            && group
                .iter()
                .zip(TRIPLE_ORDER)
                .all(|(gimmick, expected)| gimmick.kind == expected);

        if !in_order {
            warn!(
                "Skipping malformed reverse group at measure {} tick {}",
                first.measure, first.tick
            );
            continue;
        }

        sections.push(ReverseSection {
            effect_start: group[0].scaled_visual_time(),
            effect_end: group[1].scaled_visual_time(),
            note_end: group[2].scaled_visual_time(),
        });
    }

    sections
}

/// Reversed clones of every note and hold starting inside a section,
/// ordered by their remapped scaled time.
pub(crate) fn generate(
    sections: &[ReverseSection],
    notes: &[Note],
    holds: &[HoldNote],
) -> (Vec<Note>, Vec<HoldNote>) {
    let mut reverse_notes = Vec::new();
    let mut reverse_holds = Vec::new();

    for section in sections {
        for note in notes.iter().filter(|n| section.contains(n.scaled_visual_time())) {
            let mut clone = note.clone();
            clone.object.scaled_visual_time = section.remap(note.scaled_visual_time());
            reverse_notes.push(clone);
        }

        for hold in holds.iter().filter(|h| section.contains(h.scaled_visual_time())) {
            let mut clone = hold.clone();
            for segment in clone.segments_mut() {
                segment.object.scaled_visual_time = section.remap(segment.object.scaled_visual_time);
            }
            clone.reverse_segments();
            reverse_holds.push(clone);
        }
    }

    // Stable, so clones sharing a remapped instant keep source order.
    reverse_notes.sort_by(|a, b| a.scaled_visual_time().total_cmp(&b.scaled_visual_time()));
    reverse_holds.sort_by(|a, b| a.scaled_visual_time().total_cmp(&b.scaled_visual_time()));

    (reverse_notes, reverse_holds)
}
