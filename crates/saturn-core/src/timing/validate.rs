//! Post-pipeline consistency checks.

use crate::chart::{Chart, Timed};
use crate::config::ChartConfig;
use crate::error::ValidationError;
use crate::timing::reverse::TRIPLE_ORDER;

/// Check a processed chart. Returns the first problem found.
pub fn validate(chart: &Chart, config: &ChartConfig) -> Result<(), ValidationError> {
    check_end_of_chart(chart)?;
    if let Some(audio_length_ms) = config.audio_length_ms {
        check_audio_length(chart, audio_length_ms)?;
    }
    check_bgm_data(chart)?;
    check_reverse_gimmicks(chart)?;
    Ok(())
}

fn check_end_of_chart(chart: &Chart) -> Result<(), ValidationError> {
    let end = chart.end_of_chart.ok_or(ValidationError::MissingEndOfChart)?;
    let end_tick = end.absolute_tick();

    let note_objects = chart.notes.iter().map(|n| n.object);
    let segment_objects = chart
        .holds
        .iter()
        .flat_map(|h| h.segments().iter().map(|s| s.object));

    match note_objects
        .chain(segment_objects)
        .find(|object| object.absolute_tick() > end_tick)
    {
        Some(object) => Err(ValidationError::ObjectAfterEndOfChart {
            measure: object.measure,
            tick: object.tick,
        }),
        None => Ok(()),
    }
}

fn check_audio_length(chart: &Chart, audio_length_ms: f32) -> Result<(), ValidationError> {
    let note_times = chart.notes.iter().map(|n| n.time_ms());
    let hold_end_times = chart.holds.iter().map(|h| h.end().time_ms());

    match note_times
        .chain(hold_end_times)
        .find(|&time_ms| time_ms > audio_length_ms)
    {
        Some(time_ms) => Err(ValidationError::NoteAfterAudioEnd {
            time_ms,
            audio_length_ms,
        }),
        None => Ok(()),
    }
}

fn check_bgm_data(chart: &Chart) -> Result<(), ValidationError> {
    let first = chart
        .bgm_data
        .first()
        .ok_or(ValidationError::MissingBgmData)?;
    if first.absolute_tick() != 0 {
        return Err(ValidationError::BgmDataNotAtStart);
    }
    Ok(())
}

fn check_reverse_gimmicks(chart: &Chart) -> Result<(), ValidationError> {
    let count = chart.reverse_gimmicks.len();
    if count % TRIPLE_ORDER.len() != 0 {
        return Err(ValidationError::ReverseGimmickCount { count });
    }

    for (i, gimmick) in chart.reverse_gimmicks.iter().enumerate() {
        let expected = TRIPLE_ORDER[i % TRIPLE_ORDER.len()];
        if gimmick.kind != expected {
            return Err(ValidationError::ReverseGimmickOrder {
                measure: gimmick.object.measure,
                tick: gimmick.object.tick,
                expected: expected.name(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{
        BgmData, BonusType, ChartObject, Gimmick, GimmickKind, Note, NoteKind, TimeSignature,
    };

    fn note(measure: i32, time_ms: f32) -> Note {
        Note {
            object: ChartObject {
                time_ms,
                ..ChartObject::new(measure, 0)
            },
            id: 0,
            position: 0,
            size: 4,
            kind: NoteKind::Touch,
            bonus: BonusType::None,
            is_sync: false,
            hit_window: None,
        }
    }

    fn valid_chart() -> Chart {
        Chart {
            notes: vec![note(1, 2000.0), note(2, 4000.0)],
            bgm_data: vec![BgmData {
                object: ChartObject::new(0, 0),
                bpm: 120.0,
                time_signature: TimeSignature::default(),
            }],
            end_of_chart: Some(ChartObject::new(3, 0)),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_chart() {
        assert_eq!(validate(&valid_chart(), &ChartConfig::default()), Ok(()));
    }

    #[test]
    fn test_missing_end_of_chart() {
        let chart = Chart {
            end_of_chart: None,
            ..valid_chart()
        };
        assert_eq!(
            validate(&chart, &ChartConfig::default()),
            Err(ValidationError::MissingEndOfChart)
        );
    }

    #[test]
    fn test_note_after_end_of_chart() {
        let mut chart = valid_chart();
        chart.notes.push(note(4, 8000.0));
        assert_eq!(
            validate(&chart, &ChartConfig::default()),
            Err(ValidationError::ObjectAfterEndOfChart {
                measure: 4,
                tick: 0
            })
        );
    }

    #[test]
    fn test_note_after_audio_end() {
        let config = ChartConfig {
            audio_length_ms: Some(3000.0),
            ..Default::default()
        };
        assert!(matches!(
            validate(&valid_chart(), &config),
            Err(ValidationError::NoteAfterAudioEnd { .. })
        ));
    }

    #[test]
    fn test_bgm_data() {
        let mut chart = valid_chart();
        chart.bgm_data[0].object = ChartObject::new(1, 0);
        assert_eq!(
            validate(&chart, &ChartConfig::default()),
            Err(ValidationError::BgmDataNotAtStart)
        );

        chart.bgm_data.clear();
        assert_eq!(
            validate(&chart, &ChartConfig::default()),
            Err(ValidationError::MissingBgmData)
        );
    }

    #[test]
    fn test_reverse_gimmicks() {
        let mut chart = valid_chart();
        chart.reverse_gimmicks = vec![
            Gimmick::new(1, 0, GimmickKind::ReverseEffectStart),
            Gimmick::new(1, 960, GimmickKind::ReverseEffectEnd),
        ];
        assert_eq!(
            validate(&chart, &ChartConfig::default()),
            Err(ValidationError::ReverseGimmickCount { count: 2 })
        );

        chart
            .reverse_gimmicks
            .insert(1, Gimmick::new(1, 480, GimmickKind::ReverseNoteEnd));
        assert_eq!(
            validate(&chart, &ChartConfig::default()),
            Err(ValidationError::ReverseGimmickOrder {
                measure: 1,
                tick: 480,
                expected: "ReverseEffectEnd"
            })
        );
    }
}
