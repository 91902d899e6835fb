//! Integration tests for saturn-core
//!
//! These tests run chart text through the parser, timing pipeline, loader and
//! scoring engine together.

use std::sync::Arc;

use saturn_core::{
    ChartConfig, ChartLoader, ChartParser, Error, Judgement, ParseError, ScoringConfig,
    ScoringManager, Timed, TouchState, ValidationError, build_chart, process,
};

const SAMPLE_CHART: &str = "#MUSIC_SCORE_ID 0\n\
#LEVEL 12.8\n\
#CLEAR_THRESHOLD 0.83\n\
#OFFSET 0.0\n\
#MOVIEOFFSET 0.0\n\
#AUTHOR Tester\n\
#BODY\n\
0 0 2 120\n\
0 0 3 4 4\n\
0 0 1 12 0 0 60 1\n\
1 0 1 1 1 0 10 1\n\
1 0 1 1 2 20 10 1\n\
1 960 1 3 3 15 6 1\n\
2 0 1 9 4 40 8 1 5\n\
2 960 1 10 5 44 8 1 6\n\
3 0 1 11 6 48 8 1\n\
3 960 1 16 7 30 4 1\n\
4 0 1 14 8 0 60\n";

fn sample() -> saturn_core::Chart {
    build_chart(SAMPLE_CHART, &ChartConfig::default()).unwrap()
}

/// End-to-end chart build
mod pipeline_tests {
    use super::*;

    #[test]
    fn test_sample_chart_builds() {
        let chart = sample();
        assert!((chart.metadata.level - 12.8).abs() < 1e-4);
        assert_eq!(chart.metadata.author, "Tester");
        assert_eq!(chart.notes.len(), 4);
        assert_eq!(chart.holds.len(), 1);
        assert_eq!(chart.masks.len(), 1);
        assert_eq!(chart.syncs.len(), 1);
        assert_eq!(chart.bar_lines.len(), 5);
        assert_eq!(chart.note_count(), 5);
        assert_eq!(chart.duration_ms(), Some(8000.0));
    }

    #[test]
    fn test_tempo_integration() {
        let chart = sample();
        // 120 BPM 4/4: one measure is 2000ms
        assert!((chart.notes[0].time_ms() - 2000.0).abs() < 1e-3);
        assert!((chart.notes[2].time_ms() - 3000.0).abs() < 1e-3);
        assert!((chart.holds[0].end().time_ms() - 6000.0).abs() < 1e-3);
    }

    #[test]
    fn test_every_note_has_hit_window() {
        let chart = sample();
        for note in &chart.notes {
            let window = note.hit_window.unwrap();
            assert!(window.earliest_ms <= note.time_ms());
            assert!(note.time_ms() <= window.latest_ms);
        }
        assert!(chart.holds[0].hit_window.is_some());
    }

    #[test]
    fn test_json_round_trip() {
        let chart = sample();
        let json = chart.to_json().unwrap();
        let restored = saturn_core::Chart::from_json(&json).unwrap();
        assert_eq!(restored, chart);
    }

    #[test]
    fn test_missing_end_of_chart_is_invalid() {
        let content = SAMPLE_CHART.replace("4 0 1 14 8 0 60\n", "");
        let result = build_chart(&content, &ChartConfig::default());
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::MissingEndOfChart))
        ));
    }

    #[test]
    fn test_audio_length_validation() {
        let config = ChartConfig {
            audio_length_ms: Some(5000.0),
            ..Default::default()
        };
        let result = build_chart(SAMPLE_CHART, &config);
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::NoteAfterAudioEnd { .. }))
        ));
    }

    #[test]
    fn test_malformed_reverse_group_is_invalid() {
        let content = SAMPLE_CHART.replace("#BODY\n", "#BODY\n1 0 7\n2 0 6\n3 0 8\n");
        let parsed = ChartParser::parse_str(&content).unwrap();
        let chart = process(parsed, &ChartConfig::default()).unwrap();
        // Skipped when generating, reported by validation
        assert!(chart.reverse_notes.is_empty());
        assert!(matches!(
            saturn_core::validate(&chart, &ChartConfig::default()),
            Err(ValidationError::ReverseGimmickOrder { .. })
        ));
    }
}

/// Hi-speed and reverse behaviour
mod visual_time_tests {
    use super::*;

    #[test]
    fn test_hi_speed_zero_freezes_notes() {
        let content = SAMPLE_CHART.replace("#BODY\n", "#BODY\n1 0 5 0\n");
        let chart = build_chart(&content, &ChartConfig::default()).unwrap();

        let first = chart.notes[0].scaled_visual_time();
        let later = chart.notes[2].scaled_visual_time();
        assert!((first - later).abs() < 1e-3);
        assert!(chart.notes[2].time_ms() > chart.notes[0].time_ms());
    }

    #[test]
    fn test_reverse_boundary() {
        let content = SAMPLE_CHART.replace("#BODY\n", "#BODY\n0 960 6\n1 0 7\n1 960 8\n");
        let chart = build_chart(&content, &ChartConfig::default()).unwrap();

        let start = chart.reverse_gimmicks[0].scaled_visual_time();
        let effect_end = chart.reverse_gimmicks[1].scaled_visual_time();
        let note_end = chart.reverse_gimmicks[2].scaled_visual_time();

        // Both notes at EffectEnd are reversed; the snap at NoteEnd is not
        assert_eq!(chart.reverse_notes.len(), 2);
        for note in &chart.reverse_notes {
            let expected = start + (note_end - effect_end);
            assert!((note.scaled_visual_time() - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_reverse_lists_ascending_across_sections() {
        let content = SAMPLE_CHART.replace(
            "#BODY\n",
            "#BODY\n0 0 6\n0 960 7\n1 960 8\n2 0 6\n2 960 7\n4 0 8\n",
        );
        let chart = build_chart(&content, &ChartConfig::default()).unwrap();

        assert_eq!(chart.reverse_notes.len(), 3);
        let times: Vec<f32> = chart
            .reverse_notes
            .iter()
            .map(|n| n.scaled_visual_time())
            .collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]), "{times:?}");
    }
}

/// Mirroring
mod mirror_tests {
    use super::*;

    #[test]
    fn test_mirror_twice_restores_positions() {
        let plain = sample();
        let mut chart = build_chart(
            SAMPLE_CHART,
            &ChartConfig {
                mirror_enabled: true,
                mirror_axis: 17,
                ..Default::default()
            },
        )
        .unwrap();

        assert_ne!(chart.notes, plain.notes);
        for note in &mut chart.notes {
            note.mirror(17);
        }
        for (mirrored, original) in chart.notes.iter().zip(&plain.notes) {
            assert_eq!(mirrored.position, original.position);
            assert_eq!(mirrored.kind, original.kind);
        }
    }

    #[test]
    fn test_wrapped_position_mirrors_back() {
        let content = SAMPLE_CHART.replace("1 960 1 3 3 15 6 1\n", "1 960 1 3 3 65 6 1\n");
        let plain = build_chart(&content, &ChartConfig::default()).unwrap();
        assert_eq!(plain.notes[2].position, 5);

        let mut mirrored = build_chart(
            &content,
            &ChartConfig {
                mirror_enabled: true,
                mirror_axis: 30,
                ..Default::default()
            },
        )
        .unwrap();
        mirrored.notes[2].mirror(30);
        assert_eq!(mirrored.notes[2].position, 5);
    }
}

/// Malformed placement
mod range_tests {
    use super::*;

    #[test]
    fn test_huge_measure_fails_load() {
        let content = SAMPLE_CHART.replace("4 0 1 14 8 0 60\n", "1200001 0 1 14 8 0 60\n");
        assert!(matches!(
            build_chart(&content, &ChartConfig::default()),
            Err(Error::Parse(ParseError::ObjectOutOfRange {
                measure: 1_200_001,
                ..
            }))
        ));
    }

    #[test]
    fn test_tick_past_measure_fails_load() {
        let content = SAMPLE_CHART.replace("3 960 1 16", "3 5000 1 16");
        assert!(matches!(
            build_chart(&content, &ChartConfig::default()),
            Err(Error::Parse(ParseError::ObjectOutOfRange { tick: 5000, .. }))
        ));
    }
}

/// Loader guard and swap
mod loader_tests {
    use super::*;

    #[test]
    fn test_loader_keeps_chart_on_failure() {
        let loader = ChartLoader::new(ChartConfig::default());
        let first = loader.load_str(SAMPLE_CHART).unwrap();

        let broken = SAMPLE_CHART.replace("3 0 1 11 6 48 8 1\n", "");
        assert!(matches!(
            loader.load_str(&broken),
            Err(Error::Parse(_))
        ));
        assert!(Arc::ptr_eq(&first, &loader.current().unwrap()));
    }

    #[test]
    fn test_load_bytes() {
        let loader = ChartLoader::default();
        let chart = loader.load_bytes(SAMPLE_CHART.as_bytes()).unwrap();
        assert_eq!(chart.note_count(), 5);
    }
}

/// Scoring over a processed chart
mod scoring_tests {
    use super::*;

    fn session() -> ScoringManager {
        let mut manager = ScoringManager::new(ScoringConfig::default());
        manager.load_chart(Arc::new(sample()));
        manager
    }

    #[test]
    fn test_perfect_play() {
        let mut manager = session();
        let chart = Arc::clone(manager.chart().unwrap());

        let mut presses: Vec<(f32, i32)> = chart
            .notes
            .iter()
            .map(|n| (n.time_ms(), n.position))
            .chain(chart.holds.iter().map(|h| (h.time_ms(), h.start().position)))
            .collect();
        presses.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut groups: Vec<(f32, Vec<i32>)> = Vec::new();
        for (time, position) in presses {
            let same_instant = groups
                .last()
                .is_some_and(|(last, _)| (last - time).abs() < 1e-3);
            if !same_instant {
                groups.push((time, Vec::new()));
            }
            if let Some((_, positions)) = groups.last_mut() {
                positions.push(position);
            }
        }

        for (time, positions) in groups {
            // Release, then press every note at this instant
            manager.new_touch_state(time - 1.0, TouchState::new());
            manager.new_touch_state(time, TouchState::from_positions(positions));
        }
        manager.advance(20_000.0);

        let counts = manager.counts();
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.miss, 0);
        assert!(counts.is_all_marvelous());
        assert!(manager.is_finished());
    }

    #[test]
    fn test_no_input_misses_everything() {
        let mut manager = session();
        let mut misses = 0;
        for step in 0..200 {
            for event in manager.advance(step as f32 * 50.0) {
                assert_eq!(event.result.judgement, Judgement::Miss);
                misses += 1;
            }
        }
        assert_eq!(misses, 5);
        assert_eq!(manager.counts().max_combo, 0);
    }

    #[test]
    fn test_judgements_never_reassigned() {
        let mut manager = session();
        let mut seen = Vec::new();
        let mut last_cursor = 0;

        for step in 0..400 {
            let time = step as f32 * 25.0;
            for event in manager.handle_input(time) {
                assert!(!seen.contains(&event.index));
                seen.push(event.index);
            }
            assert!(manager.min_note_index() >= last_cursor);
            last_cursor = manager.min_note_index();
        }

        assert_eq!(seen.len(), manager.notes().len());
    }
}
