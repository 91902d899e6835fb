//! Hi-speed warped visual timeline.

use crate::chart::{BgmData, ChartObject, Gimmick, GimmickKind, HiSpeedData, Timed};
use crate::timing::bgm;

/// Build hi-speed breakpoints, starting from an implicit 1.0x entry at time 0.
///
/// Each breakpoint's scaled time advances by the elapsed real time at the
/// previous multiplier. Elapsed time is taken as an absolute value, so a 0x
/// segment freezes the scaled timeline instead of running it backwards.
pub(crate) fn generate(gimmicks: &[Gimmick], bgm_data: &[BgmData]) -> Vec<HiSpeedData> {
    let mut changes: Vec<(ChartObject, f32)> = gimmicks
        .iter()
        .filter_map(|g| match g.kind {
            GimmickKind::HiSpeed(multiplier) => Some((g.object, multiplier)),
            _ => None,
        })
        .collect();
    changes.sort_by_key(|(object, _)| object.absolute_tick());

    let mut data = Vec::with_capacity(changes.len() + 1);
    data.push(HiSpeedData {
        object: ChartObject::new(0, 0),
        multiplier: 1.0,
    });

    for (mut object, multiplier) in changes {
        let previous = data[data.len() - 1];
        object.time_ms = bgm::time_at(bgm_data, object.absolute_tick());
        object.scaled_visual_time = previous.scaled_visual_time()
            + (object.time_ms - previous.time_ms()).abs() * previous.multiplier;
        data.push(HiSpeedData { object, multiplier });
    }

    data
}

/// Scaled visual time reached at `time_ms`.
pub(crate) fn scaled_time_at(data: &[HiSpeedData], time_ms: f32) -> f32 {
    let index = data.partition_point(|entry| entry.time_ms() <= time_ms);
    let Some(entry) = data.get(index.saturating_sub(1)) else {
        return time_ms;
    };
    entry.scaled_visual_time() + (time_ms - entry.time_ms()) * entry.multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tempo() -> Vec<BgmData> {
        bgm::generate(&[Gimmick::new(0, 0, GimmickKind::BeatsPerMinute(120.0))])
    }

    #[test]
    fn test_no_hi_speed_is_identity() {
        let data = generate(&[], &tempo());
        assert_eq!(data.len(), 1);
        assert!((scaled_time_at(&data, 1234.0) - 1234.0).abs() < 1e-3);
    }

    #[test]
    fn test_double_speed() {
        let gimmicks = [Gimmick::new(1, 0, GimmickKind::HiSpeed(2.0))];
        let data = generate(&gimmicks, &tempo());
        assert_eq!(data.len(), 2);
        assert!((data[1].time_ms() - 2000.0).abs() < 1e-3);
        assert!((data[1].scaled_visual_time() - 2000.0).abs() < 1e-3);
        assert!((scaled_time_at(&data, 3000.0) - 4000.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_speed_freezes() {
        let gimmicks = [
            Gimmick::new(1, 0, GimmickKind::HiSpeed(0.0)),
            Gimmick::new(2, 0, GimmickKind::HiSpeed(1.0)),
        ];
        let data = generate(&gimmicks, &tempo());
        assert!((scaled_time_at(&data, 2500.0) - 2000.0).abs() < 1e-3);
        assert!((scaled_time_at(&data, 3900.0) - 2000.0).abs() < 1e-3);
        assert!((data[2].scaled_visual_time() - 2000.0).abs() < 1e-3);
        assert!((scaled_time_at(&data, 4500.0) - 2500.0).abs() < 1e-3);
    }

    #[test]
    fn test_hi_speed_at_start_overrides_implicit_entry() {
        let gimmicks = [Gimmick::new(0, 0, GimmickKind::HiSpeed(0.5))];
        let data = generate(&gimmicks, &tempo());
        assert!((scaled_time_at(&data, 1000.0) - 500.0).abs() < 1e-3);
    }
}
