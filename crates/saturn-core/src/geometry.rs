//! Modulo-60 ring arithmetic and interpolation helpers.

use serde::{Deserialize, Serialize};

use crate::config::ring::POSITIONS;

/// Euclidean modulo: the result always has the sign of `m`.
pub fn modulo(x: i32, m: i32) -> i32 {
    x.rem_euclid(m)
}

/// Wrap a position onto the ring.
pub fn ring_position(x: i32) -> i32 {
    modulo(x, POSITIONS)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Inverse of [`lerp`]. Returns 0 for an empty range.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    (value - a) / (b - a)
}

/// Map `value` from `[from_a, from_b]` onto `[to_a, to_b]` without clamping.
pub fn remap(value: f32, from_a: f32, from_b: f32, to_a: f32, to_b: f32) -> f32 {
    lerp(to_a, to_b, inverse_lerp(from_a, from_b, value))
}

/// Half-open arc `[left, left + size)` on the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RingInterval {
    pub left: i32,
    pub size: i32,
}

impl RingInterval {
    pub fn new(position: i32, size: i32) -> Self {
        Self {
            left: ring_position(position),
            size: size.clamp(1, POSITIONS),
        }
    }

    /// Exclusive end of the arc, wrapped onto the ring.
    pub fn right(&self) -> i32 {
        ring_position(self.left + self.size)
    }

    pub fn is_full_circle(&self) -> bool {
        self.size >= POSITIONS
    }

    pub fn contains(&self, position: i32) -> bool {
        self.is_full_circle() || modulo(position - self.left, POSITIONS) < self.size
    }

    /// Two arcs overlap iff either one's left edge lies inside the other.
    pub fn overlaps(&self, other: &RingInterval) -> bool {
        if self.is_full_circle() || other.is_full_circle() {
            return true;
        }
        self.contains(other.left) || other.contains(self.left)
    }

    /// Bitmask with one bit per covered position.
    pub fn position_mask(&self) -> u64 {
        (0..self.size).fold(0u64, |mask, offset| {
            mask | 1u64 << ring_position(self.left + offset)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modulo_negative() {
        assert_eq!(modulo(-1, 60), 59);
        assert_eq!(modulo(-61, 60), 59);
        assert_eq!(modulo(125, 60), 5);
        assert_eq!(ring_position(60), 0);
    }

    #[test]
    fn test_remap() {
        assert!((remap(5.0, 0.0, 10.0, 100.0, 200.0) - 150.0).abs() < 1e-4);
        // Reversed target range
        assert!((remap(2.0, 0.0, 10.0, 100.0, 0.0) - 80.0).abs() < 1e-4);
        assert_eq!(inverse_lerp(3.0, 3.0, 7.0), 0.0);
    }

    #[test]
    fn test_interval_right_wraps() {
        let interval = RingInterval::new(55, 10);
        assert_eq!(interval.right(), 5);
        assert!(interval.contains(58));
        assert!(interval.contains(2));
        assert!(!interval.contains(5));
        assert!(!interval.contains(54));
    }

    #[test]
    fn test_overlap_across_zero() {
        let a = RingInterval::new(55, 10);
        let b = RingInterval::new(3, 4);
        let c = RingInterval::new(5, 4);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn test_adjacent_intervals_do_not_overlap() {
        let a = RingInterval::new(0, 10);
        let b = RingInterval::new(10, 10);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_full_circle_always_overlaps() {
        let full = RingInterval::new(30, 60);
        let small = RingInterval::new(10, 1);
        assert!(full.is_full_circle());
        assert!(full.overlaps(&small));
        assert!(small.overlaps(&full));
        assert_eq!(full.position_mask(), (1u64 << 60) - 1);
    }

    #[test]
    fn test_position_mask_wraps() {
        let mask = RingInterval::new(58, 4).position_mask();
        assert_eq!(mask, (1u64 << 58) | (1u64 << 59) | 1u64 | (1u64 << 1));
    }
}
