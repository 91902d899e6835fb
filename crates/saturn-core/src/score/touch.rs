use crate::config::ring::{DEPTH_LAYERS, POSITIONS};
use crate::geometry::ring_position;

/// Snapshot of the touch ring: 60 positions by 4 depth layers.
///
/// Each layer is a bitmask with bit `n` set when position `n` is pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TouchState {
    layers: [u64; DEPTH_LAYERS],
}

impl TouchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state with every listed position pressed on the outer layer.
    pub fn from_positions<I: IntoIterator<Item = i32>>(positions: I) -> Self {
        let mut state = Self::default();
        for position in positions {
            state.set(position, 0, true);
        }
        state
    }

    /// Build a state from a full position-by-layer grid.
    pub fn from_grid(grid: &[[bool; DEPTH_LAYERS]]) -> Self {
        let mut state = Self::default();
        for (position, layers) in grid.iter().take(POSITIONS as usize).enumerate() {
            for (layer, &pressed) in layers.iter().enumerate() {
                state.set(position as i32, layer, pressed);
            }
        }
        state
    }

    /// Set one segment. Positions wrap; out-of-range layers are ignored.
    pub fn set(&mut self, position: i32, layer: usize, pressed: bool) {
        let Some(mask) = self.layers.get_mut(layer) else {
            return;
        };
        let bit = 1u64 << ring_position(position);
        if pressed {
            *mask |= bit;
        } else {
            *mask &= !bit;
        }
    }

    pub fn is_pressed(&self, position: i32, layer: usize) -> bool {
        self.layers
            .get(layer)
            .is_some_and(|mask| mask & (1u64 << ring_position(position)) != 0)
    }

    /// Positions pressed on any layer.
    pub fn position_mask(&self) -> u64 {
        self.layers.iter().fold(0, |acc, mask| acc | mask)
    }

    pub fn is_position_pressed(&self, position: i32) -> bool {
        self.position_mask() & (1u64 << ring_position(position)) != 0
    }

    /// Positions with at least one segment pressed now but not in `previous`.
    pub fn newly_pressed(&self, previous: &TouchState) -> u64 {
        self.layers
            .iter()
            .zip(previous.layers.iter())
            .fold(0, |acc, (now, before)| acc | (now & !before))
    }

    pub fn is_empty(&self) -> bool {
        self.position_mask() == 0
    }
}
