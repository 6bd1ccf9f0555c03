//! Sliding window of decoded states around the playback time

use crate::bike::BikeState;

/// Number of states held by a [`StateWindow`]
pub const WINDOW_SIZE: usize = 4;

/// Four consecutive decoded states
///
/// Slot 1 is the latest state at or before the playback time and slot 2 the
/// earliest after it; slots 0 and 3 extend the bracket on each side.
#[derive(Debug, Clone, Copy)]
pub struct StateWindow {
    slots: [BikeState; WINDOW_SIZE],
}

impl StateWindow {
    /// Window with every slot holding `state`
    pub fn new(state: BikeState) -> Self {
        Self {
            slots: [state; WINDOW_SIZE],
        }
    }

    /// Fill every slot with `state`
    pub fn seed(&mut self, state: BikeState) {
        self.slots = [state; WINDOW_SIZE];
    }

    /// Drop the oldest state and append `state` as the newest
    pub fn shift_in(&mut self, state: BikeState) {
        self.slots.rotate_left(1);
        self.slots[WINDOW_SIZE - 1] = state;
    }

    /// Shift with a copy of the newest state, once the replay has no more
    pub fn duplicate_last(&mut self) {
        let last = self.slots[WINDOW_SIZE - 1];
        self.shift_in(last);
    }

    pub fn oldest_past(&self) -> &BikeState {
        &self.slots[0]
    }

    pub fn past(&self) -> &BikeState {
        &self.slots[1]
    }

    pub fn future(&self) -> &BikeState {
        &self.slots[2]
    }

    pub fn last(&self) -> &BikeState {
        &self.slots[WINDOW_SIZE - 1]
    }

    pub fn slots(&self) -> &[BikeState; WINDOW_SIZE] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(time: f32) -> BikeState {
        BikeState {
            game_time: time,
            ..Default::default()
        }
    }

    fn times(window: &StateWindow) -> Vec<f32> {
        window.slots().iter().map(|s| s.game_time).collect()
    }

    #[test]
    fn test_seed_fills_all_slots() {
        let mut window = StateWindow::new(at(1.0));
        assert_eq!(times(&window), vec![1.0; 4]);
        window.seed(at(7.0));
        assert_eq!(times(&window), vec![7.0; 4]);
    }

    #[test]
    fn test_shift_in() {
        let mut window = StateWindow::new(at(0.0));
        for t in [1.0, 2.0, 3.0] {
            window.shift_in(at(t));
        }
        assert_eq!(times(&window), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(window.oldest_past().game_time, 0.0);
        assert_eq!(window.past().game_time, 1.0);
        assert_eq!(window.future().game_time, 2.0);
        assert_eq!(window.last().game_time, 3.0);
    }

    #[test]
    fn test_duplicate_last() {
        let mut window = StateWindow::new(at(0.0));
        window.shift_in(at(5.0));
        window.duplicate_last();
        assert_eq!(times(&window), vec![0.0, 0.0, 5.0, 5.0]);
    }
}
