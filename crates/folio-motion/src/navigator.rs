//! Turns raw wheel and keyboard input into section navigation requests.

use crate::config::NavigationConfig;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
}

#[derive(Clone, Debug)]
pub struct ScrollNavigator {
    threshold: f32,
    accumulated: f32,
}

impl ScrollNavigator {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            threshold: config.wheel_threshold.max(f32::EPSILON),
            accumulated: 0.0,
        }
    }

    /// Feeds one wheel event. Positive deltas scroll down the page.
    ///
    /// Returns the section to move to once the accumulated delta crosses the
    /// threshold; the accumulator resets whenever the direction flips or a
    /// request is emitted.
    pub fn on_wheel(&mut self, delta_y: f32, current: usize, count: usize) -> Option<usize> {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return None;
        }
        if self.accumulated != 0.0 && self.accumulated.signum() != delta_y.signum() {
            self.accumulated = 0.0;
        }
        self.accumulated += delta_y;
        if self.accumulated.abs() < self.threshold {
            return None;
        }

        let down = self.accumulated > 0.0;
        self.accumulated = 0.0;
        step(current, count, down)
    }

    pub fn on_key(&mut self, key: NavKey, current: usize, count: usize) -> Option<usize> {
        self.accumulated = 0.0;
        match key {
            NavKey::ArrowDown | NavKey::PageDown => step(current, count, true),
            NavKey::ArrowUp | NavKey::PageUp => step(current, count, false),
            NavKey::Home => (count > 0 && current != 0).then_some(0),
            NavKey::End => {
                let last = count.checked_sub(1)?;
                (current != last).then_some(last)
            }
        }
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}

fn step(current: usize, count: usize, down: bool) -> Option<usize> {
    let target = if down {
        current.checked_add(1)?
    } else {
        current.checked_sub(1)?
    };
    (target < count).then_some(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator() -> ScrollNavigator {
        ScrollNavigator::new(&NavigationConfig::default())
    }

    #[test]
    fn test_wheel_accumulates_to_threshold() {
        let mut nav = navigator();
        assert_eq!(nav.on_wheel(20.0, 0, 3), None);
        assert_eq!(nav.on_wheel(20.0, 0, 3), None);
        assert_eq!(nav.on_wheel(20.0, 0, 3), Some(1));
        // accumulator was consumed
        assert_eq!(nav.on_wheel(20.0, 1, 3), None);
    }

    #[test]
    fn test_direction_flip_resets() {
        let mut nav = navigator();
        assert_eq!(nav.on_wheel(40.0, 1, 3), None);
        assert_eq!(nav.on_wheel(-40.0, 1, 3), None);
        assert_eq!(nav.on_wheel(-20.0, 1, 3), Some(0));
    }

    #[test]
    fn test_edges_are_rejected() {
        let mut nav = navigator();
        assert_eq!(nav.on_wheel(-500.0, 0, 3), None);
        assert_eq!(nav.on_wheel(500.0, 2, 3), None);
        assert_eq!(nav.on_key(NavKey::ArrowUp, 0, 3), None);
        assert_eq!(nav.on_key(NavKey::PageDown, 2, 3), None);
    }

    #[test]
    fn test_home_and_end() {
        let mut nav = navigator();
        assert_eq!(nav.on_key(NavKey::End, 0, 3), Some(2));
        assert_eq!(nav.on_key(NavKey::End, 2, 3), None);
        assert_eq!(nav.on_key(NavKey::Home, 2, 3), Some(0));
        assert_eq!(nav.on_key(NavKey::Home, 0, 3), None);
        assert_eq!(nav.on_key(NavKey::End, 0, 0), None);
    }
}
