//! Double-click discrimination (`double-click` feature).
//!
//! A short release is held back for one window. A second short release
//! inside the window turns into `DoubleUp`; if the window closes with one
//! click pending, the held-back `Up` is emitted late. Every single click
//! therefore costs one window of latency.

use crate::event::EventKind;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickTracker {
    pending: u8,
    countdown: u16,
}

impl ClickTracker {
    pub const fn new() -> Self {
        Self {
            pending: 0,
            countdown: 0,
        }
    }

    /// Run once per tick before the key is sampled.
    pub fn decay(&mut self) -> Option<EventKind> {
        if self.countdown == 0 {
            return None;
        }
        self.countdown -= 1;
        if self.countdown > 0 {
            return None;
        }
        let single = self.pending == 1;
        self.pending = 0;
        single.then_some(EventKind::Up)
    }

    /// A short press was released.
    pub fn short_up(&mut self, window: u16) -> Option<EventKind> {
        if window == 0 {
            return Some(EventKind::Up);
        }
        if self.countdown > 0 {
            let kind = if self.pending == 1 {
                EventKind::DoubleUp
            } else {
                EventKind::Up
            };
            // Window restarts so a third quick click is a plain Up.
            self.pending = 0;
            self.countdown = window;
            Some(kind)
        } else {
            self.pending = 1;
            self.countdown = window;
            None
        }
    }

    pub const fn is_pending(&self) -> bool {
        self.pending != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_click_is_released_when_window_closes() {
        let mut click = ClickTracker::new();
        assert_eq!(click.short_up(3), None);
        assert!(click.is_pending());
        assert_eq!(click.decay(), None);
        assert_eq!(click.decay(), None);
        assert_eq!(click.decay(), Some(EventKind::Up));
        assert!(!click.is_pending());
        assert_eq!(click.decay(), None);
    }

    #[test]
    fn second_click_inside_window_is_double() {
        let mut click = ClickTracker::new();
        assert_eq!(click.short_up(10), None);
        click.decay();
        assert_eq!(click.short_up(10), Some(EventKind::DoubleUp));
        // The cooldown window expires silently.
        for _ in 0..10 {
            assert_eq!(click.decay(), None);
        }
    }

    #[test]
    fn third_quick_click_is_plain_up() {
        let mut click = ClickTracker::new();
        click.short_up(10);
        click.short_up(10);
        assert_eq!(click.short_up(10), Some(EventKind::Up));
    }

    #[test]
    fn zero_window_never_holds_back() {
        let mut click = ClickTracker::new();
        assert_eq!(click.short_up(0), Some(EventKind::Up));
        assert_eq!(click.decay(), None);
    }
}
