//! Display idle timer.
//!
//! Counts scan ticks without key activity; once the timeout elapses the
//! display should go to sleep. The application decides what counts as
//! activity and calls [`IdleTimer::wake`] for it.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IdleTimer {
    timeout: u32,
    remaining: u32,
    display_on: bool,
}

impl IdleTimer {
    /// A `timeout` of 0 keeps the display on forever.
    pub const fn new(timeout: u32) -> Self {
        Self {
            timeout,
            remaining: timeout,
            display_on: true,
        }
    }

    /// Advance by one scan tick.
    pub fn tick(&mut self) {
        if self.remaining > 0 {
            self.remaining -= 1;
            if self.remaining == 0 {
                self.display_on = false;
            }
        }
    }

    /// Restart the countdown and turn the display back on.
    pub fn wake(&mut self) {
        self.remaining = self.timeout;
        self.display_on = true;
    }

    /// Change the timeout and restart the countdown.
    pub fn set_timeout(&mut self, timeout: u32) {
        self.timeout = timeout;
        self.wake();
    }

    pub const fn display_on(&self) -> bool {
        self.display_on
    }

    pub const fn remaining(&self) -> u32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_sleeps_when_timeout_elapses() {
        let mut idle = IdleTimer::new(3);
        idle.tick();
        idle.tick();
        assert!(idle.display_on());
        idle.tick();
        assert!(!idle.display_on());
        // Stays asleep; the counter does not wrap.
        idle.tick();
        assert!(!idle.display_on());
        assert_eq!(idle.remaining(), 0);
    }

    #[test]
    fn wake_rearms_the_countdown() {
        let mut idle = IdleTimer::new(2);
        idle.tick();
        idle.tick();
        assert!(!idle.display_on());
        idle.wake();
        assert!(idle.display_on());
        assert_eq!(idle.remaining(), 2);
        idle.tick();
        assert!(idle.display_on());
    }

    #[test]
    fn zero_timeout_never_sleeps() {
        let mut idle = IdleTimer::new(0);
        for _ in 0..1000 {
            idle.tick();
        }
        assert!(idle.display_on());
    }

    #[test]
    fn set_timeout_restarts_from_new_value() {
        let mut idle = IdleTimer::new(100);
        idle.tick();
        idle.set_timeout(1);
        idle.tick();
        assert!(!idle.display_on());
    }
}
