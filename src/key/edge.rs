//! Edge-triggered classifier for the 1 ms scan.
//!
//! No debounce: the first active sample is a `Down`, the first inactive
//! sample after that is an `Up`. Long-press and repeat use the key's
//! configured tick counts, read in 1 ms ticks. Repeats go out as extra
//! `Down` codes.

use super::state::KeyState;
use crate::event::EventKind;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeTrack {
    down: bool,
    long_pressed: bool,
    long_count: u16,
    repeat_count: u16,
}

impl EdgeTrack {
    pub const fn new() -> Self {
        Self {
            down: false,
            long_pressed: false,
            long_count: 0,
            repeat_count: 0,
        }
    }

    pub const fn is_down(&self) -> bool {
        self.down
    }

    pub fn restart_repeat(&mut self) {
        self.repeat_count = 0;
    }
}

/// Advance one key by one 1 ms tick.
pub(super) fn advance_edge(key: &mut KeyState, active: bool) -> Option<EventKind> {
    let long_press_ticks = key.long_press_ticks;
    let repeat_ticks = key.repeat_ticks;
    let edge = &mut key.edge;

    if !active {
        edge.long_pressed = false;
        edge.long_count = 0;
        edge.repeat_count = 0;
        if edge.down {
            edge.down = false;
            return Some(EventKind::Up);
        }
        return None;
    }

    if !edge.down {
        edge.down = true;
        return Some(EventKind::Down);
    }

    if long_press_ticks == 0 {
        return None;
    }

    if !edge.long_pressed {
        edge.long_count = edge.long_count.saturating_add(1);
        if edge.long_count >= long_press_ticks {
            edge.long_pressed = true;
            return Some(EventKind::LongDown);
        }
    } else if repeat_ticks > 0 {
        edge.repeat_count += 1;
        if edge.repeat_count >= repeat_ticks {
            edge.repeat_count = 0;
            return Some(EventKind::Down);
        }
    }
    None
}
