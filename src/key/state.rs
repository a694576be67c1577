//! Per-key record and the debounced classifier.
//!
//! The debounce counter runs in `0..=2F` (F = filter ticks). An active
//! sample below F jumps straight to F, then each further active sample
//! climbs by one; the key settles as pressed when the counter reaches
//! 2F. Release mirrors this: above F snaps down to F, then one step per
//! inactive sample, and the key is released when the counter hits 0.
//! A single odd sample therefore moves the counter by at most F and can
//! never cross a settle point.

use super::edge::EdgeTrack;
use super::ScanConfig;
use crate::event::EventKind;

#[cfg(feature = "double-click")]
use super::click::ClickTracker;

/// Debounced, classified state of one key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Settled {
    Released,
    Pressed,
    LongPressed,
}

/// Which scan cadence classifies a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanMode {
    /// Debounced 10 ms scan (`tick`).
    Debounced,
    /// Edge-triggered 1 ms scan (`fast_tick`), no debounce.
    Edge,
    /// Both scans, each with its own state.
    Both,
}

impl ScanMode {
    pub const fn debounced(self) -> bool {
        matches!(self, ScanMode::Debounced | ScanMode::Both)
    }

    pub const fn edge(self) -> bool {
        matches!(self, ScanMode::Edge | ScanMode::Both)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct KeyState {
    pub(super) debounce: u8,
    pub(super) settled: Settled,
    /// Ticks held before `LongDown`; 0 disables long-press.
    pub(super) long_press_ticks: u16,
    pub(super) long_count: u16,
    /// Ticks between auto-repeat pulses once long-pressed; 0 disables.
    pub(super) repeat_ticks: u16,
    pub(super) repeat_count: u16,
    pub(super) mode: ScanMode,
    pub(super) edge: EdgeTrack,
    #[cfg(feature = "double-click")]
    pub(super) click: ClickTracker,
}

impl KeyState {
    pub const fn new(filter_ticks: u8, long_press_ticks: u16) -> Self {
        Self {
            debounce: filter_ticks / 2,
            settled: Settled::Released,
            long_press_ticks,
            long_count: 0,
            repeat_ticks: 0,
            repeat_count: 0,
            mode: ScanMode::Debounced,
            edge: EdgeTrack::new(),
            #[cfg(feature = "double-click")]
            click: ClickTracker::new(),
        }
    }

    /// Drop all runtime state, keeping the configured timing and mode.
    pub fn reset(&mut self, filter_ticks: u8) {
        *self = Self {
            repeat_ticks: self.repeat_ticks,
            mode: self.mode,
            ..Self::new(filter_ticks, self.long_press_ticks)
        };
    }
}

/// Advance one key by one 10 ms tick.
pub(super) fn advance_debounced(
    key: &mut KeyState,
    active: bool,
    config: &ScanConfig,
) -> Option<EventKind> {
    let filter = config.filter_ticks;
    let settled_at = filter.saturating_mul(2);

    if active {
        if key.debounce < filter {
            key.debounce = filter;
        } else if key.debounce < settled_at {
            key.debounce += 1;
        } else {
            return hold(key);
        }

        if key.debounce >= settled_at && key.settled == Settled::Released {
            key.settled = Settled::Pressed;
            return Some(EventKind::Down);
        }
        None
    } else {
        if key.debounce > filter {
            key.debounce = filter;
        } else if key.debounce > 0 {
            key.debounce -= 1;
        }

        if key.debounce == 0 && key.settled != Settled::Released {
            return release(key, config);
        }
        None
    }
}

/// Counter is saturated at 2F: count towards long-press and repeat.
fn hold(key: &mut KeyState) -> Option<EventKind> {
    // Only reachable with a zero filter, where nothing else settles the press.
    if key.settled == Settled::Released {
        key.settled = Settled::Pressed;
        return Some(EventKind::Down);
    }

    if key.long_press_ticks == 0 {
        return None;
    }

    if key.settled == Settled::Pressed {
        // `>=` also promotes a key whose threshold was lowered mid-press.
        key.long_count = key.long_count.saturating_add(1);
        if key.long_count >= key.long_press_ticks {
            key.settled = Settled::LongPressed;
            return Some(EventKind::LongDown);
        }
    } else if key.repeat_ticks > 0 {
        key.repeat_count += 1;
        if key.repeat_count >= key.repeat_ticks {
            key.repeat_count = 0;
            // Auto-repeat goes out as a synthetic up pulse.
            return Some(EventKind::Up);
        }
    }
    None
}

fn release(key: &mut KeyState, config: &ScanConfig) -> Option<EventKind> {
    let kind = if key.settled == Settled::LongPressed {
        Some(EventKind::LongUp)
    } else if key.long_press_ticks == 0 {
        // Keys without long-press never go through double-click gating.
        Some(EventKind::Up)
    } else {
        short_up(key, config)
    };

    key.settled = Settled::Released;
    key.long_count = 0;
    key.repeat_count = 0;
    kind
}

#[cfg(feature = "double-click")]
fn short_up(key: &mut KeyState, config: &ScanConfig) -> Option<EventKind> {
    key.click.short_up(config.double_click_ticks)
}

#[cfg(not(feature = "double-click"))]
fn short_up(_key: &mut KeyState, _config: &ScanConfig) -> Option<EventKind> {
    Some(EventKind::Up)
}
