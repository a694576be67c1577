//! Board-wide constants and compile-time configuration.
//!
//! Scan cadence, debounce/long-press timing, FIFO sizing and the logical
//! key layout live here so they can be tuned in one place. All timing is
//! expressed in scan ticks of the cadence that consumes it.

use crate::event::KeyId;
use crate::probe::{KeyMap, LogicalKey};

// Scan cadence

/// Period of the debounced scan (`KeyScanner::tick`), in milliseconds.
pub const SCAN_PERIOD_MS: u64 = 10;

/// Period of the edge-triggered scan (`KeyScanner::fast_tick`), in milliseconds.
pub const FAST_SCAN_PERIOD_MS: u64 = 1;

/// Number of fast periods per debounced period.
pub const FAST_TICKS_PER_SCAN: u8 = (SCAN_PERIOD_MS / FAST_SCAN_PERIOD_MS) as u8;

// Key timing (10 ms ticks)

/// Debounce filter threshold. 5 ticks = 50 ms.
pub const KEY_FILTER_TICKS: u8 = 5;

/// Default long-press threshold. 100 ticks = 1 s. 0 disables long-press.
pub const KEY_LONG_TICKS: u16 = 100;

/// Window in which a second click counts as a double click. 50 ticks = 500 ms.
pub const KEY_DOUBLE_CLICK_TICKS: u16 = 50;

/// Inactivity timeout before the display is put to sleep (120 s).
pub const IDLE_TIMEOUT_TICKS: u32 = 120_000 / SCAN_PERIOD_MS as u32;

// Key FIFO

/// Slots in the key FIFO ring. One slot is kept free, so `KEY_FIFO_SIZE - 1`
/// events fit before the oldest is dropped.
pub const KEY_FIFO_SIZE: usize = 10;

// Logical keys
//
//   Physical pin 0 → UP      → P0.11
//   Physical pin 1 → DOWN    → P0.12
//   Physical pin 2 → SELECT  → P0.24
//   I²C SDA                  → P0.26
//   I²C SCL                  → P0.27

/// Number of physical buttons.
pub const PHYSICAL_KEY_COUNT: usize = 3;

/// Physical buttons plus the chords appended after them.
pub const KEY_COUNT: usize = PHYSICAL_KEY_COUNT + 2;

pub const KEY_UP: KeyId = KeyId::new(0);
pub const KEY_DOWN: KeyId = KeyId::new(1);
pub const KEY_SELECT: KeyId = KeyId::new(2);
/// UP and DOWN held together.
pub const KEY_UP_DOWN: KeyId = KeyId::new(3);
/// DOWN and SELECT held together.
pub const KEY_DOWN_SELECT: KeyId = KeyId::new(4);

/// Logical key layout of the board.
pub static BOARD_KEY_MAP: KeyMap<KEY_COUNT> = KeyMap::new(
    PHYSICAL_KEY_COUNT as u8,
    [
        LogicalKey::Single(0),
        LogicalKey::Single(1),
        LogicalKey::Single(2),
        LogicalKey::Chord(0, 1),
        LogicalKey::Chord(1, 2),
    ],
);
