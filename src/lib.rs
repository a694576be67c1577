//! Button scanning library for keyscan.
//!
//! Everything here is pure logic that runs on the host as well as on the
//! target: the debounce/classification engine, the dual-reader key FIFO
//! and the chord-aware activity probe.
//!
//! Usage: `cargo test` (add `--features double-click` for the
//! double-click classifier).
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and only builds with `--features embedded`.
//!
//! ## Wiring
//!
//! ```text
//!   PinSampler ──► KeyMap::probe ──► KeyScanner::tick / fast_tick
//!                                             │
//!                                             ▼
//!                          EventFifo::push ──► pop_primary / pop_secondary
//! ```

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod event;
pub mod fifo;
pub mod idle;
pub mod key;
pub mod probe;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub use error::Error;
pub use event::{EventCode, EventKind, KeyEvent, KeyId, EVENT_STEP, MAX_KEYS};
pub use fifo::{EventFifo, Reader, KEY_FIFO};
pub use idle::IdleTimer;
pub use key::{KeyParams, KeyScanner, ScanConfig, ScanMode, Settled};
pub use probe::{ActivityProbe, ChordProbe, KeyMap, LogicalKey, PinSampler, PinSnapshot};
