//! Key scanner - debounce and event classification for every logical key.
//!
//! The scanner owns one [`KeyState`] per logical id and is driven by two
//! periodic callers:
//!
//! - [`KeyScanner::tick`] every 10 ms: debounced classification into
//!   `Down`, `Up`, `LongDown`, `LongUp` and auto-repeat pulses, plus the
//!   display idle countdown;
//! - [`KeyScanner::fast_tick`] every 1 ms: edge-triggered classification
//!   for keys that trade bounce immunity for latency.
//!
//! [`ScanMode`] picks which of the two looks at each key. Neither call
//! blocks or allocates; events go straight into an [`EventFifo`].

#[cfg(feature = "double-click")]
mod click;
mod edge;
mod state;


pub use state::{ScanMode, Settled};

use crate::config::{IDLE_TIMEOUT_TICKS, KEY_DOUBLE_CLICK_TICKS, KEY_FILTER_TICKS, KEY_LONG_TICKS};
use crate::error::Error;
use crate::event::{EventCode, EventKind, KeyId, MAX_KEYS};
use crate::fifo::EventFifo;
use crate::idle::IdleTimer;
use crate::probe::ActivityProbe;
use state::KeyState;

/// Scanner-wide timing, in 10 ms ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanConfig {
    /// Debounce filter threshold F; a press settles after F + 1 active ticks.
    pub filter_ticks: u8,
    /// Long-press threshold every key starts with. 0 disables long-press.
    pub long_press_ticks: u16,
    /// Double-click window (only used with the `double-click` feature).
    pub double_click_ticks: u16,
    /// Display idle timeout. 0 keeps the display on.
    pub idle_timeout_ticks: u32,
}

impl ScanConfig {
    pub const DEFAULT: Self = Self {
        filter_ticks: KEY_FILTER_TICKS,
        long_press_ticks: KEY_LONG_TICKS,
        double_click_ticks: KEY_DOUBLE_CLICK_TICKS,
        idle_timeout_ticks: IDLE_TIMEOUT_TICKS,
    };

    /// Largest filter whose doubled value still fits the debounce counter.
    pub const MAX_FILTER_TICKS: u8 = u8::MAX / 2;

    pub const fn validate(&self) -> Result<(), Error> {
        if self.filter_ticks > Self::MAX_FILTER_TICKS {
            return Err(Error::FilterTooLong(self.filter_ticks));
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Per-key timing and scan selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyParams {
    pub long_press_ticks: u16,
    pub repeat_ticks: u16,
    pub mode: ScanMode,
}

pub struct KeyScanner<const N: usize> {
    keys: [KeyState; N],
    config: ScanConfig,
    idle: IdleTimer,
}

impl<const N: usize> KeyScanner<N> {
    const CODES_FIT: () = assert!(N <= MAX_KEYS, "too many keys for one-byte event codes");

    /// Build a scanner without checking `config`. A filter above
    /// [`ScanConfig::MAX_FILTER_TICKS`] is not rejected here: its settle
    /// point saturates at 255. Use [`KeyScanner::try_new`] to reject it.
    pub const fn new(config: ScanConfig) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CODES_FIT;
        Self {
            keys: [KeyState::new(config.filter_ticks, config.long_press_ticks); N],
            idle: IdleTimer::new(config.idle_timeout_ticks),
            config,
        }
    }

    pub const fn try_new(config: ScanConfig) -> Result<Self, Error> {
        match config.validate() {
            Ok(()) => Ok(Self::new(config)),
            Err(err) => Err(err),
        }
    }

    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Check a raw id against the number of scanned keys.
    pub fn key_id(&self, raw: u8) -> Result<KeyId, Error> {
        if (raw as usize) < N {
            Ok(KeyId::new(raw))
        } else {
            Err(Error::KeyOutOfRange(raw))
        }
    }

    /// Set long-press and auto-repeat timing for one key and restart its
    /// repeat cadence. Either value may be 0 to disable that feature.
    ///
    /// Panics if `id` is not scanned; see [`KeyScanner::key_id`].
    pub fn configure(&mut self, id: KeyId, long_press_ticks: u16, repeat_ticks: u16) {
        let key = &mut self.keys[id.index()];
        key.long_press_ticks = long_press_ticks;
        key.repeat_ticks = repeat_ticks;
        key.repeat_count = 0;
        key.edge.restart_repeat();
    }

    pub fn set_scan_mode(&mut self, id: KeyId, mode: ScanMode) {
        self.keys[id.index()].mode = mode;
    }

    pub fn params(&self, id: KeyId) -> KeyParams {
        let key = &self.keys[id.index()];
        KeyParams {
            long_press_ticks: key.long_press_ticks,
            repeat_ticks: key.repeat_ticks,
            mode: key.mode,
        }
    }

    /// Debounced state of a key.
    pub fn state(&self, id: KeyId) -> Settled {
        self.keys[id.index()].settled
    }

    /// Whether the 1 ms scan currently sees the key down.
    pub fn edge_down(&self, id: KeyId) -> bool {
        self.keys[id.index()].edge.is_down()
    }

    /// Whether a single click is being held back waiting for a second one.
    #[cfg(feature = "double-click")]
    pub fn click_pending(&self, id: KeyId) -> bool {
        self.keys[id.index()].click.is_pending()
    }

    /// Return every key to its power-on state. Configured timing and scan
    /// modes are kept; the FIFO is not touched.
    pub fn reset_all(&mut self) {
        let filter = self.config.filter_ticks;
        for key in self.keys.iter_mut() {
            key.reset(filter);
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("keys: reset {} keys", N);
    }

    /// 10 ms scan: advance every debounced key by one step.
    pub fn tick<P, const M: usize>(&mut self, probe: &P, fifo: &EventFifo<M>)
    where
        P: ActivityProbe + ?Sized,
    {
        for (index, key) in self.keys.iter_mut().enumerate() {
            let id = KeyId::new(index as u8);

            #[cfg(feature = "double-click")]
            if let Some(kind) = key.click.decay() {
                emit(fifo, id, kind);
            }

            if !key.mode.debounced() {
                continue;
            }
            if let Some(kind) = state::advance_debounced(key, probe.is_active(id), &self.config) {
                emit(fifo, id, kind);
            }
        }

        self.idle.tick();
    }

    /// 1 ms scan: advance every edge-triggered key by one step.
    pub fn fast_tick<P, const M: usize>(&mut self, probe: &P, fifo: &EventFifo<M>)
    where
        P: ActivityProbe + ?Sized,
    {
        for (index, key) in self.keys.iter_mut().enumerate() {
            if !key.mode.edge() {
                continue;
            }
            let id = KeyId::new(index as u8);
            if let Some(kind) = edge::advance_edge(key, probe.is_active(id)) {
                emit(fifo, id, kind);
            }
        }
    }

    /// Key activity seen by the application: keep the display awake.
    pub fn wake_display(&mut self) {
        self.idle.wake();
    }

    pub fn display_on(&self) -> bool {
        self.idle.display_on()
    }

    pub fn set_idle_timeout(&mut self, ticks: u32) {
        self.idle.set_timeout(ticks);
    }
}

impl<const N: usize> Default for KeyScanner<N> {
    fn default() -> Self {
        Self::new(ScanConfig::DEFAULT)
    }
}

fn emit<const M: usize>(fifo: &EventFifo<M>, id: KeyId, kind: EventKind) {
    #[cfg(feature = "defmt")]
    defmt::trace!("key {}: {}", id, kind);
    fifo.push(EventCode::new(id, kind));
}
