//! Activity probe - "is this logical key electrically active right now?"
//!
//! The board supplies a [`PinSampler`] for its physical buttons. A
//! [`KeyMap`] turns one sample of every pin into per-key answers:
//!
//! - a single key is active only while it is the *sole* physical button
//!   down, so entering a chord never leaks a single-key press;
//! - a chord key is active while both of its pins are down, whatever
//!   else is held.

use crate::error::Error;
use crate::event::KeyId;

/// Per-key activity as seen by the scanner.
pub trait ActivityProbe {
    fn is_active(&self, id: KeyId) -> bool;
}

impl<F> ActivityProbe for F
where
    F: Fn(KeyId) -> bool,
{
    fn is_active(&self, id: KeyId) -> bool {
        self(id)
    }
}

/// Raw pin access provided by the board.
pub trait PinSampler {
    /// `true` while physical pin `pin` is at its active level.
    fn is_pin_active(&self, pin: u8) -> bool;
}

/// How a logical key is wired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogicalKey {
    /// One physical button.
    Single(u8),
    /// Two physical buttons held together.
    Chord(u8, u8),
}

/// One sample of every physical pin, bit `n` set when pin `n` is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSnapshot(u32);

impl PinSnapshot {
    /// Widest pin map a snapshot can describe.
    pub const MAX_PINS: u8 = 32;

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_set(self, pin: u8) -> bool {
        pin < Self::MAX_PINS && self.0 & (1 << pin) != 0
    }

    pub const fn active_count(self) -> u32 {
        self.0.count_ones()
    }
}

/// Logical key layout: physical pins `0..pin_count`, ids in array order.
#[derive(Clone, Copy, Debug)]
pub struct KeyMap<const N: usize> {
    pin_count: u8,
    keys: [LogicalKey; N],
}

impl<const N: usize> KeyMap<N> {
    /// Build a map without checking it; see [`KeyMap::try_new`].
    pub const fn new(pin_count: u8, keys: [LogicalKey; N]) -> Self {
        Self { pin_count, keys }
    }

    /// Build a map, rejecting pins outside `0..pin_count`.
    pub fn try_new(pin_count: u8, keys: [LogicalKey; N]) -> Result<Self, Error> {
        if pin_count > PinSnapshot::MAX_PINS {
            return Err(Error::TooManyPins(pin_count));
        }
        for key in &keys {
            let (a, b) = match *key {
                LogicalKey::Single(pin) => (pin, pin),
                LogicalKey::Chord(a, b) => (a, b),
            };
            if a >= pin_count {
                return Err(Error::PinOutOfRange(a));
            }
            if b >= pin_count {
                return Err(Error::PinOutOfRange(b));
            }
        }
        Ok(Self { pin_count, keys })
    }

    pub const fn pin_count(&self) -> u8 {
        self.pin_count
    }

    pub fn key(&self, id: KeyId) -> Option<LogicalKey> {
        self.keys.get(id.index()).copied()
    }

    /// Sample every physical pin once.
    pub fn snapshot<S: PinSampler + ?Sized>(&self, sampler: &S) -> PinSnapshot {
        let mut bits = 0u32;
        for pin in 0..self.pin_count.min(PinSnapshot::MAX_PINS) {
            if sampler.is_pin_active(pin) {
                bits |= 1 << pin;
            }
        }
        PinSnapshot(bits)
    }

    /// Sample the pins and return a probe answering for this tick.
    pub fn probe<S: PinSampler + ?Sized>(&self, sampler: &S) -> ChordProbe<'_, N> {
        self.probe_snapshot(self.snapshot(sampler))
    }

    pub fn probe_snapshot(&self, pins: PinSnapshot) -> ChordProbe<'_, N> {
        ChordProbe { map: self, pins }
    }
}

/// Key activity derived from one [`PinSnapshot`].
#[derive(Clone, Copy, Debug)]
pub struct ChordProbe<'a, const N: usize> {
    map: &'a KeyMap<N>,
    pins: PinSnapshot,
}

impl<const N: usize> ChordProbe<'_, N> {
    pub fn pins(&self) -> PinSnapshot {
        self.pins
    }
}

impl<const N: usize> ActivityProbe for ChordProbe<'_, N> {
    fn is_active(&self, id: KeyId) -> bool {
        match self.map.key(id) {
            Some(LogicalKey::Single(pin)) => self.pins.active_count() == 1 && self.pins.is_set(pin),
            Some(LogicalKey::Chord(a, b)) => self.pins.is_set(a) && self.pins.is_set(b),
            None => false,
        }
    }
}
