//! Unified error type for keyscan.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! The scan and FIFO hot paths never fail; these errors only come out of
//! the validation helpers used while setting the scanner up or while
//! decoding raw event codes.

use core::fmt;

/// Top-level error type used across the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Key layout
    /// A logical key refers to a physical pin outside the map.
    PinOutOfRange(u8),

    /// More physical pins than a `PinSnapshot` can hold.
    TooManyPins(u8),

    /// A raw key id is not covered by the scanner.
    KeyOutOfRange(u8),

    // Timing
    /// Twice the debounce filter does not fit the debounce counter.
    FilterTooLong(u8),

    // Event codes
    /// The "no event" sentinel was decoded as an event.
    NoEvent,

    /// The code's offset does not name any event kind.
    UnknownEventKind(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PinOutOfRange(pin) => write!(f, "pin {} is outside the key map", pin),
            Error::TooManyPins(count) => write!(f, "{} physical pins exceed the snapshot width", count),
            Error::KeyOutOfRange(id) => write!(f, "key id {} is not scanned", id),
            Error::FilterTooLong(ticks) => write!(f, "filter of {} ticks overflows the debounce counter", ticks),
            Error::NoEvent => f.write_str("no event"),
            Error::UnknownEventKind(code) => write!(f, "event code {} has no kind", code),
        }
    }
}
