//! Key event codes.
//!
//! Events travel through the FIFO as single bytes:
//! ```text
//! code = EVENT_STEP × id + offset
//!
//! offset 1: Down       key settled as pressed
//!        2: Up         short release (also the auto-repeat pulse)
//!        3: LongDown   held past the long-press threshold
//!        4: LongUp     released after a long press
//!        5: DoubleUp   second click inside the window (`double-click` only)
//!
//! code 0 is reserved for "no event".
//! ```
//! A consumer recovers `(id, kind)` with one division; `KeyEvent` does
//! that for you.

use crate::error::Error;

/// Number of code slots reserved per key.
#[cfg(not(feature = "double-click"))]
pub const EVENT_STEP: u8 = 4;

/// Number of code slots reserved per key.
#[cfg(feature = "double-click")]
pub const EVENT_STEP: u8 = 5;

/// Most keys whose codes still fit in a byte.
pub const MAX_KEYS: usize = (u8::MAX / EVENT_STEP) as usize;

/// Logical key id: physical buttons first, chords after them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyId(u8);

impl KeyId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What happened to a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum EventKind {
    Down = 1,
    /// Short release, or the synthetic up pulse emitted by auto-repeat.
    Up = 2,
    LongDown = 3,
    LongUp = 4,
    #[cfg(feature = "double-click")]
    DoubleUp = 5,
}

impl EventKind {
    /// Position of this kind inside a key's code block.
    pub const fn offset(self) -> u8 {
        self as u8
    }

    pub const fn from_offset(offset: u8) -> Option<Self> {
        match offset {
            1 => Some(EventKind::Down),
            2 => Some(EventKind::Up),
            3 => Some(EventKind::LongDown),
            4 => Some(EventKind::LongUp),
            #[cfg(feature = "double-click")]
            5 => Some(EventKind::DoubleUp),
            _ => None,
        }
    }
}

/// Raw byte as stored in the key FIFO.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct EventCode(u8);

impl EventCode {
    /// Returned by an empty FIFO reader.
    pub const NONE: EventCode = EventCode(0);

    pub const fn new(id: KeyId, kind: EventKind) -> Self {
        Self(EVENT_STEP * id.0 + kind.offset())
    }

    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Typed view of the code; `None` for the sentinel or a code with no kind.
    pub fn event(self) -> Option<KeyEvent> {
        KeyEvent::try_from(self).ok()
    }
}

impl From<KeyEvent> for EventCode {
    fn from(event: KeyEvent) -> Self {
        event.code()
    }
}

/// Decoded `(id, kind)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub id: KeyId,
    pub kind: EventKind,
}

impl KeyEvent {
    pub const fn new(id: KeyId, kind: EventKind) -> Self {
        Self { id, kind }
    }

    pub const fn code(self) -> EventCode {
        EventCode::new(self.id, self.kind)
    }
}

impl TryFrom<EventCode> for KeyEvent {
    type Error = Error;

    fn try_from(code: EventCode) -> Result<Self, Self::Error> {
        if code.is_none() {
            return Err(Error::NoEvent);
        }
        let index = code.0 - 1;
        let kind = EventKind::from_offset(index % EVENT_STEP + 1)
            .ok_or(Error::UnknownEventKind(code.0))?;
        Ok(Self {
            id: KeyId(index / EVENT_STEP),
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_dense_per_key() {
        let id = KeyId::new(2);
        assert_eq!(EventCode::new(id, EventKind::Down).raw(), 2 * EVENT_STEP + 1);
        assert_eq!(EventCode::new(id, EventKind::LongUp).raw(), 2 * EVENT_STEP + 4);
        // Last code of key 1 sits right before the first code of key 2.
        assert_eq!(
            EventCode::new(KeyId::new(1), EventKind::Down).raw() + EVENT_STEP - 1,
            EventCode::new(id, EventKind::Down).raw() - 1
        );
    }

    #[test]
    fn first_key_matches_reference_layout() {
        let k0 = KeyId::new(0);
        assert_eq!(EventCode::new(k0, EventKind::Down).raw(), 1);
        assert_eq!(EventCode::new(k0, EventKind::Up).raw(), 2);
        assert_eq!(EventCode::new(k0, EventKind::LongDown).raw(), 3);
        assert_eq!(EventCode::new(k0, EventKind::LongUp).raw(), 4);
    }

    #[test]
    fn last_key_codes_fit_in_a_byte() {
        let last = KeyId::new((MAX_KEYS - 1) as u8);
        let code = EventCode::new(last, EventKind::LongUp);
        assert_eq!(code.event(), Some(KeyEvent::new(last, EventKind::LongUp)));
        assert!(MAX_KEYS * EVENT_STEP as usize <= u8::MAX as usize);
    }

    #[test]
    fn decode_recovers_id_and_kind() {
        let event = KeyEvent::new(KeyId::new(4), EventKind::LongDown);
        let code = event.code();
        assert_eq!(code.event(), Some(event));
        assert_eq!(KeyEvent::try_from(code), Ok(event));
    }

    #[test]
    fn sentinel_is_not_an_event() {
        assert!(EventCode::NONE.is_none());
        assert_eq!(EventCode::default(), EventCode::NONE);
        assert_eq!(EventCode::NONE.event(), None);
        assert_eq!(KeyEvent::try_from(EventCode::NONE), Err(Error::NoEvent));
    }

    #[cfg(not(feature = "double-click"))]
    #[test]
    fn four_kinds_without_double_click() {
        assert_eq!(EVENT_STEP, 4);
        assert_eq!(EventKind::from_offset(5), None);
        // Code 5 wraps into key 1.
        assert_eq!(
            EventCode::from_raw(5).event(),
            Some(KeyEvent::new(KeyId::new(1), EventKind::Down))
        );
    }

    #[cfg(feature = "double-click")]
    #[test]
    fn double_click_reserves_fifth_offset() {
        assert_eq!(EVENT_STEP, 5);
        assert_eq!(
            EventCode::from_raw(5).event(),
            Some(KeyEvent::new(KeyId::new(0), EventKind::DoubleUp))
        );
        assert_eq!(
            EventCode::from_raw(6).event(),
            Some(KeyEvent::new(KeyId::new(1), EventKind::Down))
        );
    }
}
