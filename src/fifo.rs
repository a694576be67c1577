//! Key FIFO - one writer, two independent readers.
//!
//! The scan context pushes event codes; the main loop drains the
//! primary reader and any diagnostic consumer drains the secondary one.
//! Each reader has its own cursor and sees the whole stream from the
//! point it last caught up, without coordinating with the other.
//!
//! The ring never blocks the producer. One slot stays free so that
//! `read == write` always means "empty"; when a push would land the
//! write cursor on a reader's cursor, that reader's oldest unread code
//! is dropped and it keeps the newest `N - 1` codes.
//!
//! All cursors are atomics, so a single `static` FIFO can be shared
//! between an interrupt-driven producer and thread-mode consumers
//! without a lock.

use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use crate::config::KEY_FIFO_SIZE;
use crate::event::EventCode;

/// Process-wide key FIFO used by the firmware.
pub static KEY_FIFO: EventFifo<KEY_FIFO_SIZE> = EventFifo::new();

/// Which read cursor to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reader {
    Primary = 0,
    Secondary = 1,
}

pub struct EventFifo<const N: usize> {
    buf: [AtomicU8; N],
    write: AtomicUsize,
    read: [AtomicUsize; 2],
}

impl<const N: usize> EventFifo<N> {
    const MIN_SLOTS: () = assert!(N >= 2, "EventFifo needs at least two slots");

    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::MIN_SLOTS;
        Self {
            buf: [const { AtomicU8::new(0) }; N],
            write: AtomicUsize::new(0),
            read: [const { AtomicUsize::new(0) }; 2],
        }
    }

    /// Number of codes a reader can hold before the oldest is dropped.
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Append one code. Never blocks; overwrites the oldest unread code
    /// of any reader that is full.
    pub fn push(&self, code: EventCode) {
        let write = self.write.load(Ordering::Relaxed);
        let next = Self::wrap(write + 1);

        for cursor in &self.read {
            // A reader that already moved on makes this a no-op.
            let _ = cursor.compare_exchange(
                next,
                Self::wrap(next + 1),
                Ordering::AcqRel,
                Ordering::Relaxed,
            );
        }

        self.buf[write].store(code.raw(), Ordering::Relaxed);
        self.write.store(next, Ordering::Release);
    }

    /// Take the next code for `reader`, or `EventCode::NONE` if it has
    /// caught up with the writer.
    pub fn pop(&self, reader: Reader) -> EventCode {
        let cursor = &self.read[reader as usize];
        loop {
            let read = cursor.load(Ordering::Acquire);
            if read == self.write.load(Ordering::Acquire) {
                return EventCode::NONE;
            }
            let raw = self.buf[read].load(Ordering::Relaxed);
            // Losing the race means the producer dropped this slot under us.
            if cursor
                .compare_exchange(read, Self::wrap(read + 1), Ordering::AcqRel, Ordering::Relaxed)
                .is_ok()
            {
                return EventCode::from_raw(raw);
            }
        }
    }

    pub fn pop_primary(&self) -> EventCode {
        self.pop(Reader::Primary)
    }

    pub fn pop_secondary(&self) -> EventCode {
        self.pop(Reader::Secondary)
    }

    /// Discard everything the primary reader has not consumed yet.
    /// The secondary reader is left untouched.
    pub fn clear_primary(&self) {
        let write = self.write.load(Ordering::Acquire);
        self.read[Reader::Primary as usize].store(write, Ordering::Release);
    }

    /// Unread codes pending for `reader`.
    pub fn len(&self, reader: Reader) -> usize {
        let write = self.write.load(Ordering::Acquire);
        let read = self.read[reader as usize].load(Ordering::Acquire);
        (write + N - read) % N
    }

    pub fn is_empty(&self, reader: Reader) -> bool {
        self.len(reader) == 0
    }

    const fn wrap(index: usize) -> usize {
        if index >= N {
            index - N
        } else {
            index
        }
    }
}

impl<const N: usize> Default for EventFifo<N> {
    fn default() -> Self {
        Self::new()
    }
}
