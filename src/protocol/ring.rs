//! Receive ring buffer
//!
//! Single-producer/single-consumer byte ring between the UART
//! receive-completion context (producer) and the polling loop (consumer).
//!
//! Both indices are lap-counted in `0..2N`, so a full ring (distance `N`)
//! is distinguishable from an empty one (distance 0). Only the producer
//! stores `head`; only the consumer stores `tail`. Byte copies and index
//! updates run inside a critical section.

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use critical_section::Mutex;

use super::extract::{extract_line, Line};
use crate::error::{Error, Result};
use crate::signal::NewDataSignal;

/// Fixed-capacity receive ring
pub struct RxRing<const N: usize> {
    /// Byte storage
    storage: Mutex<RefCell<[u8; N]>>,
    /// Write index (lap-counted)
    head: AtomicUsize,
    /// Read index (lap-counted)
    tail: AtomicUsize,
    /// Producer overwrote bytes the consumer had not read
    overrun: AtomicBool,
}

impl<const N: usize> RxRing<N> {
    const NONZERO: () = assert!(N > 0, "ring capacity must be non-zero");

    /// Create an empty ring
    #[must_use]
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NONZERO;
        Self {
            storage: Mutex::new(RefCell::new([0; N])),
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            overrun: AtomicBool::new(false),
        }
    }

    /// Ring capacity in bytes
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    const fn distance(head: usize, tail: usize) -> usize {
        (head + 2 * N - tail) % (2 * N)
    }

    const fn advance(index: usize, by: usize) -> usize {
        (index + by % (2 * N)) % (2 * N)
    }

    /// Append received bytes (producer side)
    ///
    /// Wraps at the end of storage. Returns `true` if unread bytes were
    /// overwritten.
    pub fn write(&self, bytes: &[u8]) -> bool {
        if bytes.is_empty() {
            return false;
        }
        critical_section::with(|cs| {
            let head = self.head.load(Ordering::Relaxed);
            let tail = self.tail.load(Ordering::Acquire);
            let free = N - Self::distance(head, tail).min(N);

            let mut storage = self.storage.borrow_ref_mut(cs);
            let mut pos = head % N;
            for &byte in bytes {
                storage[pos] = byte;
                pos = (pos + 1) % N;
            }

            let overran = bytes.len() > free;
            if overran {
                self.overrun.store(true, Ordering::Release);
            }
            self.head
                .store(Self::advance(head, bytes.len()), Ordering::Release);
            overran
        })
    }

    /// Number of unread bytes (consumer side)
    #[must_use]
    pub fn pending(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Relaxed);
        Self::distance(head, tail)
    }

    /// Current read cursor as an offset into storage
    #[must_use]
    pub fn read_cursor(&self) -> usize {
        self.tail.load(Ordering::Relaxed) % N
    }

    /// Current write cursor as an offset into storage
    #[must_use]
    pub fn write_cursor(&self) -> usize {
        self.head.load(Ordering::Acquire) % N
    }

    /// Whether the producer has overwritten unread bytes since the last read
    #[must_use]
    pub fn has_overrun(&self) -> bool {
        self.overrun.load(Ordering::Acquire)
    }

    /// Whether a complete line sits ahead of the read cursor
    ///
    /// A single leading `\n` does not count, matching [`extract_line`].
    #[must_use]
    pub fn has_complete_line(&self) -> bool {
        critical_section::with(|cs| {
            let storage = self.storage.borrow_ref(cs);
            let cursor = self.read_cursor();
            let pending = self.pending().min(N);
            let skip = usize::from(pending > 0 && storage[cursor] == b'\n');
            (skip..pending).any(|i| storage[(cursor + i) % N] == b'\n')
        })
    }

    /// Pull the next complete line into `line` (consumer side)
    ///
    /// Advances the read cursor by the bytes consumed and returns that
    /// count. Leaves the cursor untouched when no terminator is pending.
    /// If bytes were lost to an overrun, or the ring is full without a
    /// terminator, drops everything unread and reports [`Error::Overrun`].
    pub fn read_line(&self, line: &mut Line<N>) -> Result<usize> {
        critical_section::with(|cs| {
            if self.overrun.load(Ordering::Acquire) {
                self.resync();
                line.clear();
                return Err(Error::Overrun);
            }

            let storage = self.storage.borrow_ref(cs);
            let tail = self.tail.load(Ordering::Relaxed);
            let pending = self.pending();

            match extract_line(&*storage, tail % N, pending, line) {
                Ok(extraction) => {
                    self.tail
                        .store(Self::advance(tail, extraction.consumed), Ordering::Release);
                    Ok(extraction.consumed)
                }
                Err(Error::NoTerminatorFound) if pending >= N => {
                    self.resync();
                    Err(Error::Overrun)
                }
                Err(err) => Err(err),
            }
        })
    }

    /// Drop all unread bytes and clear the overrun flag
    fn resync(&self) {
        self.tail
            .store(self.head.load(Ordering::Acquire), Ordering::Release);
        self.overrun.store(false, Ordering::Release);
    }
}

impl<const N: usize> Default for RxRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Receive context shared by the receive-completion handler and the main loop
///
/// Place it in a `static`; the handler calls [`RxChannel::on_receive`], the
/// driver borrows it for polling.
pub struct RxChannel<const N: usize> {
    ring: RxRing<N>,
    signal: NewDataSignal,
}

impl<const N: usize> RxChannel<N> {
    /// Create an empty channel with the signal lowered
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ring: RxRing::new(),
            signal: NewDataSignal::new(),
        }
    }

    /// Receive-completion entry point
    ///
    /// Appends `bytes` and raises the signal when the last byte written is a
    /// line terminator.
    pub fn on_receive(&self, bytes: &[u8]) {
        if self.ring.write(bytes) {
            warn!("rx ring overrun ({} bytes)", bytes.len());
        }
        if bytes.last() == Some(&b'\n') {
            self.signal.set();
        }
    }

    /// The receive ring
    #[must_use]
    pub const fn ring(&self) -> &RxRing<N> {
        &self.ring
    }

    /// The new-data signal
    #[must_use]
    pub const fn signal(&self) -> &NewDataSignal {
        &self.signal
    }
}

impl<const N: usize> Default for RxChannel<N> {
    fn default() -> Self {
        Self::new()
    }
}
