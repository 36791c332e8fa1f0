//! New-data signal
//!
//! Binary, lossy flag raised by the receive-completion path when a line
//! terminator lands in the ring and lowered by the polling path. Several
//! lines arriving between polls collapse into one assertion, so the poller
//! must drain every complete line it finds rather than one per assertion.

use core::sync::atomic::{AtomicBool, Ordering};

/// Single-bit "at least one record may be pending" flag
#[derive(Debug, Default)]
pub struct NewDataSignal {
    flag: AtomicBool,
}

impl NewDataSignal {
    /// Create a lowered signal
    #[must_use]
    pub const fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    /// Raise the signal (receive-completion context only)
    ///
    /// Release ordering publishes the ring bytes written before the call.
    pub fn set(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Check the signal (polling context only)
    #[must_use]
    pub fn get(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Lower the signal (polling context only)
    pub fn clear(&self) {
        self.flag.store(false, Ordering::Release);
    }
}
