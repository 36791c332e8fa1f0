//! Timing
//!
//! Millisecond clock for acknowledgment deadlines and a rate limiter for
//! the status LED heartbeat.

use embassy_time::{Duration, Instant};

use crate::driver::Clock;

/// [`Clock`] backed by the embassy time driver
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now_ms(&self) -> u32 {
        // Wraps every ~49 days; deadlines use wrapping arithmetic
        Instant::now().as_millis() as u32
    }
}

/// Rate limiter for periodic operations
pub struct RateLimiter {
    period: Duration,
    last: Option<Instant>,
}

impl RateLimiter {
    /// Create a rate limiter from a period in milliseconds
    #[must_use]
    pub const fn from_ms(ms: u32) -> Self {
        Self {
            period: Duration::from_millis(ms as u64),
            last: None,
        }
    }

    /// Returns true at most once per period
    pub fn ready(&mut self) -> bool {
        let now = Instant::now();
        match self.last {
            Some(last) if now - last < self.period => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}
