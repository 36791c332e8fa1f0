//! RYLR998 LoRa Node Firmware Library
//!
//! Driver for the REYAX RYLR998 LoRa module, attached over LPUART1 to an
//! STM32L073 and controlled with its textual AT-command protocol.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      APPLICATION                            │
//! │  Startup sequence  │  Main loop (drain + dispatch)          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                        DRIVER                               │
//! │  Rylr998 session  │  Running -> Halted state machine        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                       PROTOCOL                              │
//! │  Rx ring  │  Line extractor  │  Classifier  │  Decoder      │
//! │  Command encoder                                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  HAL (embedded only)                        │
//! │  LPUART1 tx/rx  │  Status LED  │  embassy-time clock        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The UART receive task is the only producer of the receive ring and the
//! only setter of the new-data signal. Everything else runs on the main
//! loop's thread.
//!
//! # Host testing
//!
//! Everything outside [`hal`] builds on the host with
//! `--no-default-features --features std`.

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Must come first so the logging macros are visible to later modules
mod fmt;

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// STM32L073 peripherals: radio UART, status LED, time.
#[cfg(feature = "embedded")]
pub mod hal;

/// RYLR998 driver session and startup sequence
pub mod driver;

/// AT-command protocol engine
pub mod protocol;

/// New-data signal shared with the receive path
pub mod signal;

/// Error types
pub mod error;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

pub use error::{Error, HaltReason, Result};

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::driver::{configure, Clock, DriverState, Rylr998};
    pub use crate::error::{Error, HaltReason, Result};
    pub use crate::protocol::{Command, InboundPacket, ResponseTag, RxChannel};
    pub use crate::types::*;

    // Common traits
    pub use embedded_io::Write;

    // Embassy
    #[cfg(feature = "embedded")]
    pub use embassy_time::{Duration, Instant, Timer};

    // Logging
    #[cfg(feature = "embedded")]
    pub use defmt::{debug, error, info, trace, warn};
}
