//! Hardware Abstraction Layer
//!
//! STM32L073 peripherals used by the node: the radio UART, the status LED
//! and the embassy time driver.

pub mod gpio;
pub mod timer;
pub mod uart;
