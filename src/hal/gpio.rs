//! GPIO Abstractions
//!
//! Status LED on the Nucleo board, including the fault pattern shown once
//! the driver halts.

use embedded_hal::digital::OutputPin;

use crate::config::{FAULT_BLINK_MS, SYSCLK_HZ};

/// Status LED state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LedState {
    /// LED is off
    #[default]
    Off,
    /// LED is on
    On,
}

impl LedState {
    /// Toggle the LED state
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }
}

impl defmt::Format for LedState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Off => defmt::write!(f, "OFF"),
            Self::On => defmt::write!(f, "ON"),
        }
    }
}

/// Status LED driver
///
/// GPIO writes on the STM32 are infallible, so pin errors are ignored.
pub struct StatusLed<P> {
    pin: P,
    state: LedState,
}

impl<P: OutputPin> StatusLed<P> {
    /// Create a new status LED (initially off)
    pub fn new(mut pin: P) -> Self {
        let _ = pin.set_low();
        Self {
            pin,
            state: LedState::Off,
        }
    }

    /// Turn LED on
    pub fn on(&mut self) {
        let _ = self.pin.set_high();
        self.state = LedState::On;
    }

    /// Turn LED off
    pub fn off(&mut self) {
        let _ = self.pin.set_low();
        self.state = LedState::Off;
    }

    /// Toggle LED state
    pub fn toggle(&mut self) {
        match self.state.toggle() {
            LedState::On => self.on(),
            LedState::Off => self.off(),
        }
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> LedState {
        self.state
    }

    /// Blink the fault pattern forever
    ///
    /// Busy-waits on the core cycle counter so it keeps running with
    /// interrupts masked.
    pub fn fault_blink(&mut self) -> ! {
        let cycles = SYSCLK_HZ / 1_000 * FAULT_BLINK_MS;
        loop {
            self.toggle();
            cortex_m::asm::delay(cycles);
        }
    }
}
