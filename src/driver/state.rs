//! Driver state machine
//!
//! `Running -> Halted` is the only transition. Halted is terminal: no more
//! commands go out and no more records are processed until the device is
//! reset.

use crate::error::{Error, HaltReason, Result};
use crate::types::ErrorCode;

/// Driver lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DriverState {
    /// Processing records and accepting commands
    #[default]
    Running,
    /// Stopped after a fault
    Halted(HaltReason),
}

impl DriverState {
    /// Check if halted
    #[must_use]
    pub const fn is_halted(self) -> bool {
        matches!(self, Self::Halted(_))
    }

    /// Why the driver halted, if it did
    #[must_use]
    pub const fn halt_reason(self) -> Option<HaltReason> {
        match self {
            Self::Running => None,
            Self::Halted(reason) => Some(reason),
        }
    }

    /// Transition on a `+ERR` report
    ///
    /// An already halted driver keeps its original reason.
    #[must_use]
    pub const fn on_radio_fault(self, code: ErrorCode) -> Self {
        match self {
            Self::Running => Self::Halted(HaltReason::RadioFault(code)),
            halted @ Self::Halted(_) => halted,
        }
    }

    /// Gate for every driver operation
    ///
    /// # Errors
    ///
    /// [`Error::Halted`] once the terminal state is reached.
    pub const fn ensure_running(self) -> Result<()> {
        match self {
            Self::Running => Ok(()),
            Self::Halted(reason) => Err(Error::Halted(reason)),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DriverState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Running => defmt::write!(f, "RUNNING"),
            Self::Halted(reason) => defmt::write!(f, "HALTED({})", reason),
        }
    }
}
