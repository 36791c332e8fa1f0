//! RYLR998 driver
//!
//! Ties the protocol layer to a transport: polls the receive channel,
//! applies the fault policy and runs command/acknowledgment exchanges.

pub mod sequence;
pub mod session;
pub mod state;

pub use sequence::configure;
pub use session::{Clock, DriverStats, Rylr998};
pub use state::DriverState;
