//! Startup configuration sequence

use embedded_io::Write;

use super::session::{Clock, Rylr998};
use crate::config::RadioConfig;
use crate::error::Result;
use crate::protocol::Command;

/// Apply `config` to the module, one acknowledged command at a time
///
/// Order: link check, address, network ID, band, RF parameters, work mode,
/// output power, then password and baud rate when set. The baud rate goes
/// last because the module switches rate as soon as it acknowledges.
///
/// # Errors
///
/// The first command that fails aborts the sequence and its error is
/// returned; an `+ERR` reply leaves the driver halted.
pub fn configure<W, C, const N: usize>(
    radio: &mut Rylr998<'_, W, C, N>,
    config: &RadioConfig,
) -> Result<()>
where
    W: Write,
    C: Clock,
{
    let mandatory = [
        Command::Test,
        Command::Address(config.address),
        Command::NetworkId(config.network_id),
        Command::Band {
            frequency: config.frequency,
            persist: config.persist_band,
        },
        Command::Parameter(config.parameters),
        Command::Mode(config.mode),
        Command::OutputPower(config.output_power),
    ];
    let optional = [
        config.password.map(Command::Password),
        config.baud_rate.map(Command::BaudRate),
    ];
    let mut applied = 0_usize;
    for command in mandatory.iter().chain(optional.iter().flatten()) {
        applied += 1;
        info!("config step {}: {}", applied, command);
        radio.send_and_await(command)?;
    }

    info!("radio configured ({} steps)", applied);
    Ok(())
}
