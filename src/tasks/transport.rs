// TiltMorse — Transport Task
//
// Polls the shared mailbox, writes each pending event to the serial link and
// flashes the indicator.  Consuming an event returns the mailbox to `Idle`.

use std::thread;
use std::time::Duration;

use embedded_hal::digital::OutputPin;

use crate::drivers::indicator::Indicator;
use crate::drivers::serial::SerialTx;
use crate::encoder::{SymbolEncoder, TransportError};
use crate::events::ProgramState;
use crate::mailbox::{StateMailbox, TelemetrySlot};

/// Handle at most one pending event.  Returns the event that was sent.
pub fn service_once<W: SerialTx, P: OutputPin>(
    encoder: &mut SymbolEncoder<W>,
    indicator: &mut Indicator<P>,
    mailbox: &StateMailbox,
    telemetry: &TelemetrySlot,
    message: &str,
) -> Result<Option<ProgramState>, TransportError<W::Error>> {
    let Some(state) = mailbox.take() else {
        return Ok(None);
    };

    match state {
        ProgramState::Sos => encoder.encode_text(message)?,
        ProgramState::DataReady => match telemetry.latest() {
            Some(sample) => encoder.emit_telemetry(&sample)?,
            None => {
                log::warn!("DataReady without a sample");
                return Ok(None);
            }
        },
        other => encoder.emit(other)?,
    }

    indicator.trigger();
    Ok(Some(state))
}

pub fn transport_task<W: SerialTx, P: OutputPin>(
    mut encoder: SymbolEncoder<W>,
    mut indicator: Indicator<P>,
    mailbox: &StateMailbox,
    telemetry: &TelemetrySlot,
    message: &str,
    interval: Duration,
) -> ! {
    log::info!("Transport task started");

    loop {
        match service_once(&mut encoder, &mut indicator, mailbox, telemetry, message) {
            Ok(Some(state)) => log::info!("Sent {:?}", state),
            Ok(None) => {}
            Err(e) => log::warn!("Transport error: {}", e),
        }

        thread::sleep(interval);
    }
}
