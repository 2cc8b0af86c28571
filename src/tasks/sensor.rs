// TiltMorse — Sensor Task
//
// Reads the IMU once per period, classifies the sample and posts the result
// into the shared mailbox.  A failed read skips the cycle; the next period
// tries again.

use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::classifier::classify;
use crate::drivers::mpu9250::{Mpu9250, SensorError};
use crate::events::{OutputMode, ProgramState};
use crate::mailbox::{StateMailbox, TelemetrySlot};

/// One sampling cycle.  Returns the event that was posted (`Idle` when the
/// sample matched no gesture and nothing was posted).
pub fn sample_once<I2C: I2c, D: DelayNs>(
    imu: &mut Mpu9250<I2C, D>,
    mailbox: &StateMailbox,
    telemetry: &TelemetrySlot,
    mode: OutputMode,
) -> Result<ProgramState, SensorError> {
    let s = imu.read_sample()?;
    log::debug!(
        "ax: {:.3}, ay: {:.3}, az: {:.3}, gx: {:.3}, gy: {:.3}, gz: {:.3}",
        s.ax,
        s.ay,
        s.az,
        s.gx,
        s.gy,
        s.gz
    );

    let state = match mode {
        OutputMode::Morse => classify(&s),
        OutputMode::Telemetry => {
            telemetry.store(s);
            ProgramState::DataReady
        }
    };

    if let Some(lost) = mailbox.post(state).filter(|lost| lost.is_lost_when_replaced_by(state)) {
        log::warn!("Unsent {:?} overwritten by {:?}", lost, state);
    }
    Ok(state)
}

pub fn sensor_task<I2C: I2c, D: DelayNs>(
    mut imu: Mpu9250<I2C, D>,
    mailbox: &StateMailbox,
    telemetry: &TelemetrySlot,
    mode: OutputMode,
    interval: Duration,
) -> ! {
    log::info!("Sensor task started ({:?} mode)", mode);

    loop {
        let tick_start = Instant::now();

        match sample_once(&mut imu, mailbox, telemetry, mode) {
            Ok(ProgramState::Idle) => {}
            Ok(state) => log::debug!("Gesture: {:?}", state),
            Err(e) => log::warn!("IMU read error, skipping cycle: {}", e),
        }

        // Sleep for the remainder of the sampling interval.
        let elapsed = tick_start.elapsed();
        if elapsed < interval {
            thread::sleep(interval - elapsed);
        }
    }
}
