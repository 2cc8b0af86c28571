#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::i2c::{self, ErrorKind, I2c, NoAcknowledgeSource, Operation};

use tiltmorse::config::I2C_ADDR_MPU9250;

pub const REG_ACCEL_XOUT_H: usize = 0x3B;
pub const REG_GYRO_XOUT_H: usize = 0x43;
pub const REG_WHO_AM_I: usize = 0x75;

// ---------------------------------------------------------------------------
// Register-map I2C mock
// ---------------------------------------------------------------------------

pub struct MockState {
    pub regs: [u8; 256],
    /// (register, value) for every single-register write, in order.
    pub writes: Vec<(u8, u8)>,
    /// Number of upcoming reads that fail.
    pub fail_reads: u32,
    /// Device does not acknowledge its address.
    pub absent: bool,
}

/// Clonable handle: the driver owns one clone, the test inspects another.
#[derive(Clone)]
pub struct MockI2c {
    state: Arc<Mutex<MockState>>,
}

impl MockI2c {
    pub fn new() -> Self {
        let mut regs = [0u8; 256];
        regs[REG_WHO_AM_I] = 0x71;
        Self {
            state: Arc::new(Mutex::new(MockState {
                regs,
                writes: Vec::new(),
                fail_reads: 0,
                absent: false,
            })),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn set_accel_raw(&self, raw: [i16; 3]) {
        self.set_words(REG_ACCEL_XOUT_H, raw);
    }

    pub fn set_gyro_raw(&self, raw: [i16; 3]) {
        self.set_words(REG_GYRO_XOUT_H, raw);
    }

    pub fn set_accel_bytes(&self, bytes: [u8; 6]) {
        self.with(|s| s.regs[REG_ACCEL_XOUT_H..REG_ACCEL_XOUT_H + 6].copy_from_slice(&bytes));
    }

    pub fn fail_next_reads(&self, n: u32) {
        self.with(|s| s.fail_reads = n);
    }

    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.with(|s| s.writes.clone())
    }

    fn set_words(&self, start: usize, words: [i16; 3]) {
        self.with(|s| {
            for (i, w) in words.iter().enumerate() {
                let [hi, lo] = w.to_be_bytes();
                s.regs[start + 2 * i] = hi;
                s.regs[start + 2 * i + 1] = lo;
            }
        });
    }
}

impl i2c::ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        let mut s = self.state.lock().unwrap();
        if s.absent || address != I2C_ADDR_MPU9250 {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        let mut pointer = 0usize;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    if let Some((&reg, data)) = bytes.split_first() {
                        pointer = reg as usize;
                        for (i, &b) in data.iter().enumerate() {
                            s.regs[pointer + i] = b;
                            s.writes.push((reg, b));
                        }
                    }
                }
                Operation::Read(buf) => {
                    if s.fail_reads > 0 {
                        s.fail_reads -= 1;
                        return Err(ErrorKind::ArbitrationLoss);
                    }
                    let len = buf.len();
                    buf.copy_from_slice(&s.regs[pointer..pointer + len]);
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Delay / pins
// ---------------------------------------------------------------------------

pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Output pin that records every level it is driven to.
#[derive(Clone, Default)]
pub struct RecordingPin {
    pub levels: Arc<Mutex<Vec<bool>>>,
}

impl RecordingPin {
    pub fn levels(&self) -> Vec<bool> {
        self.levels.lock().unwrap().clone()
    }
}

impl digital::ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.lock().unwrap().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.lock().unwrap().push(true);
        Ok(())
    }
}
