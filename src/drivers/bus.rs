// TiltMorse — Register I/O Adapter
//
// Single-register writes and block reads against one fixed 7-bit address.
// Failures are logged here and handed back to the caller, who decides
// whether they are fatal (bring-up) or just cost one cycle (polling).

use core::fmt;

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// The transfer failed or timed out at the bus level.
    Transfer(ErrorKind),
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer(kind) => write!(f, "bus transfer failed: {:?}", kind),
        }
    }
}

impl std::error::Error for BusError {}

pub struct RegisterBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> RegisterBus<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// [reg][value]
    pub fn write_register(&mut self, reg: u8, value: u8) -> Result<(), BusError> {
        self.i2c.write(self.address, &[reg, value]).map_err(|e| {
            let kind = e.kind();
            log::warn!("I2C 0x{:02X}: write of reg 0x{:02X} failed ({:?})", self.address, reg, kind);
            BusError::Transfer(kind)
        })
    }

    /// [reg] then read `buf.len()` bytes.
    pub fn read_registers(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), BusError> {
        self.i2c.write_read(self.address, &[reg], buf).map_err(|e| {
            let kind = e.kind();
            log::warn!(
                "I2C 0x{:02X}: read of {} bytes at reg 0x{:02X} failed ({:?})",
                self.address,
                buf.len(),
                reg,
                kind
            );
            BusError::Transfer(kind)
        })
    }

    pub fn read_register(&mut self, reg: u8) -> Result<u8, BusError> {
        let mut buf = [0u8; 1];
        self.read_registers(reg, &mut buf)?;
        Ok(buf[0])
    }
}
