// TiltMorse — MPU9250 IMU Driver
//
// Register-level driver for the accelerometer/gyroscope half of the MPU9250
// (the AK8963 magnetometer is not used).

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::*;
use crate::drivers::bus::{BusError, RegisterBus};
use crate::events::SensorSample;

// MPU9250 register addresses
const REG_SMPLRT_DIV: u8 = 0x19;
const REG_CONFIG: u8 = 0x1A;
const REG_GYRO_CONFIG: u8 = 0x1B;
const REG_ACCEL_CONFIG: u8 = 0x1C;
const REG_INT_PIN_CFG: u8 = 0x37;
const REG_INT_ENABLE: u8 = 0x38;
const REG_ACCEL_XOUT_H: u8 = 0x3B; // Start of 14-byte accel/temp/gyro burst
const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_WHO_AM_I: u8 = 0x75;

const PWR_RESET: u8 = 0x80;
const PWR_WAKE: u8 = 0x00;
const INT_PIN_LATCH_ANY_READ: u8 = 0x12;
const INT_DATA_READY: u8 = 0x01;

/// MPU9250 and its MPU9255 sibling.
const WHO_AM_I_ACCEPTED: [u8; 2] = [0x71, 0x73];

const BURST_LEN: usize = 14;
const FULL_SCALE_COUNTS: f32 = 32768.0;

/// Accelerometer full-scale range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccelScale {
    G2 = 0,
    G4 = 1,
    G8 = 2,
    G16 = 3,
}

impl AccelScale {
    /// g per LSB.
    pub const fn resolution(self) -> f32 {
        match self {
            Self::G2 => 2.0 / FULL_SCALE_COUNTS,
            Self::G4 => 4.0 / FULL_SCALE_COUNTS,
            Self::G8 => 8.0 / FULL_SCALE_COUNTS,
            Self::G16 => 16.0 / FULL_SCALE_COUNTS,
        }
    }

    /// ACCEL_FS_SEL lives in bits [4:3] of ACCEL_CONFIG.
    pub const fn config_bits(self) -> u8 {
        (self as u8) << 3
    }
}

/// Gyroscope full-scale range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GyroScale {
    Dps250 = 0,
    Dps500 = 1,
    Dps1000 = 2,
    Dps2000 = 3,
}

impl GyroScale {
    /// °/s per LSB.
    pub const fn resolution(self) -> f32 {
        match self {
            Self::Dps250 => 250.0 / FULL_SCALE_COUNTS,
            Self::Dps500 => 500.0 / FULL_SCALE_COUNTS,
            Self::Dps1000 => 1000.0 / FULL_SCALE_COUNTS,
            Self::Dps2000 => 2000.0 / FULL_SCALE_COUNTS,
        }
    }

    /// GYRO_FS_SEL lives in bits [4:3] of GYRO_CONFIG.
    pub const fn config_bits(self) -> u8 {
        (self as u8) << 3
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Mpu9250Config {
    pub accel_scale: AccelScale,
    pub gyro_scale: GyroScale,
    pub sample_rate_div: u8,
    pub dlpf: u8,
    pub calibrate_on_boot: bool,
}

impl Default for Mpu9250Config {
    fn default() -> Self {
        Self {
            accel_scale: AccelScale::G8,
            gyro_scale: GyroScale::Dps250,
            sample_rate_div: MPU_SAMPLE_RATE_DIV,
            dlpf: MPU_DLPF_CONFIG,
            calibrate_on_boot: CALIBRATE_ON_BOOT,
        }
    }
}

/// Scale factors and zero offsets, fixed once bring-up completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationState {
    pub accel_scale: f32,
    pub gyro_scale: f32,
    /// g
    pub accel_bias: [f32; 3],
    /// °/s
    pub gyro_bias: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    Bus(BusError),
    /// WHO_AM_I did not match a supported device.
    UnexpectedId(u8),
    /// `read_sample`/`calibrate` called before a successful `setup`.
    NotInitialised,
}

impl From<BusError> for SensorError {
    fn from(e: BusError) -> Self {
        Self::Bus(e)
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "{}", e),
            Self::UnexpectedId(id) => write!(f, "unexpected WHO_AM_I 0x{:02X}", id),
            Self::NotInitialised => f.write_str("sensor not initialised"),
        }
    }
}

impl std::error::Error for SensorError {}

pub struct Mpu9250<I2C, D> {
    bus: RegisterBus<I2C>,
    delay: D,
    config: Mpu9250Config,
    calibration: Option<CalibrationState>,
}

impl<I2C: I2c, D: DelayNs> Mpu9250<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_config(i2c, delay, Mpu9250Config::default())
    }

    pub fn with_config(i2c: I2C, delay: D, config: Mpu9250Config) -> Self {
        Self {
            bus: RegisterBus::new(i2c, I2C_ADDR_MPU9250),
            delay,
            config,
            calibration: None,
        }
    }

    /// Boot self-test: the device answers with a supported WHO_AM_I.
    pub fn is_connected(&mut self) -> bool {
        match self.bus.read_register(REG_WHO_AM_I) {
            Ok(id) => WHO_AM_I_ACCEPTED.contains(&id),
            Err(_) => false,
        }
    }

    /// Reset, wake and configure the sensor, then derive the resolutions.
    /// Any failure here means there is no usable sensor.
    pub fn setup(&mut self) -> Result<(), SensorError> {
        log::info!("MPU9250: setup start");

        self.bus.write_register(REG_PWR_MGMT_1, PWR_RESET)?;
        self.delay.delay_ms(SENSOR_SETTLE_MS);
        self.bus.write_register(REG_PWR_MGMT_1, PWR_WAKE)?;
        self.delay.delay_ms(SENSOR_SETTLE_MS);

        let id = self.bus.read_register(REG_WHO_AM_I)?;
        if !WHO_AM_I_ACCEPTED.contains(&id) {
            return Err(SensorError::UnexpectedId(id));
        }

        let cfg = self.config;
        self.bus.write_register(REG_GYRO_CONFIG, cfg.gyro_scale.config_bits())?;
        self.bus.write_register(REG_ACCEL_CONFIG, cfg.accel_scale.config_bits())?;
        self.bus.write_register(REG_SMPLRT_DIV, cfg.sample_rate_div)?;
        self.bus.write_register(REG_CONFIG, cfg.dlpf)?;
        self.bus.write_register(REG_INT_PIN_CFG, INT_PIN_LATCH_ANY_READ)?;
        self.bus.write_register(REG_INT_ENABLE, INT_DATA_READY)?;
        self.delay.delay_ms(SENSOR_SETTLE_MS);

        self.calibration = Some(CalibrationState {
            accel_scale: cfg.accel_scale.resolution(),
            gyro_scale: cfg.gyro_scale.resolution(),
            accel_bias: [0.0; 3],
            gyro_bias: [0.0; 3],
        });

        if cfg.calibrate_on_boot {
            self.calibrate(CALIBRATION_SAMPLES)?;
        }

        log::info!(
            "MPU9250: setup complete ({:?}, {:?}, div {}, dlpf {})",
            cfg.accel_scale,
            cfg.gyro_scale,
            cfg.sample_rate_div,
            cfg.dlpf
        );
        Ok(())
    }

    /// Average `samples` readings taken at rest and store them as bias.
    ///
    /// The whole rest reading, gravity included, becomes the zero point, so
    /// afterwards a still device reads ~0 g on every axis and each gesture
    /// threshold counts from the rest pose.  Returns `(gyro_bias, accel_bias)`.
    pub fn calibrate(&mut self, samples: u16) -> Result<([f32; 3], [f32; 3]), SensorError> {
        let mut cal = self.calibration.ok_or(SensorError::NotInitialised)?;
        let samples = samples.max(1);

        let mut accel_sum = [0i64; 3];
        let mut gyro_sum = [0i64; 3];
        for _ in 0..samples {
            let (accel, gyro) = self.read_raw()?;
            for axis in 0..3 {
                accel_sum[axis] += i64::from(accel[axis]);
                gyro_sum[axis] += i64::from(gyro[axis]);
            }
            self.delay.delay_ms(CALIBRATION_SAMPLE_INTERVAL_MS);
        }

        let n = f32::from(samples);
        for axis in 0..3 {
            cal.accel_bias[axis] = accel_sum[axis] as f32 / n * cal.accel_scale;
            cal.gyro_bias[axis] = gyro_sum[axis] as f32 / n * cal.gyro_scale;
        }

        log::info!(
            "MPU9250: calibrated over {} samples, accel bias {:?} g, gyro bias {:?} dps",
            samples,
            cal.accel_bias,
            cal.gyro_bias
        );
        self.calibration = Some(cal);
        Ok((cal.gyro_bias, cal.accel_bias))
    }

    /// Burst-read all 6 axes and convert to calibrated physical units.
    pub fn read_sample(&mut self) -> Result<SensorSample, SensorError> {
        let cal = self.calibration.ok_or(SensorError::NotInitialised)?;
        let (accel, gyro) = self.read_raw()?;

        let a = |axis: usize| f32::from(accel[axis]) * cal.accel_scale - cal.accel_bias[axis];
        let g = |axis: usize| f32::from(gyro[axis]) * cal.gyro_scale - cal.gyro_bias[axis];

        Ok(SensorSample {
            ax: a(0),
            ay: a(1),
            az: a(2),
            gx: g(0),
            gy: g(1),
            gz: g(2),
        })
    }

    pub fn calibration(&self) -> Option<CalibrationState> {
        self.calibration
    }

    fn read_raw(&mut self) -> Result<([i16; 3], [i16; 3]), SensorError> {
        let mut raw = [0u8; BURST_LEN];
        self.bus.read_registers(REG_ACCEL_XOUT_H, &mut raw)?;

        let word = |i: usize| i16::from_be_bytes([raw[i], raw[i + 1]]);
        // raw[6..8] = temperature — skipped
        Ok(([word(0), word(2), word(4)], [word(8), word(10), word(12)]))
    }
}
