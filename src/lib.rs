//! TiltMorse — tilt and button gestures relayed as Morse over a serial link.
//!
//! Data flow: I2C register adapter → MPU9250 driver → classifier → shared
//! mailbox → encoder/transport → UART.  The button tasks feed the same
//! mailbox.  Everything except `platform` is hardware independent.

pub mod classifier;
pub mod config;
pub mod drivers;
pub mod encoder;
pub mod events;
pub mod input;
pub mod mailbox;
pub mod morse;
pub mod tasks;

#[cfg(target_os = "espidf")]
pub mod platform;
