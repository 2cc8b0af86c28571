// TiltMorse — Hardware & System Configuration
// Target: Seeed Studio Xiao ESP32-C3 (RISC-V) + MPU9250 breakout

use crate::events::OutputMode;

// ---------------------------------------------------------------------------
// GPIO Pin Definitions (Xiao ESP32-C3 pinout)
// ---------------------------------------------------------------------------
pub const PIN_BUTTON: i32 = 3;         // D1 — Symbol button (INPUT_PULLUP, active LOW)
pub const PIN_MESSAGE_BUTTON: i32 = 5; // D3 — Message button (INPUT_PULLUP, active LOW)
pub const PIN_LED: i32 = 4;            // D2 — Feedback indicator
pub const PIN_I2C_SDA: i32 = 6;        // D4 — I2C data line
pub const PIN_I2C_SCL: i32 = 7;        // D5 — I2C clock line
pub const PIN_UART_TX: i32 = 21;       // D6 — Morse serial out
pub const PIN_UART_RX: i32 = 20;       // D7 — unused, required by the driver

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_ADDR_MPU9250: u8 = 0x68;
pub const I2C_BAUDRATE_KHZ: u32 = 400;
pub const I2C_TIMEOUT_MS: u64 = 50;   // per transfer

// ---------------------------------------------------------------------------
// Serial link
// ---------------------------------------------------------------------------
pub const UART_BAUDRATE: u32 = 9600;

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_SENSOR: usize = 4096;
pub const STACK_TRANSPORT: usize = 4096;
pub const STACK_BUTTON: usize = 3072;

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const SENSOR_SAMPLE_INTERVAL_MS: u64 = 200;
pub const TRANSPORT_POLL_INTERVAL_MS: u64 = 100;
pub const DEBOUNCE_WINDOW_MS: u64 = 500;
pub const FEEDBACK_PULSE_MS: u64 = 500;
pub const SENSOR_SETTLE_MS: u32 = 100;
pub const CALIBRATION_SAMPLE_INTERVAL_MS: u32 = 5;

// ---------------------------------------------------------------------------
// Gesture / output behaviour
// ---------------------------------------------------------------------------
pub const TILT_THRESHOLD_G: f32 = 1.0;
pub const CALIBRATION_SAMPLES: u16 = 64;
pub const CALIBRATE_ON_BOOT: bool = true;
pub const MESSAGE_TEXT: &str = "SOS";
pub const OUTPUT_MODE: OutputMode = OutputMode::Morse;

// ---------------------------------------------------------------------------
// MPU9250 Register Settings
// ---------------------------------------------------------------------------
pub const MPU_SAMPLE_RATE_DIV: u8 = 0x04; // 1 kHz / (1 + 4) = 200 Hz
pub const MPU_DLPF_CONFIG: u8 = 0x03;     // 41 Hz gyro bandwidth
