// TiltMorse — Firmware Entry Point
//
// Boot sequence:
//   1. Bring up the MPU9250 (reset, configure, calibrate at rest).  Any
//      failure here halts the firmware: there is no mode without a sensor.
//   2. Open the Morse UART and the feedback LED.
//   3. Hand the symbol and message buttons to their tasks, which arm the
//      falling-edge interrupts themselves.
//   4. Spawn sensor, transport and button tasks around one shared mailbox.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::delay::FreeRtos;
    use esp_idf_hal::gpio::{AnyIOPin, InputPin, OutputPin, PinDriver};
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::prelude::*;
    use esp_idf_hal::uart::{config::Config as UartConfig, UartDriver};

    use tiltmorse::config::*;
    use tiltmorse::drivers::indicator::Indicator;
    use tiltmorse::drivers::mpu9250::Mpu9250;
    use tiltmorse::encoder::SymbolEncoder;
    use tiltmorse::input::{message_for_press_count, symbol_for_press_count};
    use tiltmorse::mailbox::{StateMailbox, TelemetrySlot};
    use tiltmorse::platform::ButtonEdges;
    use tiltmorse::tasks;

    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("TiltMorse firmware starting…");

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;

    // ---- I2C bus + IMU bring-up -------------------------------------------
    let i2c_config = I2cConfig::new()
        .baudrate(I2C_BAUDRATE_KHZ.kHz().into())
        .timeout(Duration::from_millis(I2C_TIMEOUT_MS).into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio6, // SDA
        peripherals.pins.gpio7, // SCL
        &i2c_config,
    )?;

    let mut imu = Mpu9250::new(i2c, FreeRtos);
    // Component self-test, before the reset sequence.
    if !imu.is_connected() {
        log::error!("Boot check FAILED: MPU9250 not answering at 0x{:02X}", I2C_ADDR_MPU9250);
    }
    if let Err(e) = imu.setup() {
        log::error!("MPU9250 bring-up failed: {}", e);
        return Err(e.into());
    }

    // ---- Serial link + indicator ------------------------------------------
    let uart_config = UartConfig::default().baudrate(Hertz(UART_BAUDRATE));
    let uart = UartDriver::new(
        peripherals.uart1,
        peripherals.pins.gpio21, // TX
        peripherals.pins.gpio20, // RX
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &uart_config,
    )?;
    let led = PinDriver::output(peripherals.pins.gpio4.downgrade_output())?;

    // ---- Buttons ----------------------------------------------------------
    // Each button task arms its own interrupt: the notification belongs to
    // the task that waits on it.
    let symbol_pin = PinDriver::input(peripherals.pins.gpio3.downgrade_input())?;
    let message_pin = PinDriver::input(peripherals.pins.gpio5.downgrade_input())?;

    // ---- Shared state -----------------------------------------------------
    let mailbox = Arc::new(StateMailbox::new());
    let telemetry = Arc::new(TelemetrySlot::new());

    // ---- Spawn tasks (map to FreeRTOS tasks via std::thread) ---------------

    let sensor_mailbox = Arc::clone(&mailbox);
    let sensor_telemetry = Arc::clone(&telemetry);
    thread::Builder::new()
        .name("sensor".into())
        .stack_size(STACK_SENSOR)
        .spawn(move || {
            tasks::sensor::sensor_task(
                imu,
                &sensor_mailbox,
                &sensor_telemetry,
                OUTPUT_MODE,
                Duration::from_millis(SENSOR_SAMPLE_INTERVAL_MS),
            )
        })?;

    let transport_mailbox = Arc::clone(&mailbox);
    let transport_telemetry = Arc::clone(&telemetry);
    thread::Builder::new()
        .name("transport".into())
        .stack_size(STACK_TRANSPORT)
        .spawn(move || {
            tasks::transport::transport_task(
                SymbolEncoder::new(uart),
                Indicator::new(led),
                &transport_mailbox,
                &transport_telemetry,
                MESSAGE_TEXT,
                Duration::from_millis(TRANSPORT_POLL_INTERVAL_MS),
            )
        })?;

    let window = Duration::from_millis(DEBOUNCE_WINDOW_MS);
    tasks::button::spawn_button_task(
        "button",
        STACK_BUTTON,
        move || ButtonEdges::new(symbol_pin, PIN_BUTTON),
        window,
        symbol_for_press_count,
        Arc::clone(&mailbox),
    )?;
    tasks::button::spawn_button_task(
        "message-button",
        STACK_BUTTON,
        move || ButtonEdges::new(message_pin, PIN_MESSAGE_BUTTON),
        window,
        message_for_press_count,
        Arc::clone(&mailbox),
    )?;

    // Main thread has nothing left to do — park it forever.
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("tiltmorse is firmware for the ESP32-C3; build it for target_os = \"espidf\"");
    std::process::exit(1);
}
