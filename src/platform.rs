// TiltMorse — ESP-IDF glue
//
// Implements the crate's serial and edge-source seams on top of esp-idf-hal.

use std::num::NonZeroU32;
use std::time::Duration;

use esp_idf_hal::delay::{TickType, BLOCK};
use esp_idf_hal::gpio::{AnyInputPin, Input, InterruptType, PinDriver};
use esp_idf_hal::task::notification::Notification;
use esp_idf_hal::uart::UartDriver;
use esp_idf_sys::EspError;

use crate::drivers::serial::SerialTx;
use crate::tasks::button::EdgeSource;

impl SerialTx for UartDriver<'_> {
    type Error = EspError;

    fn write_all(&mut self, mut bytes: &[u8]) -> Result<(), Self::Error> {
        while !bytes.is_empty() {
            let written = self.write(bytes)?;
            bytes = &bytes[written..];
        }
        Ok(())
    }
}

/// Falling-edge (press) interrupts from an active-low button.
pub struct ButtonEdges {
    pin: PinDriver<'static, AnyInputPin, Input>,
    notification: Notification,
}

impl ButtonEdges {
    /// Call on the task that will wait for the edges: the notification
    /// targets the task that creates it.
    pub fn new(mut pin: PinDriver<'static, AnyInputPin, Input>, gpio: i32) -> anyhow::Result<Self> {
        configure_pullup(gpio);
        pin.set_interrupt_type(InterruptType::NegEdge)?;

        let notification = Notification::new();
        let notifier = notification.notifier();
        // SAFETY: the callback runs in ISR context and only touches the
        // ISR-safe task notifier.
        unsafe {
            pin.subscribe(move || {
                notifier.notify_and_yield(NonZeroU32::MIN);
            })?;
        }
        pin.enable_interrupt()?;

        Ok(Self { pin, notification })
    }
}

impl EdgeSource for ButtonEdges {
    fn wait_edge(&mut self, timeout: Option<Duration>) -> anyhow::Result<bool> {
        let ticks = match timeout {
            Some(timeout) => TickType::from(timeout).ticks(),
            None => BLOCK,
        };
        let edge = self.notification.wait(ticks).is_some();
        if edge {
            // The driver disarms the interrupt after each trigger.
            self.pin.enable_interrupt()?;
        }
        Ok(edge)
    }
}

/// Internal pull-up through the raw API; `PinDriver::set_pull` is not
/// available on input-only downgraded pins.
fn configure_pullup(gpio: i32) {
    unsafe {
        esp_idf_sys::gpio_set_pull_mode(gpio, esp_idf_sys::gpio_pull_mode_t_GPIO_PULLUP_ONLY);
    }
}
