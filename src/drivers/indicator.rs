// TiltMorse — Feedback Indicator
//
// Simple GPIO-driven LED.

use std::thread;
use std::time::Duration;

use embedded_hal::digital::OutputPin;

use crate::config::FEEDBACK_PULSE_MS;

pub struct Indicator<P> {
    pin: P,
    feedback: Duration,
}

impl<P: OutputPin> Indicator<P> {
    pub fn new(pin: P) -> Self {
        Self::with_feedback(pin, Duration::from_millis(FEEDBACK_PULSE_MS))
    }

    pub fn with_feedback(pin: P, feedback: Duration) -> Self {
        Self { pin, feedback }
    }

    /// Feedback pulse after an emitted event.
    pub fn trigger(&mut self) {
        self.pulse(self.feedback);
    }

    /// On for `duration`, then off (blocks the calling thread).
    pub fn pulse(&mut self, duration: Duration) {
        if self.pin.set_high().is_err() {
            log::warn!("Indicator: set_high failed");
        }
        thread::sleep(duration);
        if self.pin.set_low().is_err() {
            log::warn!("Indicator: set_low failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    #[derive(Default)]
    struct RecordingPin {
        levels: Vec<bool>,
    }

    impl ErrorType for RecordingPin {
        type Error = Infallible;
    }

    impl OutputPin for RecordingPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.levels.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.levels.push(true);
            Ok(())
        }
    }

    #[test]
    fn pulse_turns_on_then_off() {
        let mut indicator = Indicator::new(RecordingPin::default());
        indicator.pulse(Duration::from_millis(1));
        assert_eq!(indicator.pin.levels, vec![true, false]);
    }

    #[test]
    fn trigger_uses_feedback_duration() {
        let mut indicator =
            Indicator::with_feedback(RecordingPin::default(), Duration::from_millis(1));
        indicator.trigger();
        indicator.trigger();
        assert_eq!(indicator.pin.levels, vec![true, false, true, false]);
    }
}
