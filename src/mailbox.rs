// TiltMorse — Shared Program State
//
// Single-slot mailbox between the producers (sensor task, button tasks) and
// the transport task.  Latest write wins; at most one event is outstanding.
// Each access is one atomic operation, so a read can never observe a torn
// value and a consumed event cannot be observed twice.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Mutex;

use crate::events::{ProgramState, SensorSample};

#[derive(Debug, Default)]
pub struct StateMailbox {
    slot: AtomicU8,
}

impl StateMailbox {
    pub const fn new() -> Self {
        Self {
            slot: AtomicU8::new(ProgramState::Idle as u8),
        }
    }

    /// Publish an event.  Posting `Idle` is a no-op: only the consumer may
    /// move the slot back to `Idle`.
    ///
    /// Returns the unread event that was overwritten, if any.
    pub fn post(&self, state: ProgramState) -> Option<ProgramState> {
        if state.is_idle() {
            return None;
        }
        let previous = ProgramState::from_u8(self.slot.swap(state.as_u8(), Ordering::AcqRel));
        (!previous.is_idle()).then_some(previous)
    }

    /// Read-and-clear.  Returns `None` when nothing is pending.
    pub fn take(&self) -> Option<ProgramState> {
        let state = ProgramState::from_u8(self.slot.swap(ProgramState::Idle as u8, Ordering::AcqRel));
        (!state.is_idle()).then_some(state)
    }

    /// Current value without consuming it.
    pub fn peek(&self) -> ProgramState {
        ProgramState::from_u8(self.slot.load(Ordering::Acquire))
    }
}

/// Latest sample for telemetry mode.  Overwritten every cycle, no history.
#[derive(Debug, Default)]
pub struct TelemetrySlot {
    latest: Mutex<Option<SensorSample>>,
}

impl TelemetrySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, sample: SensorSample) {
        let mut guard = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(sample);
    }

    pub fn latest(&self) -> Option<SensorSample> {
        *self.latest.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn starts_idle() {
        let mailbox = StateMailbox::new();
        assert_eq!(mailbox.peek(), ProgramState::Idle);
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn event_is_observed_exactly_once() {
        let mailbox = StateMailbox::new();
        assert_eq!(mailbox.post(ProgramState::SymbolDash), None);
        assert_eq!(mailbox.take(), Some(ProgramState::SymbolDash));
        assert_eq!(mailbox.peek(), ProgramState::Idle);
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn latest_write_wins_and_reports_loss() {
        let mailbox = StateMailbox::new();
        mailbox.post(ProgramState::SymbolDot);
        assert_eq!(mailbox.post(ProgramState::SymbolSpace), Some(ProgramState::SymbolDot));
        assert_eq!(mailbox.take(), Some(ProgramState::SymbolSpace));
    }

    #[test]
    fn posting_idle_does_not_clear_pending_event() {
        let mailbox = StateMailbox::new();
        mailbox.post(ProgramState::Sos);
        assert_eq!(mailbox.post(ProgramState::Idle), None);
        assert_eq!(mailbox.take(), Some(ProgramState::Sos));
    }

    #[test]
    fn concurrent_consumer_never_sees_more_events_than_posted() {
        const EVENTS: usize = 10_000;
        let mailbox = Arc::new(StateMailbox::new());
        let done = Arc::new(AtomicBool::new(false));

        let consumer = {
            let mailbox = Arc::clone(&mailbox);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut seen = 0usize;
                loop {
                    let finished = done.load(Ordering::Acquire);
                    while let Some(state) = mailbox.take() {
                        assert_eq!(state, ProgramState::SymbolDot);
                        seen += 1;
                    }
                    if finished {
                        return seen;
                    }
                    thread::yield_now();
                }
            })
        };

        let mut overwritten = 0usize;
        for _ in 0..EVENTS {
            if mailbox.post(ProgramState::SymbolDot).is_some() {
                overwritten += 1;
            }
        }
        done.store(true, Ordering::Release);

        let seen = consumer.join().unwrap();
        assert_eq!(seen + overwritten, EVENTS);
    }

    #[test]
    fn telemetry_slot_keeps_only_latest() {
        let slot = TelemetrySlot::new();
        assert_eq!(slot.latest(), None);
        slot.store(SensorSample { ax: 1.0, ..Default::default() });
        slot.store(SensorSample { ax: 2.0, ..Default::default() });
        assert_eq!(slot.latest().map(|s| s.ax), Some(2.0));
    }
}
