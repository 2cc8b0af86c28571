// TiltMorse — Button Press Counter
//
// Collapses a burst of press edges into one press count.  Every edge bumps
// the count and restarts the one-shot debounce window; when the window
// expires without a new edge the final count is handed out and reset.
// Driven by the button task, which owns it exclusively.

use std::time::{Duration, Instant};

use crate::events::ProgramState;

pub struct ButtonDebouncer {
    window: Duration,
    count: u32,
    deadline: Option<Instant>,
}

impl ButtonDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            count: 0,
            deadline: None,
        }
    }

    /// Register a press edge observed at `now`.
    pub fn on_edge(&mut self, now: Instant) {
        self.count = self.count.saturating_add(1);
        self.deadline = Some(now + self.window);
    }

    /// Returns the burst's press count once the window has expired.
    pub fn poll(&mut self, now: Instant) -> Option<u32> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(core::mem::take(&mut self.count))
            }
            _ => None,
        }
    }

    /// Time left until the window expires, `None` if no burst is running.
    pub fn time_remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}

/// Symbol button: 1, 2 or 3 presses select dot, dash or space.
pub fn symbol_for_press_count(count: u32) -> Option<ProgramState> {
    match count {
        1 => Some(ProgramState::SymbolDot),
        2 => Some(ProgramState::SymbolDash),
        3 => Some(ProgramState::SymbolSpace),
        _ => None,
    }
}

/// Message button: any burst sends the configured message.
pub fn message_for_press_count(count: u32) -> Option<ProgramState> {
    (count > 0).then_some(ProgramState::Sos)
}
