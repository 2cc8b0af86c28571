// TiltMorse — System Events & Data Types

// ---------------------------------------------------------------------------
// Sensor Data (calibrated 6-axis IMU reading)
// ---------------------------------------------------------------------------

/// Most recent calibrated reading: acceleration in g, angular rate in °/s.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorSample {
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
    pub gx: f32,
    pub gy: f32,
    pub gz: f32,
}

// ---------------------------------------------------------------------------
// Program State — the single event slot shared by producers and the
// transport task (see `mailbox`).
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ProgramState {
    /// Nothing pending.
    #[default]
    Idle = 0,
    SymbolDot = 1,
    SymbolDash = 2,
    SymbolSpace = 3,
    /// Message button burst: send the configured text as Morse.
    Sos = 4,
    /// Telemetry mode: a fresh sample is waiting in the telemetry slot.
    DataReady = 5,
}

impl ProgramState {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Inverse of [`ProgramState::as_u8`]. Unknown encodings read as `Idle`.
    pub const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::SymbolDot,
            2 => Self::SymbolDash,
            3 => Self::SymbolSpace,
            4 => Self::Sos,
            5 => Self::DataReady,
            _ => Self::Idle,
        }
    }

    /// Morse token for single-symbol states.
    pub const fn symbol(self) -> Option<char> {
        match self {
            Self::SymbolDot => Some('.'),
            Self::SymbolDash => Some('-'),
            Self::SymbolSpace => Some(' '),
            _ => None,
        }
    }

    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether an unsent `self` is really lost when `next` overwrites it.
    /// `DataReady` over `DataReady` loses nothing: the telemetry slot
    /// already holds the newer sample.
    pub const fn is_lost_when_replaced_by(self, next: Self) -> bool {
        !matches!((self, next), (Self::DataReady, Self::DataReady))
    }
}

// ---------------------------------------------------------------------------
// Output mode of the serial link
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Classified gestures are sent as Morse tokens.
    Morse,
    /// Every sample is sent as a raw telemetry line.
    Telemetry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_encoding_is_reversible() {
        for state in [
            ProgramState::Idle,
            ProgramState::SymbolDot,
            ProgramState::SymbolDash,
            ProgramState::SymbolSpace,
            ProgramState::Sos,
            ProgramState::DataReady,
        ] {
            assert_eq!(ProgramState::from_u8(state.as_u8()), state);
        }
        assert_eq!(ProgramState::from_u8(0xFF), ProgramState::Idle);
    }

    #[test]
    fn only_symbol_states_have_tokens() {
        assert_eq!(ProgramState::SymbolDot.symbol(), Some('.'));
        assert_eq!(ProgramState::SymbolDash.symbol(), Some('-'));
        assert_eq!(ProgramState::SymbolSpace.symbol(), Some(' '));
        assert_eq!(ProgramState::Sos.symbol(), None);
        assert_eq!(ProgramState::Idle.symbol(), None);
    }

    #[test]
    fn repeated_data_ready_is_not_a_lost_event() {
        assert!(!ProgramState::DataReady.is_lost_when_replaced_by(ProgramState::DataReady));
        assert!(ProgramState::SymbolDot.is_lost_when_replaced_by(ProgramState::SymbolDash));
        assert!(ProgramState::SymbolDot.is_lost_when_replaced_by(ProgramState::DataReady));
        assert!(ProgramState::DataReady.is_lost_when_replaced_by(ProgramState::Sos));
    }
}
