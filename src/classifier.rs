// TiltMorse — Gesture Classifier
//
// Single-sample threshold crossing, first matching rule wins:
//   ax > +T  → dash   (tilt right)
//   ax < -T  → dot    (tilt left)
//   az > +T  → space  (quick upward movement)
//   otherwise idle
//
// No smoothing or hysteresis: a sample hovering near a threshold produces a
// noisy stream of events.

use crate::config::TILT_THRESHOLD_G;
use crate::events::{ProgramState, SensorSample};

pub fn classify(sample: &SensorSample) -> ProgramState {
    classify_with_threshold(sample, TILT_THRESHOLD_G)
}

pub fn classify_with_threshold(sample: &SensorSample, threshold_g: f32) -> ProgramState {
    if sample.ax > threshold_g {
        ProgramState::SymbolDash
    } else if sample.ax < -threshold_g {
        ProgramState::SymbolDot
    } else if sample.az > threshold_g {
        ProgramState::SymbolSpace
    } else {
        ProgramState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accel(ax: f32, ay: f32, az: f32) -> SensorSample {
        SensorSample { ax, ay, az, ..Default::default() }
    }

    #[test]
    fn tilt_right_is_dash() {
        assert_eq!(classify(&accel(1.5, 0.0, 0.0)), ProgramState::SymbolDash);
    }

    #[test]
    fn tilt_left_is_dot() {
        assert_eq!(classify(&accel(-1.5, 0.0, 0.0)), ProgramState::SymbolDot);
    }

    #[test]
    fn upward_is_space() {
        assert_eq!(classify(&accel(0.2, 0.0, 1.3)), ProgramState::SymbolSpace);
    }

    #[test]
    fn x_axis_wins_over_z() {
        assert_eq!(classify(&accel(1.2, 0.0, 1.8)), ProgramState::SymbolDash);
        assert_eq!(classify(&accel(-1.2, 0.0, 1.8)), ProgramState::SymbolDot);
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(classify(&accel(1.0, 0.0, 1.0)), ProgramState::Idle);
        assert_eq!(classify(&accel(-1.0, 0.0, 0.0)), ProgramState::Idle);
    }

    #[test]
    fn at_rest_and_y_tilt_are_idle() {
        assert_eq!(classify(&accel(0.0, 0.0, 0.0)), ProgramState::Idle);
        assert_eq!(classify(&accel(0.0, 3.0, 0.0)), ProgramState::Idle);
        assert_eq!(classify(&accel(0.0, 0.0, -2.0)), ProgramState::Idle);
    }

    #[test]
    fn gyro_does_not_affect_result() {
        let sample = SensorSample { gx: 500.0, gy: -500.0, gz: 250.0, ..Default::default() };
        assert_eq!(classify(&sample), ProgramState::Idle);
    }

    #[test]
    fn total_and_deterministic_over_a_grid() {
        let steps = [-4.0f32, -1.0001, -1.0, -0.5, 0.0, 0.5, 1.0, 1.0001, 4.0];
        for &ax in &steps {
            for &az in &steps {
                let sample = accel(ax, 0.0, az);
                let first = classify(&sample);
                assert_eq!(first, classify(&sample));
                assert!(matches!(
                    first,
                    ProgramState::Idle
                        | ProgramState::SymbolDot
                        | ProgramState::SymbolDash
                        | ProgramState::SymbolSpace
                ));
            }
        }
    }

    #[test]
    fn custom_threshold() {
        assert_eq!(classify_with_threshold(&accel(0.6, 0.0, 0.0), 0.5), ProgramState::SymbolDash);
        assert_eq!(classify_with_threshold(&accel(0.6, 0.0, 0.0), 2.0), ProgramState::Idle);
    }
}
