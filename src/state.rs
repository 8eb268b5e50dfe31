//! Shared visual state: the single channel between audio sampling,
//! user settings, and the four shader regions.
//!
//! One instance is owned by the app and passed by reference each tick;
//! the scheduler writes amplitude and time, settings handlers write
//! color and sensitivity, and every region reads the same snapshot.

/// Sensitivity control range and step granularity.
pub const SENSITIVITY_MIN: f32 = 0.1;
pub const SENSITIVITY_MAX: f32 = 20.0;
pub const SENSITIVITY_STEP: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct VisualState {
    /// Region color, user-controlled (RGB, each in [0, 1])
    pub color: [f32; 3],

    /// Loudness × sensitivity, written once per tick. Unclamped: may
    /// exceed 1.0 at high sensitivity, and the shader side tolerates
    /// that.
    pub amplitude: f32,

    /// Seconds since the first frame, monotonic
    pub elapsed_s: f32,

    /// User sensitivity, kept within [0.1, 20.0] by the setters
    sensitivity: f32,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            color: [0.0, 1.0, 1.0], // cyan
            amplitude: 0.0,
            elapsed_s: 0.0,
            sensitivity: 5.0,
        }
    }
}

impl VisualState {
    /// Per-tick update. Time always advances; amplitude only changes
    /// when a fresh loudness reading exists, so a stream that is not
    /// ready yet leaves the previous amplitude in place.
    pub fn advance(&mut self, loudness: Option<f32>, elapsed_s: f32) {
        self.elapsed_s = elapsed_s;
        if let Some(loudness) = loudness {
            self.amplitude = loudness * self.sensitivity;
        }
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn set_sensitivity(&mut self, value: f32) {
        self.sensitivity = value.clamp(SENSITIVITY_MIN, SENSITIVITY_MAX);
    }

    /// Move sensitivity by whole steps of 0.1, clamped to the control
    /// range.
    pub fn nudge_sensitivity(&mut self, steps: i32) {
        self.set_sensitivity(self.sensitivity + steps as f32 * SENSITIVITY_STEP);
    }

    pub fn set_color(&mut self, color: [f32; 3]) {
        self.color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amplitude_is_loudness_times_sensitivity() {
        let mut state = VisualState::default();
        state.set_sensitivity(10.0);

        state.advance(Some(0.5), 1.0);
        assert_eq!(state.amplitude, 5.0); // unclamped, well above 1.0

        state.set_sensitivity(0.1);
        state.advance(Some(0.5), 2.0);
        assert!((state.amplitude - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_missing_loudness_freezes_amplitude() {
        let mut state = VisualState::default();
        state.advance(Some(0.4), 1.0);
        let held = state.amplitude;

        // Stream not ready: successive ticks keep the old amplitude
        // while time keeps advancing
        state.advance(None, 2.0);
        state.advance(None, 3.0);
        assert_eq!(state.amplitude, held);
        assert_eq!(state.elapsed_s, 3.0);
    }

    #[test]
    fn test_initial_amplitude_is_zero_while_idle() {
        let mut state = VisualState::default();
        state.advance(None, 0.5);
        assert_eq!(state.amplitude, 0.0);
    }

    #[test]
    fn test_sensitivity_clamped() {
        let mut state = VisualState::default();

        state.set_sensitivity(100.0);
        assert_eq!(state.sensitivity(), SENSITIVITY_MAX);

        state.set_sensitivity(-3.0);
        assert_eq!(state.sensitivity(), SENSITIVITY_MIN);

        state.nudge_sensitivity(-5);
        assert_eq!(state.sensitivity(), SENSITIVITY_MIN);

        state.nudge_sensitivity(2);
        assert!((state.sensitivity() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_settings_visible_next_tick() {
        let mut state = VisualState::default();
        state.set_color([1.0, 0.0, 0.0]);
        state.set_sensitivity(2.0);

        state.advance(Some(1.0), 0.016);
        assert_eq!(state.color, [1.0, 0.0, 0.0]);
        assert_eq!(state.amplitude, 2.0);
    }
}
