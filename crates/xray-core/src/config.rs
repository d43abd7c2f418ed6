//! Recognizer configuration.
//!
//! Only the numeric part lives here; callbacks are closures and are handed to
//! the recognizer separately. Hosts usually pass this as JSON:
//!
//! ```json
//! { "thresholdMs": 300, "moveThresholdPx": 10, "hapticPulseMs": 50 }
//! ```
//!
//! Missing keys take their defaults, unknown keys are rejected.

use serde::{Deserialize, Serialize};

/// Default hold duration before a press counts as long.
pub const DEFAULT_THRESHOLD_MS: u32 = 300;
/// Default per-axis movement tolerance.
pub const DEFAULT_MOVE_THRESHOLD_PX: f32 = 10.0;
/// Default vibration pulse when a long press is confirmed.
pub const DEFAULT_HAPTIC_PULSE_MS: u32 = 50;

/// Immutable tuning for one recognizer instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RecognizerConfig {
    /// Minimum hold duration, in milliseconds, to count as a long press.
    pub threshold_ms: u32,
    /// Maximum movement on either axis before the press becomes a scroll.
    pub move_threshold_px: f32,
    /// Haptic pulse duration on entering the long-press state.
    pub haptic_pulse_ms: u32,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            threshold_ms: DEFAULT_THRESHOLD_MS,
            move_threshold_px: DEFAULT_MOVE_THRESHOLD_PX,
            haptic_pulse_ms: DEFAULT_HAPTIC_PULSE_MS,
        }
    }
}

impl RecognizerConfig {
    pub fn with_threshold_ms(mut self, threshold_ms: u32) -> Self {
        self.threshold_ms = threshold_ms;
        self
    }

    pub fn with_move_threshold_px(mut self, move_threshold_px: f32) -> Self {
        self.move_threshold_px = move_threshold_px;
        self
    }

    pub fn with_haptic_pulse_ms(mut self, haptic_pulse_ms: u32) -> Self {
        self.haptic_pulse_ms = haptic_pulse_ms;
        self
    }

    /// Parse and validate a JSON configuration object.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("invalid recognizer config: {e}"))?;
        config.validate()?;
        log::debug!(
            "recognizer config: threshold={}ms move={}px haptic={}ms",
            config.threshold_ms,
            config.move_threshold_px,
            config.haptic_pulse_ms
        );
        Ok(config)
    }

    /// Check values serde cannot rule out on its own.
    pub fn validate(&self) -> Result<(), String> {
        if !self.move_threshold_px.is_finite() {
            return Err(format!(
                "moveThresholdPx must be finite, got {}",
                self.move_threshold_px
            ));
        }
        if self.move_threshold_px < 0.0 {
            return Err(format!(
                "moveThresholdPx must not be negative, got {}",
                self.move_threshold_px
            ));
        }
        Ok(())
    }

    /// Replace values `validate` would reject with their defaults.
    ///
    /// Builder setters and struct literals skip `from_json`; a NaN movement
    /// tolerance would otherwise never cancel a press.
    pub fn sanitized(mut self) -> Self {
        if let Err(e) = self.validate() {
            log::warn!("{e}; using {DEFAULT_MOVE_THRESHOLD_PX}px");
            self.move_threshold_px = DEFAULT_MOVE_THRESHOLD_PX;
        }
        self
    }
}
