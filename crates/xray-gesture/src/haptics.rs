//! Haptic feedback.
//!
//! Vibration is best effort: a platform without a motor simply reports
//! `false` and the gesture carries on.

/// Platform vibration capability.
pub trait Haptics {
    /// Attempt a pulse of `duration_ms`. Returns whether it was performed.
    fn pulse(&mut self, duration_ms: u32) -> bool;
}

/// A platform without vibration support.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn pulse(&mut self, _duration_ms: u32) -> bool {
        false
    }
}

/// Records every pulse instead of vibrating.
#[derive(Debug, Default, Clone)]
pub struct RecordingHaptics {
    pub pulses: Vec<u32>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.pulses.len()
    }
}

impl Haptics for RecordingHaptics {
    fn pulse(&mut self, duration_ms: u32) -> bool {
        self.pulses.push(duration_ms);
        true
    }
}

impl<H: Haptics + ?Sized> Haptics for Box<H> {
    fn pulse(&mut self, duration_ms: u32) -> bool {
        (**self).pulse(duration_ms)
    }
}
