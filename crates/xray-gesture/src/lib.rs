//! Press-gesture recognition: tap vs long-press vs cancelled.

pub mod haptics;
pub mod input;
pub mod machine;
pub mod recognizer;
pub mod timer;

pub use haptics::{Haptics, NoHaptics, RecordingHaptics};
pub use input::{PressInput, RawPointerEvent, TouchPoint, event_position};
pub use machine::{Effect, Effects, GestureEvent, Phase, Session, TimerToken};
pub use recognizer::{LongPress, PressCallback, PressCallbacks};
pub use timer::{ManualTimers, TimerDriver};
