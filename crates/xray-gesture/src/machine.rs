//! Press state machine.
//!
//! ```text
//!            press-start                 timer fires
//!   Idle ─────────────────▶ Pending ─────────────────▶ Active
//!    ▲                        │                          │
//!    │  release → onPress     │                          │ release / move-away /
//!    │  move-away / cancel    │                          │ cancel → onLongPressEnd
//!    └────────────────────────┴──────────────────────────┘
//! ```
//!
//! `Session::step` is a pure function: it consumes the current session and an
//! event and returns the next session plus the side effects to perform. The
//! recognizer executes those effects; nothing in here touches a clock, a
//! callback, or a vibration motor.

use smallvec::SmallVec;
use std::fmt;
use xray_core::{Point, RecognizerConfig};

/// Identifies the timer of one session. Tokens are never reused, so a late
/// firing from an earlier session cannot be mistaken for the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Where the current press stands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Phase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Down, waiting for the hold timer. The timer exists only here.
    Pending { origin: Point, timer: TimerToken },
    /// Hold confirmed.
    Active { origin: Point },
}

impl Phase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Idle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Phase::Active { .. })
    }

    /// Position recorded at press-start, if a session is alive.
    pub fn origin(&self) -> Option<Point> {
        match self {
            Phase::Idle => None,
            Phase::Pending { origin, .. } | Phase::Active { origin } => Some(*origin),
        }
    }

    /// Outstanding timer, present iff the phase is `Pending`.
    pub fn timer(&self) -> Option<TimerToken> {
        match self {
            Phase::Pending { timer, .. } => Some(*timer),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Pending { .. } => "pending",
            Phase::Active { .. } => "active",
        }
    }
}

/// Modality-agnostic input to the machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    PressStart(Point),
    Move(Point),
    PressEnd(Point),
    /// Platform cancel (touchcancel) or the pointer leaving the element.
    Cancel,
    TimerFired(TimerToken),
    /// The owning element is being torn down.
    Dispose,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    StartTimer { token: TimerToken, delay_ms: u32 },
    CancelTimer(TimerToken),
    /// New value of the `pressed` signal.
    Pressed(bool),
    Haptic { duration_ms: u32 },
    LongPressStart(Point),
    LongPressEnd(Point),
    Press(Point),
}

impl Effect {
    /// True for effects that reach user callbacks.
    pub fn is_callback(&self) -> bool {
        matches!(
            self,
            Effect::LongPressStart(_) | Effect::LongPressEnd(_) | Effect::Press(_)
        )
    }
}

/// Effects of a single transition. Never more than three.
pub type Effects = SmallVec<[Effect; 4]>;

/// Bookkeeping for the press lifecycle.
///
/// `generation` counts press-starts and seeds the timer token, so it keeps
/// increasing across sessions even though the phase returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Session {
    pub phase: Phase,
    pub generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressed(&self) -> bool {
        self.phase.is_active()
    }

    fn idle(self) -> Self {
        Self {
            phase: Phase::Idle,
            ..self
        }
    }

    /// Apply one event.
    pub fn step(self, event: GestureEvent, config: &RecognizerConfig) -> (Session, Effects) {
        let mut effects = Effects::new();
        let next = match (self.phase, event) {
            (Phase::Idle, GestureEvent::PressStart(origin)) => {
                let generation = self.generation.wrapping_add(1);
                let timer = TimerToken(generation);
                effects.push(Effect::StartTimer {
                    token: timer,
                    delay_ms: config.threshold_ms,
                });
                log::debug!("press start at {origin}, {timer} in {}ms", config.threshold_ms);
                Session {
                    phase: Phase::Pending { origin, timer },
                    generation,
                }
            }

            (Phase::Pending { origin, timer }, GestureEvent::TimerFired(fired)) if fired == timer => {
                effects.push(Effect::Pressed(true));
                effects.push(Effect::Haptic {
                    duration_ms: config.haptic_pulse_ms,
                });
                effects.push(Effect::LongPressStart(origin));
                log::debug!("long press confirmed at {origin}");
                Session {
                    phase: Phase::Active { origin },
                    ..self
                }
            }

            (Phase::Pending { timer, .. }, GestureEvent::PressEnd(at)) => {
                effects.push(Effect::CancelTimer(timer));
                effects.push(Effect::Press(at));
                log::debug!("short press released at {at}");
                self.idle()
            }

            (Phase::Pending { origin, timer }, GestureEvent::Move(at))
                if at.exceeds(origin, config.move_threshold_px) =>
            {
                effects.push(Effect::CancelTimer(timer));
                log::debug!("press cancelled by movement to {at}");
                self.idle()
            }

            (Phase::Pending { timer, .. }, GestureEvent::Cancel) => {
                effects.push(Effect::CancelTimer(timer));
                log::debug!("press cancelled by platform");
                self.idle()
            }

            (Phase::Active { .. }, GestureEvent::PressEnd(at)) => {
                effects.push(Effect::Pressed(false));
                effects.push(Effect::LongPressEnd(at));
                log::debug!("long press released at {at}");
                self.idle()
            }

            (Phase::Active { origin }, GestureEvent::Move(at))
                if at.exceeds(origin, config.move_threshold_px) =>
            {
                effects.push(Effect::Pressed(false));
                effects.push(Effect::LongPressEnd(at));
                log::debug!("long press ended by movement to {at}");
                self.idle()
            }

            (Phase::Active { origin }, GestureEvent::Cancel) => {
                effects.push(Effect::Pressed(false));
                effects.push(Effect::LongPressEnd(origin));
                log::debug!("long press cancelled by platform");
                self.idle()
            }

            (Phase::Pending { timer, .. }, GestureEvent::Dispose) => {
                effects.push(Effect::CancelTimer(timer));
                self.idle()
            }

            (Phase::Active { .. }, GestureEvent::Dispose) => {
                effects.push(Effect::Pressed(false));
                self.idle()
            }

            (phase, event) => {
                log::trace!("{} ignores {event:?}", phase.name());
                self
            }
        };
        (next, effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> RecognizerConfig {
        RecognizerConfig::default()
    }

    fn at(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    /// Press at (100, 100) and return the pending session.
    fn pending() -> Session {
        let (session, _) = Session::new().step(GestureEvent::PressStart(at(100.0, 100.0)), &config());
        session
    }

    fn active() -> Session {
        let session = pending();
        let token = session.phase.timer().unwrap();
        let (session, _) = session.step(GestureEvent::TimerFired(token), &config());
        session
    }

    #[test]
    fn press_start_schedules_timer() {
        let (session, effects) =
            Session::new().step(GestureEvent::PressStart(at(100.0, 100.0)), &config());
        assert_eq!(
            session.phase,
            Phase::Pending {
                origin: at(100.0, 100.0),
                timer: TimerToken(1),
            }
        );
        assert_eq!(session.phase.origin(), Some(at(100.0, 100.0)));
        assert_eq!(
            effects.as_slice(),
            &[Effect::StartTimer {
                token: TimerToken(1),
                delay_ms: 300,
            }]
        );
    }

    #[test]
    fn timer_fire_confirms_long_press() {
        let (session, effects) = pending().step(GestureEvent::TimerFired(TimerToken(1)), &config());
        assert!(session.pressed());
        assert_eq!(
            effects.as_slice(),
            &[
                Effect::Pressed(true),
                Effect::Haptic { duration_ms: 50 },
                Effect::LongPressStart(at(100.0, 100.0)),
            ]
        );
    }

    #[test]
    fn stale_timer_is_ignored() {
        let session = pending();
        let (next, effects) = session.step(GestureEvent::TimerFired(TimerToken(99)), &config());
        assert_eq!(next, session);
        assert!(effects.is_empty());
    }

    #[test]
    fn release_while_pending_is_a_tap() {
        let (session, effects) = pending().step(GestureEvent::PressEnd(at(101.0, 99.0)), &config());
        assert!(session.phase.is_idle());
        assert_eq!(
            effects.as_slice(),
            &[Effect::CancelTimer(TimerToken(1)), Effect::Press(at(101.0, 99.0))]
        );
    }

    #[test]
    fn small_move_keeps_pending() {
        let session = pending();
        let (next, effects) = session.step(GestureEvent::Move(at(110.0, 90.0)), &config());
        assert_eq!(next, session);
        assert!(effects.is_empty());
    }

    #[test]
    fn large_move_while_pending_is_silent() {
        let (session, effects) = pending().step(GestureEvent::Move(at(100.0, 150.0)), &config());
        assert!(session.phase.is_idle());
        assert_eq!(effects.as_slice(), &[Effect::CancelTimer(TimerToken(1))]);
    }

    #[test]
    fn drift_is_measured_from_origin() {
        // Several small steps that add up past the threshold.
        let mut session = pending();
        for x in [104.0, 108.0] {
            let (next, effects) = session.step(GestureEvent::Move(at(x, 100.0)), &config());
            assert!(effects.is_empty());
            session = next;
        }
        let (session, effects) = session.step(GestureEvent::Move(at(112.0, 100.0)), &config());
        assert!(session.phase.is_idle());
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn cancel_while_pending_is_silent() {
        let (session, effects) = pending().step(GestureEvent::Cancel, &config());
        assert!(session.phase.is_idle());
        assert!(!effects.iter().any(Effect::is_callback));
    }

    #[test]
    fn release_while_active_ends_long_press() {
        let (session, effects) = active().step(GestureEvent::PressEnd(at(100.0, 100.0)), &config());
        assert!(!session.pressed());
        assert_eq!(
            effects.as_slice(),
            &[Effect::Pressed(false), Effect::LongPressEnd(at(100.0, 100.0))]
        );
    }

    #[test]
    fn move_away_while_active_ends_long_press() {
        let (session, effects) = active().step(GestureEvent::Move(at(120.0, 100.0)), &config());
        assert!(session.phase.is_idle());
        assert_eq!(
            effects.as_slice(),
            &[Effect::Pressed(false), Effect::LongPressEnd(at(120.0, 100.0))]
        );
    }

    #[test]
    fn cancel_while_active_reports_origin() {
        let (_, effects) = active().step(GestureEvent::Cancel, &config());
        assert_eq!(
            effects.as_slice(),
            &[Effect::Pressed(false), Effect::LongPressEnd(at(100.0, 100.0))]
        );
    }

    #[test]
    fn dispose_never_reaches_callbacks() {
        let (session, effects) = pending().step(GestureEvent::Dispose, &config());
        assert!(session.phase.is_idle());
        assert_eq!(effects.as_slice(), &[Effect::CancelTimer(TimerToken(1))]);

        let (session, effects) = active().step(GestureEvent::Dispose, &config());
        assert!(session.phase.is_idle());
        assert_eq!(effects.as_slice(), &[Effect::Pressed(false)]);
    }

    #[test]
    fn idle_ignores_everything_but_press_start() {
        let idle = Session::new();
        for event in [
            GestureEvent::Move(at(500.0, 500.0)),
            GestureEvent::PressEnd(at(0.0, 0.0)),
            GestureEvent::Cancel,
            GestureEvent::TimerFired(TimerToken(1)),
            GestureEvent::Dispose,
        ] {
            let (next, effects) = idle.step(event, &config());
            assert_eq!(next, idle, "{event:?} changed idle session");
            assert!(effects.is_empty(), "{event:?} produced effects");
        }
    }

    #[test]
    fn second_press_start_does_not_restart_session() {
        let session = pending();
        let (next, effects) = session.step(GestureEvent::PressStart(at(5.0, 5.0)), &config());
        assert_eq!(next, session);
        assert!(effects.is_empty());

        let session = active();
        let (next, _) = session.step(GestureEvent::PressStart(at(5.0, 5.0)), &config());
        assert_eq!(next, session);
    }

    #[test]
    fn tokens_are_unique_per_session() {
        let (session, _) = pending().step(GestureEvent::Cancel, &config());
        let (session, _) = session.step(GestureEvent::PressStart(at(0.0, 0.0)), &config());
        assert_eq!(session.phase.timer(), Some(TimerToken(2)));

        // The first session's timer firing late must not activate the second.
        let (next, effects) = session.step(GestureEvent::TimerFired(TimerToken(1)), &config());
        assert_eq!(next, session);
        assert!(effects.is_empty());
    }

    #[test]
    fn custom_thresholds_flow_into_effects() {
        let config = RecognizerConfig::default()
            .with_threshold_ms(500)
            .with_haptic_pulse_ms(20)
            .with_move_threshold_px(30.0);
        let (session, effects) =
            Session::new().step(GestureEvent::PressStart(at(0.0, 0.0)), &config);
        assert_eq!(
            effects[0],
            Effect::StartTimer {
                token: TimerToken(1),
                delay_ms: 500,
            }
        );
        let (session, effects) = session.step(GestureEvent::Move(at(25.0, 0.0)), &config);
        assert!(effects.is_empty());
        let (_, effects) = session.step(GestureEvent::TimerFired(TimerToken(1)), &config);
        assert!(effects.contains(&Effect::Haptic { duration_ms: 20 }));
    }
}
