//! Long-press recognizer.
//!
//! `LongPress` owns the single gesture `Session`, feeds it normalized events,
//! and carries out the effects each transition asks for: timers go to the
//! `TimerDriver`, vibration to `Haptics`, outcomes to the optional callbacks.
//!
//! The host wires the eight native handlers to the element, calls
//! `on_timer` when a scheduled token comes due, and calls `dispose` (or drops
//! the recognizer) when the element goes away.

use crate::haptics::Haptics;
use crate::input::{PressInput, RawPointerEvent};
use crate::machine::{Effect, GestureEvent, Phase, Session, TimerToken};
use crate::timer::{ManualTimers, TimerDriver};
use std::fmt;
use xray_core::{Point, RecognizerConfig};

/// Outcome callback. Receives the position at which the outcome was decided.
pub type PressCallback = Box<dyn FnMut(Point)>;

/// Optional outcome callbacks. Any subset may be left out.
#[derive(Default)]
pub struct PressCallbacks {
    pub on_long_press_start: Option<PressCallback>,
    pub on_long_press_end: Option<PressCallback>,
    pub on_press: Option<PressCallback>,
}

impl PressCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold confirmed. Receives the press origin.
    pub fn on_long_press_start(mut self, f: impl FnMut(Point) + 'static) -> Self {
        self.on_long_press_start = Some(Box::new(f));
        self
    }

    /// Confirmed hold released, moved away, or cancelled.
    pub fn on_long_press_end(mut self, f: impl FnMut(Point) + 'static) -> Self {
        self.on_long_press_end = Some(Box::new(f));
        self
    }

    /// Short tap released before the hold threshold.
    pub fn on_press(mut self, f: impl FnMut(Point) + 'static) -> Self {
        self.on_press = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for PressCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PressCallbacks")
            .field("on_long_press_start", &self.on_long_press_start.is_some())
            .field("on_long_press_end", &self.on_long_press_end.is_some())
            .field("on_press", &self.on_press.is_some())
            .finish()
    }
}

fn invoke(callback: &mut Option<PressCallback>, at: Point) {
    if let Some(f) = callback.as_mut() {
        f(at);
    }
}

/// Press recognizer for one UI element.
///
/// Every input method returns `true` when the `pressed` signal changed, so
/// the host knows when to switch between the default and revealed content.
pub struct LongPress<T: TimerDriver, H: Haptics> {
    config: RecognizerConfig,
    callbacks: PressCallbacks,
    timers: T,
    haptics: H,
    session: Session,
    pressed: bool,
    disposed: bool,
}

impl<T: TimerDriver, H: Haptics> LongPress<T, H> {
    /// Out-of-range config values fall back to their defaults.
    pub fn new(config: RecognizerConfig, callbacks: PressCallbacks, timers: T, haptics: H) -> Self {
        Self {
            config: config.sanitized(),
            callbacks,
            timers,
            haptics,
            session: Session::new(),
            pressed: false,
            disposed: false,
        }
    }

    /// True only while a long press is confirmed.
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Feed one native event.
    pub fn handle(&mut self, input: PressInput, event: &RawPointerEvent) -> bool {
        if self.disposed {
            log::trace!("disposed recognizer ignores {}", input.dom_name());
            return false;
        }
        match input.normalize(event) {
            Some(gesture) => self.dispatch(gesture),
            None => false,
        }
    }

    // ─── Native handlers ────────────────────────────────────────────────

    pub fn on_touch_start(&mut self, event: &RawPointerEvent) -> bool {
        self.handle(PressInput::TouchStart, event)
    }

    pub fn on_touch_move(&mut self, event: &RawPointerEvent) -> bool {
        self.handle(PressInput::TouchMove, event)
    }

    pub fn on_touch_end(&mut self, event: &RawPointerEvent) -> bool {
        self.handle(PressInput::TouchEnd, event)
    }

    pub fn on_touch_cancel(&mut self) -> bool {
        self.handle(PressInput::TouchCancel, &RawPointerEvent::default())
    }

    pub fn on_mouse_down(&mut self, event: &RawPointerEvent) -> bool {
        self.handle(PressInput::MouseDown, event)
    }

    pub fn on_mouse_move(&mut self, event: &RawPointerEvent) -> bool {
        self.handle(PressInput::MouseMove, event)
    }

    pub fn on_mouse_up(&mut self, event: &RawPointerEvent) -> bool {
        self.handle(PressInput::MouseUp, event)
    }

    pub fn on_mouse_leave(&mut self) -> bool {
        self.handle(PressInput::MouseLeave, &RawPointerEvent::default())
    }

    // ─── Timer & lifecycle ──────────────────────────────────────────────

    /// Deliver a timer that came due. Stale or cancelled tokens are ignored.
    pub fn on_timer(&mut self, token: TimerToken) -> bool {
        if self.disposed {
            log::trace!("disposed recognizer ignores {token}");
            return false;
        }
        self.dispatch(GestureEvent::TimerFired(token))
    }

    /// Tear down: cancel any outstanding timer and go idle without invoking
    /// callbacks. Every later event or timer delivery is ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.dispatch(GestureEvent::Dispose);
        self.disposed = true;
        log::debug!("recognizer disposed");
    }

    fn dispatch(&mut self, event: GestureEvent) -> bool {
        let was_pressed = self.pressed;
        let (next, effects) = self.session.step(event, &self.config);
        self.session = next;
        for effect in effects {
            self.perform(effect);
        }
        debug_assert_eq!(self.pressed, self.session.pressed());
        was_pressed != self.pressed
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::StartTimer { token, delay_ms } => self.timers.schedule(token, delay_ms),
            Effect::CancelTimer(token) => self.timers.cancel(token),
            Effect::Pressed(pressed) => self.pressed = pressed,
            Effect::Haptic { duration_ms } => {
                if !self.haptics.pulse(duration_ms) {
                    log::debug!("haptic feedback unavailable");
                }
            }
            Effect::LongPressStart(at) => invoke(&mut self.callbacks.on_long_press_start, at),
            Effect::LongPressEnd(at) => invoke(&mut self.callbacks.on_long_press_end, at),
            Effect::Press(at) => invoke(&mut self.callbacks.on_press, at),
        }
    }
}

impl<H: Haptics> LongPress<ManualTimers, H> {
    /// Advance the virtual clock and deliver whatever came due.
    pub fn advance(&mut self, ms: u64) -> bool {
        let was_pressed = self.pressed;
        for token in self.timers.advance(ms) {
            self.on_timer(token);
        }
        was_pressed != self.pressed
    }
}

impl<T: TimerDriver, H: Haptics> Drop for LongPress<T, H> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<T: TimerDriver, H: Haptics> fmt::Debug for LongPress<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LongPress")
            .field("config", &self.config)
            .field("callbacks", &self.callbacks)
            .field("session", &self.session)
            .field("pressed", &self.pressed)
            .field("disposed", &self.disposed)
            .finish()
    }
}
