//! Browser platform services: `setTimeout` timers and `navigator.vibrate`.

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use xray_gesture::{Haptics, TimerDriver, TimerToken};

// ─── Timers ──────────────────────────────────────────────────────────────

/// `TimerDriver` on top of `window.setTimeout`.
///
/// A session has at most one outstanding timer, so a single JS closure is
/// created up front and re-armed for each press. `armed` holds the token the
/// next firing belongs to; cancelling clears both the browser timeout and the
/// slot, so a firing that races a cancel finds nothing to deliver.
pub struct BrowserTimers {
    armed: Rc<Cell<Option<TimerToken>>>,
    timeout: Option<i32>,
    callback: Closure<dyn FnMut()>,
}

impl BrowserTimers {
    /// `on_fire` receives each token that comes due.
    pub fn new(mut on_fire: impl FnMut(TimerToken) + 'static) -> Self {
        let armed = Rc::new(Cell::new(None));
        let slot = Rc::clone(&armed);
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Some(token) = slot.take() {
                on_fire(token);
            }
        });
        Self {
            armed,
            timeout: None,
            callback,
        }
    }

    fn clear(&mut self) {
        if let Some(handle) = self.timeout.take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(handle);
            }
        }
        self.armed.set(None);
    }
}

impl TimerDriver for BrowserTimers {
    fn schedule(&mut self, token: TimerToken, delay_ms: u32) {
        self.clear();
        let Some(window) = web_sys::window() else {
            log::warn!("no window; {token} not scheduled");
            return;
        };
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.callback.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(handle) => {
                self.timeout = Some(handle);
                self.armed.set(Some(token));
            }
            Err(err) => log::warn!("setTimeout failed for {token}: {err:?}"),
        }
    }

    fn cancel(&mut self, token: TimerToken) {
        if self.armed.get() == Some(token) {
            self.clear();
        }
    }
}

impl Drop for BrowserTimers {
    fn drop(&mut self) {
        self.clear();
    }
}

// ─── Haptics ─────────────────────────────────────────────────────────────

/// `navigator.vibrate`, when the browser has it.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserHaptics;

impl Haptics for BrowserHaptics {
    fn pulse(&mut self, duration_ms: u32) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let navigator = window.navigator();
        // Calling a missing binding would throw; probe first.
        let supported =
            js_sys::Reflect::has(&navigator, &JsValue::from_str("vibrate")).unwrap_or(false);
        supported && navigator.vibrate_with_duration(duration_ms)
    }
}
