//! WASM bridge for X-Ray press — exposes the long-press recognizer to
//! browser ingredient cards.
//!
//! Compiled via `wasm-pack build --target web`. The page creates one
//! `PressRecognizer` per card, wires the eight native listeners to it, and
//! calls `dispose()` when the card is removed.

mod browser;
mod dispatch;
mod event;

use browser::{BrowserHaptics, BrowserTimers};
use dispatch::{Notice, NoticeSink, Outbox};
use js_sys::Function;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use xray_core::{Ingredient, RecognizerConfig};
use xray_gesture::{LongPress, PressInput};

type Recognizer = LongPress<BrowserTimers, BrowserHaptics>;

/// The JS functions handed to the constructor.
struct JsCallbacks {
    on_long_press_start: Option<Function>,
    on_long_press_end: Option<Function>,
    on_press: Option<Function>,
    on_change: Option<Function>,
}

impl NoticeSink for JsCallbacks {
    fn deliver(&self, notice: Notice) {
        let result = match notice {
            Notice::LongPressStart(at) => self
                .on_long_press_start
                .as_ref()
                .map(|f| f.call2(&JsValue::NULL, &at.x.into(), &at.y.into())),
            Notice::LongPressEnd(at) => self
                .on_long_press_end
                .as_ref()
                .map(|f| f.call2(&JsValue::NULL, &at.x.into(), &at.y.into())),
            Notice::Press(at) => self
                .on_press
                .as_ref()
                .map(|f| f.call2(&JsValue::NULL, &at.x.into(), &at.y.into())),
            Notice::Changed(pressed) => self
                .on_change
                .as_ref()
                .map(|f| f.call1(&JsValue::NULL, &pressed.into())),
        };
        if let Some(result) = result {
            report(result);
        }
    }
}

/// Log a JS callback exception; it must not abort the gesture.
fn report(result: Result<JsValue, JsValue>) {
    if let Err(err) = result {
        log::error!("press callback threw: {err:?}");
        web_sys::console::error_1(&err);
    }
}

/// Long-press recognizer bound to one DOM element.
#[wasm_bindgen]
pub struct PressRecognizer {
    inner: Rc<RefCell<Recognizer>>,
    outbox: Rc<Outbox<JsCallbacks>>,
}

#[wasm_bindgen]
impl PressRecognizer {
    /// Create a recognizer from a JSON config (`"{}"` for defaults).
    ///
    /// Outcome callbacks receive `(x, y)`; `on_change` receives the new
    /// `pressed` value.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: &str,
        on_long_press_start: Option<Function>,
        on_long_press_end: Option<Function>,
        on_press: Option<Function>,
        on_change: Option<Function>,
    ) -> Result<PressRecognizer, JsValue> {
        // Set up panic hook for better error messages in console
        console_error_panic_hook_setup();

        let config = RecognizerConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e))?;
        let outbox = Rc::new(Outbox::new(JsCallbacks {
            on_long_press_start,
            on_long_press_end,
            on_press,
            on_change,
        }));
        let callbacks = outbox.press_callbacks();

        let inner = Rc::new_cyclic(|weak: &Weak<RefCell<Recognizer>>| {
            let weak = weak.clone();
            let outbox = Rc::clone(&outbox);
            let timers = BrowserTimers::new(move |token| {
                if let Some(shared) = weak.upgrade() {
                    outbox.timer(&shared, token);
                }
            });
            RefCell::new(LongPress::new(config, callbacks, timers, BrowserHaptics))
        });

        Ok(Self { inner, outbox })
    }

    /// True while the card should show its revealed face.
    #[wasm_bindgen(getter)]
    pub fn pressed(&self) -> bool {
        self.inner.try_borrow().map(|r| r.pressed()).unwrap_or(false)
    }

    /// Handle `touchstart`. Returns true if `pressed` changed.
    pub fn touch_start(&self, event: &JsValue) -> bool {
        self.handle(PressInput::TouchStart, event)
    }

    pub fn touch_move(&self, event: &JsValue) -> bool {
        self.handle(PressInput::TouchMove, event)
    }

    pub fn touch_end(&self, event: &JsValue) -> bool {
        self.handle(PressInput::TouchEnd, event)
    }

    pub fn touch_cancel(&self, event: &JsValue) -> bool {
        self.handle(PressInput::TouchCancel, event)
    }

    /// Handle `mousedown`. Only the primary button starts a press.
    pub fn mouse_down(&self, event: &JsValue) -> bool {
        self.handle(PressInput::MouseDown, event)
    }

    pub fn mouse_move(&self, event: &JsValue) -> bool {
        self.handle(PressInput::MouseMove, event)
    }

    pub fn mouse_up(&self, event: &JsValue) -> bool {
        self.handle(PressInput::MouseUp, event)
    }

    pub fn mouse_leave(&self, event: &JsValue) -> bool {
        self.handle(PressInput::MouseLeave, event)
    }

    /// Handle an event by its DOM name (`"touchstart"`, `"mouseup"`, ...).
    /// Unknown names are ignored.
    pub fn handle_event(&self, name: &str, event: &JsValue) -> bool {
        match PressInput::from_dom_name(name) {
            Some(input) => self.handle(input, event),
            None => false,
        }
    }

    /// DOM event names the host should listen to, as a JSON array.
    pub fn event_names() -> String {
        let names: Vec<&str> = PressInput::ALL.iter().map(|i| i.dom_name()).collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }

    /// Cancel any pending timer and stop reacting. No callback fires after
    /// this, including `on_change`.
    pub fn dispose(&self) {
        self.outbox.dispose(&self.inner);
    }
}

// ─── Private helpers ─────────────────────────────────────────────────────

impl PressRecognizer {
    fn handle(&self, input: PressInput, event: &JsValue) -> bool {
        let raw = event::read_pointer_event(event);
        self.outbox.input(&self.inner, input, &raw)
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("X-Ray WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone functions (no recognizer needed) ─────────────────────────

fn error_json(e: &str) -> String {
    serde_json::json!({ "ok": false, "error": e }).to_string()
}

/// Validate a recognizer config. Returns JSON: `{"ok":true,"config":{...}}`
/// or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_config(json: &str) -> String {
    match RecognizerConfig::from_json(json) {
        Ok(config) => serde_json::json!({ "ok": true, "config": config }).to_string(),
        Err(e) => error_json(&e),
    }
}

/// Describe what an ingredient card shows for a given `pressed` value.
/// Returns JSON `{"ok":true,"ariaLabel":"...","ariaPressed":bool,"face":{...}}`
/// or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn card_face(ingredient_json: &str, pressed: bool) -> String {
    let ingredient = match Ingredient::from_json(ingredient_json) {
        Ok(ingredient) => ingredient,
        Err(e) => return error_json(&e),
    };
    let obj = serde_json::json!({
        "ok": true,
        "ariaLabel": ingredient.aria_label(),
        "ariaPressed": pressed,
        "face": ingredient.face(pressed),
    });
    obj.to_string()
}
