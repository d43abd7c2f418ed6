//! Reads DOM `TouchEvent` / `MouseEvent` objects (or plain objects of the
//! same shape) into `RawPointerEvent`.
//!
//! Uses `Reflect::get` rather than typed bindings so prototype getters on
//! real events and own properties on synthetic test objects both work.

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use xray_gesture::{RawPointerEvent, TouchPoint};

fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    if !target.is_object() {
        return None;
    }
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn number(target: &JsValue, key: &str) -> Option<f32> {
    get(target, key)?.as_f64().map(|v| v as f32)
}

/// First entry of a `TouchList` (or array), if any.
fn first_touch(event: &JsValue, key: &str) -> Option<TouchPoint> {
    let list = get(event, key)?;
    let len = number(&list, "length")?;
    if len < 1.0 {
        return None;
    }
    let touch = Reflect::get(&list, &JsValue::from(0)).ok()?;
    Some(TouchPoint {
        client_x: number(&touch, "clientX"),
        client_y: number(&touch, "clientY"),
    })
}

pub fn read_pointer_event(event: &JsValue) -> RawPointerEvent {
    let mut raw = RawPointerEvent {
        client_x: number(event, "clientX"),
        client_y: number(event, "clientY"),
        button: number(event, "button").map(|b| b as i16),
        ..RawPointerEvent::default()
    };
    if let Some(touch) = first_touch(event, "touches") {
        raw.touches.push(touch);
    }
    if let Some(touch) = first_touch(event, "changedTouches") {
        raw.changed_touches.push(touch);
    }
    raw
}
