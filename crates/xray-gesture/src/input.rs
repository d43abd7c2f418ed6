//! Input abstraction layer.
//!
//! Normalizes touch and mouse events into a single `Point` and routes the
//! eight native handlers onto modality-agnostic `GestureEvent`s.

use crate::machine::GestureEvent;
use serde::Deserialize;
use smallvec::SmallVec;
use xray_core::Point;

/// Mouse button that may start a press (`MouseEvent.button == 0`).
pub const PRIMARY_BUTTON: i16 = 0;

/// One entry of a touch list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchPoint {
    pub client_x: Option<f32>,
    pub client_y: Option<f32>,
}

/// The subset of a DOM `TouchEvent` / `MouseEvent` the recognizer reads.
///
/// Every field is optional: a host may hand over a bare `{}` and the
/// recognizer still behaves deterministically.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPointerEvent {
    /// Contacts currently on the surface (touchstart / touchmove).
    pub touches: SmallVec<[TouchPoint; 2]>,
    /// Contacts that changed in this event (touchend).
    pub changed_touches: SmallVec<[TouchPoint; 2]>,
    pub client_x: Option<f32>,
    pub client_y: Option<f32>,
    pub button: Option<i16>,
}

impl RawPointerEvent {
    /// A mouse event at `(x, y)` with the given button.
    pub fn mouse(x: f32, y: f32, button: i16) -> Self {
        Self {
            client_x: Some(x),
            client_y: Some(y),
            button: Some(button),
            ..Self::default()
        }
    }

    /// A mouse event without button information (move / up).
    pub fn pointer(x: f32, y: f32) -> Self {
        Self {
            client_x: Some(x),
            client_y: Some(y),
            ..Self::default()
        }
    }

    /// A touchstart / touchmove event with one active contact.
    pub fn touch(x: f32, y: f32) -> Self {
        Self {
            touches: smallvec::smallvec![TouchPoint {
                client_x: Some(x),
                client_y: Some(y),
            }],
            ..Self::default()
        }
    }

    /// A touchend event whose lifted contact is at `(x, y)`.
    pub fn touch_end(x: f32, y: f32) -> Self {
        Self {
            changed_touches: smallvec::smallvec![TouchPoint {
                client_x: Some(x),
                client_y: Some(y),
            }],
            ..Self::default()
        }
    }

    pub fn is_primary_button(&self) -> bool {
        self.button == Some(PRIMARY_BUTTON)
    }
}

/// Missing or NaN coordinates count as 0.
fn coord(value: Option<f32>) -> f32 {
    value.filter(|v| !v.is_nan()).unwrap_or(0.0)
}

fn touch_position(touch: &TouchPoint) -> Point {
    Point::new(coord(touch.client_x), coord(touch.client_y))
}

/// Canonical position of any supported input event.
///
/// Active touches win over changed touches, which win over direct pointer
/// coordinates. Only the first contact is considered. Never fails: an event
/// with no coordinate data yields `Point::ORIGIN`.
pub fn event_position(event: &RawPointerEvent) -> Point {
    if let Some(touch) = event.touches.first() {
        return touch_position(touch);
    }
    if let Some(touch) = event.changed_touches.first() {
        return touch_position(touch);
    }
    Point::new(coord(event.client_x), coord(event.client_y))
}

/// The native handler an event arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PressInput {
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    MouseDown,
    MouseMove,
    MouseUp,
    MouseLeave,
}

impl PressInput {
    pub const ALL: [PressInput; 8] = [
        PressInput::TouchStart,
        PressInput::TouchMove,
        PressInput::TouchEnd,
        PressInput::TouchCancel,
        PressInput::MouseDown,
        PressInput::MouseMove,
        PressInput::MouseUp,
        PressInput::MouseLeave,
    ];

    /// DOM event name, as used when wiring listeners.
    pub fn dom_name(self) -> &'static str {
        match self {
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::TouchCancel => "touchcancel",
            Self::MouseDown => "mousedown",
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
            Self::MouseLeave => "mouseleave",
        }
    }

    pub fn from_dom_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|input| input.dom_name() == name)
    }

    /// Translate a native event into a state machine event.
    ///
    /// Returns `None` for mouse presses on any button other than the primary
    /// one; those are dropped before they can reach the machine.
    pub fn normalize(self, event: &RawPointerEvent) -> Option<GestureEvent> {
        match self {
            Self::TouchStart => Some(GestureEvent::PressStart(event_position(event))),
            Self::MouseDown => {
                if event.is_primary_button() {
                    Some(GestureEvent::PressStart(event_position(event)))
                } else {
                    log::trace!("ignoring mousedown on button {:?}", event.button);
                    None
                }
            }
            Self::TouchMove | Self::MouseMove => Some(GestureEvent::Move(event_position(event))),
            Self::TouchEnd | Self::MouseUp => Some(GestureEvent::PressEnd(event_position(event))),
            Self::TouchCancel | Self::MouseLeave => Some(GestureEvent::Cancel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn position_from_touches() {
        let pos = event_position(&RawPointerEvent::touch(50.0, 75.0));
        assert_eq!(pos, Point::new(50.0, 75.0));
    }

    #[test]
    fn position_from_changed_touches() {
        let pos = event_position(&RawPointerEvent::touch_end(60.0, 80.0));
        assert_eq!(pos, Point::new(60.0, 80.0));
    }

    #[test]
    fn position_from_mouse() {
        let pos = event_position(&RawPointerEvent::pointer(100.0, 200.0));
        assert_eq!(pos, Point::new(100.0, 200.0));
    }

    #[test]
    fn missing_coordinates_fall_back_to_origin() {
        assert_eq!(event_position(&RawPointerEvent::default()), Point::ORIGIN);
    }

    #[test]
    fn first_touch_wins() {
        let mut event = RawPointerEvent::touch(1.0, 2.0);
        event.touches.push(TouchPoint {
            client_x: Some(300.0),
            client_y: Some(400.0),
        });
        event.changed_touches.push(TouchPoint {
            client_x: Some(9.0),
            client_y: Some(9.0),
        });
        assert_eq!(event_position(&event), Point::new(1.0, 2.0));
    }

    #[test]
    fn empty_touch_list_falls_through_to_client_coords() {
        let event = RawPointerEvent {
            client_x: Some(7.0),
            client_y: Some(8.0),
            ..RawPointerEvent::default()
        };
        assert_eq!(event_position(&event), Point::new(7.0, 8.0));
    }

    #[test]
    fn nan_coordinate_is_zeroed() {
        let event = RawPointerEvent {
            client_x: Some(f32::NAN),
            client_y: Some(12.0),
            ..RawPointerEvent::default()
        };
        assert_eq!(event_position(&event), Point::new(0.0, 12.0));
    }

    #[test]
    fn secondary_button_is_filtered() {
        let right = RawPointerEvent::mouse(10.0, 10.0, 2);
        assert_eq!(PressInput::MouseDown.normalize(&right), None);
        let left = RawPointerEvent::mouse(10.0, 10.0, 0);
        assert_eq!(
            PressInput::MouseDown.normalize(&left),
            Some(GestureEvent::PressStart(Point::new(10.0, 10.0)))
        );
    }

    #[test]
    fn mousedown_without_button_is_filtered() {
        let event = RawPointerEvent::pointer(10.0, 10.0);
        assert_eq!(PressInput::MouseDown.normalize(&event), None);
    }

    #[test]
    fn cancel_inputs_carry_no_position() {
        let event = RawPointerEvent::default();
        assert_eq!(PressInput::TouchCancel.normalize(&event), Some(GestureEvent::Cancel));
        assert_eq!(PressInput::MouseLeave.normalize(&event), Some(GestureEvent::Cancel));
    }

    #[test]
    fn dom_names_roundtrip() {
        for input in PressInput::ALL {
            assert_eq!(PressInput::from_dom_name(input.dom_name()), Some(input));
        }
        assert_eq!(PressInput::from_dom_name("click"), None);
    }

    #[test]
    fn deserializes_dom_shaped_json() {
        let event: RawPointerEvent =
            serde_json::from_str(r#"{"touches":[{"clientX":100,"clientY":150}]}"#).unwrap();
        assert_eq!(event_position(&event), Point::new(100.0, 150.0));

        let event: RawPointerEvent =
            serde_json::from_str(r#"{"button":2,"clientX":1,"clientY":1}"#).unwrap();
        assert!(!event.is_primary_button());
    }
}
