use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, MouseEvent, TouchList};

use soundboard::gesture::Point;

/// Elements handling touches themselves: a swipe never starts on them.
const CONTROLS: &str = ".sound-button, .page-dot, .slider-track";

/// Readable description of a javascript exception.
pub fn js_reason(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        format!("{}: {}", String::from(error.name()), String::from(error.message()))
    } else {
        value.as_string().unwrap_or_else(|| format!("{:?}", value))
    }
}

/// Returns `true` if the event started on a button or a navigation control.
pub fn on_control(event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest(CONTROLS).ok().flatten())
        .is_some()
}

pub fn first_touch(touches: &TouchList) -> Option<Point> {
    touches
        .get(0)
        .map(|touch| Point::new(f64::from(touch.client_x()), f64::from(touch.client_y())))
}

/// Horizontal position of a click relative to the width of the element
/// listening to it.
pub fn click_fraction(event: &MouseEvent) -> f64 {
    let width = event
        .current_target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .map_or(0, |element| element.client_width());
    if width <= 0 {
        return 0.0;
    }
    f64::from(event.offset_x()) / f64::from(width)
}
