use crate::constants::CLICK_DRAG_THRESHOLD_PX;
use crate::dom;
use crate::input;
use crate::overlay;
use crate::SharedShowcase;
use instant::Instant;
use reog_core::{CameraMode, PointerDrag};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub showcase: SharedShowcase,
    pub drag: Rc<RefCell<PointerDrag>>,
    /// Origin of the session clock used by the hover cue rate limit.
    pub session_start: Instant,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_click(&w);
    wire_wheel(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_css(&ev, &w.canvas);
        let drag_delta = w.drag.borrow_mut().motion(pos);

        let mut showcase = w.showcase.borrow_mut();
        if let Some(delta) = drag_delta {
            if showcase.mode() == CameraMode::Orbit {
                showcase.orbit_drag(delta.x, delta.y);
            }
        }
        if let Some(ndc) = input::pointer_ndc(&ev, &w.canvas) {
            showcase.on_pointer_move(ndc, w.session_start.elapsed());
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        w.drag
            .borrow_mut()
            .press(input::pointer_canvas_css(&ev, &w.canvas));
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        // First gesture on the page: let the audio context start.
        w.showcase.borrow().audio().resume();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let drag = w.drag.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        drag.borrow_mut().release();
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        for event in ["pointerup", "pointercancel"] {
            _ = wnd.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }

    closure.forget();
}

/// Selection. Clicks on the surrounding UI never reach the canvas; a press
/// that turned into an orbit drag is not a selection either.
fn wire_click(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if !w.drag.borrow().was_click(CLICK_DRAG_THRESHOLD_PX) {
            log::debug!("[click] ignored, pointer was dragged");
            return;
        }
        let Some(ndc) = input::pointer_ndc(&ev, &w.canvas) else {
            return;
        };
        let info = w.showcase.borrow_mut().on_click(ndc);
        if let (Some(info), Some(document)) = (info, dom::window_document()) {
            overlay::show_info(&document, &info);
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let showcase = w.showcase.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        if showcase.borrow_mut().orbit_wheel(ev.delta_y() as f32) {
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
