use crate::dom;
use crate::overlay;
use crate::SharedShowcase;
use reog_core::CameraMode;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, showcase: &SharedShowcase) {
    if ev.key() == "Escape" {
        if let Some(doc) = dom::window_document() {
            if overlay::is_shown(&doc) {
                overlay::hide(&doc);
                return;
            }
        }
    }
    let mut s = showcase.borrow_mut();
    // Arrow keys would scroll the page while walking around.
    if s.on_key(&ev.code(), true) && s.mode() == CameraMode::FirstPerson {
        ev.prevent_default();
    }
}

pub fn wire_global_keys(showcase: SharedShowcase) {
    let Some(window) = web::window() else {
        return;
    };

    let down = showcase.clone();
    let keydown = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &down);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
    keydown.forget();

    let up = showcase.clone();
    let keyup = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        up.borrow_mut().on_key(&ev.code(), false);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref());
    keyup.forget();

    // Key-up events are lost while the tab is in the background.
    let blur = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        showcase.borrow_mut().release_keys();
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref());
    blur.forget();
}
