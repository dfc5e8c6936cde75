//! The info panel shown after a click on the model. One panel at most; a new
//! click replaces its content, the close button removes it.

use crate::constants::INFO_PANEL_ID;
use crate::dom;
use reog_core::InfoRequest;
use wasm_bindgen::JsCast;
use web_sys as web;

const PANEL_STYLE: &str = "position:absolute; bottom:20px; left:250px; padding:15px; \
    background:rgba(0,0,0,0.85); color:white; font-family:sans-serif; border-radius:8px; \
    max-width:320px; line-height:1.4; z-index:999;";
const TITLE_STYLE: &str = "font-size:16px; font-weight:bold; margin-bottom:6px;";
const BODY_STYLE: &str = "font-size:13px; margin-bottom:8px;";
const CLOSE_STYLE: &str = "margin-top:5px; padding:6px 12px; border:none; border-radius:4px; \
    background:#aa0000; color:white; cursor:pointer;";

pub fn show_info(document: &web::Document, info: &InfoRequest) {
    let panel = match document
        .get_element_by_id(INFO_PANEL_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        Some(existing) => existing,
        None => match dom::create_element(document, "div", Some(INFO_PANEL_ID), PANEL_STYLE, None) {
            Some(el) => {
                dom::append_to_body(document, &el);
                el
            }
            None => {
                log::error!("[click] could not create the info panel");
                return;
            }
        },
    };
    panel.set_inner_html("");

    let parts = [
        dom::create_element(document, "div", None, TITLE_STYLE, Some(&info.title)),
        dom::create_element(document, "div", None, BODY_STYLE, Some(&info.body)),
    ];
    for el in parts.iter().flatten() {
        _ = panel.append_child(el);
    }
    if let Some(close) = dom::create_element(document, "button", None, CLOSE_STYLE, Some("Tutup")) {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            if let Some(doc) = dom::window_document() {
                hide(&doc);
            }
        }) as Box<dyn FnMut()>);
        _ = close.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
        _ = panel.append_child(&close);
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(INFO_PANEL_ID) {
        el.remove();
    }
}

#[inline]
pub fn is_shown(document: &web::Document) -> bool {
    document.get_element_by_id(INFO_PANEL_ID).is_some()
}
