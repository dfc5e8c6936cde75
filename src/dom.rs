use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Create an element with an optional id, inline style, and text.
pub fn create_element(
    document: &web::Document,
    tag: &str,
    id: Option<&str>,
    style: &str,
    text: Option<&str>,
) -> Option<web::HtmlElement> {
    let el = document
        .create_element(tag)
        .ok()?
        .dyn_into::<web::HtmlElement>()
        .ok()?;
    if let Some(id) = id {
        el.set_id(id);
    }
    _ = el.set_attribute("style", style);
    if let Some(text) = text {
        el.set_inner_text(text);
    }
    Some(el)
}

pub fn append_to_body(document: &web::Document, el: &web::HtmlElement) {
    if let Some(body) = document.body() {
        _ = body.append_child(el);
    }
}

pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        el.set_inner_text(text);
    }
}

/// Match the canvas backing store to its CSS box and return the CSS size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
    (rect.width() as f32, rect.height() as f32)
}
