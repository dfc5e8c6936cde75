#![cfg(target_arch = "wasm32")]
use instant::Instant;
use reog_core::Showcase;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod ui;

/// Session state shared by every event handler and the frame loop.
pub type SharedShowcase = Rc<RefCell<Showcase<audio::WebAudioCues>>>;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, showcase: &SharedShowcase) {
    let canvas_resize = canvas.clone();
    let showcase = showcase.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        let (w, h) = dom::sync_canvas_backing_size(&canvas_resize);
        showcase.borrow_mut().resize(w, h);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("reog showcase starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // Avoid grabbing a 2D context here so WebGPU can acquire the canvas.
    let (css_w, css_h) = dom::sync_canvas_backing_size(&canvas);

    let config = assets::load_config(constants::CONFIG_PATH).await;
    let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let cues = audio::WebAudioCues::new(audio_ctx, &config.audio)?;
    let showcase: SharedShowcase = Rc::new(RefCell::new(Showcase::new(
        config,
        cues,
        glam::Vec2::new(css_w, css_h),
    )));
    wire_canvas_resize(&canvas, &showcase);

    ui::build_title(&document);
    ui::build_control_panel(&document, &showcase);

    let session_start = Instant::now();
    events::wire_global_keys(showcase.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        showcase: showcase.clone(),
        drag: Rc::new(RefCell::new(reog_core::PointerDrag::default())),
        session_start,
    });

    assets::spawn_model_load(showcase.clone());
    assets::spawn_cue_loads(showcase.clone());

    // The scene keeps animating (without a picture) when WebGPU is missing.
    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        showcase,
        canvas,
        gpu,
        session_start,
    )));
    frame::start_loop(frame_ctx);
    Ok(())
}
