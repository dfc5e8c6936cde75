use crate::constants::MAX_FRAME_DELTA_SEC;
use crate::render;
use crate::SharedShowcase;
use instant::Instant;
use reog_core::FrameTime;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct FrameContext {
    pub showcase: SharedShowcase,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,
    pub session_start: Instant,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(
        showcase: SharedShowcase,
        canvas: web::HtmlCanvasElement,
        gpu: Option<render::GpuState>,
        session_start: Instant,
    ) -> Self {
        Self {
            showcase,
            canvas,
            gpu,
            session_start,
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let delta = (now - self.last_instant).min(Duration::from_secs_f32(MAX_FRAME_DELTA_SEC));
        self.last_instant = now;

        let animation = self.showcase.borrow_mut().advance(FrameTime {
            delta,
            elapsed: now - self.session_start,
        });

        let Some(g) = &mut self.gpu else {
            return;
        };
        g.resize_if_needed(self.canvas.width(), self.canvas.height());
        let showcase = self.showcase.borrow();
        g.sync_model(showcase.model());
        match g.render(showcase.camera(), showcase.model(), &animation) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                g.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState> {
    match render::GpuState::new(canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Tick = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Tick) {
    if let (Some(w), Some(callback)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}
