use crate::dom;
use crate::render;
use instant::Instant;
use meadow_core::{InputEvent, InputQueue, Scene};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Scene,
    pub queue: Rc<RefCell<InputQueue>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: render::GpuState,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        // hold the queue borrow only while draining
        let events: SmallVec<[InputEvent; 8]> = self.queue.borrow_mut().drain().collect();
        for ev in events {
            if let InputEvent::Resize(viewport) = ev {
                dom::apply_canvas_size(&self.canvas, &viewport);
            }
            self.scene.handle(ev);
        }

        self.scene.tick(dt_sec);

        let (w, h) = self.scene.viewport.drawing_buffer_size();
        self.gpu.resize_if_needed(w, h);
        let plan = self.scene.render_plan();
        match self.gpu.render(&self.scene, &plan) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("[gpu] surface lost, reconfiguring");
                self.gpu.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
