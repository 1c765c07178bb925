#![cfg(target_arch = "wasm32")]
use instant::Instant;
use meadow_core::{InputQueue, Scene, SceneConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("meadow-web starting");

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

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let viewport = dom::read_viewport(&window)?;
    dom::apply_canvas_size(&canvas, &viewport);

    let scene = Scene::build(SceneConfig::default(), viewport, &mut rand::thread_rng())?;
    let gpu = render::GpuState::new(&canvas, &scene).await?;

    let queue = Rc::new(RefCell::new(InputQueue::new()));
    events::wire_resize(&window, &queue);
    events::wire_wheel_block(&window);
    events::wire_pointer_handlers(&document, &queue);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        queue,
        canvas,
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
