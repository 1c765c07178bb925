use crate::constants::BLOCKING_LISTENER_PASSIVE;
use crate::dom;
use meadow_core::{InputEvent, InputQueue};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Re-read the viewport on every window resize and queue it for the scene.
pub fn wire_resize(window: &web::Window, queue: &Rc<RefCell<InputQueue>>) {
    let queue = queue.clone();
    let closure = Closure::wrap(Box::new(move || {
        let Some(w) = web::window() else { return };
        match dom::read_viewport(&w) {
            Ok(viewport) => queue.borrow_mut().push(InputEvent::Resize(viewport)),
            // minimized windows report a zero size; keep the last good one
            Err(e) => log::debug!("[resize] skipped: {}", e),
        }
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Swallow wheel events so the page never scrolls under the scene.
pub fn wire_wheel_block(window: &web::Window) {
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(BLOCKING_LISTENER_PASSIVE);
    _ = window.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}
