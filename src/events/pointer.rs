use crate::constants::{
    BLOCKING_LISTENER_PASSIVE, POINTER_DOWN_EVENTS, POINTER_MOVE_EVENTS, POINTER_UP_EVENTS,
};
use crate::input;
use meadow_core::{InputEvent, InputQueue, PointerSample};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Register document-level mouse and touch listeners. Handlers only enqueue;
/// the frame loop applies the events before the next tick.
pub fn wire_pointer_handlers(document: &web::Document, queue: &Rc<RefCell<InputQueue>>) {
    for name in POINTER_MOVE_EVENTS {
        wire(document, name, queue, true, InputEvent::PointerMove);
    }
    for name in POINTER_DOWN_EVENTS {
        wire(document, name, queue, false, InputEvent::PointerDown);
    }
    for name in POINTER_UP_EVENTS {
        wire(document, name, queue, false, InputEvent::PointerUp);
    }
}

fn wire(
    document: &web::Document,
    name: &'static str,
    queue: &Rc<RefCell<InputQueue>>,
    blocking: bool,
    make: fn(PointerSample) -> InputEvent,
) {
    let queue = queue.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if blocking {
            ev.prevent_default();
        }
        match input::pointer_sample(&ev) {
            Some(sample) => queue.borrow_mut().push(make(sample)),
            None => log::debug!("[pointer] {} without position", name),
        }
    }) as Box<dyn FnMut(_)>);

    if blocking {
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(BLOCKING_LISTENER_PASSIVE);
        _ = document.add_event_listener_with_callback_and_add_event_listener_options(
            name,
            closure.as_ref().unchecked_ref(),
            &opts,
        );
    } else {
        _ = document.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
