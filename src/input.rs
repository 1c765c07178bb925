use meadow_core::PointerSample;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Client-space position of a mouse or touch event. Touch events report the
/// first changed touch.
pub fn pointer_sample(ev: &web::Event) -> Option<PointerSample> {
    let touch = ev
        .dyn_ref::<web::TouchEvent>()
        .and_then(|t| t.changed_touches().get(0))
        .map(|t| (t.client_x() as f32, t.client_y() as f32));
    let mouse = ev
        .dyn_ref::<web::MouseEvent>()
        .map(|m| (m.client_x() as f32, m.client_y() as f32));
    if touch.is_none() && mouse.is_none() {
        return None;
    }
    Some(PointerSample::from_client(touch, mouse.unwrap_or_default()))
}
