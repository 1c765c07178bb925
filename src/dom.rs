use crate::constants::{MIN_SURFACE_EXTENT, MOBILE_MEDIA_QUERY};
use meadow_core::Viewport;
use web_sys as web;

fn window_extent(value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>) -> Option<u32> {
    value.ok().and_then(|v| v.as_f64()).map(|v| v.max(0.0) as u32)
}

/// Snapshot the window size, device pixel ratio and mobile breakpoint.
pub fn read_viewport(window: &web::Window) -> anyhow::Result<Viewport> {
    let width = window_extent(window.inner_width())
        .ok_or_else(|| anyhow::anyhow!("window.innerWidth unavailable"))?;
    let height = window_extent(window.inner_height())
        .ok_or_else(|| anyhow::anyhow!("window.innerHeight unavailable"))?;
    let is_mobile = window
        .match_media(MOBILE_MEDIA_QUERY)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or_else(|| Viewport::is_mobile_width(width));
    let viewport = Viewport::new(width, height, window.device_pixel_ratio() as f32, is_mobile)?;
    Ok(viewport)
}

/// CSS size follows the viewport; the backing store is scaled by the pixel
/// ratio.
pub fn apply_canvas_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width));
    _ = style.set_property("height", &format!("{}px", viewport.height));
    let (w_px, h_px) = viewport.drawing_buffer_size();
    canvas.set_width(w_px.max(MIN_SURFACE_EXTENT));
    canvas.set_height(h_px.max(MIN_SURFACE_EXTENT));
}
