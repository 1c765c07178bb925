//! Window-derived viewport state.
//!
//! A `Viewport` is a plain value recomputed by the host on every resize and
//! passed explicitly to camera sizing, surface sizing and pointer projection.

use crate::constants::{MAX_PIXEL_RATIO, MOBILE_MAX_WIDTH_PX};
use crate::error::{Result, SceneError};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
    pub is_mobile: bool,
}

impl Viewport {
    /// Build from the window's inner size and device scale.
    ///
    /// `is_mobile` is the result of the `(max-width: 767px)` media query; use
    /// [`Viewport::is_mobile_width`] when no media query is available.
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32, is_mobile: bool) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SceneError::EmptyViewport { width, height });
        }
        Ok(Self {
            width,
            height,
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio),
            is_mobile,
        })
    }

    #[inline]
    pub fn is_mobile_width(width: u32) -> bool {
        width <= MOBILE_MAX_WIDTH_PX
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Backing-store size in physical pixels.
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        let w = (self.width as f32 * self.pixel_ratio).floor() as u32;
        let h = (self.height as f32 * self.pixel_ratio).floor() as u32;
        (w.max(1), h.max(1))
    }

    /// Map a CSS-pixel pointer position to normalized device coordinates.
    #[inline]
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            (x / self.width as f32) * 2.0 - 1.0,
            -(y / self.height as f32) * 2.0 + 1.0,
        )
    }
}

#[inline]
fn clamp_pixel_ratio(device_pixel_ratio: f32) -> f32 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}
