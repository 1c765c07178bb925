//! Perspective camera, render layers and floor raycasting.

use crate::constants::{CAMERA_EYE, CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Bitmask of render layers; a node is drawn when its mask intersects the
/// camera's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layers(u32);

impl Layers {
    pub const OPAQUE: u8 = 0;
    pub const PARTICLES: u8 = 1;

    /// Mask with only `channel` enabled.
    #[inline]
    pub fn only(channel: u8) -> Self {
        Self(1 << channel)
    }

    /// Replace the mask with only `channel`.
    #[inline]
    pub fn set(&mut self, channel: u8) {
        self.0 = 1 << channel;
    }

    #[inline]
    pub fn test(&self, other: Layers) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn is_enabled(&self, channel: u8) -> bool {
        self.0 & (1 << channel) != 0
    }
}

impl Default for Layers {
    fn default() -> Self {
        Self::only(Self::OPAQUE)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Right-handed perspective camera looking at a fixed target.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fovy_radians: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
    pub layers: Layers,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::from(CAMERA_EYE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            aspect,
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
            layers: Layers::default(),
        }
    }

    #[inline]
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Clip-space projection with a 0..1 depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    #[inline]
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray from the eye through a point in normalized device
    /// coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray {
            origin: self.eye,
            direction: (p1 - self.eye).normalize(),
        }
    }

    pub fn uniforms(&self) -> CameraUniforms {
        let proj = self.projection_matrix();
        CameraUniforms {
            view_proj: self.view_proj().to_cols_array_2d(),
            eye: self.eye.extend(1.0).to_array(),
            projection_scale: [proj.x_axis.x, proj.y_axis.y, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    /// Clip-space scale of one view-space unit at unit depth (x, y); used to
    /// size particle billboards.
    pub projection_scale: [f32; 4],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorHit {
    pub point: Vec3,
    pub uv: Vec2,
    pub distance: f32,
}

/// Horizontal square plane, visible from above only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorPlane {
    pub center: Vec3,
    pub size: f32,
}

impl FloorPlane {
    /// Surface UV of a point on the plane (0..1 across its extent).
    #[inline]
    pub fn uv_at(&self, point: Vec3) -> Vec2 {
        Vec2::new(
            (point.x - self.center.x) / self.size + 0.5,
            0.5 - (point.z - self.center.z) / self.size,
        )
    }

    /// First intersection of `ray` with the upward-facing side of the plane.
    pub fn intersect(&self, ray: &Ray) -> Option<FloorHit> {
        let denom = ray.direction.y;
        // parallel or hitting the back face
        if denom > -1e-6 {
            return None;
        }
        let t = (self.center.y - ray.origin.y) / denom;
        if t < 0.0 {
            return None;
        }
        let point = ray.at(t);
        let half = self.size * 0.5;
        if (point.x - self.center.x).abs() > half || (point.z - self.center.z).abs() > half {
            return None;
        }
        Some(FloorHit {
            point,
            uv: self.uv_at(point),
            distance: t,
        })
    }
}
