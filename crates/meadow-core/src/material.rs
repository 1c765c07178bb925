//! Shader material uniform state.
//!
//! Each material owns its uniform schema and an `update` step that runs once
//! per rendered frame, before drawing. The uniform blocks mirror the WGSL
//! structs in `shaders/` field for field.

use crate::constants::{
    DEFAULT_FOCUS_UV, PARTICLE_TIME_STEP_PER_FRAME, WIND_STEP_PER_FRAME,
};
use crate::{BALL_WGSL, FLOOR_WGSL, GRASS_WGSL, PARTICLE_WGSL};
use glam::{Vec2, Vec3};
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialKind {
    Grass,
    Floor,
    Particle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
}

impl UniformValue {
    pub fn as_f32(self) -> Option<f32> {
        match self {
            UniformValue::Float(v) => Some(v),
            _ => None,
        }
    }
}

/// WGSL module plus its entry points.
#[derive(Clone, Copy, Debug)]
pub struct ShaderProgram {
    pub source: &'static str,
    pub vertex_entry: &'static str,
    pub fragment_entry: &'static str,
}

/// Values a material may read while updating.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    /// Seconds since the scene clock started.
    pub elapsed: f32,
    /// Current world position of the ball.
    pub focus_world: Vec3,
}

pub type UniformList = SmallVec<[(&'static str, UniformValue); 8]>;

pub trait ShaderMaterial {
    fn kind(&self) -> MaterialKind;
    fn program(&self) -> ShaderProgram;
    /// Advance time-driven uniforms. Touches nothing but `self`.
    fn update(&mut self, frame: &FrameInput);
    fn uniforms(&self) -> UniformList;

    fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }
}

// ---------------- Grass ----------------

#[derive(Clone, Debug)]
pub struct GrassMaterial {
    pub time: f32,
    pub wind_offset: f32,
    pub background: Vec3,
    pub max_distance: f32,
    pub blade_height: f32,
    pub focus_world: Vec3,
    pub wave_amplitude: f32,
    /// World position of the grass mesh origin.
    pub origin: Vec3,
}

impl GrassMaterial {
    pub fn new(background: Vec3, max_distance: f32, blade_height: f32, focus_world: Vec3) -> Self {
        Self {
            time: 0.0,
            wind_offset: 0.0,
            background,
            max_distance,
            blade_height,
            focus_world,
            wave_amplitude: 0.0,
            origin: Vec3::new(0.0, blade_height, 0.0),
        }
    }

    pub fn block(&self) -> GrassUniforms {
        GrassUniforms {
            focus_world: self.focus_world.to_array(),
            time: self.time,
            background: self.background.to_array(),
            wind_offset: self.wind_offset,
            origin: self.origin.to_array(),
            max_distance: self.max_distance,
            blade_height: self.blade_height,
            wave_amplitude: self.wave_amplitude,
            _pad: [0.0; 2],
        }
    }
}

impl ShaderMaterial for GrassMaterial {
    fn kind(&self) -> MaterialKind {
        MaterialKind::Grass
    }

    fn program(&self) -> ShaderProgram {
        ShaderProgram {
            source: GRASS_WGSL,
            vertex_entry: "vs_grass",
            fragment_entry: "fs_grass",
        }
    }

    fn update(&mut self, frame: &FrameInput) {
        self.focus_world = frame.focus_world;
        self.time = frame.elapsed;
        self.wind_offset += WIND_STEP_PER_FRAME;
    }

    fn uniforms(&self) -> UniformList {
        smallvec![
            ("time", UniformValue::Float(self.time)),
            ("windOffset", UniformValue::Float(self.wind_offset)),
            ("background", UniformValue::Vec3(self.background)),
            ("maxDistanceFromFocus", UniformValue::Float(self.max_distance)),
            ("bladeHeight", UniformValue::Float(self.blade_height)),
            ("focusWorldPosition", UniformValue::Vec3(self.focus_world)),
            ("waveAmplitude", UniformValue::Float(self.wave_amplitude)),
        ]
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GrassUniforms {
    pub focus_world: [f32; 3],
    pub time: f32,
    pub background: [f32; 3],
    pub wind_offset: f32,
    pub origin: [f32; 3],
    pub max_distance: f32,
    pub blade_height: f32,
    pub wave_amplitude: f32,
    pub _pad: [f32; 2],
}

// ---------------- Floor ----------------

#[derive(Clone, Debug)]
pub struct FloorMaterial {
    pub background: Vec3,
    /// Focus point in floor UV space; animated by the interaction controller.
    pub focus_uv: Vec2,
}

impl FloorMaterial {
    pub fn new(background: Vec3) -> Self {
        Self {
            background,
            focus_uv: Vec2::from(DEFAULT_FOCUS_UV),
        }
    }

    pub fn block(&self) -> FloorUniforms {
        FloorUniforms {
            background: self.background.to_array(),
            _pad0: 0.0,
            focus_uv: self.focus_uv.to_array(),
            _pad1: [0.0; 2],
        }
    }
}

impl ShaderMaterial for FloorMaterial {
    fn kind(&self) -> MaterialKind {
        MaterialKind::Floor
    }

    fn program(&self) -> ShaderProgram {
        ShaderProgram {
            source: FLOOR_WGSL,
            vertex_entry: "vs_floor",
            fragment_entry: "fs_floor",
        }
    }

    fn update(&mut self, _frame: &FrameInput) {}

    fn uniforms(&self) -> UniformList {
        smallvec![
            ("background", UniformValue::Vec3(self.background)),
            ("focusUV", UniformValue::Vec2(self.focus_uv)),
        ]
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FloorUniforms {
    pub background: [f32; 3],
    pub _pad0: f32,
    pub focus_uv: [f32; 2],
    pub _pad1: [f32; 2],
}

// ---------------- Particles ----------------

#[derive(Clone, Debug)]
pub struct ParticleMaterial {
    pub time: f32,
    pub color: Vec3,
}

impl ParticleMaterial {
    pub fn new(color: Vec3) -> Self {
        Self { time: 0.0, color }
    }

    pub fn block(&self) -> ParticleUniforms {
        ParticleUniforms {
            color: self.color.to_array(),
            time: self.time,
        }
    }
}

impl ShaderMaterial for ParticleMaterial {
    fn kind(&self) -> MaterialKind {
        MaterialKind::Particle
    }

    fn program(&self) -> ShaderProgram {
        ShaderProgram {
            source: PARTICLE_WGSL,
            vertex_entry: "vs_particle",
            fragment_entry: "fs_particle",
        }
    }

    fn update(&mut self, _frame: &FrameInput) {
        self.time += PARTICLE_TIME_STEP_PER_FRAME;
    }

    fn uniforms(&self) -> UniformList {
        smallvec![
            ("time", UniformValue::Float(self.time)),
            ("color", UniformValue::Vec3(self.color)),
        ]
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleUniforms {
    pub color: [f32; 3],
    pub time: f32,
}

// ---------------- Ball ----------------

/// Flat-colored sphere; not a custom shader material, so no `update`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BallUniforms {
    pub position: [f32; 3],
    pub _pad0: f32,
    pub color: [f32; 3],
    pub _pad1: f32,
}

pub fn ball_program() -> ShaderProgram {
    ShaderProgram {
        source: BALL_WGSL,
        vertex_entry: "vs_ball",
        fragment_entry: "fs_ball",
    }
}
