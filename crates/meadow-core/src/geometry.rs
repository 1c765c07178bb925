//! CPU-side mesh and instance buffers.
//!
//! Meshes are generated once at startup; instance batches are filled once and
//! never resized.

use crate::error::{Result, SceneError};
use bytemuck::{Pod, Zeroable};
use std::f32::consts::{PI, TAU};

#[derive(Clone, Debug, Default)]
pub struct MeshData<V> {
    pub vertices: Vec<V>,
    pub indices: Vec<u16>,
}

impl<V> MeshData<V> {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Grass blade vertex: cone position plus the normalized height along the blade.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct BladeVertex {
    pub position: [f32; 3],
    pub progress: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FloorVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Closed-bottom cone with its apex at `+height / 2`, centered on the origin.
///
/// Each vertex carries `progress = (y + height / 2) / height`, so 0 at the base
/// and 1 at the tip.
pub fn blade_cone(radius: f32, height: f32, radial: u32, rows: u32) -> MeshData<BladeVertex> {
    let half = height * 0.5;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut grid: Vec<Vec<u16>> = Vec::with_capacity(rows as usize + 1);

    let vertex = |x: f32, y: f32, z: f32| BladeVertex {
        position: [x, y, z],
        progress: (y + half) / height,
    };

    // Torso: rows run from the apex (radius 0) down to the base.
    for y in 0..=rows {
        let v = y as f32 / rows as f32;
        let r = v * radius;
        let mut row = Vec::with_capacity(radial as usize + 1);
        for x in 0..=radial {
            let theta = x as f32 / radial as f32 * TAU;
            row.push(vertices.len() as u16);
            vertices.push(vertex(r * theta.sin(), -v * height + half, r * theta.cos()));
        }
        grid.push(row);
    }
    for x in 0..radial as usize {
        for y in 0..rows as usize {
            let a = grid[y][x];
            let b = grid[y + 1][x];
            let c = grid[y + 1][x + 1];
            let d = grid[y][x + 1];
            // the apex row is degenerate
            if y != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            indices.extend_from_slice(&[b, c, d]);
        }
    }

    // Bottom cap: one center vertex per segment, then the rim.
    let center_start = vertices.len() as u16;
    for _ in 0..radial {
        vertices.push(vertex(0.0, -half, 0.0));
    }
    let rim_start = vertices.len() as u16;
    for x in 0..=radial {
        let theta = x as f32 / radial as f32 * TAU;
        vertices.push(vertex(radius * theta.sin(), -half, radius * theta.cos()));
    }
    for x in 0..radial as u16 {
        let c = center_start + x;
        let i = rim_start + x;
        indices.extend_from_slice(&[i + 1, i, c]);
    }

    MeshData { vertices, indices }
}

/// UV sphere centered on the origin.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData<[f32; 3]> {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut grid: Vec<Vec<u16>> = Vec::with_capacity(height_segments as usize + 1);

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let mut row = Vec::with_capacity(width_segments as usize + 1);
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            row.push(vertices.len() as u16);
            vertices.push([
                -radius * (u * TAU).cos() * (v * PI).sin(),
                radius * (v * PI).cos(),
                radius * (u * TAU).sin() * (v * PI).sin(),
            ]);
        }
        grid.push(row);
    }
    let hs = height_segments as usize;
    for iy in 0..hs {
        for ix in 0..width_segments as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    MeshData { vertices, indices }
}

/// Square single-segment plane lying flat at height `y`, facing +Y.
///
/// UVs follow the plane's local frame before it was laid down: `u` grows with
/// world X and `v` grows towards world -Z.
pub fn floor_plane(size: f32, y: f32) -> MeshData<FloorVertex> {
    let half = size * 0.5;
    let mut vertices = Vec::with_capacity(4);
    for iy in 0..=1u32 {
        for ix in 0..=1u32 {
            let x = ix as f32 * size - half;
            let local_y = half - iy as f32 * size;
            vertices.push(FloorVertex {
                position: [x, y, -local_y],
                uv: [ix as f32, 1.0 - iy as f32],
            });
        }
    }
    // a=0 b=2 c=3 d=1
    let indices = vec![0, 2, 1, 2, 3, 1];
    MeshData { vertices, indices }
}

/// Per-instance record layout, described as named float attributes.
pub trait InstanceLayout: Pod {
    /// `(name, components)` in memory order.
    const ATTRIBUTES: &'static [(&'static str, usize)];

    fn floats_per_instance() -> usize {
        Self::ATTRIBUTES.iter().map(|(_, n)| n).sum()
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GrassInstance {
    pub translation: [f32; 3],
    pub color: [f32; 3],
    pub influence: f32,
}

impl InstanceLayout for GrassInstance {
    const ATTRIBUTES: &'static [(&'static str, usize)] =
        &[("aTranslation", 3), ("aColor", 3), ("aInfluence", 1)];
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub offset: [f32; 3],
    pub delay: f32,
    pub oscillation: f32,
    pub size: f32,
}

impl InstanceLayout for ParticleInstance {
    const ATTRIBUTES: &'static [(&'static str, usize)] =
        &[("aOffset", 3), ("aDelay", 1), ("aOsc", 1), ("size", 1)];
}

/// Fixed-size set of per-instance records.
#[derive(Clone, Debug)]
pub struct InstancedBatch<T: InstanceLayout> {
    instances: Vec<T>,
}

impl<T: InstanceLayout> InstancedBatch<T> {
    /// Wrap exactly `count` records.
    pub fn new(count: usize, instances: Vec<T>) -> Result<Self> {
        if instances.len() != count {
            return Err(SceneError::AttributeLength {
                name: "instances",
                expected: count * T::floats_per_instance(),
                actual: instances.len() * T::floats_per_instance(),
            });
        }
        Ok(Self { instances })
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn instances(&self) -> &[T] {
        &self.instances
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// De-interleave one named attribute into a flat buffer of
    /// `count × components` floats.
    pub fn attribute(&self, name: &str) -> Option<Vec<f32>> {
        let mut offset = 0usize;
        let mut width = None;
        for (n, c) in T::ATTRIBUTES {
            if *n == name {
                width = Some(*c);
                break;
            }
            offset += c;
        }
        let width = width?;
        let stride = T::floats_per_instance();
        let floats: &[f32] = bytemuck::cast_slice(&self.instances);
        let mut out = Vec::with_capacity(self.count() * width);
        for chunk in floats.chunks_exact(stride) {
            out.extend_from_slice(&chunk[offset..offset + width]);
        }
        Some(out)
    }
}
