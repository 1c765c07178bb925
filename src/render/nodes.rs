use super::helpers::{instance_attributes, make_scene_pipeline, PipelineSpec, UniformBinding};
use crate::constants::PARTICLE_QUAD;
use meadow_core::{
    ball_program, Ball, BallUniforms, BladeVertex, Floor, FloorUniforms, FloorVertex, GrassField,
    GrassInstance, GrassUniforms, ParticleField, ParticleInstance, ParticleUniforms,
    ShaderMaterial,
};
use wgpu::util::DeviceExt;

/// GPU resources for one scene node: pipeline, material uniforms and the
/// vertex/index/instance buffers built from the core geometry.
pub(crate) struct NodeDraw {
    pipeline: wgpu::RenderPipeline,
    pub(crate) material: UniformBinding,
    vertices: wgpu::Buffer,
    instances: Option<wgpu::Buffer>,
    indices: Option<wgpu::Buffer>,
    // index count when indexed, vertex count otherwise
    element_count: u32,
    instance_count: u32,
}

impl NodeDraw {
    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>, camera: &wgpu::BindGroup) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, camera, &[]);
        pass.set_bind_group(1, &self.material.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        if let Some(instances) = &self.instances {
            pass.set_vertex_buffer(1, instances.slice(..));
        }
        match &self.indices {
            Some(ib) => {
                pass.set_index_buffer(ib.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..self.element_count, 0, 0..self.instance_count);
            }
            None => pass.draw(0..self.element_count, 0..self.instance_count),
        }
    }
}

/// Shared state for building node pipelines.
pub(crate) struct NodeFactory<'a> {
    pub(crate) device: &'a wgpu::Device,
    pub(crate) pipeline_layout: &'a wgpu::PipelineLayout,
    pub(crate) material_layout: &'a wgpu::BindGroupLayout,
    pub(crate) color_format: wgpu::TextureFormat,
}

impl NodeFactory<'_> {
    fn buffer(&self, label: &str, contents: &[u8], usage: wgpu::BufferUsages) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage,
            })
    }

    fn uniforms<T>(&self, label: &str) -> UniformBinding {
        UniformBinding::new(
            self.device,
            label,
            self.material_layout,
            std::mem::size_of::<T>(),
        )
    }

    pub(crate) fn floor(&self, floor: &Floor) -> NodeDraw {
        let buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<FloorVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2],
        }];
        let pipeline = make_scene_pipeline(
            self.device,
            self.pipeline_layout,
            self.color_format,
            PipelineSpec {
                label: "floor_pipeline",
                program: floor.material.program(),
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                depth_write: true,
            },
        );
        NodeDraw {
            pipeline,
            material: self.uniforms::<FloorUniforms>("floor_uniforms"),
            vertices: self.buffer(
                "floor_vb",
                bytemuck::cast_slice(&floor.mesh.vertices),
                wgpu::BufferUsages::VERTEX,
            ),
            instances: None,
            indices: Some(self.buffer(
                "floor_ib",
                bytemuck::cast_slice(&floor.mesh.indices),
                wgpu::BufferUsages::INDEX,
            )),
            element_count: floor.mesh.index_count(),
            instance_count: 1,
        }
    }

    pub(crate) fn grass(&self, grass: &GrassField) -> NodeDraw {
        let instance_attrs = instance_attributes::<GrassInstance>(2);
        let buffers = [
            // slot 0: blade vertices
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<BladeVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32],
            },
            // slot 1: per-blade instance data
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<GrassInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &instance_attrs,
            },
        ];
        let pipeline = make_scene_pipeline(
            self.device,
            self.pipeline_layout,
            self.color_format,
            PipelineSpec {
                label: "grass_pipeline",
                program: grass.material.program(),
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                blend: None,
                depth_write: true,
            },
        );
        NodeDraw {
            pipeline,
            material: self.uniforms::<GrassUniforms>("grass_uniforms"),
            vertices: self.buffer(
                "blade_vb",
                bytemuck::cast_slice(&grass.blade.vertices),
                wgpu::BufferUsages::VERTEX,
            ),
            instances: Some(self.buffer(
                "grass_instances",
                grass.instances.as_bytes(),
                wgpu::BufferUsages::VERTEX,
            )),
            indices: Some(self.buffer(
                "blade_ib",
                bytemuck::cast_slice(&grass.blade.indices),
                wgpu::BufferUsages::INDEX,
            )),
            element_count: grass.blade.index_count(),
            instance_count: grass.instances.count() as u32,
        }
    }

    pub(crate) fn ball(&self, ball: &Ball) -> NodeDraw {
        let buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 3]>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3],
        }];
        let pipeline = make_scene_pipeline(
            self.device,
            self.pipeline_layout,
            self.color_format,
            PipelineSpec {
                label: "ball_pipeline",
                program: ball_program(),
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                blend: None,
                depth_write: true,
            },
        );
        NodeDraw {
            pipeline,
            material: self.uniforms::<BallUniforms>("ball_uniforms"),
            vertices: self.buffer(
                "ball_vb",
                bytemuck::cast_slice(&ball.mesh.vertices),
                wgpu::BufferUsages::VERTEX,
            ),
            instances: None,
            indices: Some(self.buffer(
                "ball_ib",
                bytemuck::cast_slice(&ball.mesh.indices),
                wgpu::BufferUsages::INDEX,
            )),
            element_count: ball.mesh.index_count(),
            instance_count: 1,
        }
    }

    pub(crate) fn particles(&self, particles: &ParticleField) -> NodeDraw {
        let instance_attrs = instance_attributes::<ParticleInstance>(1);
        let buffers = [
            // slot 0: billboard corners
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x2],
            },
            // slot 1: per-particle instance data
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ParticleInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &instance_attrs,
            },
        ];
        let pipeline = make_scene_pipeline(
            self.device,
            self.pipeline_layout,
            self.color_format,
            PipelineSpec {
                label: "particle_pipeline",
                program: particles.material.program(),
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                depth_write: false,
            },
        );
        NodeDraw {
            pipeline,
            material: self.uniforms::<ParticleUniforms>("particle_uniforms"),
            vertices: self.buffer(
                "particle_quad_vb",
                bytemuck::cast_slice(&PARTICLE_QUAD),
                wgpu::BufferUsages::VERTEX,
            ),
            instances: Some(self.buffer(
                "particle_instances",
                particles.instances.as_bytes(),
                wgpu::BufferUsages::VERTEX,
            )),
            indices: None,
            element_count: PARTICLE_QUAD.len() as u32,
            instance_count: particles.instances.count() as u32,
        }
    }
}
