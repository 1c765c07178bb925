use crate::constants::{MAX_FRAME_LATENCY, MIN_SURFACE_EXTENT};
use meadow_core::{CameraUniforms, ClearOp, NodeKind, PassPlan, Scene};
use web_sys as web;

mod helpers;
mod nodes;

use helpers::UniformBinding;
use nodes::{NodeDraw, NodeFactory};

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    camera: UniformBinding,
    floor: NodeDraw,
    grass: NodeDraw,
    ball: NodeDraw,
    particles: NodeDraw,
    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, scene: &Scene) -> anyhow::Result<Self> {
        let width = canvas.width().max(MIN_SURFACE_EXTENT);
        let height = canvas.height().max(MIN_SURFACE_EXTENT);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // WebGL2 limits so the fallback backend accepts the same request
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        // palette colors are authored for direct output, so skip sRGB encoding
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: MAX_FRAME_LATENCY,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] backend={:?} format={:?} size={}x{}",
            adapter.get_info().backend,
            format,
            width,
            height
        );

        let depth_view = helpers::create_depth_view(&device, width, height);

        // group 0: camera, group 1: per-node material
        let camera_layout = helpers::uniform_layout(&device, "camera_bgl");
        let material_layout = helpers::uniform_layout(&device, "material_bgl");
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&camera_layout, &material_layout],
            push_constant_ranges: &[],
        });
        let camera = UniformBinding::new(
            &device,
            "camera_uniforms",
            &camera_layout,
            std::mem::size_of::<CameraUniforms>(),
        );

        let factory = NodeFactory {
            device: &device,
            pipeline_layout: &pipeline_layout,
            material_layout: &material_layout,
            color_format: format,
        };
        let floor = factory.floor(&scene.floor);
        let grass = factory.grass(&scene.grass);
        let ball = factory.ball(&scene.ball);
        let particles = factory.particles(&scene.particles);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            camera,
            floor,
            grass,
            ball,
            particles,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
            log::debug!("[gpu] surface resized to {}x{}", width, height);
        }
    }

    /// Reapply the surface configuration and rebuild the depth target.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = helpers::create_depth_view(&self.device, self.width, self.height);
    }

    fn node(&self, kind: NodeKind) -> &NodeDraw {
        match kind {
            NodeKind::Floor => &self.floor,
            NodeKind::Grass => &self.grass,
            NodeKind::Ball => &self.ball,
            NodeKind::Particles => &self.particles,
        }
    }

    fn write_uniforms(&self, scene: &Scene) {
        self.camera.write(&self.queue, &scene.camera.uniforms());
        self.floor
            .material
            .write(&self.queue, &scene.floor.material.block());
        self.grass
            .material
            .write(&self.queue, &scene.grass.material.block());
        self.ball.material.write(&self.queue, &scene.ball.uniforms());
        self.particles
            .material
            .write(&self.queue, &scene.particles.material.block());
    }

    /// Execute a pass plan from `Scene::render_plan` against the current
    /// surface texture.
    pub fn render(
        &mut self,
        scene: &Scene,
        plan: &[PassPlan],
    ) -> Result<(), wgpu::SurfaceError> {
        self.write_uniforms(scene);
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        for pass in plan {
            let load = match pass.clear {
                ClearOp::ColorAndDepth(rgb) => wgpu::LoadOp::Clear(wgpu::Color {
                    r: rgb.x as f64,
                    g: rgb.y as f64,
                    b: rgb.z as f64,
                    a: 1.0,
                }),
                ClearOp::DepthOnly => wgpu::LoadOp::Load,
            };
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(pass.label),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                // both passes start from a cleared depth buffer
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            for kind in pass.nodes.iter().copied() {
                self.node(kind).draw(&mut rpass, &self.camera.bind_group);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
