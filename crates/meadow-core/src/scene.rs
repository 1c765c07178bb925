//! Scene composition and the per-frame update.
//!
//! `Scene::build` runs once per page load. Afterwards the host feeds input
//! events through `handle`, calls `tick` once per animation frame and then
//! executes `render_plan`.

use crate::camera::{FloorHit, FloorPlane, Layers, PerspectiveCamera};
use crate::clock::FrameClock;
use crate::constants::*;
use crate::easing::Ease;
use crate::error::Result;
use crate::geometry::{
    blade_cone, floor_plane, sphere, BladeVertex, FloorVertex, GrassInstance, InstancedBatch,
    MeshData, ParticleInstance,
};
use crate::interaction::{InputEvent, Interaction, PointerSample};
use crate::material::{
    BallUniforms, FloorMaterial, FrameInput, GrassMaterial, ParticleMaterial, ShaderMaterial,
};
use crate::palette::SessionPalette;
use crate::tween::{Completion, TweenKey, TweenSink, TweenSpec, Tweens};
use crate::viewport::Viewport;
use glam::{Vec2, Vec3};
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::{PI, TAU};

/// Construction parameters; `Default` mirrors `constants.rs`.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub blade_height: f32,
    pub grass_amount: u32,
    pub grass_spacing: f32,
    pub grass_cell_size: f32,
    pub grass_jitter: f32,
    pub grass_max_distance: f32,
    pub particle_amount: u32,
    pub particle_spread: f32,
    pub floor_size: f32,
    pub ball_radius: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            blade_height: BLADE_HEIGHT,
            grass_amount: GRASS_AMOUNT,
            grass_spacing: GRASS_SPACING,
            grass_cell_size: GRASS_CELL_SIZE,
            grass_jitter: GRASS_JITTER,
            grass_max_distance: GRASS_MAX_DISTANCE,
            particle_amount: PARTICLE_AMOUNT,
            particle_spread: PARTICLE_SPREAD,
            floor_size: FLOOR_SIZE,
            ball_radius: BALL_RADIUS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Floor,
    Grass,
    Ball,
    Particles,
}

pub struct GrassField {
    pub blade: MeshData<BladeVertex>,
    pub instances: InstancedBatch<GrassInstance>,
    pub material: GrassMaterial,
    pub layers: Layers,
}

pub struct ParticleField {
    pub instances: InstancedBatch<ParticleInstance>,
    pub material: ParticleMaterial,
    pub layers: Layers,
}

pub struct Floor {
    pub mesh: MeshData<FloorVertex>,
    pub plane: FloorPlane,
    pub material: FloorMaterial,
    pub layers: Layers,
}

pub struct Ball {
    pub mesh: MeshData<[f32; 3]>,
    pub position: Vec3,
    pub color: Vec3,
    pub layers: Layers,
}

impl Ball {
    pub fn uniforms(&self) -> BallUniforms {
        BallUniforms {
            position: self.position.to_array(),
            _pad0: 0.0,
            color: self.color.to_array(),
            _pad1: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClearOp {
    /// Clear color to the given RGB and depth to 1.
    ColorAndDepth(Vec3),
    /// Keep color, clear depth to 1.
    DepthOnly,
}

/// One render pass: what to clear and which nodes to draw, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct PassPlan {
    pub label: &'static str,
    pub mask: Layers,
    pub clear: ClearOp,
    pub nodes: SmallVec<[NodeKind; 4]>,
}

pub struct Scene {
    pub config: SceneConfig,
    pub palette: SessionPalette,
    pub viewport: Viewport,
    pub camera: PerspectiveCamera,
    pub grass: GrassField,
    pub floor: Floor,
    pub ball: Ball,
    pub particles: ParticleField,
    pub interaction: Interaction,
    pub tweens: Tweens,
    pub clock: FrameClock,
    /// Phase of the press ripple, 0..2π.
    pub ripple_phase: f32,
}

impl Scene {
    /// Build the scene with a randomly chosen session palette.
    pub fn build<R: Rng + ?Sized>(config: SceneConfig, viewport: Viewport, rng: &mut R) -> Result<Self> {
        let palette = SessionPalette::random(rng);
        Self::build_with_palette(config, viewport, palette, rng)
    }

    pub fn build_with_palette<R: Rng + ?Sized>(
        config: SceneConfig,
        viewport: Viewport,
        palette: SessionPalette,
        rng: &mut R,
    ) -> Result<Self> {
        let camera = PerspectiveCamera::new(viewport.aspect());

        let particles = ParticleField {
            instances: build_particles(&config, rng)?,
            material: ParticleMaterial::new(palette.wisp),
            layers: Layers::only(Layers::PARTICLES),
        };

        let ball = Ball {
            mesh: sphere(config.ball_radius, BALL_SEGMENTS, BALL_SEGMENTS),
            position: Vec3::ZERO,
            color: palette.wisp,
            layers: Layers::default(),
        };

        let floor_y = config.blade_height * 0.5;
        let floor = Floor {
            mesh: floor_plane(config.floor_size, floor_y),
            plane: FloorPlane {
                center: Vec3::new(0.0, floor_y, 0.0),
                size: config.floor_size,
            },
            material: FloorMaterial::new(palette.background),
            layers: Layers::default(),
        };

        let blade = blade_cone(
            config.blade_height / 15.0,
            config.blade_height,
            BLADE_RADIAL_SEGMENTS,
            BLADE_HEIGHT_SEGMENTS,
        );
        let grass = GrassField {
            blade,
            instances: build_grass(&config, &palette, rng)?,
            material: GrassMaterial::new(
                palette.background,
                config.grass_max_distance,
                config.blade_height,
                ball.position,
            ),
            layers: Layers::default(),
        };

        log::info!(
            "[scene] palette={} grass={} particles={}",
            palette.id,
            grass.instances.count(),
            particles.instances.count()
        );

        Ok(Self {
            config,
            palette,
            viewport,
            camera,
            grass,
            floor,
            ball,
            particles,
            interaction: Interaction::default(),
            tweens: Tweens::new(),
            clock: FrameClock::new(),
            ripple_phase: 0.0,
        })
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Resize(viewport) => self.resize(viewport),
            InputEvent::PointerMove(p) => {
                self.pointer_move(p);
            }
            InputEvent::PointerDown(_) => self.pointer_down(),
            InputEvent::PointerUp(_) => self.pointer_up(),
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
        log::debug!(
            "[scene] resize {}x{} pr={} mobile={}",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio,
            viewport.is_mobile
        );
    }

    /// Raycast the pointer against the floor and steer the ball and the floor
    /// focus towards the hit. Returns the hit, or `None` when the floor was
    /// missed and nothing changed.
    pub fn pointer_move(&mut self, pointer: PointerSample) -> Option<FloorHit> {
        let ndc = self.viewport.to_ndc(pointer.x, pointer.y);
        let ray = self.camera.ray_from_ndc(ndc);
        let hit = self.floor.plane.intersect(&ray)?;

        let follow = |to: f32| TweenSpec::to(to).duration(FOLLOW_DURATION);
        let ball = self.ball.position;
        let focus = self.floor.material.focus_uv;
        self.tweens.to(TweenKey::BALL_X, ball.x, follow(hit.point.x));
        self.tweens.to(TweenKey::BALL_Z, ball.z, follow(hit.point.z));
        self.tweens.to(TweenKey::FOCUS_U, focus.x, follow(hit.uv.x));
        self.tweens.to(TweenKey::FOCUS_V, focus.y, follow(hit.uv.y));
        Some(hit)
    }

    pub fn pointer_down(&mut self) {
        self.interaction.press();
        self.tweens.to(
            TweenKey::BALL_Y,
            self.ball.position.y,
            TweenSpec::to(PRESS_HEIGHT).ease(Ease::Power4Out),
        );
        self.tweens.to(
            TweenKey::RIPPLE,
            self.ripple_phase,
            TweenSpec::to(TAU)
                .from(0.0)
                .duration(RIPPLE_DURATION)
                .ease(Ease::ExpoOut),
        );
        log::debug!("[pointer] down");
    }

    pub fn pointer_up(&mut self) {
        if !self.interaction.release() {
            return;
        }
        self.tweens.to(
            TweenKey::BALL_Y,
            self.ball.position.y,
            TweenSpec::to(self.config.blade_height * 0.5 + RELEASE_LIFT)
                .duration(RELEASE_DURATION)
                .ease(Ease::Power4Out)
                .on_complete(Completion::ReleaseSettled),
        );
        log::debug!("[pointer] up");
    }

    /// Per-frame update: advance tweens, update materials, then retarget the
    /// idle bob.
    pub fn tick(&mut self, raw_dt: f32) {
        let dt = self.clock.step(raw_dt);

        let mut sink = AnimatedFields {
            ball: &mut self.ball.position,
            focus_uv: &mut self.floor.material.focus_uv,
            ripple_phase: &mut self.ripple_phase,
            wave_amplitude: &mut self.grass.material.wave_amplitude,
        };
        for completion in self.tweens.advance(dt, &mut sink) {
            match completion {
                Completion::ReleaseSettled => self.interaction.settle(),
            }
        }

        let frame = FrameInput {
            elapsed: self.clock.elapsed(),
            focus_world: self.ball.position,
        };
        self.grass.material.update(&frame);
        self.particles.material.update(&frame);

        if let Some(t) = self.interaction.advance_idle(IDLE_TICK_SEC) {
            let y = (t * IDLE_BOB_FREQUENCY).sin() * IDLE_BOB_AMPLITUDE
                + self.config.blade_height * 0.5
                + IDLE_BOB_LIFT;
            self.tweens
                .to(TweenKey::BALL_Y, self.ball.position.y, TweenSpec::to(y));
        }
    }

    pub fn node_layers(&self, kind: NodeKind) -> Layers {
        match kind {
            NodeKind::Floor => self.floor.layers,
            NodeKind::Grass => self.grass.layers,
            NodeKind::Ball => self.ball.layers,
            NodeKind::Particles => self.particles.layers,
        }
    }

    /// Opaque geometry with only layer 0 visible, then particles with only
    /// layer 1 visible over the same color buffer and a fresh depth buffer.
    /// The camera is left on the last pass's layer.
    pub fn render_plan(&mut self) -> [PassPlan; 2] {
        let opaque = self.pass_on(Layers::OPAQUE, "opaque_pass");
        let particles = self.pass_on(Layers::PARTICLES, "particle_pass");
        [opaque, particles]
    }

    fn pass_on(&mut self, channel: u8, label: &'static str) -> PassPlan {
        const ORDER: [NodeKind; 4] = [
            NodeKind::Floor,
            NodeKind::Grass,
            NodeKind::Ball,
            NodeKind::Particles,
        ];
        self.camera.layers.set(channel);
        let mask = self.camera.layers;
        // only the opaque pass clears color
        let clear = if mask.is_enabled(Layers::OPAQUE) {
            ClearOp::ColorAndDepth(self.palette.background)
        } else {
            ClearOp::DepthOnly
        };
        let nodes = ORDER
            .iter()
            .copied()
            .filter(|k| self.node_layers(*k).test(mask))
            .collect();
        PassPlan {
            label,
            mask,
            clear,
            nodes,
        }
    }
}

/// Borrowed view of every field the tween scheduler may write.
struct AnimatedFields<'a> {
    ball: &'a mut Vec3,
    focus_uv: &'a mut Vec2,
    ripple_phase: &'a mut f32,
    wave_amplitude: &'a mut f32,
}

impl TweenSink for AnimatedFields<'_> {
    fn apply(&mut self, key: TweenKey, value: f32) {
        match key {
            TweenKey::BALL_X => self.ball.x = value,
            TweenKey::BALL_Y => self.ball.y = value,
            TweenKey::BALL_Z => self.ball.z = value,
            TweenKey::FOCUS_U => self.focus_uv.x = value,
            TweenKey::FOCUS_V => self.focus_uv.y = value,
            TweenKey::RIPPLE => {
                *self.ripple_phase = value;
                *self.wave_amplitude = value.sin() * RIPPLE_AMPLITUDE;
            }
            _ => log::warn!("[tween] no field for {:?}", key),
        }
    }
}

fn build_grass<R: Rng + ?Sized>(
    config: &SceneConfig,
    palette: &SessionPalette,
    rng: &mut R,
) -> Result<InstancedBatch<GrassInstance>> {
    let amt = config.grass_amount;
    let amt_f = amt as f32;
    let total = amt as usize * amt as usize;
    let size = config.grass_cell_size;
    let off = config.grass_jitter;
    let mut instances = Vec::with_capacity(total);
    for z in 0..amt {
        for x in 0..amt {
            let nx = x as f32 / amt_f + size / 2.0 - 0.5 + rng.gen_range(-off..=off);
            let nz = -size / 2.0 + 0.5 - z as f32 / amt_f + rng.gen_range(-off..=off);
            let c = palette.pick_grass(rng);
            instances.push(GrassInstance {
                translation: [nx * config.grass_spacing, 0.0, nz * config.grass_spacing],
                color: c.to_array(),
                influence: rng.gen::<f32>(),
            });
        }
    }
    InstancedBatch::new(total, instances)
}

fn build_particles<R: Rng + ?Sized>(
    config: &SceneConfig,
    rng: &mut R,
) -> Result<InstancedBatch<ParticleInstance>> {
    let count = config.particle_amount;
    let n = count as f32;
    let half_spread = config.particle_spread * 0.5;
    let total = count as usize * count as usize;
    let mut instances = Vec::with_capacity(total);
    for x in 0..count {
        for z in 0..count {
            let fx = x as f32 / n;
            let fz = z as f32 / n;
            let off_x = (fx * TAU).sin() * half_spread * rng.gen::<f32>();
            let off_y = (fx * PI).sin() * half_spread * rng.gen::<f32>();
            let off_z = (fz * TAU).cos() * half_spread * rng.gen::<f32>();
            instances.push(ParticleInstance {
                offset: [off_x, off_y, off_z],
                delay: rng.gen::<f32>(),
                oscillation: rng.gen::<f32>(),
                size: rng.gen::<f32>() * PARTICLE_SIZE_SPAN + PARTICLE_SIZE_MIN,
            });
        }
    }
    InstancedBatch::new(total, instances)
}
