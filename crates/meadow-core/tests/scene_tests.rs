// Host-side tests for scene construction and the per-frame update.

use meadow_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::TAU;

const FRAME: f32 = 1.0 / 60.0;

fn viewport(w: u32, h: u32) -> Viewport {
    Viewport::new(w, h, 1.0, false).unwrap()
}

fn make_scene(seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    Scene::build(SceneConfig::default(), viewport(800, 600), &mut rng).unwrap()
}

fn run(scene: &mut Scene, frames: usize) {
    for _ in 0..frames {
        scene.tick(FRAME);
    }
}

fn center_pointer(scene: &Scene) -> PointerSample {
    PointerSample {
        x: scene.viewport.width as f32 * 0.5,
        y: scene.viewport.height as f32 * 0.5,
    }
}

#[test]
fn instance_counts_are_fixed() {
    for seed in [1, 2, 3] {
        let scene = make_scene(seed);
        assert_eq!(scene.grass.instances.count(), 2500);
        assert_eq!(scene.particles.instances.count(), 400);
    }
    let mut rng = StdRng::seed_from_u64(9);
    let small = Scene::build(SceneConfig::default(), viewport(320, 200), &mut rng).unwrap();
    assert_eq!(small.grass.instances.count(), 2500);
    assert_eq!(small.particles.instances.count(), 400);
}

#[test]
fn attribute_buffers_match_instance_count() {
    let scene = make_scene(4);
    let grass = &scene.grass.instances;
    assert_eq!(grass.attribute("aTranslation").unwrap().len(), 2500 * 3);
    assert_eq!(grass.attribute("aColor").unwrap().len(), 2500 * 3);
    assert_eq!(grass.attribute("aInfluence").unwrap().len(), 2500);
    let parts = &scene.particles.instances;
    assert_eq!(parts.attribute("aOffset").unwrap().len(), 400 * 3);
    assert_eq!(parts.attribute("size").unwrap().len(), 400);
    assert!(parts.attribute("missing").is_none());
    assert_eq!(grass.as_bytes().len(), 2500 * 7 * 4);
}

#[test]
fn grass_colors_come_from_session_palette() {
    let scene = make_scene(5);
    for inst in scene.grass.instances.instances() {
        let c = glam::Vec3::from(inst.color);
        assert!(scene.palette.contains_grass(c), "color {c:?} not in palette");
        assert!(inst.influence >= 0.0 && inst.influence < 1.0);
    }
    assert!(!scene.palette.contains_grass(glam::Vec3::new(-1.0, 0.0, 0.0)));
}

#[test]
fn instance_counts_follow_config() {
    let config = SceneConfig {
        grass_amount: 7,
        particle_amount: 3,
        ..SceneConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(30);
    let scene = Scene::build(config, viewport(800, 600), &mut rng).unwrap();
    assert_eq!(scene.grass.instances.count(), 49);
    assert_eq!(scene.particles.instances.count(), 9);
}

#[test]
fn grass_grid_stays_within_jittered_extent() {
    let scene = make_scene(6);
    // half of the 5-unit spread plus cell offset and jitter
    let limit = 2.75 + 1e-4;
    for inst in scene.grass.instances.instances() {
        assert!(inst.translation[0].abs() <= limit);
        assert!(inst.translation[2].abs() <= limit);
        assert_eq!(inst.translation[1], 0.0);
    }
}

#[test]
fn particle_attributes_in_range() {
    let scene = make_scene(7);
    for p in scene.particles.instances.instances() {
        assert!((0.0..1.0).contains(&p.delay));
        assert!((0.0..1.0).contains(&p.oscillation));
        assert!(p.size >= 0.1 && p.size <= 0.3);
        for c in p.offset {
            assert!(c.abs() <= 2.0);
        }
        // vertical offset uses sin over half a turn
        assert!(p.offset[1] >= 0.0);
    }
}

#[test]
fn blade_progress_spans_zero_to_one() {
    let scene = make_scene(8);
    let blade = &scene.grass.blade;
    let min = blade.vertices.iter().map(|v| v.progress).fold(f32::MAX, f32::min);
    let max = blade.vertices.iter().map(|v| v.progress).fold(f32::MIN, f32::max);
    assert!(min.abs() < 1e-6);
    assert!((max - 1.0).abs() < 1e-6);
}

#[test]
fn resize_updates_camera_and_drawing_buffer() {
    let mut scene = make_scene(10);
    assert!((scene.camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    let palette = scene.palette.clone();
    scene.handle(InputEvent::Resize(viewport(400, 300)));
    assert!((scene.camera.aspect - 400.0 / 300.0).abs() < 1e-6);
    assert_eq!(scene.viewport.drawing_buffer_size(), (400, 300));
    assert_eq!(scene.grass.instances.count(), 2500);
    assert_eq!(scene.particles.instances.count(), 400);
    assert_eq!(scene.palette, palette);
}

#[test]
fn materials_advance_once_per_tick() {
    let mut scene = make_scene(11);
    run(&mut scene, 10);
    assert!((scene.grass.material.wind_offset - 0.3).abs() < 1e-4);
    assert!((scene.particles.material.time - 1.0).abs() < 1e-4);
    assert!((scene.grass.material.time - 10.0 * FRAME).abs() < 1e-4);
    let wind = scene.grass.material.uniform("windOffset").and_then(UniformValue::as_f32);
    assert_eq!(wind, Some(scene.grass.material.wind_offset));
}

#[test]
fn grass_focus_tracks_ball() {
    let mut scene = make_scene(12);
    run(&mut scene, 30);
    assert_eq!(scene.grass.material.focus_world, scene.ball.position);
}

#[test]
fn elapsed_time_frozen_while_pressed() {
    let mut scene = make_scene(13);
    run(&mut scene, 5);
    let before = scene.interaction.elapsed_time;
    assert!(before > 0.0);
    scene.handle(InputEvent::PointerDown(PointerSample::default()));
    for _ in 0..20 {
        scene.tick(FRAME);
        assert_eq!(scene.interaction.elapsed_time, before);
    }
}

#[test]
fn press_without_release_lifts_ball_and_completes_ripple() {
    let mut scene = make_scene(14);
    scene.pointer_down();
    run(&mut scene, 80);
    assert!((scene.ball.position.y - PRESS_HEIGHT).abs() < 1e-5);
    assert!(!scene.tweens.is_active(TweenKey::RIPPLE));
    assert!((scene.ripple_phase - TAU).abs() < 1e-5);
    assert!(scene.grass.material.wave_amplitude.abs() < 1e-4);
    assert!(scene.interaction.is_down());
}

#[test]
fn ripple_outlives_early_release() {
    let mut scene = make_scene(15);
    scene.pointer_down();
    scene.pointer_up();
    run(&mut scene, 2);
    assert!(scene.tweens.is_active(TweenKey::RIPPLE));
    assert!(scene.grass.material.wave_amplitude > 0.0);

    // release tween (0.2 s) settles long before the ripple (1.2 s) ends
    run(&mut scene, 20);
    assert!(!scene.interaction.is_down());
    assert!(scene.tweens.is_active(TweenKey::RIPPLE));

    run(&mut scene, 60);
    assert!(!scene.tweens.is_active(TweenKey::RIPPLE));
    assert!((scene.ripple_phase - TAU).abs() < 1e-5);
}

#[test]
fn release_returns_ball_then_idle_resumes() {
    let mut scene = make_scene(16);
    scene.pointer_down();
    run(&mut scene, 40);
    scene.pointer_up();
    assert_eq!(scene.interaction.phase, PointerPhase::Releasing);
    assert_eq!(
        scene.tweens.destination(TweenKey::BALL_Y),
        Some(BLADE_HEIGHT * 0.5 + RELEASE_LIFT)
    );
    let frozen = scene.interaction.elapsed_time;
    run(&mut scene, 13);
    assert_eq!(scene.interaction.phase, PointerPhase::Idle);
    run(&mut scene, 1);
    assert!(scene.interaction.elapsed_time > frozen);
}

#[test]
fn release_without_press_is_ignored() {
    let mut scene = make_scene(17);
    run(&mut scene, 3);
    let target = scene.tweens.destination(TweenKey::BALL_Y);
    scene.pointer_up();
    assert_eq!(scene.interaction.phase, PointerPhase::Idle);
    assert_eq!(scene.tweens.destination(TweenKey::BALL_Y), target);
}

#[test]
fn idle_bob_targets_sine_height() {
    let mut scene = make_scene(18);
    run(&mut scene, 1);
    let t = scene.interaction.elapsed_time;
    let expected = (t * IDLE_BOB_FREQUENCY).sin() * IDLE_BOB_AMPLITUDE + BLADE_HEIGHT * 0.5 + IDLE_BOB_LIFT;
    assert!((scene.tweens.destination(TweenKey::BALL_Y).unwrap() - expected).abs() < 1e-6);
    run(&mut scene, 120);
    let y = scene.ball.position.y;
    assert!(y > 0.45 && y < 0.65, "ball y {y}");
}

#[test]
fn pointer_move_hit_steers_ball_and_focus() {
    let mut scene = make_scene(19);
    let p = center_pointer(&scene);
    let hit = scene.pointer_move(p).expect("center of screen hits the floor");
    assert!(hit.uv.x > 0.0 && hit.uv.x < 1.0);
    assert!(scene.tweens.is_active(TweenKey::BALL_X));
    assert!(scene.tweens.is_active(TweenKey::FOCUS_V));
    run(&mut scene, 70);
    assert!((scene.ball.position.x - hit.point.x).abs() < 1e-4);
    assert!((scene.ball.position.z - hit.point.z).abs() < 1e-4);
    assert!(scene.floor.material.focus_uv.abs_diff_eq(hit.uv, 1e-4));
}

#[test]
fn pointer_move_miss_changes_nothing() {
    let mut scene = make_scene(20);
    run(&mut scene, 5);
    let ball = scene.ball.position;
    let focus = scene.floor.material.focus_uv;
    let top = PointerSample { x: 400.0, y: 0.0 };
    assert!(scene.pointer_move(top).is_none());
    assert!(!scene.tweens.is_active(TweenKey::BALL_X));
    assert!(!scene.tweens.is_active(TweenKey::FOCUS_U));
    assert_eq!(scene.ball.position, ball);
    assert_eq!(scene.floor.material.focus_uv, focus);
}

#[test]
fn pointer_move_leaves_vertical_animation_alone() {
    let mut scene = make_scene(21);
    scene.pointer_down();
    scene.pointer_move(center_pointer(&scene));
    assert_eq!(scene.tweens.destination(TweenKey::BALL_Y), Some(PRESS_HEIGHT));
}

#[test]
fn render_plan_splits_layers() {
    let mut scene = make_scene(22);
    let [opaque, particles] = scene.render_plan();
    assert_eq!(
        opaque.nodes.as_slice(),
        &[NodeKind::Floor, NodeKind::Grass, NodeKind::Ball]
    );
    assert_eq!(opaque.mask, Layers::only(Layers::OPAQUE));
    assert_eq!(opaque.clear, ClearOp::ColorAndDepth(scene.palette.background));
    assert_eq!(particles.nodes.as_slice(), &[NodeKind::Particles]);
    assert_eq!(particles.mask, Layers::only(Layers::PARTICLES));
    assert_eq!(particles.clear, ClearOp::DepthOnly);
    // camera ends on the particle layer, as after the second pass
    assert_eq!(scene.camera.layers, Layers::only(Layers::PARTICLES));
}

#[test]
fn render_plan_follows_node_layers() {
    let mut scene = make_scene(24);
    scene.ball.layers.set(Layers::PARTICLES);
    let [opaque, particles] = scene.render_plan();
    assert_eq!(opaque.nodes.as_slice(), &[NodeKind::Floor, NodeKind::Grass]);
    assert_eq!(
        particles.nodes.as_slice(),
        &[NodeKind::Ball, NodeKind::Particles]
    );
}

#[test]
fn press_during_release_cancels_settle() {
    let mut scene = make_scene(25);
    scene.pointer_down();
    run(&mut scene, 10);
    scene.pointer_up();
    run(&mut scene, 3);
    assert_eq!(scene.interaction.phase, PointerPhase::Releasing);

    scene.pointer_down();
    assert_eq!(scene.interaction.phase, PointerPhase::Pressed);
    assert_eq!(scene.tweens.destination(TweenKey::BALL_Y), Some(PRESS_HEIGHT));
    let frozen = scene.interaction.elapsed_time;

    // well past the 0.2 s release window: no stale settle may fire
    run(&mut scene, 60);
    assert_eq!(scene.interaction.phase, PointerPhase::Pressed);
    assert_eq!(scene.interaction.elapsed_time, frozen);
    assert!((scene.ball.position.y - PRESS_HEIGHT).abs() < 1e-5);
}

#[test]
fn floor_miss_keeps_running_follow() {
    let mut scene = make_scene(26);
    let hit = scene.pointer_move(center_pointer(&scene)).unwrap();
    run(&mut scene, 5);
    assert!(scene.pointer_move(PointerSample { x: 400.0, y: 0.0 }).is_none());
    assert_eq!(scene.tweens.destination(TweenKey::BALL_X), Some(hit.point.x));
    assert_eq!(scene.tweens.destination(TweenKey::FOCUS_U), Some(hit.uv.x));
}

#[test]
fn lag_spike_is_smoothed() {
    let mut scene = make_scene(23);
    scene.tick(5.0);
    assert!((scene.clock.elapsed() - LAG_ADJUSTED_SEC).abs() < 1e-6);
}
