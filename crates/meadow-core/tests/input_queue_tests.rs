// Host-side tests for the input queue and pointer state machine.

use meadow_core::*;

#[test]
fn queue_drains_in_arrival_order() {
    let mut q = InputQueue::new();
    q.push(InputEvent::PointerDown(PointerSample { x: 1.0, y: 1.0 }));
    q.push(InputEvent::PointerMove(PointerSample { x: 2.0, y: 2.0 }));
    q.push(InputEvent::PointerUp(PointerSample { x: 3.0, y: 3.0 }));
    assert_eq!(q.len(), 3);
    let drained: Vec<_> = q.drain().collect();
    assert!(matches!(drained[0], InputEvent::PointerDown(_)));
    assert!(matches!(drained[1], InputEvent::PointerMove(_)));
    assert!(matches!(drained[2], InputEvent::PointerUp(_)));
    assert!(q.is_empty());
}

#[test]
fn interaction_lifecycle() {
    let mut i = Interaction::default();
    assert_eq!(i.advance_idle(0.5), Some(0.5));
    i.press();
    assert!(i.is_down());
    assert_eq!(i.advance_idle(0.5), None);
    assert!(i.release());
    assert_eq!(i.phase, PointerPhase::Releasing);
    assert!(i.is_down());
    assert!(!i.release());
    i.settle();
    assert_eq!(i.phase, PointerPhase::Idle);
    assert_eq!(i.advance_idle(0.5), Some(1.0));
}

#[test]
fn settle_ignored_unless_releasing() {
    let mut i = Interaction::default();
    i.press();
    i.settle();
    assert_eq!(i.phase, PointerPhase::Pressed);
}

#[test]
fn frame_clock_handles_bad_deltas() {
    let mut c = FrameClock::new();
    assert_eq!(c.step(-1.0), 0.0);
    assert_eq!(c.step(f32::INFINITY), 0.0);
    assert_eq!(c.step(0.016), 0.016);
    assert_eq!(c.frames(), 3);
}

#[test]
fn material_contracts() {
    let mut grass = GrassMaterial::new(glam::Vec3::ZERO, 3.0, 0.3, glam::Vec3::ZERO);
    let frame = FrameInput {
        elapsed: 2.0,
        focus_world: glam::Vec3::new(1.0, 2.0, 3.0),
    };
    grass.update(&frame);
    grass.update(&frame);
    assert_eq!(grass.kind(), MaterialKind::Grass);
    assert!((grass.wind_offset - 0.06).abs() < 1e-6);
    assert_eq!(grass.time, 2.0);
    assert_eq!(
        grass.uniform("focusWorldPosition"),
        Some(UniformValue::Vec3(frame.focus_world))
    );
    assert_eq!(grass.uniforms().len(), 7);

    let mut floor = FloorMaterial::new(glam::Vec3::ONE);
    floor.update(&frame);
    assert_eq!(
        floor.uniform("focusUV"),
        Some(UniformValue::Vec2(glam::Vec2::new(0.5, 0.5)))
    );

    let mut particles = ParticleMaterial::new(glam::Vec3::ONE);
    particles.update(&frame);
    assert!((particles.time - 0.1).abs() < 1e-6);
    assert_eq!(particles.program().vertex_entry, "vs_particle");
}

#[test]
fn uniform_blocks_are_std140_sized() {
    assert_eq!(std::mem::size_of::<GrassUniforms>(), 64);
    assert_eq!(std::mem::size_of::<FloorUniforms>(), 32);
    assert_eq!(std::mem::size_of::<ParticleUniforms>(), 16);
    assert_eq!(std::mem::size_of::<BallUniforms>(), 32);
    assert_eq!(std::mem::size_of::<CameraUniforms>(), 96);
}
