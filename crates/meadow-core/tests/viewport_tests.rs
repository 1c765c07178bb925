// Host-side tests for viewport state and pointer projection.

use meadow_core::*;

#[test]
fn pixel_ratio_is_capped() {
    for dpr in [0.5_f32, 1.0, 1.5, 2.0, 3.0, 4.0] {
        let v = Viewport::new(1024, 768, dpr, false).unwrap();
        assert!(v.pixel_ratio <= 2.0);
        assert_eq!(v.width, 1024);
        assert_eq!(v.height, 768);
    }
    assert_eq!(Viewport::new(10, 10, 3.0, false).unwrap().pixel_ratio, 2.0);
    assert_eq!(Viewport::new(10, 10, f32::NAN, false).unwrap().pixel_ratio, 1.0);
}

#[test]
fn empty_viewport_is_rejected() {
    assert_eq!(
        Viewport::new(0, 600, 1.0, false),
        Err(SceneError::EmptyViewport {
            width: 0,
            height: 600
        })
    );
}

#[test]
fn mobile_breakpoint() {
    assert!(Viewport::is_mobile_width(767));
    assert!(!Viewport::is_mobile_width(768));
}

#[test]
fn drawing_buffer_scales_with_pixel_ratio() {
    let v = Viewport::new(400, 300, 2.0, true).unwrap();
    assert_eq!(v.drawing_buffer_size(), (800, 600));
}

#[test]
fn ndc_corners() {
    let v = Viewport::new(800, 600, 1.0, false).unwrap();
    assert_eq!(v.to_ndc(0.0, 0.0), glam::Vec2::new(-1.0, 1.0));
    assert_eq!(v.to_ndc(800.0, 600.0), glam::Vec2::new(1.0, -1.0));
    assert_eq!(v.to_ndc(400.0, 300.0), glam::Vec2::ZERO);
}

#[test]
fn touch_position_wins_over_mouse() {
    let p = PointerSample::from_client(Some((5.0, 6.0)), (1.0, 2.0));
    assert_eq!(p, PointerSample { x: 5.0, y: 6.0 });
    let p = PointerSample::from_client(None, (1.0, 2.0));
    assert_eq!(p, PointerSample { x: 1.0, y: 2.0 });
}

#[test]
fn center_ray_hits_floor_near_origin() {
    let cam = PerspectiveCamera::new(800.0 / 600.0);
    let floor = FloorPlane {
        center: glam::Vec3::new(0.0, 0.15, 0.0),
        size: 10.0,
    };
    let hit = floor.intersect(&cam.ray_from_ndc(glam::Vec2::ZERO)).unwrap();
    assert!(hit.point.x.abs() < 1e-4);
    assert!((hit.point.y - 0.15).abs() < 1e-5);
    // camera looks at the origin from (0, 2, 3.5); the floor sits slightly above it
    assert!(hit.point.z > 0.0 && hit.point.z < 0.5);
    assert!((hit.uv.x - 0.5).abs() < 1e-4);
    assert!(hit.uv.y < 0.5);
}

#[test]
fn upward_ray_misses_floor() {
    let floor = FloorPlane {
        center: glam::Vec3::ZERO,
        size: 10.0,
    };
    let ray = Ray {
        origin: glam::Vec3::new(0.0, 1.0, 0.0),
        direction: glam::Vec3::Y,
    };
    assert!(floor.intersect(&ray).is_none());
}

#[test]
fn floor_uv_corners() {
    let floor = FloorPlane {
        center: glam::Vec3::ZERO,
        size: 10.0,
    };
    let uv = floor.uv_at(glam::Vec3::new(-5.0, 0.0, 5.0));
    assert_eq!(uv, glam::Vec2::new(0.0, 0.0));
    let uv = floor.uv_at(glam::Vec3::new(5.0, 0.0, -5.0));
    assert_eq!(uv, glam::Vec2::new(1.0, 1.0));
}

#[test]
fn layers_mask() {
    let mut l = Layers::default();
    assert!(l.is_enabled(Layers::OPAQUE));
    assert!(!l.test(Layers::only(Layers::PARTICLES)));
    l.set(Layers::PARTICLES);
    assert!(!l.is_enabled(Layers::OPAQUE));
    assert!(l.is_enabled(Layers::PARTICLES));
    assert_eq!(l, Layers::only(Layers::PARTICLES));
}
