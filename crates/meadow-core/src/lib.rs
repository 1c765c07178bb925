//! Platform-free core of the meadow scene: viewport state, geometry, camera
//! and raycasting, shader material uniforms, tweening, pointer interaction and
//! the per-frame update. The web frontend owns the DOM and the GPU.

pub mod camera;
pub mod clock;
pub mod constants;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod material;
pub mod palette;
pub mod scene;
pub mod tween;
pub mod viewport;

pub use camera::*;
pub use clock::FrameClock;
pub use constants::*;
pub use easing::Ease;
pub use error::{Result, SceneError};
pub use geometry::*;
pub use interaction::*;
pub use material::*;
pub use palette::SessionPalette;
pub use scene::*;
pub use tween::*;
pub use viewport::Viewport;

// Shaders bundled as string constants
pub static GRASS_WGSL: &str = include_str!("../shaders/grass.wgsl");
pub static FLOOR_WGSL: &str = include_str!("../shaders/floor.wgsl");
pub static PARTICLE_WGSL: &str = include_str!("../shaders/particle.wgsl");
pub static BALL_WGSL: &str = include_str!("../shaders/ball.wgsl");
