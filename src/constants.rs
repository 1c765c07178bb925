/// DOM wiring and renderer constants for the web frontend.
///
/// Scene tuning (dimensions, timings, eases) lives in `meadow_core::constants`;
/// this module only holds what the browser side needs.
// Canvas the scene renders into
pub const CANVAS_ID: &str = "stage";

// Same breakpoint as `meadow_core::constants::MOBILE_MAX_WIDTH_PX`
pub const MOBILE_MEDIA_QUERY: &str = "(max-width: 767px)";

// Pointer event names, mouse first then touch
pub const POINTER_MOVE_EVENTS: [&str; 2] = ["mousemove", "touchmove"];
pub const POINTER_DOWN_EVENTS: [&str; 2] = ["mousedown", "touchstart"];
pub const POINTER_UP_EVENTS: [&str; 2] = ["mouseup", "touchend"];

// Moves and wheel call preventDefault, so they must not be passive
pub const BLOCKING_LISTENER_PASSIVE: bool = false;

// Surface presentation
pub const MAX_FRAME_LATENCY: u32 = 2;
pub const MIN_SURFACE_EXTENT: u32 = 1;

// Billboard corners for one particle, drawn as a triangle strip
pub const PARTICLE_QUAD: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]];
