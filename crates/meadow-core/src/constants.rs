// Scene tuning constants shared by the core and the web frontend.

// Viewport
pub const MAX_PIXEL_RATIO: f32 = 2.0;
pub const MOBILE_MAX_WIDTH_PX: u32 = 767;

// Frame timing
pub const IDLE_TICK_SEC: f32 = 1.0 / 60.0; // elapsed-time step per idle frame
pub const LAG_THRESHOLD_SEC: f32 = 0.5; // deltas above this are treated as a stall
pub const LAG_ADJUSTED_SEC: f32 = 1.0 / 30.0; // step used in place of a stall

// Grass
pub const BLADE_HEIGHT: f32 = 0.3;
pub const BLADE_RADIAL_SEGMENTS: u32 = 16;
pub const BLADE_HEIGHT_SEGMENTS: u32 = 64;
pub const GRASS_AMOUNT: u32 = 50; // blades per grid side
pub const GRASS_SPACING: f32 = 5.0; // world-space extent of the grid
pub const GRASS_CELL_SIZE: f32 = 0.1;
pub const GRASS_JITTER: f32 = 0.02;
pub const GRASS_MAX_DISTANCE: f32 = 3.0;
pub const WIND_STEP_PER_FRAME: f32 = 0.03;

// Particles
pub const PARTICLE_AMOUNT: u32 = 20; // particles per grid side
pub const PARTICLE_SPREAD: f32 = 4.0;
pub const PARTICLE_SIZE_MIN: f32 = 0.1;
pub const PARTICLE_SIZE_SPAN: f32 = 0.2;
pub const PARTICLE_TIME_STEP_PER_FRAME: f32 = 0.1;

// Floor and ball
pub const FLOOR_SIZE: f32 = 10.0;
pub const BALL_RADIUS: f32 = 0.1;
pub const BALL_SEGMENTS: u32 = 16;
pub const DEFAULT_FOCUS_UV: [f32; 2] = [0.5, 0.5];

// Camera
pub const CAMERA_FOV_DEG: f32 = 50.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 10.0;
pub const CAMERA_EYE: [f32; 3] = [0.0, 2.0, 3.5];

// Interaction
pub const IDLE_BOB_FREQUENCY: f32 = 1.3;
pub const IDLE_BOB_AMPLITUDE: f32 = 0.1;
pub const IDLE_BOB_LIFT: f32 = 0.4; // above half blade height
pub const RELEASE_LIFT: f32 = 0.3; // above half blade height
pub const PRESS_HEIGHT: f32 = 1.0;
pub const RELEASE_DURATION: f32 = 0.2;
pub const FOLLOW_DURATION: f32 = 1.0;
pub const RIPPLE_DURATION: f32 = 1.2;
pub const RIPPLE_AMPLITUDE: f32 = 0.4;

// Tween defaults
pub const DEFAULT_TWEEN_DURATION: f32 = 0.5;

// Palettes
pub const WISP_ACCENT_PALETTE_ID: u16 = 135;
pub const WISP_ACCENT_HEX: u32 = 0x70_3c_fb;
pub const WISP_DEFAULT_HEX: u32 = 0xff_ff_ff;
