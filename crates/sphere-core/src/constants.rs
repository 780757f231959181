// Shared tuning constants for the point sphere, its colour model and the
// frame-rate driven quality controller. Config structs in `config.rs` default
// to these values.

// Particle budget
pub const INITIAL_PARTICLE_COUNT: u32 = 100_000;
pub const MIN_PARTICLE_COUNT: u32 = 10_000;
pub const MAX_PARTICLE_COUNT: u32 = 500_000;

// Sphere layout and point sizing
pub const SPHERE_RADIUS: f32 = 2.5;
pub const POINT_MIN_SIZE: f32 = 0.5;
pub const POINT_MAX_SIZE: f32 = 9.0;
pub const POINT_BASE_SIZE: f32 = 1.0;

// Rotation rates are radians per nominal 60 Hz frame
pub const INITIAL_ROTATION_X: f32 = 0.001;
pub const INITIAL_ROTATION_Y: f32 = 0.002;

// Time normalisation: per-frame rates and smoothing factors assume this rate
pub const NOMINAL_FRAME_RATE: f32 = 60.0;

// Automatic hue drift: one full turn per this many seconds at speed 1.0
pub const HUE_CYCLE_PERIOD_SEC: f32 = 60.0;
pub const COLOR_CYCLE_SPEED_MAX: f32 = 2.0;

// Vertex noise displacement
pub const NOISE_STRENGTH: f32 = 0.2;
pub const NOISE_FREQUENCY: f32 = 1.0;
pub const NOISE_TIME_SCALE: f32 = 0.0005;

// Keyframed colour cycle
pub const COLOR_CYCLE_DURATION_SEC: f32 = 60.0;
pub const COLOR_CYCLE_MIN_SPAN: f32 = 1e-6;

// Star palette (blue giant .. orange) and how often each class occurs
pub const STAR_COLORS: [[f32; 3]; 5] = [
    [0.61, 0.70, 1.00], // blue giant
    [0.78, 0.85, 1.00], // white
    [1.00, 0.98, 0.93], // sun-like
    [1.00, 0.93, 0.76], // yellow-white
    [1.00, 0.70, 0.47], // orange
];
pub const STAR_COLOR_DISTRIBUTION: [f32; 5] = [0.15, 0.25, 0.35, 0.15, 0.10];

// Per-point brightness = min + (max - min) * rand^power
pub const BRIGHTNESS_MIN: f32 = 0.3;
pub const BRIGHTNESS_MAX: f32 = 1.0;
pub const BRIGHTNESS_POWER: f32 = 2.5;

// Twinkle and palette blend weights
pub const TWINKLE_SPEED: f32 = 2.0;
pub const TWINKLE_INTENSITY: f32 = 0.3;
pub const STAR_INFLUENCE: f32 = 0.7;
pub const CYCLE_INFLUENCE: f32 = 0.3;

// Quality controller
pub const QUALITY_SCALES: [f32; 4] = [0.4, 0.6, 0.8, 1.0];
pub const QUALITY_SCALE_MIN: f32 = 0.1;
pub const QUALITY_SCALE_MAX: f32 = 1.0;
pub const FPS_CRITICAL: u32 = 30; // below: drop straight to level 0
pub const FPS_LOW: u32 = 40; // below: level 1
pub const FPS_MEDIUM: u32 = 50; // below: level 2
pub const FPS_RECOVER: u32 = 55; // above: climb one level
pub const QUALITY_COOLDOWN_MS: u64 = 5_000;

// Frame-rate sampling window
pub const FPS_WINDOW_SEC: u64 = 3;

// Layers
pub const LAYER_COUNT: usize = 3;
pub const LAYER_FADE_SEC: f32 = 0.5;
pub const LAYER_VISIBLE_EPSILON: f32 = 0.001;
