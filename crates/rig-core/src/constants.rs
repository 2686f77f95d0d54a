use glam::Vec3;

// Default tuning for the pointer-driven camera rig.

// Input
pub const DEFAULT_SENSITIVITY: f32 = 0.2; // raw sample range is [-s, s] per axis
pub const DEFAULT_THROTTLE_MS: f64 = 16.0; // roughly one 60 Hz frame

// Smoothing
pub const DEFAULT_SMOOTHING_FACTOR: f32 = 0.08; // fraction of remaining distance per tick
pub const SMOOTHING_EPSILON: f32 = 1e-3; // per-axis distance below which the filter holds

// Camera
pub const DEFAULT_POSITION_FACTOR: f32 = 0.1;
pub const DEFAULT_ORIENTATION_FACTOR: f32 = DEFAULT_POSITION_FACTOR * 0.5;

// Parallax rest pose
pub const DEFAULT_BASE_POSITION: Vec3 = Vec3::new(0.0, 0.0, 5.0);
pub const DEFAULT_BASE_LOOK_AT: Vec3 = Vec3::ZERO;
