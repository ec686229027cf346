//! Reactive-core tuning constants.
//!
//! These express intended behavior (smoothing rates, effect hold times,
//! drag sensitivity) and keep magic numbers out of the code.

// Shared exponential smoothing factor for all continuous channels.
// Smaller values = slower, smoother transitions.
pub const SMOOTHING_FACTOR: f32 = 0.05;

// Channel defaults applied at process start
pub const DEFAULT_MORPH_INTENSITY: f32 = 0.3;
pub const DEFAULT_MORPH_FREQUENCY: f32 = 4.0;
pub const DEFAULT_NOISE_FACTOR: f32 = 0.1;
pub const DEFAULT_BLOOM_STRENGTH: f32 = 0.5;
pub const DEFAULT_BLOOM_RADIUS: f32 = 0.2;

// Orbiting satellites around the central sphere
pub const SATELLITE_COUNT: usize = 8;
pub const ORBIT_RADIUS_MIN: f32 = 2.6;
pub const ORBIT_RADIUS_MAX: f32 = 3.4;
pub const ORBIT_SPEED_MIN: f32 = 0.25; // radians per second
pub const ORBIT_SPEED_MAX: f32 = 0.65;
pub const SATELLITE_INCLINATION_MAX: f32 = 0.9; // radians
pub const SATELLITE_EMISSIVE_BASE: f32 = 0.35;
pub const SATELLITE_EMISSIVE_GLOW: f32 = 1.6;

// Self-reverting effect hold times (milliseconds)
pub const GLOW_HOLD_MS: i32 = 500;
pub const PLANET_LIFETIME_MS: i32 = 600;
pub const FLASH_HOLD_MS: i32 = 100;

// Delay before pulling the recording buffer after rec goes 1 -> 0.
// The device exposes no completion signal; this is an approximation.
pub const REC_FETCH_DELAY_MS: i32 = 400;

// UI widget mapping
pub const ROTARY_SENSITIVITY: f32 = 0.005; // value change per pixel
pub const ROTARY_SWEEP_DEGREES: f32 = 270.0;
pub const KNOB_COUNT: usize = 10; // s1..s10
pub const BUTTON_COUNT: usize = 8; // b1..b8
pub const LIGHT_BANK_SIZE: usize = 8; // light1-1..8 / light2-1..8

// Volume fader initial value, dispatched during UI setup (may race device init)
pub const INITIAL_VOLUME: f64 = 0.05;

// Morph sphere tessellation and radius
pub const SPHERE_RADIUS: f32 = 1.5;
pub const SPHERE_SEGMENTS: usize = 64;
pub const SPHERE_RINGS: usize = 32;

// Starfield
pub const STAR_COUNT: usize = 2000;
pub const STAR_VOLUME: f32 = 2000.0;

// Ephemeral planet spawn volume (cube edge length)
pub const PLANET_VOLUME: f32 = 12.0;

// Outline-flash panel pool
pub const GRID_PANEL_COUNT: usize = 6;

// Mesh self-rotation, per-frame increments as in the source patch page
pub const MESH_ROTATION_STEP: f32 = 0.005;

// Camera oscillation
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_SWAY_AMPLITUDE: f32 = 0.5;
pub const CAMERA_SWAY_RATE: f32 = 0.5;
pub const CAMERA_YAW_AMPLITUDE: f32 = 0.1;
pub const CAMERA_YAW_RATE: f32 = 0.3;

// Oscilloscope analyser
pub const ANALYSER_FFT_SIZE: u32 = 512;
