use glam::Vec3;

// Shared scene tuning constants used by the web frontend and host tests.

// Camera
pub const CAMERA_FOVY_DEG: f32 = 55.0;
pub const CAMERA_ZNEAR: f32 = 1.0;
pub const CAMERA_ZFAR: f32 = 20_000.0;
pub const CAMERA_EYE: Vec3 = Vec3::new(30.0, 30.0, 100.0);
pub const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 10.0, 0.0);

// Water plane and sky dome
pub const WATER_EXTENT: f32 = 10_000.0; // side length of the square ocean plane
pub const SKY_SCALE: f32 = 10_000.0;
pub const WATER_COLOR: [f32; 3] = [0.0, 0.118, 0.059]; // 0x001e0f
pub const SUN_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const DEFAULT_DISTORTION_SCALE: f32 = 3.7;
pub const DEFAULT_WATER_SIZE: f32 = 1.0;
pub const DISTORTION_SCALE_RANGE: (f32, f32) = (0.0, 8.0);
pub const WATER_SIZE_RANGE: (f32, f32) = (0.1, 10.0);

// Sky scattering (turbidity, rayleigh, mie coefficient, mie directional g)
pub const SKY_TURBIDITY: f32 = 10.0;
pub const SKY_RAYLEIGH: f32 = 2.0;
pub const SKY_MIE_COEFFICIENT: f32 = 0.005;
pub const SKY_MIE_DIRECTIONAL_G: f32 = 0.8;

// Post
pub const TONE_MAPPING_EXPOSURE: f32 = 0.5;

// Sun parameter ranges and defaults (degrees)
pub const DEFAULT_ELEVATION_DEG: f32 = 2.0;
pub const DEFAULT_AZIMUTH_DEG: f32 = 180.0;
pub const ELEVATION_RANGE: (f32, f32) = (0.0, 90.0);
pub const AZIMUTH_RANGE: (f32, f32) = (-180.0, 180.0);

// Animation
pub const WATER_TIME_STEP: f32 = 1.0 / 60.0; // fixed per-tick advance, not wall-clock synced
pub const DUCK_BASELINE_Y: f32 = 1.0;
pub const DUCK_BOB_AMPLITUDE: f32 = 4.0;
pub const DUCK_TILT_AMPLITUDE: f32 = 0.1; // radians
pub const DUCK_TILT_RATE_X: f32 = 0.5;
pub const DUCK_TILT_RATE_Z: f32 = 0.51;
pub const DUCK_TARGET_HEIGHT: f32 = 12.0; // loaded model is rescaled to this height

// Rod
pub const ROD_SIZE: Vec3 = Vec3::new(0.6, 0.6, 24.0);
pub const ROD_POSITION: Vec3 = Vec3::new(25.0, 20.0, 20.0);
pub const ROD_COLOR: [f32; 3] = [0.55, 0.35, 0.2];
pub const ROD_TARGET_HEIGHT: f32 = 10.0; // look-at point above the duck
pub const ROD_HIGHLIGHT: [f32; 3] = [0.667, 0.667, 0.667]; // 0xaaaaaa

// Sound
pub const VOLUME_BASE: f32 = 0.5;
pub const VOLUME_STEPS: u32 = 5; // offsets 0.0..=0.4 in tenths

// Speech
pub const DEFAULT_WAKE_WORDS: &[&str] = &["duck", "quack"];
pub const DEFAULT_SPEECH_LANG: &str = "en-US";

// Assets
pub const DUCK_MODEL_PATH: &str = "assets/models/rubber_duck.glb";
pub const WATER_NORMALS_PATH: &str = "assets/textures/waternormals.jpg";
pub const QUACK_SOUND_PATH: &str = "assets/sounds/quack.mp3";

// Environment capture
pub const ENV_CAPTURE_SIZE: (u32, u32) = (512, 256);
pub const ENV_FILTERED_SIZE: (u32, u32) = (64, 32);
