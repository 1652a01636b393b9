use crate::constants::{
    DUCK_BASELINE_Y, DUCK_BOB_AMPLITUDE, DUCK_TILT_AMPLITUDE, DUCK_TILT_RATE_X, DUCK_TILT_RATE_Z,
    ROD_TARGET_HEIGHT, WATER_TIME_STEP,
};
use crate::scene::SceneGraph;
use crate::speech::{UtteranceSlot, WakeWords};
use glam::{EulerRot, Quat, Vec3};
use smallvec::SmallVec;

/// Side effects requested by the scene logic and carried out by the frontend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneEvent {
    PlaySound,
    StopSound,
    /// Render immediately, outside the regular frame callback.
    RenderNow,
    SunChanged(Vec3),
}

pub type SceneEvents = SmallVec<[SceneEvent; 4]>;

/// Duck height for wall-clock time `t` seconds.
#[inline]
pub fn duck_height(t: f32) -> f32 {
    t.sin() * DUCK_BOB_AMPLITUDE + DUCK_BASELINE_Y
}

/// Idle sway: small sinusoidal tilt around x and z.
#[inline]
pub fn duck_tilt(t: f32) -> Quat {
    let rx = (t * DUCK_TILT_RATE_X).sin() * DUCK_TILT_AMPLITUDE;
    let rz = (t * DUCK_TILT_RATE_Z).sin() * DUCK_TILT_AMPLITUDE;
    Quat::from_euler(EulerRot::XYZ, rx, 0.0, rz)
}

/// Per-frame state machine. There is one state, running; no pause or stop.
#[derive(Clone, Debug, Default)]
pub struct AnimationLoop {
    water_time: f32,
    frames: u64,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Water shader time. Advances by a fixed 1/60 per tick.
    pub fn water_time(&self) -> f32 {
        self.water_time
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Steps 1-4 of a frame; the caller renders afterwards.
    pub fn tick(
        &mut self,
        elapsed_sec: f32,
        scene: &mut SceneGraph,
        utterances: &UtteranceSlot,
        wake_words: &WakeWords,
        out: &mut SceneEvents,
    ) {
        self.frames += 1;
        self.water_time += WATER_TIME_STEP;

        let t = elapsed_sec;
        if let Some(duck) = scene.duck.get_mut() {
            duck.transform.translation.y = duck_height(t);
            duck.transform.rotation = duck_tilt(t);
        }

        if let Some(duck_pos) = scene.duck_position() {
            let target = duck_pos + Vec3::Y * ROD_TARGET_HEIGHT;
            scene.rod.transform.look_at(target, Vec3::Y);
        }

        if let Some(text) = utterances.take() {
            if wake_words.matches(&text) {
                log::info!("[speech] heard \"{}\"", text);
                out.push(SceneEvent::PlaySound);
            }
        }
    }
}
