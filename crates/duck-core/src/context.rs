//! Explicit scene context shared by every component.
//!
//! Owns the parameters, scene graph, sun tracker, animation loop, interaction
//! state and the speech slot. The frontend holds one behind `Rc<RefCell<_>>`
//! and executes the `SceneEvent`s each call hands back.

use crate::anim::{AnimationLoop, SceneEvent, SceneEvents};
use crate::config::SceneConfig;
use crate::interact::Interaction;
use crate::mesh::MeshData;
use crate::params::Parameters;
use crate::scene::{NodeId, SceneGraph};
use crate::speech::{UtteranceSlot, WakeWords};
use crate::sun::SunTracker;
use glam::{Vec2, Vec3};

pub struct SceneContext {
    pub params: Parameters,
    pub scene: SceneGraph,
    pub sun: SunTracker,
    pub animation: AnimationLoop,
    pub interaction: Interaction,
    pub utterances: UtteranceSlot,
    pub wake_words: WakeWords,
}

impl SceneContext {
    pub fn new(config: &SceneConfig) -> Self {
        let params = config.initial;
        let mut scene = SceneGraph::new();
        scene.set_rod_attached(params.has_stick);
        Self {
            params,
            scene,
            sun: SunTracker::new(params.elevation, params.azimuth),
            animation: AnimationLoop::new(),
            interaction: Interaction::default(),
            utterances: UtteranceSlot::new(),
            wake_words: WakeWords::new(&config.wake_words),
        }
    }

    pub fn sun_direction(&self) -> Vec3 {
        self.sun.direction()
    }

    pub fn tick(&mut self, elapsed_sec: f32) -> SceneEvents {
        let mut out = SceneEvents::new();
        self.animation.tick(
            elapsed_sec,
            &mut self.scene,
            &self.utterances,
            &self.wake_words,
            &mut out,
        );
        out
    }

    /// Hiding the rod mid-drag ends the drag as a release would.
    pub fn set_has_stick(&mut self, on: bool) -> SceneEvents {
        self.params.set_has_stick(on);
        self.scene.set_rod_attached(self.params.has_stick);
        let mut out = SceneEvents::new();
        if !self.params.has_stick && self.interaction.dragging() == Some(NodeId::Rod) {
            self.interaction.pointer_up(&mut self.scene, &mut out);
        }
        out
    }

    pub fn set_elevation(&mut self, deg: f32) -> SceneEvents {
        self.params.set_elevation(deg);
        self.sun_changed()
    }

    pub fn set_azimuth(&mut self, deg: f32) -> SceneEvents {
        self.params.set_azimuth(deg);
        self.sun_changed()
    }

    fn sun_changed(&mut self) -> SceneEvents {
        let dir = self.sun.update(self.params.elevation, self.params.azimuth);
        let mut out = SceneEvents::new();
        out.push(SceneEvent::SunChanged(dir));
        out
    }

    pub fn attach_duck<E: std::fmt::Display>(&mut self, result: Result<MeshData, E>) {
        match &result {
            Ok(_) => log::info!("[assets] duck model ready"),
            Err(e) => log::error!("[assets] duck model failed: {}", e),
        }
        self.scene.attach_duck(result);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.scene.camera.set_viewport(width, height);
    }

    pub fn pointer_move(&mut self, ndc: Vec2) {
        self.interaction.pointer_move(ndc, &mut self.scene);
    }

    pub fn pointer_down(&mut self) -> bool {
        self.interaction.pointer_down(&mut self.scene)
    }

    pub fn pointer_up(&mut self) -> SceneEvents {
        let mut out = SceneEvents::new();
        self.interaction.pointer_up(&mut self.scene, &mut out);
        out
    }

    pub fn click(&self) -> SceneEvents {
        let mut out = SceneEvents::new();
        self.interaction.click(&self.scene, &mut out);
        out
    }
}
