//! Pointer tracking, click picking and drag handling.
//!
//! Input arrives already normalised to device coordinates; the DOM side only
//! translates events and executes the returned `SceneEvent`s.

use crate::anim::{SceneEvent, SceneEvents};
use crate::constants::ROD_HIGHLIGHT;
use crate::pick::{ray_plane, Ray};
use crate::scene::{NodeId, SceneGraph};
use glam::{Vec2, Vec3};

/// Pointer position in normalized device coordinates (-1..1, +y up).
#[inline]
pub fn pointer_ndc(x_css: f32, y_css: f32, width_css: f32, height_css: f32) -> Vec2 {
    if width_css <= 0.0 || height_css <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (x_css / width_css) * 2.0 - 1.0,
        -(y_css / height_css) * 2.0 + 1.0,
    )
}

#[derive(Clone, Copy, Debug)]
struct DragSession {
    node: NodeId,
    plane_point: Vec3,
    plane_normal: Vec3,
    offset: Vec3,
}

#[derive(Clone, Debug, Default)]
pub struct Interaction {
    pointer: Vec2,
    drag: Option<DragSession>,
}

impl Interaction {
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn dragging(&self) -> Option<NodeId> {
        self.drag.map(|d| d.node)
    }

    fn ray(&self, scene: &SceneGraph) -> Ray {
        scene.camera.ray_through(self.pointer)
    }

    /// Store the pointer; while dragging, slide the node along its plane.
    pub fn pointer_move(&mut self, ndc: Vec2, scene: &mut SceneGraph) {
        self.pointer = ndc;
        let Some(drag) = self.drag else {
            return;
        };
        let ray = self.ray(scene);
        if let Some(t) = ray_plane(&ray, drag.plane_point, drag.plane_normal) {
            let hit = ray.at(t);
            if let Some(node) = scene.node_mut(drag.node) {
                node.transform.translation = hit - drag.offset;
            }
        }
    }

    /// Click on the duck plays the sound and forces an extra render.
    pub fn click(&self, scene: &SceneGraph, out: &mut SceneEvents) {
        if scene.pick_duck(&self.ray(scene)).is_some() {
            out.push(SceneEvent::PlaySound);
            out.push(SceneEvent::RenderNow);
        }
    }

    /// Start a drag if a draggable node is under the pointer.
    pub fn pointer_down(&mut self, scene: &mut SceneGraph) -> bool {
        let ray = self.ray(scene);
        let Some((id, _)) = scene.pick_draggable(&ray) else {
            return false;
        };
        let plane_normal = scene.camera.forward();
        let Some(node) = scene.node_mut(id) else {
            return false;
        };
        let plane_point = node.transform.translation;
        let offset = ray_plane(&ray, plane_point, plane_normal)
            .map(|t| ray.at(t) - plane_point)
            .unwrap_or(Vec3::ZERO);
        node.emissive = ROD_HIGHLIGHT;
        self.drag = Some(DragSession {
            node: id,
            plane_point,
            plane_normal,
            offset,
        });
        log::info!("[pointer] drag start on {:?}", id);
        true
    }

    /// Finish a drag: clear the highlight and hard-stop the sound.
    pub fn pointer_up(&mut self, scene: &mut SceneGraph, out: &mut SceneEvents) {
        if let Some(drag) = self.drag.take() {
            if let Some(node) = scene.node_mut(drag.node) {
                node.emissive = [0.0; 3];
            }
            out.push(SceneEvent::StopSound);
            log::info!("[pointer] drag end on {:?}", drag.node);
        }
    }
}
