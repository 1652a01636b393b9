//! Persistent scene entities and their placement.

use crate::camera::Camera;
use crate::constants::{
    ROD_COLOR, ROD_POSITION, ROD_SIZE, SKY_SCALE, WATER_EXTENT,
};
use crate::loadable::Loadable;
use crate::mesh::MeshData;
use crate::pick::{ray_aabb, ray_mesh, Aabb, Ray};
use fnv::FnvHashSet;
use glam::{Mat3, Mat4, Quat, Vec3};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeId {
    Water,
    Sky,
    Duck,
    Rod,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Rotate so local +Z faces `target`. Keeps the previous rotation when the
    /// target coincides with the translation.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let mut z = target - self.translation;
        if z.length_squared() < 1e-12 {
            return;
        }
        z = z.normalize();
        let mut x = up.cross(z);
        if x.length_squared() < 1e-12 {
            // up and z are parallel; nudge z off the pole
            if up.z.abs() > 0.9999 {
                z.x += 1e-4;
            } else {
                z.z += 1e-4;
            }
            z = z.normalize();
            x = up.cross(z);
        }
        x = x.normalize();
        let y = z.cross(x);
        self.rotation = Quat::from_mat3(&Mat3::from_cols(x, y, z));
    }
}

/// A mesh-backed node. `mesh` is shared with the renderer for upload.
#[derive(Clone, Debug)]
pub struct MeshNode {
    pub transform: Transform,
    pub mesh: Rc<MeshData>,
    pub emissive: [f32; 3],
}

impl MeshNode {
    pub fn new(mesh: MeshData) -> Self {
        Self {
            transform: Transform::default(),
            mesh: Rc::new(mesh),
            emissive: [0.0; 3],
        }
    }

    pub fn local_bounds(&self) -> &Aabb {
        &self.mesh.bounds
    }

    /// Box test only. Enough for the rod, which is a box.
    pub fn hit_bounds(&self, ray: &Ray) -> Option<f32> {
        let local = ray.to_local(&self.transform.matrix());
        ray_aabb(&local, self.local_bounds())
    }

    /// Triangle-accurate test with a bounds reject first.
    pub fn hit_triangles(&self, ray: &Ray) -> Option<f32> {
        let local = ray.to_local(&self.transform.matrix());
        ray_aabb(&local, self.local_bounds())?;
        ray_mesh(&local, &self.mesh.positions(), &self.mesh.indices)
    }
}

/// Flat ocean plane and the sky dome. Both are drawn by dedicated passes and
/// only carry placement here.
#[derive(Clone, Copy, Debug)]
pub struct Backdrop {
    pub water_extent: f32,
    pub sky_scale: f32,
}

impl Default for Backdrop {
    fn default() -> Self {
        Self {
            water_extent: WATER_EXTENT,
            sky_scale: SKY_SCALE,
        }
    }
}

pub struct SceneGraph {
    pub camera: Camera,
    pub backdrop: Backdrop,
    pub duck: Loadable<MeshNode>,
    pub rod: MeshNode,
    rendered: FnvHashSet<NodeId>,
    draggable: FnvHashSet<NodeId>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        let mut rod = MeshNode::new(MeshData::cuboid(ROD_SIZE, ROD_COLOR));
        rod.transform.translation = ROD_POSITION;
        let rendered = [NodeId::Water, NodeId::Sky].into_iter().collect();
        let draggable = [NodeId::Rod].into_iter().collect();
        Self {
            camera: Camera::default(),
            backdrop: Backdrop::default(),
            duck: Loadable::Pending,
            rod,
            rendered,
            draggable,
        }
    }

    /// Resolve the duck slot once the model load settles. A loaded duck joins
    /// the rendered set.
    pub fn attach_duck<E: std::fmt::Display>(&mut self, result: Result<MeshData, E>) -> bool {
        let settled = self.duck.resolve(result.map(MeshNode::new));
        if self.duck.is_loaded() {
            self.rendered.insert(NodeId::Duck);
        }
        settled
    }

    /// Toggle rod membership. The node and its GPU resources stay alive.
    pub fn set_rod_attached(&mut self, on: bool) {
        if on {
            self.rendered.insert(NodeId::Rod);
        } else {
            self.rendered.remove(&NodeId::Rod);
        }
    }

    pub fn is_rendered(&self, id: NodeId) -> bool {
        self.rendered.contains(&id)
    }

    pub fn is_draggable(&self, id: NodeId) -> bool {
        self.draggable.contains(&id) && self.is_rendered(id)
    }

    pub fn duck_position(&self) -> Option<Vec3> {
        self.duck.get().map(|d| d.transform.translation)
    }

    /// Ray test against the duck's triangles. `None` while the model is absent.
    pub fn pick_duck(&self, ray: &Ray) -> Option<f32> {
        self.duck.get()?.hit_triangles(ray)
    }

    /// Nearest draggable node under the ray.
    pub fn pick_draggable(&self, ray: &Ray) -> Option<(NodeId, f32)> {
        let mut best = None::<(NodeId, f32)>;
        for &id in &self.draggable {
            if !self.is_rendered(id) {
                continue;
            }
            let hit = match id {
                NodeId::Rod => self.rod.hit_bounds(ray),
                NodeId::Duck => self.duck.get().and_then(|d| d.hit_triangles(ray)),
                _ => None,
            };
            if let Some(t) = hit {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((id, t)),
                }
            }
        }
        best
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut MeshNode> {
        match id {
            NodeId::Rod => Some(&mut self.rod),
            NodeId::Duck => self.duck.get_mut(),
            _ => None,
        }
    }
}
