//! CPU-side mesh and texture data.
//!
//! The duck arrives as a binary glTF; the rod is a generated cuboid. Both end
//! up as the same interleaved `Vertex` list the renderer uploads as is, and the
//! same positions/indices feed click picking.

use crate::error::{MeshError, TextureError};
use crate::pick::Aabb;
use glam::{Mat4, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Tightly packed RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    /// Decode a PNG or JPEG file (e.g. the water normal map).
    pub fn decode(bytes: &[u8]) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            width,
            height,
            rgba: img.into_raw(),
        })
    }

    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }

    fn from_gltf(data: &gltf::image::Data) -> Result<Self, TextureError> {
        use gltf::image::Format;
        let px = data.width as usize * data.height as usize;
        let rgba = match data.format {
            Format::R8G8B8A8 => data.pixels.clone(),
            Format::R8G8B8 => {
                let mut out = Vec::with_capacity(px * 4);
                for c in data.pixels.chunks_exact(3) {
                    out.extend_from_slice(&[c[0], c[1], c[2], 255]);
                }
                out
            }
            Format::R8G8 => {
                let mut out = Vec::with_capacity(px * 4);
                for c in data.pixels.chunks_exact(2) {
                    out.extend_from_slice(&[c[0], c[0], c[0], c[1]]);
                }
                out
            }
            Format::R8 => {
                let mut out = Vec::with_capacity(px * 4);
                for &l in &data.pixels {
                    out.extend_from_slice(&[l, l, l, 255]);
                }
                out
            }
            other => return Err(TextureError::UnsupportedFormat(other)),
        };
        Ok(Self {
            width: data.width,
            height: data.height,
            rgba,
        })
    }
}

#[derive(Clone, Debug)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
    pub base_color_texture: Option<TextureData>,
    pub bounds: Aabb,
}

impl MeshData {
    /// Axis-aligned box centred on the origin, 24 vertices so every face gets
    /// its own normal.
    pub fn cuboid(size: Vec3, color: [f32; 3]) -> Self {
        let h = size * 0.5;
        // (normal, tangent u, tangent v)
        let faces: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];
        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (n, u, v) in faces {
            let base = vertices.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let p = (n + u * su + v * sv) * h;
                vertices.push(Vertex {
                    position: p.to_array(),
                    normal: n.to_array(),
                    uv: [(su + 1.0) * 0.5, 1.0 - (sv + 1.0) * 0.5],
                });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        Self {
            vertices,
            indices,
            base_color: [color[0], color[1], color[2], 1.0],
            base_color_texture: None,
            bounds: Aabb::centered(size),
        }
    }

    /// Flatten every mesh primitive of the default scene of a `.glb` into one
    /// list, applying node transforms.
    pub fn from_gltf_slice(bytes: &[u8]) -> Result<Self, MeshError> {
        let (doc, buffers, images) = gltf::import_slice(bytes)?;
        let mut out = MeshData {
            vertices: Vec::new(),
            indices: Vec::new(),
            base_color: [1.0; 4],
            base_color_texture: None,
            bounds: Aabb::centered(Vec3::ZERO),
        };
        let scene = doc
            .default_scene()
            .or_else(|| doc.scenes().next())
            .ok_or(MeshError::Empty)?;
        for node in scene.nodes() {
            collect_node(&node, &buffers, &images, &Mat4::IDENTITY, &mut out)?;
        }
        out.bounds = Aabb::from_points(out.vertices.iter().map(|v| Vec3::from(v.position)))
            .ok_or(MeshError::Empty)?;
        if out.indices.is_empty() {
            return Err(MeshError::Empty);
        }
        log::info!(
            "[mesh] glTF: {} vertices, {} triangles, textured={}",
            out.vertices.len(),
            out.indices.len() / 3,
            out.base_color_texture.is_some()
        );
        Ok(out)
    }

    /// Uniformly rescale so the model is `height` tall and rests its base on
    /// the local origin, centred in x/z.
    pub fn fit_height(&mut self, height: f32) {
        let size = self.bounds.size();
        if size.y <= f32::EPSILON {
            return;
        }
        let s = height / size.y;
        let c = self.bounds.center();
        let offset = Vec3::new(-c.x, -self.bounds.min.y, -c.z);
        for v in &mut self.vertices {
            v.position = ((Vec3::from(v.position) + offset) * s).to_array();
        }
        self.bounds = Aabb {
            min: (self.bounds.min + offset) * s,
            max: (self.bounds.max + offset) * s,
        };
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.vertices.iter().map(|v| Vec3::from(v.position)).collect()
    }
}

fn collect_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    images: &[gltf::image::Data],
    parent: &Mat4,
    out: &mut MeshData,
) -> Result<(), MeshError> {
    let world = *parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        let normal_mat = world.inverse().transpose();
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }
            let reader = primitive.reader(|b| buffers.get(b.index()).map(|d| &d.0[..]));
            let positions: Vec<Vec3> = reader
                .read_positions()
                .ok_or(MeshError::MissingPositions)?
                .map(|p| world.transform_point3(Vec3::from(p)))
                .collect();
            let normals: Vec<Vec3> = match reader.read_normals() {
                Some(n) => n
                    .map(|n| normal_mat.transform_vector3(Vec3::from(n)).normalize_or_zero())
                    .collect(),
                None => vec![Vec3::Y; positions.len()],
            };
            let uvs: Vec<[f32; 2]> = match reader.read_tex_coords(0) {
                Some(t) => t.into_f32().collect(),
                None => vec![[0.0, 0.0]; positions.len()],
            };
            let base = out.vertices.len() as u32;
            for (i, p) in positions.iter().enumerate() {
                out.vertices.push(Vertex {
                    position: p.to_array(),
                    normal: normals.get(i).copied().unwrap_or(Vec3::Y).to_array(),
                    uv: uvs.get(i).copied().unwrap_or([0.0, 0.0]),
                });
            }
            match reader.read_indices() {
                Some(idx) => out.indices.extend(idx.into_u32().map(|i| base + i)),
                None => out.indices.extend(base..base + positions.len() as u32),
            }

            // First material wins; the duck is a single-material model.
            if out.base_color_texture.is_none() {
                let pbr = primitive.material().pbr_metallic_roughness();
                out.base_color = pbr.base_color_factor();
                if let Some(info) = pbr.base_color_texture() {
                    let src = info.texture().source().index();
                    match images.get(src).map(TextureData::from_gltf) {
                        Some(Ok(tex)) => out.base_color_texture = Some(tex),
                        Some(Err(e)) => log::warn!("[mesh] base color texture skipped: {}", e),
                        None => {}
                    }
                }
            }
        }
    }
    for child in node.children() {
        collect_node(&child, buffers, images, &world, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_has_closed_box_topology() {
        let m = MeshData::cuboid(Vec3::new(2.0, 4.0, 6.0), [1.0, 0.0, 0.0]);
        assert_eq!(m.vertices.len(), 24);
        assert_eq!(m.indices.len(), 36);
        assert_eq!(m.bounds.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(m.bounds.max, Vec3::new(1.0, 2.0, 3.0));
        for v in &m.vertices {
            let p = Vec3::from(v.position);
            let n = Vec3::from(v.normal);
            // every vertex lies on the face its normal names
            assert!((p.dot(n).abs() - (n.abs() * Vec3::new(1.0, 2.0, 3.0)).length()).abs() < 1e-5);
        }
    }

    #[test]
    fn fit_height_rescales_and_grounds() {
        let mut m = MeshData::cuboid(Vec3::new(2.0, 4.0, 2.0), [1.0; 3]);
        m.fit_height(12.0);
        assert!((m.bounds.size().y - 12.0).abs() < 1e-4);
        assert!(m.bounds.min.y.abs() < 1e-5);
        assert!((m.bounds.size().x - 6.0).abs() < 1e-4);
    }

    #[test]
    fn oversized_gltf_image_dimensions_do_not_overflow() {
        let data = gltf::image::Data {
            pixels: Vec::new(),
            format: gltf::image::Format::R8G8B8A8,
            width: 70_000,
            height: 70_000,
        };
        let tex = TextureData::from_gltf(&data).expect("rgba passes through");
        assert_eq!((tex.width, tex.height), (70_000, 70_000));
    }

    #[test]
    fn gltf_rgb_image_gains_opaque_alpha() {
        let data = gltf::image::Data {
            pixels: vec![10, 20, 30, 40, 50, 60],
            format: gltf::image::Format::R8G8B8,
            width: 2,
            height: 1,
        };
        let tex = TextureData::from_gltf(&data).expect("rgb converts");
        assert_eq!(tex.rgba, vec![10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(MeshData::from_gltf_slice(b"not a gltf").is_err());
        assert!(TextureData::decode(b"not an image").is_err());
    }
}
