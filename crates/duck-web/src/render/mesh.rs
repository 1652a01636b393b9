use super::helpers;
use super::uniforms::{MeshGlobals, ObjectUniforms};
use duck_core::{Camera, MeshData, MeshNode, TextureData, Vertex};
use glam::Vec3;
use wgpu::util::DeviceExt;

const WHITE: [u8; 4] = [255, 255, 255, 255];

/// GPU copy of one `MeshData`, with its own per-object uniform block.
pub(crate) struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    object_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    // keeps the base colour texture alive alongside the bind group
    _texture: Option<wgpu::Texture>,
    base_color: [f32; 4],
    textured: bool,
}

impl GpuMesh {
    /// Push the node's current placement and highlight.
    pub(crate) fn update(&self, queue: &wgpu::Queue, node: &MeshNode) {
        let u = ObjectUniforms::new(
            node.transform.matrix(),
            self.base_color,
            node.emissive,
            self.textured,
        );
        queue.write_buffer(&self.object_buffer, 0, bytemuck::bytes_of(&u));
    }
}

/// Lit meshes (duck and rod).
pub(crate) struct MeshPass {
    pipeline: wgpu::RenderPipeline,
    globals_bgl: wgpu::BindGroupLayout,
    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    object_bgl: wgpu::BindGroupLayout,
    white_view: wgpu::TextureView,
    repeat_sampler: wgpu::Sampler,
}

impl MeshPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        camera: &Camera,
        sun_direction: Vec3,
        env_view: &wgpu::TextureView,
        env_sampler: &wgpu::Sampler,
    ) -> Self {
        let shader = helpers::shader_module(device, "mesh_shader", duck_core::MESH_WGSL);
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_globals_bgl"),
            entries: &[
                helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                helpers::texture_entry(1),
                helpers::sampler_entry(2),
            ],
        });
        let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_object_bgl"),
            entries: &[
                helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                helpers::texture_entry(1),
                helpers::sampler_entry(2),
            ],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pl"),
            bind_group_layouts: &[&globals_bgl, &object_bgl],
            push_constant_ranges: &[],
        });
        let attributes = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_mesh"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &attributes,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: helpers::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_mesh"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: helpers::HDR_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let globals_buffer = helpers::uniform_buffer(
            device,
            "mesh_globals",
            &MeshGlobals::new(camera, sun_direction),
        );
        let globals_bg =
            globals_bind_group(device, &globals_bgl, &globals_buffer, env_view, env_sampler);
        let (_, white_view) = helpers::upload_rgba_texture(
            device,
            queue,
            "white_1x1",
            &TextureData::solid(WHITE),
            wgpu::TextureFormat::Rgba8UnormSrgb,
        );
        let repeat_sampler = helpers::sampler(device, "mesh_sampler", wgpu::AddressMode::Repeat);
        Self {
            pipeline,
            globals_bgl,
            globals_buffer,
            globals_bg,
            object_bgl,
            white_view,
            repeat_sampler,
        }
    }

    /// The filtered environment was regenerated.
    pub(crate) fn rebind_env(
        &mut self,
        device: &wgpu::Device,
        env_view: &wgpu::TextureView,
        env_sampler: &wgpu::Sampler,
    ) {
        self.globals_bg = globals_bind_group(
            device,
            &self.globals_bgl,
            &self.globals_buffer,
            env_view,
            env_sampler,
        );
    }

    pub(crate) fn update_globals(&self, queue: &wgpu::Queue, camera: &Camera, sun_direction: Vec3) {
        let g = MeshGlobals::new(camera, sun_direction);
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&g));
    }

    pub(crate) fn upload(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        mesh: &MeshData,
    ) -> GpuMesh {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let textured = mesh.base_color_texture.is_some();
        let object_buffer = helpers::uniform_buffer(
            device,
            label,
            &ObjectUniforms::new(glam::Mat4::IDENTITY, mesh.base_color, [0.0; 3], textured),
        );
        let texture = mesh.base_color_texture.as_ref().map(|data| {
            helpers::upload_rgba_texture(
                device,
                queue,
                label,
                data,
                wgpu::TextureFormat::Rgba8UnormSrgb,
            )
        });
        let view = texture.as_ref().map(|(_, v)| v).unwrap_or(&self.white_view);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.object_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: object_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.repeat_sampler),
                },
            ],
        });
        log::info!(
            "[render] uploaded {}: {} vertices, textured={}",
            label,
            mesh.vertices.len(),
            textured
        );
        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            object_buffer,
            bind_group,
            _texture: texture.map(|(t, _)| t),
            base_color: mesh.base_color,
            textured,
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, meshes: &[&GpuMesh]) {
        if meshes.is_empty() {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.globals_bg, &[]);
        for m in meshes {
            rpass.set_bind_group(1, &m.bind_group, &[]);
            rpass.set_vertex_buffer(0, m.vertex_buffer.slice(..));
            rpass.set_index_buffer(m.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..m.index_count, 0, 0..1);
        }
    }
}

fn globals_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    env_view: &wgpu::TextureView,
    env_sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("mesh_globals_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(env_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(env_sampler),
            },
        ],
    })
}
