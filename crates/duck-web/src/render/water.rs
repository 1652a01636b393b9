use super::helpers;
use super::uniforms::WaterUniforms;
use duck_core::{Camera, TextureData};
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

const FLAT_NORMAL: [u8; 4] = [128, 128, 255, 255];

/// Ocean plane. Reflects the environment capture; normals come from the
/// scrolling normal map once it loads, flat until then.
pub(crate) struct WaterPass {
    uniforms: Rc<RefCell<WaterUniforms>>,
    buffer: wgpu::Buffer,
    bgl: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    pipeline: wgpu::RenderPipeline,
    normal_tex: wgpu::Texture,
    normal_view: wgpu::TextureView,
    repeat_sampler: wgpu::Sampler,
}

impl WaterPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        sun_direction: Vec3,
        env_view: &wgpu::TextureView,
        env_sampler: &wgpu::Sampler,
    ) -> Self {
        let shader = helpers::shader_module(device, "water_shader", duck_core::WATER_WGSL);
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("water_bgl"),
            entries: &[
                helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                helpers::texture_entry(1),
                helpers::sampler_entry(2),
                helpers::texture_entry(3),
                helpers::sampler_entry(4),
            ],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("water_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("water_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_water"),
                buffers: &[],
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
                entry_point: Some("fs_water"),
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
        let uniforms = WaterUniforms::new(sun_direction);
        let buffer = helpers::uniform_buffer(device, "water_uniforms", &uniforms);
        let repeat_sampler = helpers::sampler(device, "water_normal_sampler", wgpu::AddressMode::Repeat);
        let (normal_tex, normal_view) = helpers::upload_rgba_texture(
            device,
            queue,
            "water_normals_flat",
            &TextureData::solid(FLAT_NORMAL),
            wgpu::TextureFormat::Rgba8Unorm,
        );
        let bind_group = make_bind_group(
            device,
            &bgl,
            &buffer,
            &normal_view,
            &repeat_sampler,
            env_view,
            env_sampler,
        );
        Self {
            uniforms: Rc::new(RefCell::new(uniforms)),
            buffer,
            bgl,
            bind_group,
            pipeline,
            normal_tex,
            normal_view,
            repeat_sampler,
        }
    }

    /// Handle the debug panel edits directly.
    pub(crate) fn uniforms(&self) -> Rc<RefCell<WaterUniforms>> {
        self.uniforms.clone()
    }

    pub(crate) fn set_sun(&self, direction: Vec3) {
        self.uniforms.borrow_mut().set_sun(direction);
    }

    pub(crate) fn set_normal_map(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &TextureData,
        env_view: &wgpu::TextureView,
        env_sampler: &wgpu::Sampler,
    ) {
        self.normal_tex.destroy();
        (self.normal_tex, self.normal_view) = helpers::upload_rgba_texture(
            device,
            queue,
            "water_normals",
            data,
            wgpu::TextureFormat::Rgba8Unorm,
        );
        self.rebind(device, env_view, env_sampler);
    }

    /// The environment capture was regenerated.
    pub(crate) fn rebind(
        &mut self,
        device: &wgpu::Device,
        env_view: &wgpu::TextureView,
        env_sampler: &wgpu::Sampler,
    ) {
        self.bind_group = make_bind_group(
            device,
            &self.bgl,
            &self.buffer,
            &self.normal_view,
            &self.repeat_sampler,
            env_view,
            env_sampler,
        );
    }

    pub(crate) fn update(&self, queue: &wgpu::Queue, camera: &Camera, time: f32) {
        let mut u = self.uniforms.borrow_mut();
        u.set_camera(camera);
        u.set_time(time);
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&*u));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.draw(0..6, 0..1);
    }
}

fn make_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    normal_view: &wgpu::TextureView,
    normal_sampler: &wgpu::Sampler,
    env_view: &wgpu::TextureView,
    env_sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("water_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(normal_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(normal_sampler),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::TextureView(env_view),
            },
            wgpu::BindGroupEntry {
                binding: 4,
                resource: wgpu::BindingResource::Sampler(env_sampler),
            },
        ],
    })
}
