use super::helpers;
use super::uniforms::SkyUniforms;
use duck_core::Camera;
use glam::Vec3;

/// Preetham sky: drawn behind everything each frame, and into the
/// equirectangular capture when the environment is regenerated.
pub(crate) struct SkyPass {
    uniforms: SkyUniforms,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    screen_pipeline: wgpu::RenderPipeline,
    equirect_pipeline: wgpu::RenderPipeline,
}

impl SkyPass {
    pub(crate) fn new(device: &wgpu::Device, sun_direction: Vec3) -> Self {
        let shader = helpers::shader_module(device, "sky_shader", duck_core::SKY_WGSL);
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sky_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sky_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let screen_pipeline = helpers::make_fullscreen_pipeline(
            device,
            "sky_pipeline",
            &layout,
            &shader,
            "fs_sky",
            helpers::HDR_FORMAT,
        );
        let equirect_pipeline = helpers::make_fullscreen_pipeline(
            device,
            "sky_equirect_pipeline",
            &layout,
            &shader,
            "fs_sky_equirect",
            helpers::HDR_FORMAT,
        );
        let uniforms = SkyUniforms::new(sun_direction);
        let buffer = helpers::uniform_buffer(device, "sky_uniforms", &uniforms);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sky_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self {
            uniforms,
            buffer,
            bind_group,
            screen_pipeline,
            equirect_pipeline,
        }
    }

    pub(crate) fn set_sun(&mut self, queue: &wgpu::Queue, direction: Vec3) {
        self.uniforms.set_sun(direction);
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&self.uniforms));
    }

    pub(crate) fn set_camera(&mut self, queue: &wgpu::Queue, camera: &Camera) {
        self.uniforms.set_camera(camera);
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&self.uniforms));
    }

    /// Fill the HDR target with the sky; later passes load over it.
    pub(crate) fn draw(&self, encoder: &mut wgpu::CommandEncoder, hdr_view: &wgpu::TextureView) {
        helpers::blit(encoder, "sky_pass", hdr_view, &self.screen_pipeline, &self.bind_group);
    }

    pub(crate) fn draw_equirect(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
    ) {
        helpers::blit(
            encoder,
            "sky_capture",
            target,
            &self.equirect_pipeline,
            &self.bind_group,
        );
    }
}
