use super::helpers;
use super::uniforms::PostUniforms;

/// Separable blur (environment filtering) and the ACES tone-map composite.
/// Both sample one texture with one uniform block, so they share a layout.
pub(crate) struct PostPass {
    pub(crate) bgl: wgpu::BindGroupLayout,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    tonemap_pipeline: wgpu::RenderPipeline,
    tonemap_uniforms: wgpu::Buffer,
    tonemap_bg: wgpu::BindGroup,
}

impl PostPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        swap_format: wgpu::TextureFormat,
        hdr_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let shader = helpers::shader_module(device, "post_shader", duck_core::POST_WGSL);
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl"),
            entries: &[
                helpers::texture_entry(0),
                helpers::sampler_entry(1),
                helpers::uniform_entry(2, wgpu::ShaderStages::FRAGMENT),
            ],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("post_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let blur_pipeline = helpers::make_fullscreen_pipeline(
            device,
            "blur_pipeline",
            &layout,
            &shader,
            "fs_blur",
            helpers::HDR_FORMAT,
        );
        let tonemap_pipeline = helpers::make_fullscreen_pipeline(
            device,
            "tonemap_pipeline",
            &layout,
            &shader,
            "fs_tonemap",
            swap_format,
        );
        let tonemap_uniforms = helpers::uniform_buffer(
            device,
            "tonemap_uniforms",
            &PostUniforms::tonemap(!swap_format.is_srgb()),
        );
        let tonemap_bg = source_bind_group(
            device,
            &bgl,
            "tonemap_bg",
            hdr_view,
            sampler,
            &tonemap_uniforms,
        );
        Self {
            bgl,
            blur_pipeline,
            tonemap_pipeline,
            tonemap_uniforms,
            tonemap_bg,
        }
    }

    /// The HDR target was recreated.
    pub(crate) fn rebind_hdr(
        &mut self,
        device: &wgpu::Device,
        hdr_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) {
        self.tonemap_bg = source_bind_group(
            device,
            &self.bgl,
            "tonemap_bg",
            hdr_view,
            sampler,
            &self.tonemap_uniforms,
        );
    }

    pub(crate) fn tonemap(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        helpers::blit(
            encoder,
            "tonemap",
            target,
            &self.tonemap_pipeline,
            &self.tonemap_bg,
        );
    }
}

pub(crate) fn source_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    label: &str,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    uniforms: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: uniforms.as_entire_binding(),
            },
        ],
    })
}
