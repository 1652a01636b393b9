use super::generation::Generational;
use super::helpers;
use super::post::{source_bind_group, PostPass};
use super::sky::SkyPass;
use super::uniforms::PostUniforms;
use duck_core::{ENV_CAPTURE_SIZE, ENV_FILTERED_SIZE};

struct EnvTextures {
    capture: wgpu::Texture,
    capture_view: wgpu::TextureView,
    scratch: wgpu::Texture,
    scratch_view: wgpu::TextureView,
    filtered: wgpu::Texture,
    filtered_view: wgpu::TextureView,
}

impl EnvTextures {
    fn new(device: &wgpu::Device) -> Self {
        let usage = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let (capture, capture_view) = helpers::create_texture(
            device,
            "env_capture",
            ENV_CAPTURE_SIZE.0,
            ENV_CAPTURE_SIZE.1,
            helpers::HDR_FORMAT,
            usage,
        );
        let (scratch, scratch_view) = helpers::create_texture(
            device,
            "env_scratch",
            ENV_FILTERED_SIZE.0,
            ENV_FILTERED_SIZE.1,
            helpers::HDR_FORMAT,
            usage,
        );
        let (filtered, filtered_view) = helpers::create_texture(
            device,
            "env_filtered",
            ENV_FILTERED_SIZE.0,
            ENV_FILTERED_SIZE.1,
            helpers::HDR_FORMAT,
            usage,
        );
        Self {
            capture,
            capture_view,
            scratch,
            scratch_view,
            filtered,
            filtered_view,
        }
    }

    fn destroy(self) {
        self.capture.destroy();
        self.scratch.destroy();
        self.filtered.destroy();
    }
}

/// Environment generated from the sky: a sharp equirectangular capture the
/// water reflects, and a blurred low-resolution copy that lights meshes.
pub(crate) struct EnvMap {
    textures: Generational<EnvTextures>,
    blur_h_uniforms: wgpu::Buffer,
    blur_v_uniforms: wgpu::Buffer,
}

impl EnvMap {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        sky: &SkyPass,
        post: &PostPass,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let blur_h_uniforms = helpers::uniform_buffer(
            device,
            "env_blur_h",
            &PostUniforms::blur(ENV_CAPTURE_SIZE.0, ENV_CAPTURE_SIZE.1, [1.0, 0.0]),
        );
        let blur_v_uniforms = helpers::uniform_buffer(
            device,
            "env_blur_v",
            &PostUniforms::blur(ENV_FILTERED_SIZE.0, ENV_FILTERED_SIZE.1, [0.0, 1.0]),
        );
        let env = Self {
            textures: Generational::new(EnvTextures::new(device)),
            blur_h_uniforms,
            blur_v_uniforms,
        };
        env.render(device, queue, sky, post, sampler);
        env
    }

    /// Replace the textures with fresh ones rendered from the current sky.
    /// The old set is destroyed; callers must rebuild bind groups.
    pub(crate) fn regenerate(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        sky: &SkyPass,
        post: &PostPass,
        sampler: &wgpu::Sampler,
    ) {
        self.textures.replace(EnvTextures::new(device), EnvTextures::destroy);
        self.render(device, queue, sky, post, sampler);
    }

    fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        sky: &SkyPass,
        post: &PostPass,
        sampler: &wgpu::Sampler,
    ) {
        let t = self.textures.current();
        let bg_capture = source_bind_group(
            device,
            &post.bgl,
            "env_blur_h_bg",
            &t.capture_view,
            sampler,
            &self.blur_h_uniforms,
        );
        let bg_scratch = source_bind_group(
            device,
            &post.bgl,
            "env_blur_v_bg",
            &t.scratch_view,
            sampler,
            &self.blur_v_uniforms,
        );
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("envmap_encoder"),
        });
        sky.draw_equirect(&mut encoder, &t.capture_view);
        helpers::blit(
            &mut encoder,
            "env_blur_h",
            &t.scratch_view,
            &post.blur_pipeline,
            &bg_capture,
        );
        helpers::blit(
            &mut encoder,
            "env_blur_v",
            &t.filtered_view,
            &post.blur_pipeline,
            &bg_scratch,
        );
        queue.submit(Some(encoder.finish()));
        log::debug!("[envmap] generation {}", self.textures.generation());
    }

    pub(crate) fn capture_view(&self) -> &wgpu::TextureView {
        &self.textures.current().capture_view
    }

    pub(crate) fn filtered_view(&self) -> &wgpu::TextureView {
        &self.textures.current().filtered_view
    }
}
