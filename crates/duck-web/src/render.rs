mod envmap;
mod generation;
mod helpers;
mod mesh;
mod post;
mod sky;
mod targets;
pub mod uniforms;
mod water;

use duck_core::{Camera, MeshData, NodeId, SceneGraph, TextureData};
use envmap::EnvMap;
use glam::Vec3;
use mesh::{GpuMesh, MeshPass};
use post::PostPass;
use sky::SkyPass;
use std::cell::RefCell;
use std::rc::Rc;
use targets::RenderTargets;
use water::WaterPass;
use web_sys as web;

pub use uniforms::WaterUniforms;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,

    sky: SkyPass,
    envmap: EnvMap,
    water: WaterPass,
    meshes: MeshPass,
    post: PostPass,

    // uploaded on first use
    rod_mesh: Option<GpuMesh>,
    duck_mesh: Option<GpuMesh>,

    sun_direction: Vec3,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, sun_direction: Vec3) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let linear_sampler =
            helpers::sampler(&device, "linear_sampler", wgpu::AddressMode::ClampToEdge);

        let sky = SkyPass::new(&device, sun_direction);
        let post = PostPass::new(&device, format, &targets.hdr_view, &linear_sampler);
        let envmap = EnvMap::new(&device, &queue, &sky, &post, &linear_sampler);
        let water = WaterPass::new(
            &device,
            &queue,
            sun_direction,
            envmap.capture_view(),
            &linear_sampler,
        );
        let meshes = MeshPass::new(
            &device,
            &queue,
            &Camera::default(),
            sun_direction,
            envmap.filtered_view(),
            &linear_sampler,
        );
        log::info!("[render] WebGPU ready ({}x{}, {:?})", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            linear_sampler,
            sky,
            envmap,
            water,
            meshes,
            post,
            rod_mesh: None,
            duck_mesh: None,
            sun_direction,
            width,
            height,
        })
    }

    pub fn water_uniforms(&self) -> Rc<RefCell<WaterUniforms>> {
        self.water.uniforms()
    }

    /// Push a new sun direction into the sky and water, then regenerate the
    /// environment textures from the updated sky.
    pub fn set_sun(&mut self, direction: Vec3) {
        self.sun_direction = direction;
        self.sky.set_sun(&self.queue, direction);
        self.water.set_sun(direction);
        self.envmap.regenerate(
            &self.device,
            &self.queue,
            &self.sky,
            &self.post,
            &self.linear_sampler,
        );
        self.water
            .rebind(&self.device, self.envmap.capture_view(), &self.linear_sampler);
        self.meshes
            .rebind_env(&self.device, self.envmap.filtered_view(), &self.linear_sampler);
    }

    pub fn set_water_normals(&mut self, data: &TextureData) {
        self.water.set_normal_map(
            &self.device,
            &self.queue,
            data,
            self.envmap.capture_view(),
            &self.linear_sampler,
        );
        log::info!("[render] water normals {}x{}", data.width, data.height);
    }

    fn upload(&self, label: &str, mesh: &MeshData) -> GpuMesh {
        self.meshes.upload(&self.device, &self.queue, label, mesh)
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            self.post
                .rebind_hdr(&self.device, &self.targets.hdr_view, &self.linear_sampler);
        }
    }

    pub fn render(&mut self, scene: &SceneGraph, water_time: f32) -> Result<(), wgpu::SurfaceError> {
        if self.rod_mesh.is_none() && scene.is_rendered(NodeId::Rod) {
            self.rod_mesh = Some(self.upload("rod", &scene.rod.mesh));
        }
        if self.duck_mesh.is_none() {
            if let Some(duck) = scene.duck.get() {
                self.duck_mesh = Some(self.upload("duck", &duck.mesh));
            }
        }

        let camera = &scene.camera;
        self.sky.set_camera(&self.queue, camera);
        self.water.update(&self.queue, camera, water_time);
        self.meshes
            .update_globals(&self.queue, camera, self.sun_direction);

        let mut visible: Vec<&GpuMesh> = Vec::with_capacity(2);
        if let Some(gpu) = &self.rod_mesh {
            if scene.is_rendered(NodeId::Rod) {
                gpu.update(&self.queue, &scene.rod);
                visible.push(gpu);
            }
        }
        if let (Some(gpu), Some(node)) = (&self.duck_mesh, scene.duck.get()) {
            if scene.is_rendered(NodeId::Duck) {
                gpu.update(&self.queue, node);
                visible.push(gpu);
            }
        }

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(e) => {
                if matches!(e, wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) {
                    self.surface.configure(&self.device, &self.config);
                }
                return Err(e);
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        self.sky.draw(&mut encoder, &self.targets.hdr_view);
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if scene.is_rendered(NodeId::Water) {
                self.water.draw(&mut rpass);
            }
            self.meshes.draw(&mut rpass, &visible);
        }
        self.post.tonemap(&mut encoder, &view);

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
