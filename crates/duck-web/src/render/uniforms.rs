//! GPU uniform blocks. Layouts mirror the WGSL structs field for field; every
//! member is a `vec4` or `mat4` so no implicit padding is involved.

use duck_core::{
    Camera, DEFAULT_DISTORTION_SCALE, DEFAULT_WATER_SIZE, DISTORTION_SCALE_RANGE, SKY_MIE_COEFFICIENT,
    SKY_MIE_DIRECTIONAL_G, SKY_RAYLEIGH, SKY_TURBIDITY, SUN_COLOR, TONE_MAPPING_EXPOSURE,
    WATER_COLOR, WATER_EXTENT, WATER_SIZE_RANGE,
};
use glam::{Mat4, Vec3};

#[inline]
fn v4(v: Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkyUniforms {
    pub inv_view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub sun_position: [f32; 4],
    pub up: [f32; 4],
    // turbidity, rayleigh, mie coefficient, mie directional g
    pub params: [f32; 4],
}

impl SkyUniforms {
    pub fn new(sun_direction: Vec3) -> Self {
        Self {
            inv_view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            eye: [0.0; 4],
            sun_position: v4(sun_direction, 0.0),
            up: [0.0, 1.0, 0.0, 0.0],
            params: [
                SKY_TURBIDITY,
                SKY_RAYLEIGH,
                SKY_MIE_COEFFICIENT,
                SKY_MIE_DIRECTIONAL_G,
            ],
        }
    }

    pub fn set_camera(&mut self, camera: &Camera) {
        self.inv_view_proj = camera.view_projection().inverse().to_cols_array_2d();
        self.eye = v4(camera.eye, 1.0);
    }

    pub fn set_sun(&mut self, direction: Vec3) {
        self.sun_position = v4(direction, 0.0);
    }
}

/// Ocean material. Shared with the debug panel, which edits
/// `distortion_scale` and `size` in place.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WaterUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub sun_direction: [f32; 4],
    pub sun_color: [f32; 4],
    // rgb colour, a = alpha
    pub water_color: [f32; 4],
    // time, size, distortion scale, plane extent
    pub params: [f32; 4],
}

impl WaterUniforms {
    pub fn new(sun_direction: Vec3) -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            eye: [0.0; 4],
            sun_direction: v4(sun_direction, 0.0),
            sun_color: [SUN_COLOR[0], SUN_COLOR[1], SUN_COLOR[2], 1.0],
            water_color: [WATER_COLOR[0], WATER_COLOR[1], WATER_COLOR[2], 1.0],
            params: [0.0, DEFAULT_WATER_SIZE, DEFAULT_DISTORTION_SCALE, WATER_EXTENT],
        }
    }

    pub fn set_camera(&mut self, camera: &Camera) {
        self.view_proj = camera.view_projection().to_cols_array_2d();
        self.eye = v4(camera.eye, 1.0);
    }

    pub fn set_sun(&mut self, direction: Vec3) {
        self.sun_direction = v4(direction, 0.0);
    }

    pub fn time(&self) -> f32 {
        self.params[0]
    }

    pub fn set_time(&mut self, t: f32) {
        self.params[0] = t;
    }

    pub fn size(&self) -> f32 {
        self.params[1]
    }

    pub fn set_size(&mut self, v: f32) {
        if v.is_finite() {
            self.params[1] = v.clamp(WATER_SIZE_RANGE.0, WATER_SIZE_RANGE.1);
        }
    }

    pub fn distortion_scale(&self) -> f32 {
        self.params[2]
    }

    pub fn set_distortion_scale(&mut self, v: f32) {
        if v.is_finite() {
            self.params[2] = v.clamp(DISTORTION_SCALE_RANGE.0, DISTORTION_SCALE_RANGE.1);
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshGlobals {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub sun_direction: [f32; 4],
    pub sun_color: [f32; 4],
}

impl MeshGlobals {
    pub fn new(camera: &Camera, sun_direction: Vec3) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            eye: v4(camera.eye, 1.0),
            sun_direction: v4(sun_direction, 0.0),
            sun_color: [SUN_COLOR[0], SUN_COLOR[1], SUN_COLOR[2], 1.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    // rgb emissive, a = 1 when the base colour texture is sampled
    pub emissive: [f32; 4],
}

impl ObjectUniforms {
    pub fn new(model: Mat4, base_color: [f32; 4], emissive: [f32; 3], textured: bool) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            base_color,
            emissive: [
                emissive[0],
                emissive[1],
                emissive[2],
                if textured { 1.0 } else { 0.0 },
            ],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostUniforms {
    // xy = source texel size, zw = blur direction
    pub texel_dir: [f32; 4],
    // x = exposure, y = encode sRGB in the shader
    pub params: [f32; 4],
}

impl PostUniforms {
    pub fn blur(src_width: u32, src_height: u32, dir: [f32; 2]) -> Self {
        Self {
            texel_dir: [
                1.0 / src_width.max(1) as f32,
                1.0 / src_height.max(1) as f32,
                dir[0],
                dir[1],
            ],
            params: [0.0; 4],
        }
    }

    /// `encode_srgb` is set when the swapchain format is not itself sRGB.
    pub fn tonemap(encode_srgb: bool) -> Self {
        Self {
            texel_dir: [0.0; 4],
            params: [
                TONE_MAPPING_EXPOSURE,
                if encode_srgb { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ],
        }
    }
}
