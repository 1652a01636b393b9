// Host-side tests for GPU uniform block layouts and defaults.

#![allow(dead_code)]
#[path = "../src/render/uniforms.rs"]
mod uniforms;

use duck_core::*;
use uniforms::*;

#[test]
fn uniform_blocks_are_vec4_aligned() {
    for size in [
        std::mem::size_of::<SkyUniforms>(),
        std::mem::size_of::<WaterUniforms>(),
        std::mem::size_of::<MeshGlobals>(),
        std::mem::size_of::<ObjectUniforms>(),
        std::mem::size_of::<PostUniforms>(),
    ] {
        assert_eq!(size % 16, 0);
    }
    assert_eq!(std::mem::size_of::<WaterUniforms>(), 64 + 5 * 16);
    assert_eq!(std::mem::size_of::<SkyUniforms>(), 64 + 4 * 16);
}

#[test]
fn water_defaults_match_scene() {
    let sun = sun_direction(DEFAULT_ELEVATION_DEG, DEFAULT_AZIMUTH_DEG);
    let w = WaterUniforms::new(sun);
    assert_eq!(w.distortion_scale(), DEFAULT_DISTORTION_SCALE);
    assert_eq!(w.size(), DEFAULT_WATER_SIZE);
    assert_eq!(w.params[3], WATER_EXTENT);
    assert_eq!(&w.water_color[..3], &WATER_COLOR);
    assert_eq!(w.water_color[3], 1.0);
    assert_eq!(&w.sun_direction[..3], &sun.to_array());
}

#[test]
fn water_controls_clamp_to_panel_ranges() {
    let mut w = WaterUniforms::new(glam::Vec3::Y);
    w.set_distortion_scale(20.0);
    assert_eq!(w.distortion_scale(), 8.0);
    w.set_distortion_scale(-1.0);
    assert_eq!(w.distortion_scale(), 0.0);
    w.set_size(0.0);
    assert_eq!(w.size(), 0.1);
    w.set_size(f32::NAN);
    assert_eq!(w.size(), 0.1);
    w.set_time(2.5);
    assert_eq!(w.time(), 2.5);
}

#[test]
fn sky_tracks_sun_and_camera() {
    let mut s = SkyUniforms::new(glam::Vec3::Z);
    let dir = sun_direction(30.0, 45.0);
    s.set_sun(dir);
    assert_eq!(&s.sun_position[..3], &dir.to_array());
    let cam = Camera::default();
    s.set_camera(&cam);
    assert_eq!(&s.eye[..3], &cam.eye.to_array());
    assert_eq!(s.params, [10.0, 2.0, 0.005, 0.8]);
}

#[test]
fn object_flags_texture_use() {
    let o = ObjectUniforms::new(glam::Mat4::IDENTITY, [1.0; 4], ROD_HIGHLIGHT, true);
    assert_eq!(o.emissive, [0.667, 0.667, 0.667, 1.0]);
    let o = ObjectUniforms::new(glam::Mat4::IDENTITY, [1.0; 4], [0.0; 3], false);
    assert_eq!(o.emissive[3], 0.0);
}

#[test]
fn post_blocks() {
    let b = PostUniforms::blur(512, 256, [1.0, 0.0]);
    assert_eq!(b.texel_dir, [1.0 / 512.0, 1.0 / 256.0, 1.0, 0.0]);
    let t = PostUniforms::tonemap(true);
    assert_eq!(t.params[0], TONE_MAPPING_EXPOSURE);
    assert_eq!(t.params[1], 1.0);
    assert_eq!(PostUniforms::tonemap(false).params[1], 0.0);
}
