pub mod anim;
pub mod camera;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod interact;
pub mod loadable;
pub mod mesh;
pub mod params;
pub mod pick;
pub mod scene;
pub mod sound;
pub mod speech;
pub mod sun;

pub use anim::*;
pub use camera::*;
pub use config::*;
pub use constants::*;
pub use context::*;
pub use error::*;
pub use interact::*;
pub use loadable::*;
pub use mesh::*;
pub use params::*;
pub use pick::*;
pub use scene::*;
pub use sound::*;
pub use speech::*;
pub use sun::*;

// Shaders bundled as string constants
pub static COMMON_WGSL: &str = include_str!("../shaders/common.wgsl");
pub static SKY_WGSL: &str = include_str!("../shaders/sky.wgsl");
pub static WATER_WGSL: &str = include_str!("../shaders/water.wgsl");
pub static MESH_WGSL: &str = include_str!("../shaders/mesh.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

/// Prepend the shared helpers (fullscreen vertex stage, equirect mapping).
pub fn compose_shader(pass: &str) -> String {
    let mut src = String::with_capacity(COMMON_WGSL.len() + pass.len() + 1);
    src.push_str(COMMON_WGSL);
    src.push('\n');
    src.push_str(pass);
    src
}
