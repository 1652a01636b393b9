use crate::audio;
use crate::frame::FrameContext;
use duck_core::{MeshData, SceneConfig, SceneContext, TextureData, DUCK_TARGET_HEIGHT};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub async fn fetch_array_buffer(path: &str) -> anyhow::Result<js_sys::ArrayBuffer> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {} failed: {:?}", path, e))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("fetch {}: not a Response: {:?}", path, e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {}: HTTP {}", path, resp.status());
    }
    let promise = resp
        .array_buffer()
        .map_err(|e| anyhow::anyhow!("fetch {}: {:?}", path, e))?;
    let buf = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("fetch {}: body read failed: {:?}", path, e))?;
    buf.dyn_into::<js_sys::ArrayBuffer>()
        .map_err(|e| anyhow::anyhow!("fetch {}: not an ArrayBuffer: {:?}", path, e))
}

pub async fn fetch_bytes(path: &str) -> anyhow::Result<Vec<u8>> {
    let buf = fetch_array_buffer(path).await?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

async fn load_duck(path: &str) -> anyhow::Result<MeshData> {
    let bytes = fetch_bytes(path).await?;
    let mut mesh = MeshData::from_gltf_slice(&bytes)?;
    mesh.fit_height(DUCK_TARGET_HEIGHT);
    Ok(mesh)
}

async fn load_normals(path: &str) -> anyhow::Result<TextureData> {
    let bytes = fetch_bytes(path).await?;
    Ok(TextureData::decode(&bytes)?)
}

/// Start the three one-shot loads. Each settles its own slot; a failure is
/// logged and leaves that feature absent.
pub fn spawn_loads(
    config: &SceneConfig,
    scene: Rc<RefCell<SceneContext>>,
    frame: Rc<RefCell<FrameContext<'static>>>,
) {
    let duck_path = config.duck_model_path.clone();
    spawn_local(async move {
        let result = load_duck(&duck_path).await;
        scene.borrow_mut().attach_duck(result);
    });

    let normals_path = config.water_normals_path.clone();
    let frame_normals = frame.clone();
    spawn_local(async move {
        match load_normals(&normals_path).await {
            Ok(data) => {
                if let Some(g) = &mut frame_normals.borrow_mut().gpu {
                    g.set_water_normals(&data);
                }
            }
            Err(e) => log::error!("[assets] water normals failed: {:?}", e),
        }
    });

    let sound = frame
        .borrow()
        .audio
        .as_ref()
        .map(|a| (a.context().clone(), a.slot()));
    let Some((ctx, slot)) = sound else {
        log::warn!("[assets] no audio output, skipping quack clip");
        return;
    };
    let sound_path = config.quack_sound_path.clone();
    spawn_local(async move {
        let result = match fetch_array_buffer(&sound_path).await {
            Ok(buf) => audio::decode(&ctx, buf).await,
            Err(e) => Err(e),
        };
        match &result {
            Ok(_) => log::info!("[assets] quack clip ready"),
            Err(e) => log::error!("[assets] quack clip failed: {:?}", e),
        }
        slot.borrow_mut().resolve(result);
    });
}
