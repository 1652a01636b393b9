#![cfg(target_arch = "wasm32")]
mod assets;
mod audio;
mod dom;
mod events;
mod frame;
mod gui;
mod input;
mod render;
mod speech;

use duck_core::{SceneConfig, SceneContext, OVERRIDE_KEYS};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("duck-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Begin (or resume) listening for wake words. No-op without speech support.
#[wasm_bindgen]
pub fn start_listening() {
    speech::with_bridge(|b| b.start());
}

#[wasm_bindgen]
pub fn stop_listening() {
    speech::with_bridge(|b| b.stop());
}

/// Defaults, overridden by known keys in the page's query string.
fn config_from_query() -> SceneConfig {
    let mut config = SceneConfig::default();
    let search = web::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    if search.is_empty() {
        return config;
    }
    match web::UrlSearchParams::new_with_str(&search) {
        Ok(params) => {
            let pairs: Vec<(&str, String)> = OVERRIDE_KEYS
                .iter()
                .filter_map(|k| params.get(k).map(|v| (*k, v)))
                .collect();
            config.apply_overrides(pairs.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Err(e) => log::warn!("[config] unreadable query string: {:?}", e),
    }
    config
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, "app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;

    let config = config_from_query();
    let (width, height) = dom::sync_canvas_backing_size(&canvas);

    let mut ctx = SceneContext::new(&config);
    ctx.resize(width, height);
    let sun = ctx.sun_direction();
    let scene = Rc::new(RefCell::new(ctx));

    // Avoid grabbing a 2D context here to allow WebGPU to acquire the canvas
    let gpu = frame::init_gpu(&canvas, sun).await;
    let water = gpu.as_ref().map(|g| g.water_uniforms());
    let audio = match audio::QuackPlayer::new() {
        Ok(a) => Some(a),
        Err(e) => {
            log::error!("[audio] {:?}", e);
            None
        }
    };

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene: scene.clone(),
        canvas: canvas.clone(),
        gpu,
        audio,
        start: Instant::now(),
    }));

    if let Err(e) = gui::build(&document, scene.clone(), frame_ctx.clone(), water) {
        log::error!("[gui] {:?}", e);
    }

    let wiring = events::InputWiring {
        canvas,
        scene: scene.clone(),
        frame: frame_ctx.clone(),
    };
    events::wire_resize(&wiring);
    events::wire_input_handlers(wiring);

    if config.speech_enabled {
        let slot = scene.borrow().utterances.clone();
        if let Some(bridge) = speech::SpeechBridge::new(&config.speech_lang, slot) {
            speech::install(bridge);
        }
    } else {
        log::info!("[speech] disabled by configuration");
    }

    assets::spawn_loads(&config, scene, frame_ctx.clone());
    frame::start_loop(frame_ctx);
    Ok(())
}
