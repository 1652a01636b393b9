use crate::audio::QuackPlayer;
use crate::render;
use duck_core::{pick_volume, SceneContext, SceneEvent};
use glam::Vec3;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<SceneContext>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub audio: Option<QuackPlayer>,
    pub start: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let elapsed = self.start.elapsed().as_secs_f32();
        let events = self.scene.borrow_mut().tick(elapsed);
        self.apply(&events);
        self.render();
    }

    pub fn render(&mut self) {
        let Some(g) = &mut self.gpu else {
            return;
        };
        g.resize_if_needed(self.canvas.width(), self.canvas.height());
        let ctx = self.scene.borrow();
        if let Err(e) = g.render(&ctx.scene, ctx.animation.water_time()) {
            log::error!("render error: {:?}", e);
        }
    }

    /// Carry out side effects requested by the scene logic.
    pub fn apply(&mut self, events: &[SceneEvent]) {
        for ev in events {
            match ev {
                SceneEvent::PlaySound => {
                    if let Some(a) = &self.audio {
                        a.play(pick_volume(&mut rand::thread_rng()));
                    }
                }
                SceneEvent::StopSound => {
                    if let Some(a) = &self.audio {
                        a.stop();
                    }
                }
                SceneEvent::RenderNow => self.render(),
                SceneEvent::SunChanged(dir) => self.set_sun(*dir),
            }
        }
    }

    pub fn set_sun(&mut self, direction: Vec3) {
        if let Some(g) = &mut self.gpu {
            g.set_sun(direction);
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    sun_direction: Vec3,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, sun_direction).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
    }
}
