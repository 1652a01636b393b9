use crate::dom;
use crate::frame::FrameContext;
use crate::input;
use duck_core::SceneContext;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<SceneContext>>,
    pub frame: Rc<RefCell<FrameContext<'static>>>,
}

fn event_ndc(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    input::client_to_ndc(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

pub fn wire_input_handlers(w: InputWiring) {
    let target: &web::EventTarget = w.canvas.as_ref();

    // pointermove
    {
        let canvas = w.canvas.clone();
        let scene = w.scene.clone();
        dom::add_listener(target, "pointermove", move |ev: web::PointerEvent| {
            let ndc = event_ndc(&ev, &canvas);
            scene.borrow_mut().pointer_move(ndc);
        });
    }

    // pointerdown: may start a drag
    {
        let canvas = w.canvas.clone();
        let scene = w.scene.clone();
        dom::add_listener(target, "pointerdown", move |ev: web::PointerEvent| {
            let ndc = event_ndc(&ev, &canvas);
            let started = {
                let mut ctx = scene.borrow_mut();
                ctx.pointer_move(ndc);
                ctx.pointer_down()
            };
            if started {
                let _ = canvas.set_pointer_capture(ev.pointer_id());
                ev.prevent_default();
            }
        });
    }

    // pointerup: ends a drag
    {
        let canvas = w.canvas.clone();
        let scene = w.scene.clone();
        let frame = w.frame.clone();
        dom::add_listener(target, "pointerup", move |ev: web::PointerEvent| {
            let events = scene.borrow_mut().pointer_up();
            if !events.is_empty() {
                let _ = canvas.release_pointer_capture(ev.pointer_id());
                frame.borrow_mut().apply(&events);
            }
        });
    }

    // click: quack when the duck is hit
    {
        let canvas = w.canvas.clone();
        let scene = w.scene.clone();
        let frame = w.frame.clone();
        dom::add_listener(target, "click", move |ev: web::MouseEvent| {
            let ndc = event_ndc(&ev, &canvas);
            let events = {
                let mut ctx = scene.borrow_mut();
                ctx.pointer_move(ndc);
                ctx.click()
            };
            frame.borrow_mut().apply(&events);
        });
    }
}

/// Keep the backing store, camera aspect and surface in step with the window.
pub fn wire_resize(w: &InputWiring) {
    let Some(window) = web::window() else {
        return;
    };
    let canvas = w.canvas.clone();
    let scene = w.scene.clone();
    let frame = w.frame.clone();
    let target: &web::EventTarget = window.as_ref();
    dom::add_listener(target, "resize", move |_ev: web::Event| {
        let (width, height) = dom::sync_canvas_backing_size(&canvas);
        scene.borrow_mut().resize(width, height);
        if let Some(g) = &mut frame.borrow_mut().gpu {
            g.resize_if_needed(width, height);
        }
    });
}
