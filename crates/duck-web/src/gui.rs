//! Debug panel: Sky and Water folders built from plain DOM inputs.

use crate::dom;
use crate::frame::FrameContext;
use crate::input;
use crate::render::WaterUniforms;
use duck_core::{
    SceneContext, AZIMUTH_RANGE, DISTORTION_SCALE_RANGE, ELEVATION_RANGE, WATER_SIZE_RANGE,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const PANEL_ID: &str = "debug-panel";

fn create(document: &web::Document, tag: &str) -> anyhow::Result<web::Element> {
    document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create <{}>: {:?}", tag, e))
}

fn append(parent: &web::Element, child: &web::Element) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("append: {:?}", e))
}

fn folder(document: &web::Document, panel: &web::Element, title: &str) -> anyhow::Result<web::Element> {
    let fieldset = create(document, "fieldset")?;
    let legend = create(document, "legend")?;
    legend.set_text_content(Some(title));
    append(&fieldset, &legend)?;
    append(panel, &fieldset)?;
    Ok(fieldset)
}

fn row(
    document: &web::Document,
    parent: &web::Element,
    name: &str,
    field: &web::HtmlInputElement,
) -> anyhow::Result<web::Element> {
    let label = create(document, "label")?;
    label.set_text_content(Some(name));
    append(&label, field.as_ref())?;
    append(parent, &label)?;
    Ok(label)
}

fn slider(
    document: &web::Document,
    parent: &web::Element,
    name: &str,
    range: (f32, f32),
    value: f32,
    mut on_change: impl FnMut(f32) + 'static,
) -> anyhow::Result<()> {
    let field: web::HtmlInputElement = create(document, "input")?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not an input: {:?}", e))?;
    field.set_type("range");
    field.set_min(&range.0.to_string());
    field.set_max(&range.1.to_string());
    field.set_step(&input::slider_step(range).to_string());
    field.set_value(&value.to_string());
    let label = row(document, parent, name, &field)?;
    let readout = create(document, "span")?;
    readout.set_text_content(Some(&format!("{:.2}", value)));
    append(&label, &readout)?;

    let source = field.clone();
    dom::add_listener(field.as_ref(), "input", move |_ev: web::Event| {
        if let Some(v) = input::parse_slider(&source.value(), range) {
            readout.set_text_content(Some(&format!("{:.2}", v)));
            on_change(v);
        }
    });
    Ok(())
}

fn checkbox(
    document: &web::Document,
    parent: &web::Element,
    name: &str,
    checked: bool,
    mut on_change: impl FnMut(bool) + 'static,
) -> anyhow::Result<()> {
    let field: web::HtmlInputElement = create(document, "input")?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not an input: {:?}", e))?;
    field.set_type("checkbox");
    field.set_checked(checked);
    row(document, parent, name, &field)?;
    let source = field.clone();
    dom::add_listener(field.as_ref(), "change", move |_ev: web::Event| {
        on_change(source.checked());
    });
    Ok(())
}

/// Build the panel into `#debug-panel`, creating it when the page lacks one.
pub fn build(
    document: &web::Document,
    scene: Rc<RefCell<SceneContext>>,
    frame: Rc<RefCell<FrameContext<'static>>>,
    water: Option<Rc<RefCell<WaterUniforms>>>,
) -> anyhow::Result<()> {
    let panel = match document.get_element_by_id(PANEL_ID) {
        Some(el) => el,
        None => {
            let el = create(document, "div")?;
            el.set_id(PANEL_ID);
            let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
            append(body.as_ref(), &el)?;
            el
        }
    };
    let params = scene.borrow().params;

    let sky = folder(document, &panel, "Sky")?;
    {
        let scene = scene.clone();
        let frame = frame.clone();
        checkbox(document, &sky, "stick", params.has_stick, move |on| {
            let events = scene.borrow_mut().set_has_stick(on);
            frame.borrow_mut().apply(&events);
        })?;
    }
    {
        let scene = scene.clone();
        let frame = frame.clone();
        slider(document, &sky, "elevation", ELEVATION_RANGE, params.elevation, move |v| {
            let events = scene.borrow_mut().set_elevation(v);
            frame.borrow_mut().apply(&events);
        })?;
    }
    {
        let scene = scene.clone();
        let frame = frame.clone();
        slider(document, &sky, "azimuth", AZIMUTH_RANGE, params.azimuth, move |v| {
            let events = scene.borrow_mut().set_azimuth(v);
            frame.borrow_mut().apply(&events);
        })?;
    }

    // without a renderer there is no water block to edit
    let Some(water) = water else {
        return Ok(());
    };
    let water_folder = folder(document, &panel, "Water")?;
    let (distortion, size) = {
        let u = water.borrow();
        (u.distortion_scale(), u.size())
    };
    {
        let water = water.clone();
        slider(
            document,
            &water_folder,
            "distortionScale",
            DISTORTION_SCALE_RANGE,
            distortion,
            move |v| water.borrow_mut().set_distortion_scale(v),
        )?;
    }
    slider(document, &water_folder, "size", WATER_SIZE_RANGE, size, move |v| {
        water.borrow_mut().set_size(v)
    })?;
    log::info!("[gui] debug panel ready");
    Ok(())
}
