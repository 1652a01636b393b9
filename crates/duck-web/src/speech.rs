//! Browser speech recognition feeding the utterance slot.
//!
//! The recognizer is not in web-sys' stable surface, so it is driven through
//! `js_sys::Reflect`.

use duck_core::{ListenFlag, UtteranceSlot};
use js_sys::{Function, Reflect};
use std::cell::RefCell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

thread_local! {
    static BRIDGE: RefCell<Option<SpeechBridge>> = const { RefCell::new(None) };
}

pub struct SpeechBridge {
    recognizer: JsValue,
    listening: ListenFlag,
}

fn call(target: &JsValue, method: &str) -> Result<(), JsValue> {
    let f: Function = Reflect::get(target, &JsValue::from_str(method))?.dyn_into()?;
    f.call0(target)?;
    Ok(())
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value).map(|_| ())
}

/// Transcript of the newest result in a `SpeechRecognitionEvent`.
fn last_transcript(ev: &JsValue) -> Option<String> {
    let results = Reflect::get(ev, &JsValue::from_str("results")).ok()?;
    let len = Reflect::get(&results, &JsValue::from_str("length"))
        .ok()?
        .as_f64()? as u32;
    if len == 0 {
        return None;
    }
    let last = Reflect::get_u32(&results, len - 1).ok()?;
    let best = Reflect::get_u32(&last, 0).ok()?;
    Reflect::get(&best, &JsValue::from_str("transcript"))
        .ok()?
        .as_string()
}

impl SpeechBridge {
    /// `None` when the browser has no recognizer.
    pub fn new(lang: &str, slot: UtteranceSlot) -> Option<Self> {
        let window: JsValue = web::window()?.into();
        let ctor = ["SpeechRecognition", "webkitSpeechRecognition"]
            .iter()
            .filter_map(|name| Reflect::get(&window, &JsValue::from_str(name)).ok())
            .find_map(|v| v.dyn_into::<Function>().ok());
        let Some(ctor) = ctor else {
            log::warn!("[speech] SpeechRecognition not available; voice trigger disabled");
            return None;
        };
        let recognizer = match Reflect::construct(&ctor, &js_sys::Array::new()) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("[speech] could not create recognizer: {:?}", e);
                return None;
            }
        };
        let configured = set(&recognizer, "continuous", &JsValue::TRUE)
            .and_then(|_| set(&recognizer, "interimResults", &JsValue::FALSE))
            .and_then(|_| set(&recognizer, "lang", &JsValue::from_str(lang)));
        if let Err(e) = configured {
            log::warn!("[speech] could not configure recognizer: {:?}", e);
            return None;
        }

        let listening = ListenFlag::new();

        let onresult = Closure::wrap(Box::new(move |ev: JsValue| {
            if let Some(text) = last_transcript(&ev) {
                log::debug!("[speech] result \"{}\"", text);
                slot.publish(text.trim());
            }
        }) as Box<dyn FnMut(JsValue)>);
        let listening_err = listening.clone();
        let onerror = Closure::wrap(Box::new(move |ev: JsValue| {
            let kind = Reflect::get(&ev, &JsValue::from_str("error"))
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default();
            // onend follows; a fatal error keeps it from restarting
            if listening_err.record_error(&kind) {
                log::warn!("[speech] recognition error: {}; listening stopped", kind);
            } else {
                log::warn!("[speech] recognition error: {}", kind);
            }
        }) as Box<dyn FnMut(JsValue)>);
        let rec_end = recognizer.clone();
        let listening_end = listening.clone();
        let onend = Closure::wrap(Box::new(move |_ev: JsValue| {
            // the recognizer stops itself after silence; keep it going
            if listening_end.is_on() {
                if let Err(e) = call(&rec_end, "start") {
                    listening_end.start_failed();
                    log::warn!("[speech] restart failed: {:?}", e);
                }
            }
        }) as Box<dyn FnMut(JsValue)>);

        let wired = set(&recognizer, "onresult", onresult.as_ref())
            .and_then(|_| set(&recognizer, "onerror", onerror.as_ref()))
            .and_then(|_| set(&recognizer, "onend", onend.as_ref()));
        if let Err(e) = wired {
            log::warn!("[speech] could not attach handlers: {:?}", e);
            return None;
        }
        onresult.forget();
        onerror.forget();
        onend.forget();

        log::info!("[speech] recognizer ready (lang {})", lang);
        Some(Self {
            recognizer,
            listening,
        })
    }

    pub fn start(&self) {
        if !self.listening.request_start() {
            return;
        }
        if let Err(e) = call(&self.recognizer, "start") {
            self.listening.start_failed();
            log::warn!("[speech] start failed: {:?}", e);
        }
    }

    pub fn stop(&self) {
        if !self.listening.request_stop() {
            return;
        }
        if let Err(e) = call(&self.recognizer, "stop") {
            log::warn!("[speech] stop failed: {:?}", e);
        }
    }
}

pub fn install(bridge: SpeechBridge) {
    BRIDGE.with(|b| *b.borrow_mut() = Some(bridge));
}

/// Run `f` on the installed bridge; silently nothing when speech is absent.
pub fn with_bridge(f: impl FnOnce(&SpeechBridge)) {
    BRIDGE.with(|b| {
        if let Some(bridge) = b.borrow().as_ref() {
            f(bridge);
        }
    });
}
