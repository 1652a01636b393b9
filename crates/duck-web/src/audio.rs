use duck_core::Loadable;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub type SoundSlot = Rc<RefCell<Loadable<web::AudioBuffer>>>;

/// One-shot quack playback. Each play interrupts the previous one.
pub struct QuackPlayer {
    ctx: web::AudioContext,
    gain: web::GainNode,
    buffer: SoundSlot,
    current: RefCell<Option<web::AudioBufferSourceNode>>,
}

impl QuackPlayer {
    pub fn new() -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new()
            .map_err(|e| anyhow::anyhow!("AudioContext error: {:?}", e))?;
        let gain =
            web::GainNode::new(&ctx).map_err(|e| anyhow::anyhow!("GainNode error: {:?}", e))?;
        gain.connect_with_audio_node(&ctx.destination())
            .map_err(|e| anyhow::anyhow!("connect error: {:?}", e))?;
        Ok(Self {
            ctx,
            gain,
            buffer: Rc::new(RefCell::new(Loadable::Pending)),
            current: RefCell::new(None),
        })
    }

    pub fn context(&self) -> &web::AudioContext {
        &self.ctx
    }

    /// Shared slot the loader resolves once the clip is decoded.
    pub fn slot(&self) -> SoundSlot {
        self.buffer.clone()
    }

    pub fn play(&self, volume: f32) {
        let slot = self.buffer.borrow();
        let Some(buffer) = slot.get() else {
            log::debug!("[audio] quack requested before the clip loaded");
            return;
        };
        self.stop();
        if self.ctx.state() == web::AudioContextState::Suspended {
            // autoplay policy: first play happens inside a user gesture
            let _ = self.ctx.resume();
        }
        let src = match web::AudioBufferSourceNode::new(&self.ctx) {
            Ok(s) => s,
            Err(e) => {
                log::error!("[audio] AudioBufferSourceNode error: {:?}", e);
                return;
            }
        };
        src.set_buffer(Some(buffer));
        self.gain.gain().set_value(volume);
        if let Err(e) = src.connect_with_audio_node(&self.gain) {
            log::error!("[audio] connect error: {:?}", e);
            return;
        }
        #[allow(deprecated)]
        let started = src.start_with_when_and_grain_offset(0.0, 0.0);
        if let Err(e) = started {
            log::error!("[audio] start error: {:?}", e);
            return;
        }
        *self.current.borrow_mut() = Some(src);
    }

    /// Hard stop of the clip in flight, if any.
    pub fn stop(&self) {
        if let Some(src) = self.current.borrow_mut().take() {
            #[allow(deprecated)]
            let _ = src.stop();
        }
    }
}

/// Decode fetched bytes into an `AudioBuffer`.
pub async fn decode(ctx: &web::AudioContext, data: js_sys::ArrayBuffer) -> anyhow::Result<web::AudioBuffer> {
    let promise = ctx
        .decode_audio_data(&data)
        .map_err(|e| anyhow::anyhow!("decodeAudioData error: {:?}", e))?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("decodeAudioData rejected: {:?}", e))?;
    value
        .dyn_into::<web::AudioBuffer>()
        .map_err(|e| anyhow::anyhow!("not an AudioBuffer: {:?}", e))
}
