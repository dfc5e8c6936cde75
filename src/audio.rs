use crate::assets;
use reog_core::{AudioConfig, Cue, CuePlayer};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// One playback slot: decoded buffer, fixed-volume gain, current source.
struct CueSlot {
    buffer: Option<web::AudioBuffer>,
    gain: web::GainNode,
    source: Option<web::AudioBufferSourceNode>,
    playing: Rc<Cell<bool>>,
    // Bumped on every start so a late `ended` event from a replaced source
    // cannot clear the flag of its successor.
    generation: Rc<Cell<u32>>,
}

/// WebAudio backend for the three cue slots.
pub struct WebAudioCues {
    ctx: web::AudioContext,
    slots: [CueSlot; 3],
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    let gain = web::GainNode::new(audio_ctx)
        .map_err(|e| anyhow::anyhow!("{} GainNode error: {:?}", label, e))?;
    gain.gain().set_value(value);
    gain.connect_with_audio_node(&audio_ctx.destination())
        .map_err(|e| anyhow::anyhow!("{} connect error: {:?}", label, e))?;
    Ok(gain)
}

impl WebAudioCues {
    pub fn new(ctx: web::AudioContext, config: &AudioConfig) -> anyhow::Result<Self> {
        let slot = |volume: f32, cue: Cue| -> anyhow::Result<CueSlot> {
            Ok(CueSlot {
                buffer: None,
                gain: create_gain(&ctx, volume, cue.label())?,
                source: None,
                playing: Rc::new(Cell::new(false)),
                generation: Rc::new(Cell::new(0)),
            })
        };
        let slots = [
            slot(config.ambient_volume, Cue::Ambient)?,
            slot(config.click_cue_volume, Cue::Click)?,
            slot(config.hover_cue_volume, Cue::Hover)?,
        ];
        Ok(Self { ctx, slots })
    }

    pub fn context(&self) -> &web::AudioContext {
        &self.ctx
    }

    pub fn set_buffer(&mut self, cue: Cue, buffer: web::AudioBuffer) {
        self.slots[cue.index()].buffer = Some(buffer);
    }

    /// Browsers start contexts suspended until a user gesture.
    pub fn resume(&self) {
        if self.ctx.state() == web::AudioContextState::Suspended {
            _ = self.ctx.resume();
        }
    }

    fn start(&mut self, cue: Cue) -> anyhow::Result<()> {
        let slot = &mut self.slots[cue.index()];
        let Some(buffer) = slot.buffer.as_ref() else {
            return Ok(());
        };
        let source = web::AudioBufferSourceNode::new(&self.ctx)
            .map_err(|e| anyhow::anyhow!("AudioBufferSourceNode error: {:?}", e))?;
        source.set_buffer(Some(buffer));
        source.set_loop(cue.is_looping());
        source
            .connect_with_audio_node(&slot.gain)
            .map_err(|e| anyhow::anyhow!("connect error: {:?}", e))?;

        let generation = slot.generation.get().wrapping_add(1);
        slot.generation.set(generation);
        let playing = slot.playing.clone();
        let current = slot.generation.clone();
        let on_ended = Closure::once_into_js(move || {
            if current.get() == generation {
                playing.set(false);
            }
        });
        source.set_onended(Some(on_ended.unchecked_ref()));

        source
            .start()
            .map_err(|e| anyhow::anyhow!("start error: {:?}", e))?;
        slot.playing.set(true);
        slot.source = Some(source);
        Ok(())
    }
}

impl CuePlayer for WebAudioCues {
    fn is_loaded(&self, cue: Cue) -> bool {
        self.slots[cue.index()].buffer.is_some()
    }

    fn is_playing(&self, cue: Cue) -> bool {
        self.slots[cue.index()].playing.get()
    }

    fn restart(&mut self, cue: Cue) {
        self.stop(cue);
        self.resume();
        if let Err(e) = self.start(cue) {
            log::error!("[audio] {} cue failed to start: {:?}", cue.label(), e);
        }
    }

    fn stop(&mut self, cue: Cue) {
        let slot = &mut self.slots[cue.index()];
        if let Some(source) = slot.source.take() {
            source.set_onended(None);
            _ = source.stop();
            _ = source.disconnect();
        }
        slot.playing.set(false);
    }
}

/// Fetch and decode one audio file.
pub async fn load_cue_buffer(ctx: &web::AudioContext, path: &str) -> anyhow::Result<web::AudioBuffer> {
    let data = assets::fetch_array_buffer(path).await?;
    let promise = ctx
        .decode_audio_data(&data)
        .map_err(|e| anyhow::anyhow!("decodeAudioData error: {:?}", e))?;
    let decoded = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("decode {} failed: {:?}", path, e))?;
    decoded
        .dyn_into::<web::AudioBuffer>()
        .map_err(|e| anyhow::anyhow!("decoded value is not an AudioBuffer: {:?}", e))
}
