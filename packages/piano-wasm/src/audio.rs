//! Web Audio playback and sample loading

use js_sys::ArrayBuffer;
use piano::{AudioBackend, PianoError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioBuffer, AudioBufferSourceNode, AudioContext, AudioScheduledSourceNode, Response};

/// Plays decoded buffers through an `AudioContext`, one buffer source per voice.
pub struct WebAudioBackend {
    context: AudioContext,
}

impl WebAudioBackend {
    pub fn new() -> Result<Self, JsValue> {
        Ok(Self {
            context: AudioContext::new()?,
        })
    }

    pub fn context(&self) -> &AudioContext {
        &self.context
    }
}

fn scheduled(source: &AudioBufferSourceNode) -> &AudioScheduledSourceNode {
    source.as_ref()
}

impl AudioBackend for WebAudioBackend {
    type Sample = AudioBuffer;
    type Voice = AudioBufferSourceNode;

    fn start(&mut self, sample: &AudioBuffer) -> Result<AudioBufferSourceNode, PianoError> {
        let source = self.context.create_buffer_source().map_err(playback_error)?;
        source.set_buffer(Some(sample));
        source
            .connect_with_audio_node(&self.context.destination())
            .map_err(playback_error)?;
        scheduled(&source).start().map_err(playback_error)?;
        Ok(source)
    }

    fn stop(&mut self, voice: AudioBufferSourceNode) {
        // a source that already played to the end throws on stop in some browsers
        if let Err(e) = scheduled(&voice).stop() {
            log::debug!("stopping voice: {}", describe(&e));
        }
    }
}

/// Fetch and decode one sample.
pub async fn load_sample(context: &AudioContext, path: &str) -> Result<AudioBuffer, String> {
    let window = web_sys::window().ok_or("no window")?;

    let response: Response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| describe(&e))?
        .dyn_into()
        .map_err(|e| describe(&e))?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let bytes: ArrayBuffer = JsFuture::from(response.array_buffer().map_err(|e| describe(&e))?)
        .await
        .map_err(|e| describe(&e))?
        .dyn_into()
        .map_err(|e| describe(&e))?;

    JsFuture::from(context.decode_audio_data(&bytes).map_err(|e| describe(&e))?)
        .await
        .map_err(|e| describe(&e))?
        .dyn_into()
        .map_err(|e| describe(&e))
}

fn playback_error(e: JsValue) -> PianoError {
    PianoError::Playback(describe(&e))
}

pub(crate) fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
