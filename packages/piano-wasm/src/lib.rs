use piano::{InputEvent, KeyCount, Keyboard, KeyboardConfig, PianoError};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{AudioContext, Document, HtmlElement, HtmlSelectElement};

mod audio;
mod render;

use audio::{describe, WebAudioBackend};

#[cfg(feature = "console_error_panic_hook")]
fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

const LOG_LEVEL: log::Level = log::Level::Info;

/// Initialize logging when the module loads
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    console_log::init_with_level(LOG_LEVEL).ok();
}

#[derive(Serialize)]
struct WidgetError {
    kind: &'static str,
    message: String,
}

fn to_js_error(e: PianoError) -> JsValue {
    let kind = match &e {
        PianoError::InvalidNote(_) => "invalidNote",
        PianoError::KeyCountOutOfRange { .. } => "keyCountOutOfRange",
        PianoError::Config(_) => "config",
        PianoError::Playback(_) => "playback",
    };
    let error = WidgetError {
        kind,
        message: e.to_string(),
    };
    JsValue::from_str(&serde_json::to_string(&error).unwrap_or_else(|_| e.to_string()))
}

/// MIDI number for note text like "Cs4", or undefined
#[wasm_bindgen]
pub fn note_to_midi(note: &str) -> Option<i32> {
    piano::note_to_midi(note)
}

/// Note text like "Cs4" for a MIDI number
#[wasm_bindgen]
pub fn midi_to_note(midi: i32) -> String {
    piano::midi_to_note(midi)
}

/// Layout for a keyboard with `number_of_keys` keys, as a plain object
#[wasm_bindgen]
pub fn build_layout(number_of_keys: u32) -> Result<JsValue, JsValue> {
    let layout = piano::build_layout(number_of_keys).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&layout).map_err(|e| JsValue::from_str(&e.to_string()))
}

struct WidgetState {
    keyboard: Keyboard<WebAudioBackend>,
    document: Document,
    background: HtmlElement,
    selector: HtmlSelectElement,
    key_listeners: Vec<render::KeyListener>,
}

/// Draw the current layout, replacing the previous key elements and listeners.
fn render(state: &Rc<RefCell<WidgetState>>) -> Result<(), JsValue> {
    let weak = Rc::downgrade(state);
    let mut guard = state.borrow_mut();
    let widget = &mut *guard;

    let listeners = render::render_keys(
        &widget.document,
        &widget.background,
        widget.keyboard.layout(),
        move |element, event| on_key_input(&weak, element, event),
    )?;
    widget.key_listeners = listeners;
    Ok(())
}

fn rebuild(state: &Rc<RefCell<WidgetState>>, count: KeyCount) -> Result<(), JsValue> {
    {
        let mut widget = state.borrow_mut();
        widget.keyboard.set_number_of_keys(count);
        widget.selector.set_value(&count.to_string());
    }
    render(state)
}

fn on_key_input(state: &Weak<RefCell<WidgetState>>, element: &HtmlElement, event: InputEvent) {
    render::set_pressed(element, event.is_press());

    let Some(rc) = state.upgrade() else {
        return;
    };
    let Ok(mut widget) = rc.try_borrow_mut() else {
        log::warn!("dropping {:?} on key {}: widget busy", event.kind, event.midi_number);
        return;
    };
    widget.keyboard.handle(event);
}

fn parse_key_count(value: &str) -> Result<KeyCount, String> {
    let n: u32 = value.trim().parse().map_err(|e| format!("{}", e))?;
    KeyCount::new(n).map_err(|e| e.to_string())
}

/// Fetch every preloaded sample in the background. Each load is independent.
fn preload_samples(state: &Rc<RefCell<WidgetState>>, context: &AudioContext) {
    let assets = {
        let mut widget = state.borrow_mut();
        let assets = widget.keyboard.preload_assets();
        widget
            .keyboard
            .playback_mut()
            .samples_mut()
            .expect(assets.len());
        assets
    };
    log::debug!("preloading {} samples", assets.len());

    for (note, path) in assets {
        let weak = Rc::downgrade(state);
        let context = context.clone();
        spawn_local(async move {
            let result = audio::load_sample(&context, &path).await;
            let Some(rc) = weak.upgrade() else {
                return;
            };
            let mut widget = rc.borrow_mut();
            match result {
                Ok(buffer) => widget.keyboard.playback_mut().samples_mut().insert(note, buffer),
                Err(e) => widget
                    .keyboard
                    .playback()
                    .samples()
                    .record_failure(note, &format!("{}: {}", path, e)),
            }
        });
    }
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element '{}' has the wrong type", id)))
}

/// On-screen piano bound to a background element and a key count selector
#[wasm_bindgen]
pub struct PianoWidget {
    state: Rc<RefCell<WidgetState>>,
    context: AudioContext,
    _on_change: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl PianoWidget {
    /// Render a keyboard into `background_id`, wire up `selector_id`, and start
    /// loading samples. `config_yaml` overrides the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        background_id: &str,
        selector_id: &str,
        config_yaml: Option<String>,
    ) -> Result<PianoWidget, JsValue> {
        let config = match config_yaml {
            Some(yaml) => KeyboardConfig::from_yaml(&yaml).map_err(to_js_error)?,
            None => KeyboardConfig::default(),
        };

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let background: HtmlElement = element_by_id(&document, background_id)?;
        let selector: HtmlSelectElement = element_by_id(&document, selector_id)?;

        let backend = WebAudioBackend::new()?;
        let context = backend.context().clone();
        let initial = config.initial_keys;

        render::populate_selector(
            &document,
            &selector,
            KeyCount::options().map(KeyCount::get),
            initial.get(),
        )?;

        let state = Rc::new(RefCell::new(WidgetState {
            keyboard: Keyboard::new(config, backend),
            document,
            background,
            selector: selector.clone(),
            key_listeners: Vec::new(),
        }));
        render(&state)?;

        let on_change = {
            let weak = Rc::downgrade(&state);
            let selector = selector.clone();
            Closure::<dyn FnMut()>::new(move || {
                let Some(rc) = weak.upgrade() else {
                    return;
                };
                let value = selector.value();
                match parse_key_count(&value) {
                    Ok(count) => {
                        if let Err(e) = rebuild(&rc, count) {
                            log::error!("rebuilding keyboard: {}", describe(&e));
                        }
                    }
                    Err(e) => log::warn!("ignoring key count '{}': {}", value, e),
                }
            })
        };
        selector.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;

        preload_samples(&state, &context);
        log::info!("piano widget ready with {} keys", initial);

        Ok(PianoWidget {
            state,
            context,
            _on_change: on_change,
        })
    }

    /// Rebuild the keyboard with a new number of keys (1-88)
    pub fn set_number_of_keys(&self, number_of_keys: u32) -> Result<(), JsValue> {
        let count = KeyCount::new(number_of_keys).map_err(to_js_error)?;
        rebuild(&self.state, count)
    }

    pub fn press(&self, midi_number: i32) -> bool {
        self.state
            .borrow_mut()
            .keyboard
            .handle(InputEvent::press(midi_number))
    }

    pub fn release(&self, midi_number: i32) -> bool {
        self.state
            .borrow_mut()
            .keyboard
            .handle(InputEvent::release(midi_number))
    }

    /// Silence every sounding note and release every key on screen
    pub fn stop_all(&self) {
        let mut widget = self.state.borrow_mut();
        widget.keyboard.playback_mut().stop_all();
        render::clear_pressed(&widget.background);
    }

    pub fn active_count(&self) -> usize {
        self.state.borrow().keyboard.playback().active_count()
    }

    pub fn loaded_samples(&self) -> usize {
        self.state.borrow().keyboard.playback().samples().len()
    }

    /// Current layout as a plain object
    pub fn layout(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.state.borrow().keyboard.layout())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Resume audio after a user gesture (browser autoplay policy)
    pub fn resume(&self) -> Result<js_sys::Promise, JsValue> {
        self.context.resume()
    }
}

impl Drop for PianoWidget {
    fn drop(&mut self) {
        if let Ok(mut widget) = self.state.try_borrow_mut() {
            let on_change: &js_sys::Function = self._on_change.as_ref().unchecked_ref();
            let removed = widget
                .selector
                .remove_event_listener_with_callback("change", on_change);
            if let Err(e) = removed {
                log::debug!("removing selector listener: {}", describe(&e));
            }
            widget.keyboard.playback_mut().stop_all();
            // listeners die with the state, so the elements that call them go first
            widget.background.set_inner_html("");
            widget.key_listeners.clear();
        }
    }
}
