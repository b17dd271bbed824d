//! DOM rendering of a keyboard layout

use piano::{InputEvent, InputKind, KeyColor, KeyDescriptor, KeyboardLayout, Modality};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlSelectElement};

/// DOM events wired on every key, and the input they turn into.
const KEY_EVENTS: [(&str, InputKind, Modality); 5] = [
    ("mousedown", InputKind::Press, Modality::Mouse),
    ("mouseup", InputKind::Release, Modality::Mouse),
    ("mouseleave", InputKind::Leave, Modality::Mouse),
    ("touchstart", InputKind::Press, Modality::Touch),
    ("touchend", InputKind::Release, Modality::Touch),
];

pub type KeyListener = Closure<dyn FnMut()>;

/// Replace the contents of `background` with one element per key.
///
/// `on_input` is called with the element and the event for every key input.
/// The returned closures must be kept alive as long as the elements exist.
pub fn render_keys<F>(
    document: &Document,
    background: &HtmlElement,
    layout: &KeyboardLayout,
    on_input: F,
) -> Result<Vec<KeyListener>, JsValue>
where
    F: Fn(&HtmlElement, InputEvent) + Clone + 'static,
{
    background.set_inner_html("");

    let mut listeners = Vec::with_capacity(layout.len() * KEY_EVENTS.len());
    for key in &layout.keys {
        let element = create_key(document, key)?;
        background.append_child(&element)?;

        for (event_name, kind, modality) in KEY_EVENTS {
            let event = InputEvent::new(kind, modality, key.midi_number);
            let target = element.clone();
            let on_input = on_input.clone();
            let listener = Closure::<dyn FnMut()>::new(move || on_input(&target, event));
            element.add_event_listener_with_callback(event_name, listener.as_ref().unchecked_ref())?;
            listeners.push(listener);
        }
    }

    background
        .style()
        .set_property("width", &em(layout.total_width_em))?;

    Ok(listeners)
}

fn create_key(document: &Document, key: &KeyDescriptor) -> Result<HtmlElement, JsValue> {
    let element: HtmlElement = document.create_element("div")?.dyn_into()?;
    element.set_id(&key.note.to_string());
    element.set_attribute("data-note", &key.midi_number.to_string())?;

    let classes = element.class_list();
    classes.add_1("key")?;
    match key.color {
        KeyColor::White => classes.add_1("white-key")?,
        KeyColor::Black => classes.add_1("black-key")?,
    }

    let style = element.style();
    style.set_property("width", &em(key.width_em))?;
    if let Some(left) = key.left_offset_em {
        style.set_property("left", &em(left))?;
    }

    Ok(element)
}

/// Show or clear the held-down look of a key.
pub fn set_pressed(element: &HtmlElement, pressed: bool) {
    let classes = element.class_list();
    let result = if pressed {
        classes.add_1("active")
    } else {
        classes.remove_1("active")
    };
    if let Err(e) = result {
        log::debug!("toggling key class: {:?}", e);
    }
}

/// Clear the held-down look of every key under `background`.
pub fn clear_pressed(background: &HtmlElement) {
    // the collection is live and shrinks as classes are removed
    let active = background.get_elements_by_class_name("active");
    while let Some(element) = active.item(0) {
        if let Err(e) = element.class_list().remove_1("active") {
            log::debug!("clearing key class: {:?}", e);
            break;
        }
    }
}

/// Fill the key count selector with every allowed value and select `current`.
pub fn populate_selector(
    document: &Document,
    selector: &HtmlSelectElement,
    options: impl Iterator<Item = u8>,
    current: u8,
) -> Result<(), JsValue> {
    selector.set_inner_html("");
    for value in options {
        let option = document.create_element("option")?;
        option.set_attribute("value", &value.to_string())?;
        option.set_text_content(Some(&value.to_string()));
        selector.append_child(&option)?;
    }
    selector.set_value(&current.to_string());
    Ok(())
}

fn em(value: f64) -> String {
    format!("{}em", value)
}
