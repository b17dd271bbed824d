//! Integration tests for the piano keyboard
//!
//! Drives a whole keyboard through the public API: layout rebuilds, input
//! events, and sample loading.

use piano::{
    build_layout, AudioBackend, InputEvent, Keyboard, KeyCount, KeyboardConfig, Modality, Note,
    PianoError,
};

#[derive(Default)]
struct CountingBackend {
    playing: Vec<u32>,
    next: u32,
}

impl AudioBackend for CountingBackend {
    type Sample = Note;
    type Voice = u32;

    fn start(&mut self, _sample: &Note) -> Result<u32, PianoError> {
        self.next += 1;
        self.playing.push(self.next);
        Ok(self.next)
    }

    fn stop(&mut self, voice: u32) {
        self.playing.retain(|&v| v != voice);
    }
}

fn loaded_keyboard(config: KeyboardConfig) -> Keyboard<CountingBackend> {
    let mut keyboard = Keyboard::new(config, CountingBackend::default());
    let notes: Vec<Note> = keyboard.preload_assets().into_iter().map(|(note, _)| note).collect();
    for note in notes {
        keyboard.playback_mut().samples_mut().insert(note, note);
    }
    keyboard
}

#[test]
fn test_default_keyboard_has_24_keys_from_c3() {
    let keyboard = loaded_keyboard(KeyboardConfig::default());
    assert_eq!(keyboard.number_of_keys(), 24);
    assert_eq!(keyboard.layout().first_note().unwrap().to_string(), "C3");
    assert_eq!(keyboard.playback().samples().len(), 36);
}

#[test]
fn test_preload_assets_follow_path_convention() {
    let keyboard = loaded_keyboard(KeyboardConfig::default());
    let assets = keyboard.preload_assets();
    assert_eq!(assets.len(), 36);
    assert!(assets
        .iter()
        .any(|(note, path)| note.to_string() == "Cs2" && path == "audio/Cs2.mp3"));
}

#[test]
fn test_press_and_release_through_keyboard() {
    let mut keyboard = loaded_keyboard(KeyboardConfig::default());
    // C3 = 48
    assert!(keyboard.handle(InputEvent::press(48)));
    assert_eq!(keyboard.playback().active_count(), 1);
    assert!(keyboard.handle(InputEvent::release(48)));
    assert_eq!(keyboard.playback().active_count(), 0);
    assert!(keyboard.playback().backend().playing.is_empty());
}

#[test]
fn test_keys_above_preloaded_range_are_silent() {
    let mut keyboard = loaded_keyboard(KeyboardConfig::default());
    // C4 = 60 is on the 24-key keyboard but only octaves 1..=3 are loaded
    assert!(keyboard.layout().contains(60));
    assert!(!keyboard.handle(InputEvent::press(60)));
    assert_eq!(keyboard.playback().active_count(), 0);
}

#[test]
fn test_rebuild_stops_sounds_and_drops_stale_keys() {
    let mut keyboard = loaded_keyboard(KeyboardConfig::default());
    keyboard.handle(InputEvent::press(48).with_modality(Modality::Touch));
    keyboard.handle(InputEvent::press(50));
    assert_eq!(keyboard.playback().active_count(), 2);

    // 12 keys: C4..B4
    let layout = keyboard.set_number_of_keys(KeyCount::new(12).unwrap());
    assert_eq!(layout.len(), 12);
    assert!(!layout.contains(48));

    assert_eq!(keyboard.playback().active_count(), 0);
    assert!(keyboard.playback().backend().playing.is_empty());

    // C3 is no longer a key, even though its sample is loaded
    assert!(!keyboard.handle(InputEvent::press(48)));
    assert!(!keyboard.handle(InputEvent::release(48)));
}

#[test]
fn test_full_size_keyboard() {
    let mut keyboard = loaded_keyboard(KeyboardConfig::default());
    let layout = keyboard.set_number_of_keys(KeyCount::new(88).unwrap());
    assert_eq!(layout.first_note().unwrap().to_string(), "C1");
    assert_eq!(layout.keys.last().unwrap().note.to_string(), "Ds8");
    assert_eq!(layout.white_key_count() + layout.black_key_count(), 88);
    // trailing Ds8 is black, so it adds to the width
    assert!((layout.total_width_em - (51.0 * 2.0 + 1.2)).abs() < 1e-9);
}

#[test]
fn test_config_from_yaml_drives_keyboard() {
    let config = KeyboardConfig::from_yaml("initial-keys: 49\nassets:\n  octaves: [2, 2]").unwrap();
    let keyboard = loaded_keyboard(config);
    assert_eq!(keyboard.number_of_keys(), 49);
    assert_eq!(keyboard.layout().first_note().unwrap().to_string(), "C2");
    assert_eq!(keyboard.playback().samples().len(), 12);
}

#[test]
fn test_build_layout_rejects_out_of_range() {
    assert_eq!(
        build_layout(0).unwrap_err(),
        PianoError::KeyCountOutOfRange { value: 0 }
    );
    assert!(build_layout(89).is_err());
    assert_eq!(build_layout(88).unwrap().len(), 88);
}

#[test]
fn test_selector_options() {
    let options = Keyboard::<CountingBackend>::key_count_options();
    assert_eq!(options.len(), 88);
    assert_eq!(options[0].get(), 1);
    assert_eq!(options[87].get(), 88);
}
