//! # Keyboard
//!
//! The widget state behind a rendered keyboard: configuration, the current
//! layout, and playback.
//!
//! Changing the number of keys throws the old layout away. Sounding voices are
//! stopped first, and input for keys that are no longer on the keyboard is
//! ignored from then on.

use log::debug;

use crate::config::{KeyCount, KeyboardConfig};
use crate::layout::KeyboardLayout;
use crate::note::Note;
use crate::playback::{AudioBackend, InputEvent, PlaybackCoordinator};

pub struct Keyboard<B: AudioBackend> {
    config: KeyboardConfig,
    layout: KeyboardLayout,
    playback: PlaybackCoordinator<B>,
}

impl<B: AudioBackend> Keyboard<B> {
    pub fn new(config: KeyboardConfig, backend: B) -> Self {
        let layout = KeyboardLayout::build(config.initial_keys);
        Self {
            config,
            layout,
            playback: PlaybackCoordinator::new(backend),
        }
    }

    pub fn config(&self) -> &KeyboardConfig {
        &self.config
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }

    pub fn number_of_keys(&self) -> usize {
        self.layout.len()
    }

    /// Rebuild the keyboard with `count` keys.
    pub fn set_number_of_keys(&mut self, count: KeyCount) -> &KeyboardLayout {
        self.playback.stop_all();
        self.layout = KeyboardLayout::build(count);
        debug!(
            "rebuilt keyboard: {} keys from {}, {:.2}em wide",
            count,
            self.layout
                .first_note()
                .map(|note| note.to_string())
                .unwrap_or_default(),
            self.layout.total_width_em
        );
        &self.layout
    }

    /// Apply an input event for a key on the current keyboard.
    ///
    /// Events for MIDI numbers outside the current layout are dropped.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        if !self.layout.contains(event.midi_number) {
            debug!("ignoring {:?} for key {} not on keyboard", event.kind, event.midi_number);
            return false;
        }
        self.playback.handle(event)
    }

    /// Notes whose samples should be fetched at startup, with their asset paths.
    pub fn preload_assets(&self) -> Vec<(Note, String)> {
        self.config
            .assets
            .preload_notes()
            .into_iter()
            .map(|note| (note, self.config.assets.path_for(note)))
            .collect()
    }

    pub fn playback(&self) -> &PlaybackCoordinator<B> {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut PlaybackCoordinator<B> {
        &mut self.playback
    }

    /// Values offered by the key count selector.
    pub fn key_count_options() -> Vec<KeyCount> {
        KeyCount::options().collect()
    }
}
