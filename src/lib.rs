//! Note/MIDI mapping, key layout and playback state for an on-screen piano.
//!
//! ## Modules
//! - `note` - Pitch classes, notes, and MIDI number conversion
//! - `layout` - Key geometry for a given number of keys
//! - `playback` - Input events, sample cache, and per-note voices
//! - `keyboard` - Widget state tying layout and playback together
//! - `config` - Key count and asset settings, loadable from YAML
//! - `error` - Error types

pub mod config;
pub mod error;
pub mod keyboard;
pub mod layout;
pub mod note;
pub mod playback;

pub use config::{AssetConfig, KeyCount, KeyboardConfig};
pub use error::*;
pub use keyboard::Keyboard;
pub use layout::{starting_note, KeyColor, KeyDescriptor, KeySizes, KeyboardLayout};
pub use note::{midi_to_note, note_to_midi, Note, PitchClass};
pub use playback::{AudioBackend, InputEvent, InputKind, Modality, PlaybackCoordinator};

/// Build the layout for `number_of_keys` keys.
///
/// # Errors
/// Returns [`PianoError::KeyCountOutOfRange`] unless `number_of_keys` is in 1..=88.
pub fn build_layout(number_of_keys: u32) -> Result<KeyboardLayout, PianoError> {
    Ok(KeyboardLayout::build(KeyCount::new(number_of_keys)?))
}
