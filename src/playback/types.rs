//! Input event and audio backend definitions

use serde::{Deserialize, Serialize};

use crate::error::PianoError;

/// What happened to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Mouse button or finger went down on the key
    Press,
    /// Mouse button or finger came up
    Release,
    /// Pointer left the key while it was held
    Leave,
}

/// Which input device produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    #[default]
    Mouse,
    Touch,
}

/// A key input, identified by the key's MIDI number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputEvent {
    pub kind: InputKind,
    pub modality: Modality,
    pub midi_number: i32,
}

impl InputEvent {
    pub fn new(kind: InputKind, modality: Modality, midi_number: i32) -> Self {
        Self {
            kind,
            modality,
            midi_number,
        }
    }

    pub fn press(midi_number: i32) -> Self {
        Self::new(InputKind::Press, Modality::Mouse, midi_number)
    }

    pub fn release(midi_number: i32) -> Self {
        Self::new(InputKind::Release, Modality::Mouse, midi_number)
    }

    pub fn leave(midi_number: i32) -> Self {
        Self::new(InputKind::Leave, Modality::Mouse, midi_number)
    }

    pub fn with_modality(self, modality: Modality) -> Self {
        Self { modality, ..self }
    }

    /// Whether the key should be shown held down after this event.
    pub fn is_press(&self) -> bool {
        self.kind == InputKind::Press
    }
}

/// Something that can play decoded samples.
///
/// A `Voice` is the handle of one sounding sample; passing it back to
/// [`stop`](AudioBackend::stop) silences it.
pub trait AudioBackend {
    type Sample;
    type Voice;

    fn start(&mut self, sample: &Self::Sample) -> Result<Self::Voice, PianoError>;

    fn stop(&mut self, voice: Self::Voice);
}
