//! Note → active voice tracking

use log::{debug, warn};
use std::collections::HashMap;

use super::samples::SampleBank;
use super::types::{AudioBackend, InputEvent, InputKind};
use crate::note::Note;

/// Owns the audio backend, the loaded samples and the voices currently sounding.
pub struct PlaybackCoordinator<B: AudioBackend> {
    backend: B,
    samples: SampleBank<B::Sample>,
    active: HashMap<Note, B::Voice>,
}

impl<B: AudioBackend> PlaybackCoordinator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            samples: SampleBank::new(),
            active: HashMap::new(),
        }
    }

    /// Apply one input event. Returns whether a voice was started or stopped.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        let note = Note::from_midi(event.midi_number);
        match event.kind {
            InputKind::Press => self.press(note),
            InputKind::Release | InputKind::Leave => self.release(note),
        }
    }

    /// Start the sample for `note`, replacing any voice already sounding for it.
    ///
    /// Returns `false` when nothing could be played.
    pub fn press(&mut self, note: Note) -> bool {
        let Some(sample) = self.samples.get(note) else {
            debug!("no sample loaded for {}, ignoring press", note);
            return false;
        };

        let voice = match self.backend.start(sample) {
            Ok(voice) => voice,
            Err(e) => {
                warn!("could not start {}: {}", note, e);
                return false;
            }
        };

        if let Some(previous) = self.active.insert(note, voice) {
            self.backend.stop(previous);
        }
        true
    }

    /// Stop the voice for `note` if one is sounding. Returns `false` otherwise.
    pub fn release(&mut self, note: Note) -> bool {
        match self.active.remove(&note) {
            Some(voice) => {
                self.backend.stop(voice);
                true
            }
            None => false,
        }
    }

    /// Stop every sounding voice.
    pub fn stop_all(&mut self) {
        if !self.active.is_empty() {
            debug!("stopping {} active voices", self.active.len());
        }
        for (_, voice) in self.active.drain() {
            self.backend.stop(voice);
        }
    }

    pub fn is_active(&self, note: Note) -> bool {
        self.active.contains_key(&note)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Sounding notes in ascending pitch order.
    pub fn active_notes(&self) -> Vec<Note> {
        let mut notes: Vec<Note> = self.active.keys().copied().collect();
        notes.sort_by_key(|note| note.to_midi());
        notes
    }

    pub fn samples(&self) -> &SampleBank<B::Sample> {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut SampleBank<B::Sample> {
        &mut self.samples
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
