//! Decoded sample cache keyed by note

use log::{info, warn};
use std::collections::HashMap;

use crate::note::Note;

/// Samples that finished loading, one per note.
///
/// Loads complete independently and in any order; a failed load only means that
/// note stays silent.
#[derive(Debug)]
pub struct SampleBank<S> {
    samples: HashMap<Note, S>,
    expected: usize,
}

impl<S> Default for SampleBank<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SampleBank<S> {
    pub fn new() -> Self {
        Self {
            samples: HashMap::new(),
            expected: 0,
        }
    }

    /// Number of loads in flight or done, for progress logging.
    pub fn expect(&mut self, count: usize) {
        self.expected = count;
    }

    pub fn insert(&mut self, note: Note, sample: S) {
        self.samples.insert(note, sample);
        if self.expected > 0 && self.samples.len() == self.expected {
            info!("all {} samples loaded", self.expected);
        }
    }

    /// Log a failed load. The bank is left unchanged.
    pub fn record_failure(&self, note: Note, reason: &str) {
        warn!("failed to load sample for {}: {}", note, reason);
    }

    pub fn get(&self, note: Note) -> Option<&S> {
        self.samples.get(&note)
    }

    pub fn contains(&self, note: Note) -> bool {
        self.samples.contains_key(&note)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
