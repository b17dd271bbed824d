//! # Playback Module
//!
//! Starts and stops per-note audio samples in response to key input.
//!
//! ## Purpose
//! The keyboard renderer turns pointer and touch input into [`InputEvent`]s tagged
//! with a MIDI number. The [`PlaybackCoordinator`] turns those into voice
//! start/stop calls on an [`AudioBackend`], tracking at most one sounding voice
//! per note.
//!
//! ## Sub-modules
//! - `types` - InputEvent, InputKind, Modality, and the AudioBackend trait
//! - `samples` - SampleBank, the note → decoded sample cache
//! - `coordinator` - PlaybackCoordinator, the note → active voice map
//!
//! ## Playback Model
//! Samples are decoded buffers, so different notes sound at the same time.
//! Pressing a note that is already sounding stops the old voice before starting
//! a new one. Notes without a loaded sample are silent.
//!
//! ## Example
//! ```rust
//! use piano::playback::{AudioBackend, InputEvent, PlaybackCoordinator};
//! use piano::{Note, PianoError};
//!
//! struct Silent;
//!
//! impl AudioBackend for Silent {
//!     type Sample = ();
//!     type Voice = ();
//!     fn start(&mut self, _sample: &()) -> Result<(), PianoError> { Ok(()) }
//!     fn stop(&mut self, _voice: ()) {}
//! }
//!
//! let mut playback = PlaybackCoordinator::new(Silent);
//! let c4: Note = "C4".parse().unwrap();
//! playback.samples_mut().insert(c4, ());
//!
//! playback.handle(InputEvent::press(60));
//! assert!(playback.is_active(c4));
//! playback.handle(InputEvent::release(60));
//! assert!(!playback.is_active(c4));
//! ```

mod coordinator;
mod samples;
mod types;


pub use coordinator::PlaybackCoordinator;
pub use samples::SampleBank;
pub use types::{AudioBackend, InputEvent, InputKind, Modality};
