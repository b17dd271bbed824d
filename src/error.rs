//! # Error Types
//!
//! All fallible operations in the piano library return [`PianoError`].
//!
//! ## Error Types
//! - `InvalidNote` - Note text that is not `<PitchClass><Octave>`
//! - `KeyCountOutOfRange` - Keyboard sizes outside 1..=88
//! - `Config` - YAML configuration that could not be read or parsed
//! - `Playback` - The audio backend refused to start a voice
//!
//! Missing samples are not errors: pressing a key without a loaded sample is a no-op.
//!
//! ## Usage
//! ```rust
//! use piano::{KeyCount, PianoError};
//!
//! match KeyCount::new(100) {
//!     Ok(count) => println!("{} keys", count.get()),
//!     Err(PianoError::KeyCountOutOfRange { value }) => {
//!         eprintln!("cannot build a keyboard with {} keys", value);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PianoError {
    /// Note text could not be parsed.
    ///
    /// # Example
    /// ```
    /// # use piano::PianoError;
    /// let err = PianoError::InvalidNote("H4".to_string());
    /// assert_eq!(err.to_string(), "Invalid note: H4");
    /// ```
    #[error("Invalid note: {0}")]
    InvalidNote(String),

    /// Keyboard size outside the supported range.
    ///
    /// # Example
    /// ```
    /// # use piano::PianoError;
    /// let err = PianoError::KeyCountOutOfRange { value: 0 };
    /// assert_eq!(err.to_string(), "Number of keys must be between 1 and 88, got 0");
    /// ```
    #[error("Number of keys must be between 1 and 88, got {value}")]
    KeyCountOutOfRange { value: u32 },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Playback failed: {0}")]
    Playback(String),
}
