//! # Notes and MIDI Numbers
//!
//! Conversion between note text like `Cs4` and integer MIDI note numbers.
//!
//! ## Notation
//! - A note is `<PitchClass><Octave>`: `C4`, `Cs4`, `As0`, `C-1`
//! - Sharps are written with a trailing `s` (`Cs`, `Ds`, `Fs`, `Gs`, `As`), never `#`
//! - Pitch class names are case-sensitive
//! - The octave is any integer; middle C is `C4`
//!
//! ## MIDI Formula
//! `midi = (octave + 1) * 12 + semitone`, so `C-1 = 0`, `C4 = 60`, `G9 = 127`.
//!
//! ## Example
//! ```rust
//! use piano::{midi_to_note, note_to_midi};
//!
//! assert_eq!(note_to_midi("C4"), Some(60));
//! assert_eq!(note_to_midi("Cs4"), Some(61));
//! assert_eq!(midi_to_note(61), "Cs4");
//! assert_eq!(note_to_midi("C#4"), None);
//! ```

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::PianoError;

/// One of the twelve pitch classes in an octave, sharps spelled with `s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PitchClass {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl PitchClass {
    /// All pitch classes in semitone order, starting at C.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Semitone offset above C (0..=11).
    pub fn semitone(self) -> u8 {
        match self {
            PitchClass::C => 0,
            PitchClass::Cs => 1,
            PitchClass::D => 2,
            PitchClass::Ds => 3,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::Fs => 6,
            PitchClass::G => 7,
            PitchClass::Gs => 8,
            PitchClass::A => 9,
            PitchClass::As => 10,
            PitchClass::B => 11,
        }
    }

    /// Pitch class for a semitone offset. Values outside 0..=11 wrap.
    pub fn from_semitone(semitone: i32) -> PitchClass {
        Self::ALL[semitone.rem_euclid(12) as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "Cs",
            PitchClass::D => "D",
            PitchClass::Ds => "Ds",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "Fs",
            PitchClass::G => "G",
            PitchClass::Gs => "Gs",
            PitchClass::A => "A",
            PitchClass::As => "As",
            PitchClass::B => "B",
        }
    }

    /// Parse an exact pitch class name (`"Cs"`, not `"cs"` or `"C#"`).
    pub fn from_name(name: &str) -> Option<PitchClass> {
        Self::ALL.into_iter().find(|pc| pc.name() == name)
    }

    /// Sharps are the black keys of a piano.
    pub fn is_sharp(self) -> bool {
        matches!(
            self,
            PitchClass::Cs | PitchClass::Ds | PitchClass::Fs | PitchClass::Gs | PitchClass::As
        )
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pitch class in a specific octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Note {
    pub pitch_class: PitchClass,
    pub octave: i32,
}

impl Note {
    pub fn new(pitch_class: PitchClass, octave: i32) -> Self {
        Self {
            pitch_class,
            octave,
        }
    }

    /// MIDI number for this note, `None` if it does not fit in an `i32`.
    pub fn to_midi(self) -> Option<i32> {
        let midi = (i64::from(self.octave) + 1) * 12 + i64::from(self.pitch_class.semitone());
        i32::try_from(midi).ok()
    }

    /// Note for a MIDI number. Defined for every integer.
    pub fn from_midi(midi: i32) -> Self {
        // div_euclid floors for a positive divisor, so negative numbers land in lower octaves
        Self {
            pitch_class: PitchClass::from_semitone(midi.rem_euclid(12)),
            octave: midi.div_euclid(12) - 1,
        }
    }

    pub fn is_sharp(self) -> bool {
        self.pitch_class.is_sharp()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}

impl FromStr for Note {
    type Err = PianoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_note(s).ok_or_else(|| PianoError::InvalidNote(s.to_string()))
    }
}

impl Serialize for Note {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn parse_note(s: &str) -> Option<Note> {
    let split = s.find(|c: char| c.is_ascii_digit() || c == '-')?;
    let (name, octave) = s.split_at(split);
    let pitch_class = PitchClass::from_name(name)?;

    let digits = octave.strip_prefix('-').unwrap_or(octave);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    // only the spelling Display produces: no leading zeros, no "-0"
    if (digits.len() > 1 && digits.starts_with('0')) || octave == "-0" {
        return None;
    }

    let octave: i32 = octave.parse().ok()?;
    Some(Note::new(pitch_class, octave))
}

/// Convert note text like `"Cs4"` to its MIDI number.
///
/// Returns `None` for malformed text, unknown pitch classes, or values that
/// do not fit in an `i32`.
///
/// # Examples
/// ```
/// use piano::note_to_midi;
///
/// assert_eq!(note_to_midi("A4"), Some(69));
/// assert_eq!(note_to_midi("C-1"), Some(0));
/// assert_eq!(note_to_midi("Es4"), None);
/// ```
pub fn note_to_midi(note: &str) -> Option<i32> {
    parse_note(note)?.to_midi()
}

/// Convert a MIDI number to note text like `"Cs4"`.
///
/// # Examples
/// ```
/// use piano::midi_to_note;
///
/// assert_eq!(midi_to_note(60), "C4");
/// assert_eq!(midi_to_note(0), "C-1");
/// assert_eq!(midi_to_note(-1), "B-2");
/// ```
pub fn midi_to_note(midi: i32) -> String {
    Note::from_midi(midi).to_string()
}
