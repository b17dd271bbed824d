//! # Keyboard Layout
//!
//! Turns a key count into positioned key descriptors for a renderer.
//!
//! ## Geometry
//! All lengths are in `em`. White keys sit side by side; black keys are laid on
//! top of them at an absolute offset from the left edge.
//!
//! | Keys   | White width | Black width | First note |
//! |--------|-------------|-------------|------------|
//! | 1-12   | 3.2         | 1.92        | C4         |
//! | 13-24  | 3.2         | 1.92        | C3         |
//! | 25-36  | 3.2         | 1.92        | C2         |
//! | 37-49  | 2.6         | 1.56        | C2         |
//! | 50-60  | 2.6         | 1.56        | C1         |
//! | 61-88  | 2.0         | 1.2         | C1         |
//!
//! Black keys are centred on the boundary between their neighbouring white keys,
//! then nudged by `white / 20`: C# and F# to the left, D# and A# to the right,
//! the way the keys sit on a real piano.
//!
//! ## Example
//! ```rust
//! use piano::{KeyboardLayout, KeyCount};
//!
//! let layout = KeyboardLayout::build(KeyCount::new(24).unwrap());
//! assert_eq!(layout.first_note().unwrap().to_string(), "C3");
//! assert_eq!(layout.len(), 24);
//! assert_eq!(layout.white_key_count(), 14);
//! ```

use serde::Serialize;

use crate::config::KeyCount;
use crate::note::{Note, PitchClass};

const BLACK_KEY_RATIO: f64 = 0.6;
const BLACK_KEY_GAP_DIVISOR: f64 = 20.0;

/// Key widths for a given keyboard size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeySizes {
    pub white_key_width: f64,
    pub black_key_width: f64,
    /// How far C#/F# and D#/A# are shifted away from centre
    pub black_key_gap: f64,
}

impl KeySizes {
    pub fn for_key_count(count: KeyCount) -> Self {
        let white_key_width = match count.get() {
            0..=36 => 3.2,
            37..=60 => 2.6,
            _ => 2.0,
        };
        Self {
            white_key_width,
            black_key_width: white_key_width * BLACK_KEY_RATIO,
            black_key_gap: white_key_width / BLACK_KEY_GAP_DIVISOR,
        }
    }
}

/// First (lowest) note of a keyboard with the given number of keys.
///
/// Small keyboards start higher so they stay around a comfortable register.
pub fn starting_note(count: KeyCount) -> Note {
    Note::from_midi(starting_midi(count))
}

/// MIDI number of [`starting_note`]: C4, C3, C2 or C1.
fn starting_midi(count: KeyCount) -> i32 {
    match count.get() {
        0..=12 => 60,
        13..=24 => 48,
        25..=49 => 36,
        _ => 24,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyColor {
    White,
    Black,
}

/// One key of a generated layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyDescriptor {
    pub midi_number: i32,
    pub note: Note,
    pub color: KeyColor,
    pub width_em: f64,
    /// Absolute left offset; only black keys are positioned absolutely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_offset_em: Option<f64>,
    /// Left edge of the key for any renderer that positions every key
    pub x_em: f64,
}

impl KeyDescriptor {
    pub fn is_black(&self) -> bool {
        self.color == KeyColor::Black
    }
}

/// Ordered keys plus the total width of the keyboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardLayout {
    pub keys: Vec<KeyDescriptor>,
    pub total_width_em: f64,
    pub white_key_width_em: f64,
    pub black_key_width_em: f64,
}

impl KeyboardLayout {
    /// Build the layout for `count` keys.
    pub fn build(count: KeyCount) -> Self {
        let sizes = KeySizes::for_key_count(count);
        let number_of_keys = i32::from(count.get());
        let start_midi = starting_midi(count);

        let mut keys = Vec::with_capacity(number_of_keys as usize);
        let mut white_key_count = 0u32;
        let mut total_width_em = 0.0;

        for index in 1..=number_of_keys {
            let midi_number = start_midi + index - 1;
            let note = Note::from_midi(midi_number);
            let white_edge = sizes.white_key_width * f64::from(white_key_count);

            let key = if note.is_sharp() {
                let mut left = white_edge - sizes.black_key_width / 2.0;
                match note.pitch_class {
                    PitchClass::Cs | PitchClass::Fs => left -= sizes.black_key_gap,
                    PitchClass::Ds | PitchClass::As => left += sizes.black_key_gap,
                    _ => {}
                }

                // a black key at either end sticks out past the white keys
                if index == 1 || index == number_of_keys {
                    total_width_em += sizes.black_key_width;
                }

                KeyDescriptor {
                    midi_number,
                    note,
                    color: KeyColor::Black,
                    width_em: sizes.black_key_width,
                    left_offset_em: Some(left),
                    x_em: left,
                }
            } else {
                white_key_count += 1;
                total_width_em += sizes.white_key_width;

                KeyDescriptor {
                    midi_number,
                    note,
                    color: KeyColor::White,
                    width_em: sizes.white_key_width,
                    left_offset_em: None,
                    x_em: white_edge,
                }
            };

            keys.push(key);
        }

        Self {
            keys,
            total_width_em,
            white_key_width_em: sizes.white_key_width,
            black_key_width_em: sizes.black_key_width,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn first_note(&self) -> Option<Note> {
        self.keys.first().map(|key| key.note)
    }

    pub fn white_key_count(&self) -> usize {
        self.keys.iter().filter(|key| !key.is_black()).count()
    }

    pub fn black_key_count(&self) -> usize {
        self.keys.iter().filter(|key| key.is_black()).count()
    }

    /// Key with the given MIDI number, if it is on this keyboard.
    pub fn key(&self, midi_number: i32) -> Option<&KeyDescriptor> {
        let first = self.keys.first()?.midi_number;
        let index = usize::try_from(midi_number.checked_sub(first)?).ok()?;
        self.keys.get(index)
    }

    pub fn contains(&self, midi_number: i32) -> bool {
        self.key(midi_number).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(keys: u32) -> KeyboardLayout {
        KeyboardLayout::build(KeyCount::new(keys).unwrap())
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_single_key() {
        let layout = layout(1);
        assert_eq!(layout.len(), 1);
        let key = &layout.keys[0];
        assert_eq!(key.note.to_string(), "C4");
        assert_eq!(key.color, KeyColor::White);
        assert_eq!(key.x_em, 0.0);
        assert_eq!(key.left_offset_em, None);
        assert_close(layout.total_width_em, 3.2);
    }

    #[test]
    fn test_twenty_four_keys_start_at_c3() {
        let layout = layout(24);
        assert_eq!(layout.first_note().unwrap().to_string(), "C3");
        assert_eq!(layout.len(), 24);
        for pair in layout.keys.windows(2) {
            assert_eq!(pair[1].midi_number, pair[0].midi_number + 1);
        }
        assert_eq!(layout.keys[23].note.to_string(), "B4");
    }

    #[test]
    fn test_starting_note_tiers() {
        let start = |keys| starting_note(KeyCount::new(keys).unwrap()).to_string();
        assert_eq!(start(1), "C4");
        assert_eq!(start(12), "C4");
        assert_eq!(start(13), "C3");
        assert_eq!(start(24), "C3");
        assert_eq!(start(25), "C2");
        assert_eq!(start(49), "C2");
        assert_eq!(start(50), "C1");
        assert_eq!(start(88), "C1");
    }

    #[test]
    fn test_starting_midi_matches_starting_note() {
        for count in KeyCount::options() {
            let note = starting_note(count);
            assert_eq!(note.pitch_class, PitchClass::C);
            assert_eq!(note.to_midi(), Some(starting_midi(count)));
            assert_eq!(KeyboardLayout::build(count).keys[0].midi_number, starting_midi(count));
        }
    }

    #[test]
    fn test_size_tiers() {
        let white = |keys| KeySizes::for_key_count(KeyCount::new(keys).unwrap()).white_key_width;
        assert_close(white(36), 3.2);
        assert_close(white(37), 2.6);
        assert_close(white(60), 2.6);
        assert_close(white(61), 2.0);

        let sizes = KeySizes::for_key_count(KeyCount::new(88).unwrap());
        assert_close(sizes.black_key_width, 1.2);
        assert_close(sizes.black_key_gap, 0.1);
    }

    #[test]
    fn test_color_counts_cover_every_key() {
        for count in KeyCount::options() {
            let layout = KeyboardLayout::build(count);
            assert_eq!(
                layout.white_key_count() + layout.black_key_count(),
                count.get() as usize
            );
        }
    }

    #[test]
    fn test_black_key_offsets_in_one_octave() {
        // 12 keys: C4..B4, white 3.2, black 1.92, gap 0.16
        let layout = layout(12);
        let offset = |name: &str| {
            layout
                .keys
                .iter()
                .find(|key| key.note.to_string() == name)
                .and_then(|key| key.left_offset_em)
                .unwrap()
        };

        assert_close(offset("Cs4"), 3.2 * 1.0 - 0.96 - 0.16);
        assert_close(offset("Ds4"), 3.2 * 2.0 - 0.96 + 0.16);
        assert_close(offset("Fs4"), 3.2 * 4.0 - 0.96 - 0.16);
        assert_close(offset("Gs4"), 3.2 * 5.0 - 0.96);
        assert_close(offset("As4"), 3.2 * 6.0 - 0.96 + 0.16);
        assert_close(layout.total_width_em, 3.2 * 7.0);
    }

    #[test]
    fn test_white_key_positions() {
        let layout = layout(12);
        let whites: Vec<f64> = layout
            .keys
            .iter()
            .filter(|key| !key.is_black())
            .map(|key| key.x_em)
            .collect();
        for (i, x) in whites.iter().enumerate() {
            assert_close(*x, 3.2 * i as f64);
        }
    }

    #[test]
    fn test_trailing_black_key_widens_keyboard() {
        // C4, Cs4: the last key is black
        let layout = layout(2);
        assert!(layout.keys[1].is_black());
        assert_close(layout.total_width_em, 3.2 + 1.92);
    }

    #[test]
    fn test_key_lookup() {
        let layout = layout(24);
        let c3 = 48;
        assert_eq!(layout.key(c3).unwrap().note.to_string(), "C3");
        assert!(layout.contains(c3 + 23));
        assert!(!layout.contains(c3 + 24));
        assert!(!layout.contains(c3 - 1));
        assert!(!layout.contains(i32::MIN));
    }

    #[test]
    fn test_layout_serializes_camel_case() {
        let json = serde_json::to_value(layout(2)).unwrap();
        assert_eq!(json["keys"][0]["note"], "C4");
        assert_eq!(json["keys"][0]["color"], "white");
        assert!(json["keys"][0].get("leftOffsetEm").is_none());
        assert_eq!(json["keys"][1]["midiNumber"], 61);
        assert!(json["keys"][1]["leftOffsetEm"].is_number());
        assert!(json["totalWidthEm"].is_number());
    }
}
