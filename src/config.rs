//! # Keyboard Configuration
//!
//! Settings that drive the widget: how many keys to show first and where the
//! per-note audio samples live.
//!
//! Configuration is YAML with kebab-case keys. Every field is optional:
//!
//! ```yaml
//! initial-keys: 24
//! assets:
//!   base-path: audio
//!   extension: mp3
//!   octaves: [1, 3]
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use crate::error::PianoError;
use crate::note::{Note, PitchClass};

/// Number of keys on a rendered keyboard, always within 1..=88.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct KeyCount(u8);

impl KeyCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 88;

    pub fn new(value: u32) -> Result<Self, PianoError> {
        if (u32::from(Self::MIN)..=u32::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(PianoError::KeyCountOutOfRange { value })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every selectable key count, in ascending order.
    pub fn options() -> impl Iterator<Item = KeyCount> {
        (Self::MIN..=Self::MAX).map(KeyCount)
    }
}

impl Default for KeyCount {
    fn default() -> Self {
        Self(24)
    }
}

impl TryFrom<u32> for KeyCount {
    type Error = PianoError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for KeyCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Octaves that hold MIDI notes 0..=127 (C-1 through G9).
const PLAYABLE_OCTAVES: RangeInclusive<i32> = -1..=9;

/// Location and preload range of the per-note audio samples.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetConfig {
    /// Directory relative to the deployment root
    pub base_path: String,
    pub extension: String,
    /// Inclusive octave range to preload
    pub first_octave: i32,
    pub last_octave: i32,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            base_path: "audio".to_string(),
            extension: "mp3".to_string(),
            first_octave: 1,
            last_octave: 3,
        }
    }
}

impl AssetConfig {
    /// Asset path for a note, e.g. `audio/Cs4.mp3`.
    pub fn path_for(&self, note: Note) -> String {
        let base = self.base_path.trim_end_matches('/');
        if base.is_empty() {
            format!("{}.{}", note, self.extension)
        } else {
            format!("{}/{}.{}", base, note, self.extension)
        }
    }

    /// Every note whose sample is fetched at startup.
    pub fn preload_notes(&self) -> Vec<Note> {
        (self.first_octave..=self.last_octave)
            .flat_map(|octave| PitchClass::ALL.into_iter().map(move |pc| Note::new(pc, octave)))
            .collect()
    }
}

/// Complete widget configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyboardConfig {
    pub initial_keys: KeyCount,
    pub assets: AssetConfig,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    initial_keys: Option<u32>,
    assets: Option<RawAssets>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawAssets {
    base_path: Option<String>,
    extension: Option<String>,
    octaves: Option<(i32, i32)>,
}

impl KeyboardConfig {
    /// Parse YAML configuration. An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, PianoError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| PianoError::Config(e.to_string()))?;

        let initial_keys = match raw.initial_keys {
            Some(value) => KeyCount::new(value)
                .map_err(|e| PianoError::Config(format!("initial-keys: {}", e)))?,
            None => KeyCount::default(),
        };

        let mut assets = AssetConfig::default();
        if let Some(raw_assets) = raw.assets {
            if let Some(base_path) = raw_assets.base_path {
                assets.base_path = base_path;
            }
            if let Some(extension) = raw_assets.extension {
                let extension = extension.trim_start_matches('.');
                if extension.is_empty() {
                    return Err(PianoError::Config(
                        "assets.extension must not be empty".to_string(),
                    ));
                }
                assets.extension = extension.to_string();
            }
            if let Some((first, last)) = raw_assets.octaves {
                if first > last {
                    return Err(PianoError::Config(format!(
                        "assets.octaves must be ascending, got [{}, {}]",
                        first, last
                    )));
                }
                if !PLAYABLE_OCTAVES.contains(&first) || !PLAYABLE_OCTAVES.contains(&last) {
                    return Err(PianoError::Config(format!(
                        "assets.octaves must lie within [{}, {}], got [{}, {}]",
                        PLAYABLE_OCTAVES.start(),
                        PLAYABLE_OCTAVES.end(),
                        first,
                        last
                    )));
                }
                assets.first_octave = first;
                assets.last_octave = last;
            }
        }

        Ok(Self {
            initial_keys,
            assets,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PianoError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| PianoError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_count_bounds() {
        assert!(KeyCount::new(0).is_err());
        assert_eq!(KeyCount::new(1).unwrap().get(), 1);
        assert_eq!(KeyCount::new(88).unwrap().get(), 88);
        assert_eq!(
            KeyCount::new(89),
            Err(PianoError::KeyCountOutOfRange { value: 89 })
        );
        assert!(KeyCount::new(300).is_err());
    }

    #[test]
    fn test_key_count_options() {
        let options: Vec<u8> = KeyCount::options().map(KeyCount::get).collect();
        assert_eq!(options.len(), 88);
        assert_eq!(options.first(), Some(&1));
        assert_eq!(options.last(), Some(&88));
    }

    #[test]
    fn test_default_preload_set() {
        let assets = AssetConfig::default();
        let notes = assets.preload_notes();
        assert_eq!(notes.len(), 36);
        assert!(notes.contains(&"C1".parse().unwrap()));
        assert!(notes.contains(&"B3".parse().unwrap()));
        assert!(!notes.contains(&"C4".parse().unwrap()));
    }

    #[test]
    fn test_asset_path() {
        let assets = AssetConfig::default();
        assert_eq!(assets.path_for("Cs4".parse().unwrap()), "audio/Cs4.mp3");

        let nested = AssetConfig {
            base_path: "Piano/audio/".to_string(),
            extension: "ogg".to_string(),
            ..AssetConfig::default()
        };
        assert_eq!(nested.path_for("A3".parse().unwrap()), "Piano/audio/A3.ogg");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = KeyboardConfig::from_yaml("").unwrap();
        assert_eq!(config, KeyboardConfig::default());
        assert_eq!(config.initial_keys.get(), 24);
    }

    #[test]
    fn test_full_config() {
        let config = KeyboardConfig::from_yaml(
            r#"
initial-keys: 61
assets:
  base-path: samples
  extension: .wav
  octaves: [2, 4]
"#,
        )
        .unwrap();
        assert_eq!(config.initial_keys.get(), 61);
        assert_eq!(config.assets.base_path, "samples");
        assert_eq!(config.assets.extension, "wav");
        assert_eq!(config.assets.preload_notes().len(), 36);
        assert_eq!(config.assets.path_for("D2".parse().unwrap()), "samples/D2.wav");
    }

    #[test]
    fn test_widest_octave_range_is_accepted() {
        let config = KeyboardConfig::from_yaml("assets:\n  octaves: [-1, 9]").unwrap();
        assert_eq!(config.assets.preload_notes().len(), 11 * 12);
    }

    #[test]
    fn test_config_errors() {
        assert!(matches!(
            KeyboardConfig::from_yaml("initial-keys: 0"),
            Err(PianoError::Config(_))
        ));
        assert!(matches!(
            KeyboardConfig::from_yaml("initial-keys: 120"),
            Err(PianoError::Config(_))
        ));
        assert!(matches!(
            KeyboardConfig::from_yaml("assets:\n  octaves: [3, 1]"),
            Err(PianoError::Config(_))
        ));
        assert!(matches!(
            KeyboardConfig::from_yaml("assets:\n  octaves: [-2147483648, 2147483647]"),
            Err(PianoError::Config(_))
        ));
        assert!(matches!(
            KeyboardConfig::from_yaml("assets:\n  octaves: [0, 10]"),
            Err(PianoError::Config(_))
        ));
        assert!(matches!(
            KeyboardConfig::from_yaml("keys: 12"),
            Err(PianoError::Config(_))
        ));
    }
}
