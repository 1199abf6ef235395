//! # Pitch Space
//!
//! Conversion between scientific pitch names (`C4`, `D#5`, `Bb3`) and a linear
//! semitone index on the MIDI scale, where all harmony arithmetic happens.
//!
//! ## Index Layout
//! - `C4` = 60 (middle C), `A4` = 69, `C-1` = 0
//! - index = `(octave + 1) * 12 + pitch_class`
//! - Indices below 0 are allowed and format with a negative octave (`B-2` = -1)
//!
//! ## Accepted Names
//! - Letter `A`-`G` in either case
//! - Up to two accidentals, all `#` or all `b`
//! - Optional octave number, defaulting to 4 (`E` == `E4`)
//!
//! ## Example
//! ```rust
//! use harmony::{Pitch, Spelling};
//!
//! let c4: Pitch = "C4".parse()?;
//! assert_eq!(c4.index(), 60);
//! assert_eq!(c4.transpose(-3).name(Spelling::Sharps), "A3");
//! assert_eq!(c4.transpose(-9).name(Spelling::Flats), "Eb3");
//! # Ok::<(), harmony::HarmonyError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HarmonyError;

/// Octave assumed when a pitch name carries none
pub const DEFAULT_OCTAVE: i32 = 4;

const MAX_OCTAVE_MAGNITUDE: i32 = 99;
const MAX_ACCIDENTALS: usize = 2;

// 0=C, 1=C#/Db, 2=D, 3=D#/Eb, 4=E, 5=F, 6=F#/Gb, 7=G, 8=G#/Ab, 9=A, 10=A#/Bb, 11=B
const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// How black-key pitch classes are named when formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

/// A pitch as a semitone index (C4 = 60)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pitch(i32);

impl Pitch {
    pub fn from_index(index: i32) -> Self {
        Pitch(index)
    }

    /// Parse a scientific pitch name.
    ///
    /// # Errors
    /// Returns [`HarmonyError::MalformedPitch`] when the letter, accidentals
    /// or octave cannot be read.
    pub fn parse(name: &str) -> Result<Self, HarmonyError> {
        let trimmed = name.trim();
        let mut chars = trimmed.chars();
        let letter = chars
            .next()
            .ok_or_else(|| HarmonyError::malformed(name, "empty pitch name"))?;
        let base = letter_to_semitone(letter).ok_or_else(|| {
            HarmonyError::malformed(name, format!("unknown note letter '{}'", letter))
        })?;

        let rest = chars.as_str();
        let accidental_len = rest
            .bytes()
            .take_while(|b| *b == b'#' || *b == b'b')
            .count();
        let (accidentals, octave_part) = rest.split_at(accidental_len);
        let alteration = accidental_offset(accidentals)
            .ok_or_else(|| HarmonyError::malformed(name, "invalid accidentals"))?;

        let octave = if octave_part.is_empty() {
            DEFAULT_OCTAVE
        } else if octave_part.starts_with('+') {
            return Err(HarmonyError::malformed(name, format!("invalid octave '{}'", octave_part)));
        } else {
            octave_part
                .parse::<i32>()
                .map_err(|_| HarmonyError::malformed(name, format!("invalid octave '{}'", octave_part)))?
        };
        if octave.abs() > MAX_OCTAVE_MAGNITUDE {
            return Err(HarmonyError::malformed(name, "octave out of range"));
        }

        Ok(Pitch((octave + 1) * 12 + base + alteration))
    }

    pub fn index(self) -> i32 {
        self.0
    }

    /// Shift by a signed number of semitones (negative = down)
    pub fn transpose(self, semitones: i32) -> Self {
        Pitch(self.0.saturating_add(semitones))
    }

    /// Signed distance in semitones from `other` to `self`
    pub fn interval_from(self, other: Pitch) -> i32 {
        self.0 - other.0
    }

    /// Pitch class, 0 (C) through 11 (B)
    pub fn pitch_class(self) -> i32 {
        self.0.rem_euclid(12)
    }

    pub fn octave(self) -> i32 {
        self.0.div_euclid(12) - 1
    }

    /// Format as a pitch name, e.g. `C#4` or `Db4`
    pub fn name(self, spelling: Spelling) -> String {
        let names = match spelling {
            Spelling::Sharps => &SHARP_NAMES,
            Spelling::Flats => &FLAT_NAMES,
        };
        format!("{}{}", names[self.pitch_class() as usize], self.octave())
    }
}

impl FromStr for Pitch {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pitch::parse(s)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name(Spelling::Sharps))
    }
}

/// Note letter to semitone offset from C
fn letter_to_semitone(letter: char) -> Option<i32> {
    match letter.to_ascii_uppercase() {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

fn accidental_offset(accidentals: &str) -> Option<i32> {
    if accidentals.len() > MAX_ACCIDENTALS {
        return None;
    }
    if accidentals.bytes().all(|b| b == b'#') {
        Some(accidentals.len() as i32)
    } else if accidentals.bytes().all(|b| b == b'b') {
        Some(-(accidentals.len() as i32))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(name: &str) -> i32 {
        Pitch::parse(name).unwrap().index()
    }

    #[test]
    fn test_parse_naturals() {
        assert_eq!(index("C4"), 60);
        assert_eq!(index("D4"), 62);
        assert_eq!(index("E4"), 64);
        assert_eq!(index("F4"), 65);
        assert_eq!(index("G4"), 67);
        assert_eq!(index("A4"), 69);
        assert_eq!(index("B4"), 71);
        assert_eq!(index("C5"), 72);
    }

    #[test]
    fn test_parse_accidentals() {
        assert_eq!(index("D#5"), 75);
        assert_eq!(index("Bb3"), 58);
        assert_eq!(index("F##4"), 67);
        assert_eq!(index("Ebb4"), 62);
        // B# and Cb cross the octave boundary
        assert_eq!(index("B#3"), 60);
        assert_eq!(index("Cb4"), 59);
    }

    #[test]
    fn test_parse_lowercase_and_whitespace() {
        assert_eq!(index(" c4 "), 60);
        assert_eq!(index("bb3"), 58);
    }

    #[test]
    fn test_missing_octave_defaults_to_four() {
        assert_eq!(index("C"), 60);
        assert_eq!(index("F#"), 66);
    }

    #[test]
    fn test_negative_octave() {
        assert_eq!(index("C-1"), 0);
        assert_eq!(index("B-2"), -1);
    }

    #[test]
    fn test_parse_rejects_malformed_names() {
        for bad in ["", "   ", "H4", "4C", "C#b4", "C###4", "Cx4", "C4.5", "C 4", "C999", "C+4", "Db+3"] {
            let result = Pitch::parse(bad);
            assert!(
                matches!(result, Err(HarmonyError::MalformedPitch { .. })),
                "expected '{}' to be rejected, got {:?}",
                bad,
                result
            );
        }
    }

    #[test]
    fn test_malformed_error_keeps_original_text() {
        match Pitch::parse("X9") {
            Err(HarmonyError::MalformedPitch { pitch, reason }) => {
                assert_eq!(pitch, "X9");
                assert!(reason.contains('X'));
            }
            other => panic!("expected MalformedPitch, got {:?}", other),
        }
    }

    #[test]
    fn test_format_prefers_sharps_by_default() {
        assert_eq!(Pitch::from_index(61).to_string(), "C#4");
        assert_eq!(Pitch::from_index(70).to_string(), "A#4");
        assert_eq!(Pitch::from_index(70).name(Spelling::Flats), "Bb4");
    }

    #[test]
    fn test_format_octave_boundaries() {
        assert_eq!(Pitch::from_index(59).to_string(), "B3");
        assert_eq!(Pitch::from_index(0).to_string(), "C-1");
        assert_eq!(Pitch::from_index(-1).to_string(), "B-2");
    }

    #[test]
    fn test_round_trip_natural_and_sharp_names() {
        for name in ["C4", "C#4", "D#5", "E2", "F#3", "G#6", "A#0", "B7", "C-1"] {
            let pitch = Pitch::parse(name).unwrap();
            assert_eq!(pitch.name(Spelling::Sharps), name);
            assert_eq!(Pitch::parse(&pitch.to_string()).unwrap(), pitch);
        }
    }

    #[test]
    fn test_flat_names_canonicalize_to_sharps() {
        assert_eq!(Pitch::parse("Bb3").unwrap().to_string(), "A#3");
        assert_eq!(Pitch::parse("Bb3").unwrap().name(Spelling::Flats), "Bb3");
    }

    #[test]
    fn test_transpose_and_interval() {
        let c4 = Pitch::parse("C4").unwrap();
        let g4 = Pitch::parse("G4").unwrap();
        assert_eq!(g4.interval_from(c4), 7);
        assert_eq!(c4.transpose(-7).to_string(), "F3");
        assert_eq!(c4.transpose(12).to_string(), "C5");
    }
}
