//! # Harmony Modes
//!
//! The closed set of transformations the generator knows, their wire tags and
//! the display catalog served to clients.
//!
//! | Tag | Rule |
//! |---|---|
//! | `third` | every note down 3 semitones |
//! | `fifth` | every note down 4 semitones (historical name, shifts a major third) |
//! | `parallel_fourth` | every note down 5 semitones |
//! | `parallel_sixth` | every note down 8 semitones |
//! | `contrary` | starts 7 below the melody and mirrors each melodic step |
//! | `oblique` | holds the first note 7 semitones down |
//! | `pedal` | one note an octave under the lowest melody note, spanning the piece |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HarmonyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonyMode {
    Third,
    Fifth,
    ParallelFourth,
    ParallelSixth,
    Contrary,
    Oblique,
    Pedal,
}

impl HarmonyMode {
    pub const ALL: [HarmonyMode; 7] = [
        HarmonyMode::Third,
        HarmonyMode::Fifth,
        HarmonyMode::ParallelFourth,
        HarmonyMode::ParallelSixth,
        HarmonyMode::Contrary,
        HarmonyMode::Oblique,
        HarmonyMode::Pedal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HarmonyMode::Third => "third",
            HarmonyMode::Fifth => "fifth",
            HarmonyMode::ParallelFourth => "parallel_fourth",
            HarmonyMode::ParallelSixth => "parallel_sixth",
            HarmonyMode::Contrary => "contrary",
            HarmonyMode::Oblique => "oblique",
            HarmonyMode::Pedal => "pedal",
        }
    }

    /// Downward distance in semitones between melody and harmony.
    ///
    /// For the parallel modes this is the fixed interval; for contrary and
    /// oblique motion it is the starting interval, for the pedal the octave.
    pub fn semitones(self) -> i32 {
        match self {
            HarmonyMode::Third => 3,
            // Named "fifth" but moves a major third. Kept as-is: existing
            // clients depend on this output.
            HarmonyMode::Fifth => 4,
            HarmonyMode::ParallelFourth => 5,
            HarmonyMode::ParallelSixth => 8,
            HarmonyMode::Contrary | HarmonyMode::Oblique => 7,
            HarmonyMode::Pedal => 12,
        }
    }

    /// True for the modes that transpose each note independently
    pub fn is_parallel(self) -> bool {
        matches!(
            self,
            HarmonyMode::Third
                | HarmonyMode::Fifth
                | HarmonyMode::ParallelFourth
                | HarmonyMode::ParallelSixth
        )
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HarmonyMode::Third => "Third Harmony",
            HarmonyMode::Fifth => "Fifth Harmony",
            HarmonyMode::ParallelFourth => "Parallel Fourths",
            HarmonyMode::ParallelSixth => "Parallel Sixths",
            HarmonyMode::Contrary => "Contrary Motion",
            HarmonyMode::Oblique => "Oblique Motion",
            HarmonyMode::Pedal => "Pedal Tone",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            HarmonyMode::Third => "Classic parallel harmony a third below the melody",
            HarmonyMode::Fifth => "Parallel harmony under the melody",
            HarmonyMode::ParallelFourth => "Modern-sounding parallel fourths",
            HarmonyMode::ParallelSixth => "Warm parallel sixths",
            HarmonyMode::Contrary => "Harmony moves down when the melody moves up, and vice versa",
            HarmonyMode::Oblique => "Harmony holds a fixed pitch while the melody moves freely",
            HarmonyMode::Pedal => "A sustained bass note under the whole melody",
        }
    }

    /// Every tag in declaration order, for error messages
    pub fn valid_tags() -> Vec<&'static str> {
        Self::ALL.iter().map(|mode| mode.as_str()).collect()
    }
}

impl FromStr for HarmonyMode {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| HarmonyError::UnsupportedMode(s.to_string()))
    }
}

impl fmt::Display for HarmonyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry describing one harmony mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarmonyTypeInfo {
    pub value: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// All harmony modes with their display names, in declaration order
pub fn catalog() -> Vec<HarmonyTypeInfo> {
    HarmonyMode::ALL
        .iter()
        .map(|mode| HarmonyTypeInfo {
            value: mode.as_str(),
            name: mode.display_name(),
            description: mode.description(),
        })
        .collect()
}
