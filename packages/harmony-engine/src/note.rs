//! Note records shared by melodies and harmony lines.

use serde::{Deserialize, Serialize};

use crate::error::HarmonyError;
use crate::pitch::{Pitch, Spelling};

fn default_duration() -> f64 {
    1.0
}

/// A single note: pitch name, duration and start time, both in seconds.
///
/// `duration` defaults to `1.0` and `offset` to `0.0` when deserialized from
/// a document that omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub pitch: String,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub offset: f64,
}

impl Note {
    pub fn new(pitch: impl Into<String>, duration: f64, offset: f64) -> Self {
        Self {
            pitch: pitch.into(),
            duration,
            offset,
        }
    }

    /// Time at which the note stops sounding
    pub fn end(&self) -> f64 {
        self.offset + self.duration
    }

    pub fn parse_pitch(&self) -> Result<Pitch, HarmonyError> {
        Pitch::parse(&self.pitch)
    }

    /// Same timing, different pitch
    pub(crate) fn with_pitch(&self, pitch: Pitch, spelling: Spelling) -> Note {
        Note {
            pitch: pitch.name(spelling),
            duration: self.duration,
            offset: self.offset,
        }
    }
}
