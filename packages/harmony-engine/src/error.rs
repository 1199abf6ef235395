//! # Error Types
//!
//! This module defines all error types for the harmony engine.
//!
//! ## Error Types
//! - `MalformedPitch` - A pitch name that cannot be read as scientific pitch notation
//! - `UnsupportedMode` - A harmony mode tag outside the seven known modes
//! - `EmptyMelody` - An aggregate query over a melody with no notes
//!
//! ## Usage
//! ```rust
//! use harmony::{generate_by_name, HarmonyError, Note};
//!
//! let melody = vec![Note::new("C4", 1.0, 0.0)];
//! match generate_by_name(&melody, "ninth") {
//!     Ok(notes) => println!("{} harmony notes", notes.len()),
//!     Err(HarmonyError::UnsupportedMode(tag)) => eprintln!("no such mode: {}", tag),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HarmonyError {
    /// A pitch name could not be converted to a semitone index.
    ///
    /// # Example
    /// ```
    /// # use harmony::HarmonyError;
    /// let err = HarmonyError::MalformedPitch {
    ///     pitch: "H4".to_string(),
    ///     reason: "unknown note letter 'H'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Malformed pitch 'H4': unknown note letter 'H'");
    /// ```
    #[error("Malformed pitch '{pitch}': {reason}")]
    MalformedPitch { pitch: String, reason: String },

    /// The harmony mode tag is not one of the supported modes.
    ///
    /// # Example
    /// ```
    /// # use harmony::HarmonyError;
    /// let err = HarmonyError::UnsupportedMode("ninth".to_string());
    /// assert_eq!(err.to_string(), "Unsupported harmony mode: ninth");
    /// ```
    #[error("Unsupported harmony mode: {0}")]
    UnsupportedMode(String),

    /// An operation that needs at least one note was given an empty melody.
    #[error("Melody contains no notes")]
    EmptyMelody,
}

impl HarmonyError {
    pub(crate) fn malformed(pitch: &str, reason: impl Into<String>) -> Self {
        HarmonyError::MalformedPitch {
            pitch: pitch.to_string(),
            reason: reason.into(),
        }
    }
}
