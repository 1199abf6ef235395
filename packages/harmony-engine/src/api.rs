//! # Public API
//!
//! Entry points for harmony generation.
//!
//! ## Generation Functions
//!
//! - [`generate()`] - Harmony notes for a melody and mode, sharp spelling
//! - [`generate_by_name()`] - Same, with the mode given as its wire tag
//! - [`generate_with_spelling()`] - Full [`Harmony`] report, including skipped notes
//! - [`quick_harmony()`] - Harmony for a single pitch name
//!
//! ## Typical Usage
//!
//! ```rust
//! use harmony::{generate, HarmonyMode, Note};
//!
//! let melody = vec![
//!     Note::new("C4", 1.0, 0.0),
//!     Note::new("E4", 1.0, 1.0),
//!     Note::new("G4", 2.0, 2.0),
//! ];
//!
//! let harmony = generate(&melody, HarmonyMode::Third)?;
//! assert_eq!(harmony[0].pitch, "A3");
//! assert_eq!(harmony[2].duration, 2.0);
//! # Ok::<(), harmony::HarmonyError>(())
//! ```

use crate::engine::{harmonize, Harmony};
use crate::{HarmonyError, HarmonyMode, Note, Spelling};

/// Generate a harmony line for `melody`.
///
/// Pitches are spelled with sharps. Notes with unreadable pitches are
/// dropped in the parallel modes; use [`generate_with_spelling()`] to see
/// which ones.
///
/// # Errors
/// Returns [`HarmonyError::MalformedPitch`] when contrary, oblique or pedal
/// mode needs a pitch it cannot read.
pub fn generate(melody: &[Note], mode: HarmonyMode) -> Result<Vec<Note>, HarmonyError> {
    harmonize(melody, mode, Spelling::Sharps).map(|harmony| harmony.notes)
}

/// Generate a harmony line with the mode given by tag (`"third"`, `"pedal"`, ...).
///
/// # Example
/// ```rust
/// use harmony::{generate_by_name, HarmonyError, Note};
///
/// let melody = vec![Note::new("C4", 1.0, 0.0)];
/// assert_eq!(generate_by_name(&melody, "oblique")?[0].pitch, "F3");
/// assert_eq!(
///     generate_by_name(&melody, "seventh"),
///     Err(HarmonyError::UnsupportedMode("seventh".to_string()))
/// );
/// # Ok::<(), HarmonyError>(())
/// ```
///
/// # Errors
/// [`HarmonyError::UnsupportedMode`] for an unknown tag, before any note is
/// processed.
pub fn generate_by_name(melody: &[Note], tag: &str) -> Result<Vec<Note>, HarmonyError> {
    let mode = tag.parse::<HarmonyMode>()?;
    generate(melody, mode)
}

/// Generate a harmony line and report any notes that were skipped.
///
/// # Example
/// ```rust
/// use harmony::{generate_with_spelling, HarmonyMode, Note, Spelling};
///
/// let melody = vec![Note::new("D4", 1.0, 0.0), Note::new("??", 1.0, 1.0)];
/// let harmony = generate_with_spelling(&melody, HarmonyMode::ParallelFourth, Spelling::Flats)?;
///
/// assert_eq!(harmony.notes[0].pitch, "A3");
/// assert_eq!(harmony.skipped[0].index, 1);
/// # Ok::<(), harmony::HarmonyError>(())
/// ```
pub fn generate_with_spelling(
    melody: &[Note],
    mode: HarmonyMode,
    spelling: Spelling,
) -> Result<Harmony, HarmonyError> {
    harmonize(melody, mode, spelling)
}

/// Harmony for a one-note melody (`pitch`, 1 second, at 0).
///
/// Returns `Ok(None)` when a parallel mode skipped the note.
///
/// # Example
/// ```rust
/// use harmony::{quick_harmony, HarmonyMode, Spelling};
///
/// let note = quick_harmony("G4", HarmonyMode::Pedal, Spelling::Sharps)?;
/// assert_eq!(note.map(|n| n.pitch), Some("G3".to_string()));
///
/// assert_eq!(quick_harmony("H2", HarmonyMode::Third, Spelling::Sharps)?, None);
/// # Ok::<(), harmony::HarmonyError>(())
/// ```
pub fn quick_harmony(
    pitch: &str,
    mode: HarmonyMode,
    spelling: Spelling,
) -> Result<Option<Note>, HarmonyError> {
    let melody = [Note::new(pitch, 1.0, 0.0)];
    let harmony = harmonize(&melody, mode, spelling)?;
    Ok(harmony.notes.into_iter().next())
}
