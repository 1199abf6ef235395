//! Harmony generation engine
//!
//! Turns a melody into a single harmony line. The four parallel modes treat
//! every note independently, so a note with an unreadable pitch is skipped and
//! reported while the rest go through. Contrary motion, oblique motion and the
//! pedal tone derive each output from other notes, so any unreadable pitch they
//! need aborts the whole call.

use crate::error::HarmonyError;
use crate::mode::HarmonyMode;
use crate::note::Note;
use crate::pitch::{Pitch, Spelling};

/// A melody note left out of a parallel harmony because its pitch was unreadable
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedNote {
    /// Position in the input melody
    pub index: usize,
    pub pitch: String,
    pub error: HarmonyError,
}

/// Output of one generation call
#[derive(Debug, Clone, PartialEq)]
pub struct Harmony {
    pub mode: HarmonyMode,
    pub notes: Vec<Note>,
    /// Always empty for contrary, oblique and pedal modes
    pub skipped: Vec<SkippedNote>,
}

impl Harmony {
    fn complete(mode: HarmonyMode, notes: Vec<Note>) -> Self {
        Self {
            mode,
            notes,
            skipped: Vec::new(),
        }
    }
}

/// Generate the harmony line for `melody`.
///
/// The input is never modified. An empty melody yields an empty harmony for
/// every mode.
pub fn harmonize(
    melody: &[Note],
    mode: HarmonyMode,
    spelling: Spelling,
) -> Result<Harmony, HarmonyError> {
    if melody.is_empty() {
        return Ok(Harmony::complete(mode, Vec::new()));
    }

    let harmony = match mode {
        HarmonyMode::Third
        | HarmonyMode::Fifth
        | HarmonyMode::ParallelFourth
        | HarmonyMode::ParallelSixth => {
            let (notes, skipped) = parallel_interval(melody, mode.semitones(), spelling);
            Harmony {
                mode,
                notes,
                skipped,
            }
        }
        HarmonyMode::Contrary => Harmony::complete(mode, contrary_motion(melody, spelling)?),
        HarmonyMode::Oblique => Harmony::complete(mode, oblique_motion(melody, spelling)?),
        HarmonyMode::Pedal => Harmony::complete(mode, vec![pedal_tone(melody, spelling)?]),
    };

    log::debug!(
        "Generated {} harmony: {} notes, {} skipped",
        mode,
        harmony.notes.len(),
        harmony.skipped.len()
    );
    Ok(harmony)
}

/// Lowest pitch in the melody.
///
/// # Errors
/// [`HarmonyError::EmptyMelody`] for an empty melody, or the first
/// [`HarmonyError::MalformedPitch`] encountered.
pub fn lowest_pitch(melody: &[Note]) -> Result<Pitch, HarmonyError> {
    parse_all(melody)?
        .into_iter()
        .min()
        .ok_or(HarmonyError::EmptyMelody)
}

/// Time from the start of the piece to the end of the last sounding note.
///
/// # Errors
/// [`HarmonyError::EmptyMelody`] for an empty melody.
pub fn total_span(melody: &[Note]) -> Result<f64, HarmonyError> {
    if melody.is_empty() {
        return Err(HarmonyError::EmptyMelody);
    }
    Ok(melody.iter().map(Note::end).fold(f64::NEG_INFINITY, f64::max))
}

/// Transpose every note down by `semitones`, skipping unreadable pitches
fn parallel_interval(
    melody: &[Note],
    semitones: i32,
    spelling: Spelling,
) -> (Vec<Note>, Vec<SkippedNote>) {
    melody.iter().enumerate().fold(
        (Vec::with_capacity(melody.len()), Vec::new()),
        |(mut notes, mut skipped), (index, note)| {
            match note.parse_pitch() {
                Ok(pitch) => notes.push(note.with_pitch(pitch.transpose(-semitones), spelling)),
                Err(error) => {
                    log::warn!("Skipping note {} ('{}'): {}", index, note.pitch, error);
                    skipped.push(SkippedNote {
                        index,
                        pitch: note.pitch.clone(),
                        error,
                    });
                }
            }
            (notes, skipped)
        },
    )
}

/// Start a fifth below and move by the negated melodic interval each step
fn contrary_motion(melody: &[Note], spelling: Spelling) -> Result<Vec<Note>, HarmonyError> {
    let pitches = parse_all(melody)?;
    let mut current = pitches[0].transpose(-HarmonyMode::Contrary.semitones());
    let mut harmony = Vec::with_capacity(melody.len());
    harmony.push(melody[0].with_pitch(current, spelling));

    for (step, note) in pitches.windows(2).zip(&melody[1..]) {
        let melodic_interval = step[1].interval_from(step[0]);
        current = current.transpose(-melodic_interval);
        harmony.push(note.with_pitch(current, spelling));
    }
    Ok(harmony)
}

/// Hold the pitch a fifth below the first melody note under every note
fn oblique_motion(melody: &[Note], spelling: Spelling) -> Result<Vec<Note>, HarmonyError> {
    let held = melody[0]
        .parse_pitch()?
        .transpose(-HarmonyMode::Oblique.semitones());
    Ok(melody
        .iter()
        .map(|note| note.with_pitch(held, spelling))
        .collect())
}

/// One note an octave below the lowest melody pitch, from 0 to the last note's end
fn pedal_tone(melody: &[Note], spelling: Spelling) -> Result<Note, HarmonyError> {
    let lowest = lowest_pitch(melody)?;
    let span = total_span(melody)?;
    let pedal = lowest.transpose(-HarmonyMode::Pedal.semitones());
    Ok(Note::new(pedal.name(spelling), span, 0.0))
}

fn parse_all(melody: &[Note]) -> Result<Vec<Pitch>, HarmonyError> {
    melody.iter().map(Note::parse_pitch).collect()
}
