pub mod error;

pub use error::CliError;

use std::fs;
use std::path::Path;

use harmony::{generate_with_spelling, HarmonyMode, Note, Spelling};
use serde::{Deserialize, Serialize};

/// Mode used when neither the command line nor the file names one
pub const DEFAULT_HARMONY_TYPE: &str = "third";

/// Contents of a melody file: either a bare list of notes or a document
/// with `melody` and an optional `harmony_type`.
///
/// Files are read as YAML, so JSON documents are accepted too.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MelodyFile {
    Document {
        melody: Vec<Note>,
        #[serde(default)]
        harmony_type: Option<String>,
    },
    Notes(Vec<Note>),
}

impl MelodyFile {
    pub fn notes(&self) -> &[Note] {
        match self {
            MelodyFile::Document { melody, .. } => melody,
            MelodyFile::Notes(notes) => notes,
        }
    }

    pub fn harmony_type(&self) -> Option<&str> {
        match self {
            MelodyFile::Document { harmony_type, .. } => harmony_type.as_deref(),
            MelodyFile::Notes(_) => None,
        }
    }
}

/// What `harmony generate` prints: the input melody next to its harmony.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarmonizedMelody {
    pub harmony_type: String,
    pub melody: Vec<Note>,
    pub harmony: Vec<Note>,
    /// Melody positions left out because their pitch could not be read
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

pub fn parse_melody(source: &str) -> Result<MelodyFile, CliError> {
    Ok(serde_yaml::from_str(source)?)
}

pub fn load_melody(path: &Path) -> Result<MelodyFile, CliError> {
    let source = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_melody(&source)
}

/// Harmonize a melody file. `mode_override` wins over the file's own
/// `harmony_type`; with neither, third harmony is used.
pub fn harmonize_file(
    file: &MelodyFile,
    mode_override: Option<&str>,
    spelling: Spelling,
) -> Result<HarmonizedMelody, CliError> {
    let tag = mode_override
        .or(file.harmony_type())
        .unwrap_or(DEFAULT_HARMONY_TYPE);
    let mode = tag.parse::<HarmonyMode>()?;
    let harmony = generate_with_spelling(file.notes(), mode, spelling)?;
    for skipped in &harmony.skipped {
        log::warn!("Note {} ('{}') left out: {}", skipped.index, skipped.pitch, skipped.error);
    }
    Ok(HarmonizedMelody {
        harmony_type: tag.to_string(),
        melody: file.notes().to_vec(),
        harmony: harmony.notes,
        skipped: harmony.skipped.iter().map(|s| s.index).collect(),
    })
}

pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| CliError::Output(e.to_string()))
        }
    }
}
