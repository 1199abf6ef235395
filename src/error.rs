use harmony::HarmonyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Error reading file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid melody file: {0}")]
    MelodyFormat(#[from] serde_yaml::Error),

    #[error("Could not encode output: {0}")]
    Output(String),

    #[error("{0}")]
    Harmony(#[from] HarmonyError),
}
