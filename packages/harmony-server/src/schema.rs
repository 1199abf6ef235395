//! JSON bodies exchanged with API clients.

use harmony::{HarmonyTypeInfo, Note, Spelling};
use serde::{Deserialize, Serialize};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

fn default_harmony_type() -> String {
    "third".to_string()
}

/// Body of `POST /generate-harmony`
#[derive(Debug, Clone, Deserialize)]
pub struct HarmonyRequest {
    pub melody: Vec<Note>,
    #[serde(default = "default_harmony_type")]
    pub harmony_type: String,
    #[serde(default)]
    pub spelling: Spelling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonyResponse {
    pub melody: Vec<Note>,
    pub harmony: Vec<Note>,
    pub harmony_type: String,
    pub message: String,
}

impl HarmonyResponse {
    pub fn new(melody: Vec<Note>, harmony: Vec<Note>, harmony_type: String) -> Self {
        let message = format!("Successfully generated {} harmony", harmony_type);
        Self {
            melody,
            harmony,
            harmony_type,
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickHarmonyResponse {
    pub melody_note: String,
    /// `None` when the pitch could not be harmonized
    pub harmony_note: Option<String>,
    pub harmony_type: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub harmony_types: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HarmonyTypesResponse {
    pub harmony_types: Vec<HarmonyTypeInfo>,
}
