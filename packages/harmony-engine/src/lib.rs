pub mod api;
pub mod engine;
pub mod error;
pub mod mode;
pub mod note;
pub mod pitch;

pub use api::{generate, generate_by_name, generate_with_spelling, quick_harmony};
pub use engine::{harmonize, lowest_pitch, total_span, Harmony, SkippedNote};
pub use error::*;
pub use mode::{catalog, HarmonyMode, HarmonyTypeInfo};
pub use note::Note;
pub use pitch::{Pitch, Spelling};
