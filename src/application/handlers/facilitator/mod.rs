//! Dialogue facilitation handlers.

mod analyze_dialogue;

pub use analyze_dialogue::{AnalyzeDialogueCommand, AnalyzeDialogueError, AnalyzeDialogueHandler};
