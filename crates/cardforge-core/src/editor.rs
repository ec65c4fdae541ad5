//! Editor state owners.
//!
//! Each editor owns its in-memory state explicitly; nothing is global. The
//! desktop app keeps them in signals, the CLI and tests drive them directly.

pub mod cards;
pub mod tutorial;

pub use cards::{CardEditor, CardWorkspace};
pub use tutorial::TutorialEditor;
