mod actions;
mod core;
mod mouse;
mod snapshot;
mod text;
#[cfg(test)]
mod tests;

pub use core::{EditorMode, EditorState};
pub use snapshot::{Snapshot, SnapshotEntry};
pub use text::{Completion, complete_path};
