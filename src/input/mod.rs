//! Input handling and the modal editor state machine.
//!
//! Backends translate native keyboard and pointer events into
//! [`InputEvent`]s. [`EditorState::handle_event`] routes each one to the
//! active [`EditorMode`], which mutates the scene, canvas and selection and
//! picks the next mode.

pub mod events;
pub mod modifiers;
pub mod state;

pub use events::{InputEvent, Key, MouseButton, TextEdit};
pub use modifiers::Modifiers;
pub use state::{EditorMode, EditorState, Snapshot, SnapshotEntry};
