//! Library exports for the size chart editor.
//!
//! The binary is a thin CLI over these modules; the editor state machine,
//! document codec and renderers are usable from any front end that can feed
//! [`input::InputEvent`]s and draw through a [`draw::Renderer`].

pub mod config;
pub mod document;
pub mod draw;
pub mod export;
pub mod geometry;
pub mod input;
pub mod scene;
pub mod ui;
pub mod util;
pub mod view;

pub use config::Config;
