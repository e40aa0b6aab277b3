use std::fs;
use std::path::Path;

use crate::draw::FALLBACK_PLACEHOLDER_SIZE;
use crate::input::events::{Key, TextEdit};
use crate::scene::{SceneRef, Sprite};
use crate::util;

use super::{EditorMode, EditorState};

impl EditorState {
    /// Appends committed text to the active prompt buffer. Control
    /// characters are dropped; outside a prompt the text is ignored.
    pub fn on_text_input(&mut self, text: &str) {
        if let Some(buffer) = self.text_buffer_mut() {
            buffer.extend(text.chars().filter(|c| !c.is_control()));
            self.needs_redraw = true;
        }
    }

    pub fn on_text_edit(&mut self, edit: TextEdit) {
        match edit {
            TextEdit::Backspace => {
                if let Some(buffer) = self.text_buffer_mut() {
                    buffer.pop();
                    self.needs_redraw = true;
                }
            }
        }
    }

    /// Key presses while a prompt is open: Return commits, Escape cancels,
    /// Backspace deletes and Tab completes paths.
    pub(crate) fn on_text_key(&mut self, key: Key) {
        match key {
            Key::Return => self.commit_text(),
            Key::Escape => {
                self.set_message("");
                self.set_mode(EditorMode::Default);
            }
            Key::Backspace => self.on_text_edit(TextEdit::Backspace),
            Key::Tab => self.complete_buffer(),
            _ => {}
        }
    }

    fn text_buffer_mut(&mut self) -> Option<&mut String> {
        match &mut self.mode {
            EditorMode::Naming { buffer, .. }
            | EditorMode::LoadPath { buffer }
            | EditorMode::WritePath { buffer } => Some(buffer),
            _ => None,
        }
    }

    fn commit_text(&mut self) {
        let mode = std::mem::replace(&mut self.mode, EditorMode::Default);
        self.needs_redraw = true;
        match mode {
            EditorMode::Naming { target, buffer } => {
                if self.scene.rename(target, &buffer) {
                    self.set_message(format!("Named \"{buffer}\""));
                } else {
                    self.set_message("Nothing to name");
                }
            }
            EditorMode::LoadPath { buffer } => {
                if buffer.is_empty() {
                    self.set_message("No path given");
                } else {
                    self.load_sprite(&buffer);
                }
            }
            EditorMode::WritePath { buffer } => {
                if buffer.is_empty() {
                    self.set_message("No path given");
                } else {
                    self.write_document(Path::new(&buffer));
                }
            }
            other => self.mode = other,
        }
    }

    /// Loads an image as a new sprite, inserted before the primary sprite
    /// selection (or appended) and selected alone. An unreadable image is
    /// replaced by a placeholder and reported in the status line.
    pub fn load_sprite(&mut self, path: &str) {
        let (image, error) = self.loader().load_or_placeholder(
            Path::new(path),
            FALLBACK_PLACEHOLDER_SIZE,
            FALLBACK_PLACEHOLDER_SIZE,
        );
        let mut sprite = Sprite::new(image, path);
        sprite.overlap = self.chart.default_overlap;

        let before = self.selection.primary_sprite();
        let index = self.scene.insert_sprite(sprite, before);
        self.selection.replace(SceneRef::Sprite(index));
        self.scene.layout();

        match error {
            Some(err) => {
                self.set_message(format!("Couldn't load {path} ({err}); using a placeholder"));
            }
            None => {
                log::info!("Loaded sprite {index} from {path}");
                self.set_message(format!("Loaded {path}"));
            }
        }
    }

    /// Saves the scene to `path` via the document codec.
    pub fn write_document(&mut self, path: &Path) {
        match crate::document::save_to_path(&mut self.scene, &self.canvas, path) {
            Ok(()) => {
                log::info!("Wrote {}", path.display());
                self.set_message(format!("Wrote {}", path.display()));
            }
            Err(err) => {
                log::warn!("Failed to write {}: {err}", path.display());
                self.set_message(format!("Write failed: {err}"));
            }
        }
    }

    fn complete_buffer(&mut self) {
        let Some(buffer) = self.text_buffer_mut() else {
            return;
        };
        match complete_path(buffer) {
            Some(completion) => {
                *buffer = completion.text;
                let matches = completion.matches;
                if matches > 1 {
                    self.set_message(format!("{matches} matches"));
                } else {
                    self.set_message("");
                }
            }
            None => self.set_message("No matches"),
        }
    }
}

/// Result of completing a path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub matches: usize,
}

/// Extends `prefix` to the longest prefix shared by every directory entry
/// it matches. A single directory match gets a trailing `/`. Hidden entries
/// are only offered when the typed name starts with a dot.
pub fn complete_path(prefix: &str) -> Option<Completion> {
    let (head, stem) = match prefix.rfind('/') {
        Some(split) => prefix.split_at(split + 1),
        None => ("", prefix),
    };
    let directory = if head.is_empty() { Path::new(".") } else { Path::new(head) };

    let mut names: Vec<(String, bool)> = fs::read_dir(directory)
        .ok()?
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            if !name.starts_with(stem) || (name.starts_with('.') && !stem.starts_with('.')) {
                return None;
            }
            let is_dir = entry.path().is_dir();
            Some((name, is_dir))
        })
        .collect();
    if names.is_empty() {
        return None;
    }
    names.sort();

    let mut text = head.to_string();
    if let [(name, is_dir)] = names.as_slice() {
        text.push_str(name);
        if *is_dir {
            text.push('/');
        }
    } else {
        let plain: Vec<&str> = names.iter().map(|(name, _)| name.as_str()).collect();
        text.push_str(&util::common_prefix(&plain));
    }
    Some(Completion {
        text,
        matches: names.len(),
    })
}
