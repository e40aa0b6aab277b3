use crate::config::Action;
use crate::input::events::Key;
use crate::scene::SceneRef;

use super::snapshot::SnapshotEntry;
use super::{EditorMode, EditorState};

impl EditorState {
    /// Processes a key press.
    ///
    /// Modifier keys only update [`Modifiers`](crate::input::Modifiers). Text
    /// and confirmation modes consume keys themselves; gesture modes only
    /// react to Escape (and Reference to its commit key); everything else is
    /// looked up in the action map while in `Default`.
    pub fn on_key_press(&mut self, key: Key) {
        if self.modifiers.track(key, true) {
            return;
        }

        match &self.mode {
            EditorMode::Naming { .. } | EditorMode::LoadPath { .. } | EditorMode::WritePath { .. } => {
                self.on_text_key(key);
            }
            EditorMode::DeleteConfirm => {
                if key == Key::Char('y') || key == Key::Char('Y') {
                    self.delete_primary();
                } else {
                    self.set_message("Delete cancelled");
                }
                self.set_mode(EditorMode::Default);
            }
            EditorMode::Reference => {
                if key == Key::Escape {
                    self.cancel_gesture();
                } else if self.find_action(key) == Some(Action::ZeroReference) {
                    self.zero_selected_references();
                    self.commit_gesture();
                }
            }
            EditorMode::ViewportDefine { index } => {
                if key == Key::Escape {
                    if let Some(index) = *index {
                        self.scene
                            .remove(SceneRef::Viewport(index), &mut self.selection);
                    }
                    self.set_mode(EditorMode::Default);
                }
            }
            mode if mode.is_gesture() => {
                if key == Key::Escape {
                    self.cancel_gesture();
                }
            }
            EditorMode::Default => {
                if let Some(action) = self.find_action(key) {
                    if !action.fires_on_release() {
                        self.handle_action(action);
                    }
                }
            }
            _ => {}
        }
    }

    /// Processes a key release.
    ///
    /// Prompt actions fire here so the key that opened a prompt never lands
    /// in its buffer. Releasing the grid key drops the grid back below the
    /// sprites regardless of mode.
    pub fn on_key_release(&mut self, key: Key) {
        if self.modifiers.track(key, false) {
            return;
        }

        let action = self.find_action(key);
        if action == Some(Action::GridOnTop) && self.grid_on_top {
            self.grid_on_top = false;
            self.needs_redraw = true;
            return;
        }

        if self.mode == EditorMode::Default {
            if let Some(action) = action.filter(|a| a.fires_on_release()) {
                self.handle_action(action);
            }
        }
    }

    /// Executes an action from `Default`.
    pub fn handle_action(&mut self, action: Action) {
        let pan = self.interaction.pan_fraction;
        match action {
            Action::Exit => {
                log::info!("Exit requested");
                self.should_exit = true;
            }
            Action::PanUp => self.canvas.pan_fraction(0.0, pan),
            Action::PanDown => self.canvas.pan_fraction(0.0, -pan),
            Action::PanLeft => self.canvas.pan_fraction(-pan, 0.0),
            Action::PanRight => self.canvas.pan_fraction(pan, 0.0),
            Action::ZoomIn => self.canvas.zoom_by(self.interaction.key_zoom_factor),
            Action::ZoomOut => self.canvas.zoom_by(1.0 / self.interaction.key_zoom_factor),
            Action::GridOnTop => self.grid_on_top = true,
            Action::ToggleRealUnits => {
                self.real_units = !self.real_units;
                let unit = self.scene.unit_label(self.real_units).to_string();
                self.set_message(format!("Measuring in {unit}"));
            }
            Action::ClearSelection => self.selection.clear(),
            Action::SelectPrevious => self.scene.select_step(&mut self.selection, -1),
            Action::SelectNext => self.scene.select_step(&mut self.selection, 1),
            Action::BumpBackward => self.bump_primary(-1),
            Action::BumpForward => self.bump_primary(1),
            Action::EditReference => {
                if self.require_sprites() {
                    self.baseline =
                        Some(self.snapshot_sprites(|i, s| SnapshotEntry::Reference(i, s.reference_y)));
                    self.set_mode(EditorMode::Reference);
                }
            }
            Action::ZeroReference => self.zero_selected_references(),
            Action::MoveOffset => {
                if self.require_sprites() {
                    self.baseline =
                        Some(self.snapshot_sprites(|i, s| SnapshotEntry::YOffset(i, s.y_offset)));
                    let anchor = self.pointer_world();
                    self.set_mode(EditorMode::Move { anchor });
                }
            }
            Action::Scale => self.begin_scale(),
            Action::Overlap => self.begin_overlap(),
            Action::DefineViewport => {
                self.set_message("Click to place the first corner");
                self.set_mode(EditorMode::ViewportDefine { index: None });
            }
            Action::ViewportOrigin => {
                if self.require_viewports() {
                    self.baseline = Some(self.snapshot_viewports(|i, v| SnapshotEntry::Rect(i, v.rect)));
                    let last = self.pointer_world();
                    self.set_mode(EditorMode::ViewportOrigin { last });
                }
            }
            Action::ViewportOpposite => {
                if self.require_viewports() {
                    self.baseline = Some(self.snapshot_viewports(|i, v| SnapshotEntry::Rect(i, v.rect)));
                    let last = self.pointer_world();
                    self.set_mode(EditorMode::ViewportOpposite { last });
                }
            }
            Action::ViewportScale => {
                if self.require_viewports() {
                    self.baseline = Some(
                        self.snapshot_viewports(|i, v| SnapshotEntry::RenderScale(i, v.render_scale)),
                    );
                    let last_y = self.pointer.y;
                    self.set_mode(EditorMode::ViewportScale { last_y });
                }
            }
            Action::Rename => match self.selection.primary() {
                Some(target) => {
                    let buffer = self.scene.name_of(target).unwrap_or_default().to_string();
                    self.set_mode(EditorMode::Naming { target, buffer });
                }
                None => self.set_message("Nothing selected to name"),
            },
            Action::LoadImage => self.set_mode(EditorMode::LoadPath {
                buffer: String::new(),
            }),
            Action::WriteDocument => {
                let buffer = self.chart.default_output.clone();
                self.set_mode(EditorMode::WritePath { buffer });
            }
            Action::Delete => {
                if self.selection.primary().is_some() {
                    self.set_message("Really delete? (y/n)");
                    self.set_mode(EditorMode::DeleteConfirm);
                } else {
                    self.set_message("Nothing selected");
                }
            }
            Action::ExportViewports => self.export_viewports(),
        }
        self.needs_redraw = true;
    }

    fn require_sprites(&mut self) -> bool {
        let ok = !self.selected_sprites().is_empty();
        if !ok {
            self.set_message("Select a sprite first");
        }
        ok
    }

    fn require_viewports(&mut self) -> bool {
        let ok = !self.selected_viewports().is_empty();
        if !ok {
            self.set_message("Select a viewport first");
        }
        ok
    }

    fn begin_scale(&mut self) {
        let mut baseline = self.snapshot_sprites(|i, s| SnapshotEntry::Scale(i, s.display_scale));
        let viewports = self.snapshot_viewports(|i, v| SnapshotEntry::RenderScale(i, v.render_scale));
        for entry in viewports.entries() {
            baseline.push(entry.clone());
        }
        if baseline.is_empty() {
            self.set_message("Select a sprite or viewport first");
            return;
        }
        self.baseline = Some(baseline);
        let last_y = self.pointer.y;
        self.set_mode(EditorMode::Scale { last_y });
    }

    /// Overlap edits act on the sprite before each selected one.
    fn begin_overlap(&mut self) {
        let predecessors: Vec<usize> = self
            .selected_sprites()
            .into_iter()
            .filter_map(|i| i.checked_sub(1))
            .collect();
        if predecessors.is_empty() {
            if self.selection.has_sprites() {
                self.set_message("Can't offset the first sprite");
            } else {
                self.set_message("Select a sprite first");
            }
            return;
        }

        let mut baseline = super::Snapshot::new();
        let mut seen = Vec::with_capacity(predecessors.len());
        for index in predecessors {
            if seen.contains(&index) {
                continue;
            }
            seen.push(index);
            baseline.push(SnapshotEntry::Overlap(index, self.scene.sprites[index].overlap));
        }
        self.baseline = Some(baseline);
        let last_x = self.pointer.x;
        self.set_mode(EditorMode::Overlap { last_x });
    }

    fn bump_primary(&mut self, delta: isize) {
        let Some(index) = self.selection.primary_sprite() else {
            self.set_message("Select a sprite first");
            return;
        };
        if let Some(to) = self
            .scene
            .bump_sprite(index, index as isize + delta, &mut self.selection)
        {
            log::debug!("Moved sprite {index} to {to}");
        }
    }

    fn zero_selected_references(&mut self) {
        let mut zeroed = 0;
        for index in self.selected_sprites() {
            if self.scene.sprites[index].zero_on_reference() {
                zeroed += 1;
            }
        }
        if zeroed == 0 {
            self.set_message("No reference line to zero on");
        } else {
            self.set_message(format!("Zeroed {zeroed} sprite(s) on their reference"));
        }
    }

    fn delete_primary(&mut self) {
        let Some(primary) = self.selection.primary() else {
            return;
        };
        let label = match primary {
            SceneRef::Sprite(i) => self.scene.sprites.get(i).map(|s| s.label().to_string()),
            SceneRef::Viewport(i) => self.scene.viewports.get(i).map(|v| v.name.clone()),
        }
        .unwrap_or_default();
        if self.scene.remove(primary, &mut self.selection) {
            log::info!("Deleted {:?} ({label})", primary);
            self.set_message(format!("Deleted {label}"));
        }
        self.selection.clear();
    }

    fn export_viewports(&mut self) {
        let directory = self.export.directory.clone();
        match crate::export::export_viewports(&self.scene, &directory, &self.export, &self.ui) {
            Ok(written) => {
                log::info!("Exported {} viewport(s) to {}", written.len(), directory.display());
                self.set_message(format!(
                    "Exported {} viewport(s) to {}",
                    written.len(),
                    directory.display()
                ));
            }
            Err(err) => {
                log::warn!("Viewport export failed: {err:#}");
                self.set_message(format!("Export failed: {err}"));
            }
        }
    }
}
