use crate::geometry::Vec2;
use crate::input::events::MouseButton;
use crate::scene::{SceneRef, Viewport};

use super::snapshot::SnapshotEntry;
use super::{EditorMode, EditorState};

impl EditorState {
    /// Processes a pointer button press.
    ///
    /// # Behavior
    /// - Primary in `Default`: starts a drag (pan, or select on release)
    /// - Primary in a gesture mode: commits the edit
    /// - Secondary in a gesture mode: restores the undo baseline
    /// - Secondary in `Reference`: clears the reference lines
    /// - In `ViewportDefine`: places the first corner, then commits
    pub fn on_mouse_press(&mut self, button: MouseButton, pos: Vec2) {
        self.pointer = pos;
        match (self.mode.clone(), button) {
            (EditorMode::Default, MouseButton::Left) => {
                self.set_mode(EditorMode::Dragging {
                    press: pos,
                    origin: self.canvas.origin,
                });
            }
            (EditorMode::Reference, MouseButton::Left) => self.commit_gesture(),
            (EditorMode::Reference, MouseButton::Right) => {
                for index in self.selected_sprites() {
                    self.scene.sprites[index].reference_y = None;
                }
                self.commit_gesture();
            }
            (EditorMode::ViewportDefine { index: None }, MouseButton::Left) => {
                let corner = self.pointer_world();
                let index = self.scene.add_viewport(Viewport::provisional(corner));
                self.set_message("Click to place the opposite corner");
                self.set_mode(EditorMode::ViewportDefine { index: Some(index) });
            }
            (EditorMode::ViewportDefine { index: Some(index) }, MouseButton::Left) => {
                self.drag_viewport_corner(index);
                self.finish_viewport(index);
            }
            (EditorMode::ViewportDefine { index }, MouseButton::Right) => {
                if let Some(index) = index {
                    self.scene
                        .remove(SceneRef::Viewport(index), &mut self.selection);
                }
                self.set_message("");
                self.set_mode(EditorMode::Default);
            }
            (mode, MouseButton::Left) if mode.is_gesture() => self.commit_gesture(),
            (mode, MouseButton::Right) if mode.is_gesture() => self.cancel_gesture(),
            _ => {}
        }
    }

    /// Processes pointer motion. Updates the live edit of the active gesture.
    pub fn on_mouse_motion(&mut self, pos: Vec2) {
        self.pointer = pos;
        self.needs_redraw = true;

        match self.mode.clone() {
            EditorMode::Dragging { press, origin } => {
                self.canvas.origin = origin + self.canvas.unmap_scaled(press - pos);
            }
            EditorMode::Reference => {
                let world_y = self.pointer_world().y;
                for index in self.selected_sprites() {
                    self.scene.sprites[index].set_reference_from_world(world_y);
                }
            }
            EditorMode::Move { anchor } => {
                let dy = self.pointer_world().y - anchor.y;
                if let Some(baseline) = &self.baseline {
                    for entry in baseline.entries() {
                        if let SnapshotEntry::YOffset(index, base) = *entry {
                            if let Some(sprite) = self.scene.sprites.get_mut(index) {
                                sprite.y_offset = base + dy;
                            }
                        }
                    }
                }
            }
            EditorMode::Scale { last_y } => {
                let factor = self.drag_scale_factor(pos.y - last_y);
                for index in self.selected_sprites() {
                    self.scene.sprites[index].scale_by(factor);
                }
                for index in self.selected_viewports() {
                    self.scene.viewports[index].scale_by(factor);
                }
                self.mode = EditorMode::Scale { last_y: pos.y };
            }
            EditorMode::Overlap { last_x } => {
                let delta = (pos.x - last_x) * self.interaction.overlap_sensitivity;
                if let Some(baseline) = &self.baseline {
                    for entry in baseline.entries() {
                        if let SnapshotEntry::Overlap(index, _) = *entry {
                            if let Some(sprite) = self.scene.sprites.get_mut(index) {
                                sprite.overlap += delta;
                            }
                        }
                    }
                }
                self.mode = EditorMode::Overlap { last_x: pos.x };
            }
            EditorMode::ViewportDefine { index: Some(index) } => self.drag_viewport_corner(index),
            EditorMode::ViewportOrigin { last } => {
                let world = self.pointer_world();
                let delta = world - last;
                for index in self.selected_viewports() {
                    let rect = &mut self.scene.viewports[index].rect;
                    *rect = rect.translated(delta);
                }
                self.mode = EditorMode::ViewportOrigin { last: world };
            }
            EditorMode::ViewportOpposite { last } => {
                let world = self.pointer_world();
                let delta = world - last;
                for index in self.selected_viewports() {
                    let rect = &mut self.scene.viewports[index].rect;
                    rect.w += delta.x;
                    rect.h += delta.y;
                }
                self.mode = EditorMode::ViewportOpposite { last: world };
            }
            EditorMode::ViewportScale { last_y } => {
                let factor = self.drag_scale_factor(pos.y - last_y);
                for index in self.selected_viewports() {
                    self.scene.viewports[index].scale_by(factor);
                }
                self.mode = EditorMode::ViewportScale { last_y: pos.y };
            }
            _ => {}
        }
    }

    /// Processes a pointer button release. A primary release ends a drag at
    /// the release position; if that is where the press happened, the drag
    /// was a click and hit-tests to update the selection.
    pub fn on_mouse_release(&mut self, button: MouseButton, pos: Vec2) {
        self.pointer = pos;
        if let (EditorMode::Dragging { press, origin }, MouseButton::Left) = (&self.mode, button) {
            let (press, origin) = (*press, *origin);
            self.canvas.origin = origin + self.canvas.unmap_scaled(press - pos);
            self.set_mode(EditorMode::Default);
            if pos == press {
                self.click_select(self.canvas.unmap_point(pos));
            }
        }
    }

    /// Scroll zooms about the pointer. Ignored mid-drag so the drag's
    /// captured origin stays valid.
    pub fn on_scroll(&mut self, position: Vec2, delta: f64) {
        self.pointer = position;
        if matches!(self.mode, EditorMode::Dragging { .. }) || delta == 0.0 {
            return;
        }
        let factor = self.interaction.scroll_zoom_factor.powf(delta);
        self.canvas.zoom_at(factor, position);
        self.needs_redraw = true;
    }

    /// Plain click replaces the selection (empty space clears it), Shift adds,
    /// Ctrl removes.
    fn click_select(&mut self, world: Vec2) {
        let hit = self.scene.hit_test(world);
        log::debug!("Click at {world} hit {:?}", hit);
        match hit {
            Some(item) if self.modifiers.ctrl => self.selection.remove(item),
            Some(item) if self.modifiers.shift => self.selection.add(item),
            Some(item) => self.selection.replace(item),
            None if self.modifiers.any() => {}
            None => self.selection.clear(),
        }
        self.needs_redraw = true;
    }

    /// Moves the opposite corner of a provisional viewport to the pointer.
    fn drag_viewport_corner(&mut self, index: usize) {
        let corner = self.pointer_world();
        if let Some(viewport) = self.scene.viewport_mut(index) {
            viewport.rect.w = corner.x - viewport.rect.x;
            viewport.rect.h = corner.y - viewport.rect.y;
        }
    }

    fn finish_viewport(&mut self, index: usize) {
        if let Some(viewport) = self.scene.viewport_mut(index) {
            viewport.rect = viewport.rect.normalized();
            if viewport.is_invalid() {
                log::warn!("Viewport {index} has zero area and will not be exported");
            }
        }
        let target = SceneRef::Viewport(index);
        self.selection.replace(target);
        self.set_message("Name the viewport");
        self.set_mode(EditorMode::Naming {
            target,
            buffer: String::new(),
        });
    }

    fn drag_scale_factor(&self, dy: f64) -> f64 {
        let base = self.modifiers.scale_base(
            self.interaction.scale_base,
            self.interaction.scale_base_fine,
            self.interaction.scale_base_coarse,
        );
        base.powf(dy)
    }
}
