//! Editor state machine and the state it owns.

use super::snapshot::{Snapshot, SnapshotEntry};
use crate::config::{Action, ChartConfig, Config, ExportConfig, InteractionConfig, KeyBinding, UiConfig};
use crate::draw::ImageLoader;
use crate::geometry::Vec2;
use crate::input::events::{InputEvent, Key};
use crate::input::modifiers::Modifiers;
use crate::scene::{Scene, SceneRef, Selection};
use crate::view::Canvas;
use std::collections::HashMap;
use std::fmt;

/// Active interaction mode.
///
/// Exactly one mode is active; every event is routed to it. Gesture modes
/// capture an undo [`Snapshot`] on entry (held in [`EditorState::baseline`]).
#[derive(Debug, Clone, PartialEq)]
pub enum EditorMode {
    /// Hub state: pan, zoom, selection keys and mode entry.
    Default,
    /// Primary button held after a press in `Default`.
    Dragging {
        /// Device position of the press.
        press: Vec2,
        /// Canvas origin at the press.
        origin: Vec2,
    },
    /// Pointer Y sets the reference line of every selected sprite.
    Reference,
    /// Pointer Y offsets every selected sprite relative to its baseline.
    Move {
        /// World position of the pointer at entry.
        anchor: Vec2,
    },
    /// Vertical motion scales selected sprites and viewports exponentially.
    Scale { last_y: f64 },
    /// Horizontal motion adjusts the overlap of the sprites preceding the selection.
    Overlap { last_x: f64 },
    /// Two-click viewport definition. `index` is the provisional viewport.
    ViewportDefine { index: Option<usize> },
    ViewportOrigin { last: Vec2 },
    ViewportOpposite { last: Vec2 },
    ViewportScale { last_y: f64 },
    /// Text entry for the name of `target`.
    Naming { target: SceneRef, buffer: String },
    LoadPath { buffer: String },
    WritePath { buffer: String },
    DeleteConfirm,
}

impl EditorMode {
    pub fn label(&self) -> &'static str {
        match self {
            EditorMode::Default => "Default",
            EditorMode::Dragging { .. } => "Dragging",
            EditorMode::Reference => "Reference",
            EditorMode::Move { .. } => "Move",
            EditorMode::Scale { .. } => "Scale",
            EditorMode::Overlap { .. } => "Overlap",
            EditorMode::ViewportDefine { .. } => "Define viewport",
            EditorMode::ViewportOrigin { .. } => "Viewport origin",
            EditorMode::ViewportOpposite { .. } => "Viewport extent",
            EditorMode::ViewportScale { .. } => "Viewport scale",
            EditorMode::Naming { .. } => "Name",
            EditorMode::LoadPath { .. } => "Load",
            EditorMode::WritePath { .. } => "Write",
            EditorMode::DeleteConfirm => "Delete",
        }
    }

    /// Modes whose edits are undone by a secondary click.
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            EditorMode::Move { .. }
                | EditorMode::Scale { .. }
                | EditorMode::Overlap { .. }
                | EditorMode::ViewportOrigin { .. }
                | EditorMode::ViewportOpposite { .. }
                | EditorMode::ViewportScale { .. }
        )
    }

    /// Modes that capture typed text.
    pub fn text_buffer(&self) -> Option<&str> {
        match self {
            EditorMode::Naming { buffer, .. }
            | EditorMode::LoadPath { buffer }
            | EditorMode::WritePath { buffer } => Some(buffer),
            _ => None,
        }
    }
}

/// All editor state, owned by the single dispatch thread.
pub struct EditorState {
    pub scene: Scene,
    pub canvas: Canvas,
    pub selection: Selection,
    pub mode: EditorMode,
    pub modifiers: Modifiers,
    /// Last pointer position in device pixels.
    pub pointer: Vec2,
    pub grid_on_top: bool,
    pub real_units: bool,
    /// Status line shown in the HUD.
    pub message: String,
    /// Undo baseline captured at gesture entry.
    pub baseline: Option<Snapshot>,
    pub interaction: InteractionConfig,
    pub chart: ChartConfig,
    pub export: ExportConfig,
    pub ui: UiConfig,
    pub should_exit: bool,
    pub needs_redraw: bool,
    action_map: HashMap<KeyBinding, Action>,
    loader: Box<dyn ImageLoader>,
}

impl fmt::Debug for EditorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorState")
            .field("mode", &self.mode)
            .field("sprites", &self.scene.sprites.len())
            .field("viewports", &self.scene.viewports.len())
            .field("selection", &self.selection)
            .field("canvas", &self.canvas)
            .finish()
    }
}

impl EditorState {
    /// Builds the editor from configuration.
    ///
    /// # Errors
    /// Returns the keybinding parse error if the configured bindings are invalid.
    pub fn new(config: &Config, loader: Box<dyn ImageLoader>) -> Result<Self, String> {
        let action_map = config.keybindings.build_action_map()?;
        Ok(Self {
            scene: Scene::new(config.chart.pixels_per_unit, config.chart.unit.clone()),
            canvas: Canvas::new(Vec2::zero(), config.chart.initial_scale),
            selection: Selection::new(),
            mode: EditorMode::Default,
            modifiers: Modifiers::new(),
            pointer: Vec2::zero(),
            grid_on_top: false,
            real_units: config.chart.real_units,
            message: String::new(),
            baseline: None,
            interaction: config.interaction.clone(),
            chart: config.chart.clone(),
            export: config.export.clone(),
            ui: config.ui.clone(),
            should_exit: false,
            needs_redraw: true,
            action_map,
            loader,
        })
    }

    pub fn loader(&self) -> &dyn ImageLoader {
        self.loader.as_ref()
    }

    /// Routes one event to the active mode, then refreshes the layout.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.on_key_press(key),
            InputEvent::KeyUp(key) => self.on_key_release(key),
            InputEvent::PointerMove(pos) => self.on_mouse_motion(pos),
            InputEvent::PointerDown(button, pos) => self.on_mouse_press(button, pos),
            InputEvent::PointerUp(button, pos) => self.on_mouse_release(button, pos),
            InputEvent::Scroll { position, delta } => self.on_scroll(position, delta),
            InputEvent::TextInput(text) => self.on_text_input(&text),
            InputEvent::TextEdit(edit) => self.on_text_edit(edit),
            InputEvent::Resize { width, height } => {
                self.canvas.resize(width, height);
                self.needs_redraw = true;
            }
        }
        self.scene.layout();
        self.prune_selection();
    }

    /// Pointer position in world coordinates.
    pub fn pointer_world(&self) -> Vec2 {
        self.canvas.unmap_point(self.pointer)
    }

    /// Looks up the action bound to `key` under the current modifiers. A
    /// binding without Shift still matches while Shift is held so Shift can
    /// act as the coarse modifier inside gestures.
    pub(crate) fn find_action(&self, key: Key) -> Option<Action> {
        let name = key.binding_name()?;
        let mods = self.modifiers;
        let exact = KeyBinding::new(&name, mods.ctrl, mods.shift, mods.alt);
        self.action_map.get(&exact).copied().or_else(|| {
            mods.shift
                .then(|| KeyBinding::new(&name, mods.ctrl, false, mods.alt))
                .and_then(|binding| self.action_map.get(&binding).copied())
        })
    }

    pub(crate) fn set_mode(&mut self, mode: EditorMode) {
        if self.mode.label() != mode.label() {
            log::debug!("Mode {} -> {}", self.mode.label(), mode.label());
        }
        self.mode = mode;
        self.needs_redraw = true;
    }

    /// Returns to `Default`, dropping the undo baseline (the edit is kept).
    pub(crate) fn commit_gesture(&mut self) {
        self.baseline = None;
        self.set_mode(EditorMode::Default);
    }

    /// Returns to `Default`, restoring the undo baseline.
    pub(crate) fn cancel_gesture(&mut self) {
        if let Some(snapshot) = self.baseline.take() {
            let restored = snapshot.restore(&mut self.scene);
            log::debug!("Restored {restored} values from undo baseline");
        }
        self.set_mode(EditorMode::Default);
    }

    pub(crate) fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.needs_redraw = true;
    }

    /// Captures the current value of one field for every selected sprite.
    pub(crate) fn snapshot_sprites(&self, entry: fn(usize, &crate::scene::Sprite) -> SnapshotEntry) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for index in self.selection.sprites() {
            if let Some(sprite) = self.scene.sprites.get(index) {
                snapshot.push(entry(index, sprite));
            }
        }
        snapshot
    }

    /// Captures the current value of one field for every selected viewport.
    pub(crate) fn snapshot_viewports(
        &self,
        entry: fn(usize, &crate::scene::Viewport) -> SnapshotEntry,
    ) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for index in self.selection.viewports() {
            if let Some(viewport) = self.scene.viewports.get(index) {
                snapshot.push(entry(index, viewport));
            }
        }
        snapshot
    }

    /// Indices of selected sprites that still exist.
    pub(crate) fn selected_sprites(&self) -> Vec<usize> {
        self.selection
            .sprites()
            .filter(|&i| i < self.scene.sprites.len())
            .collect()
    }

    /// Indices of selected viewports that still exist.
    pub(crate) fn selected_viewports(&self) -> Vec<usize> {
        self.selection
            .viewports()
            .filter(|&i| i < self.scene.viewports.len())
            .collect()
    }

    /// Drops selection entries that no longer resolve.
    fn prune_selection(&mut self) {
        let stale: Vec<SceneRef> = self
            .selection
            .items()
            .iter()
            .copied()
            .filter(|item| !self.scene.contains_ref(*item))
            .collect();
        for item in stale {
            self.selection.remove(item);
        }
    }

    /// Replaces the scene (after a document load), clearing the selection.
    pub fn replace_scene(&mut self, scene: Scene) {
        self.scene = scene;
        self.selection.clear();
        self.baseline = None;
        self.scene.layout();
        self.set_mode(EditorMode::Default);
    }
}
