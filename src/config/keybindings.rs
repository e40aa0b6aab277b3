//! Keybinding configuration types and parsing.
//!
//! Every editor action can be bound to any number of key combinations in
//! `config.toml`. Bindings are parsed once at startup into a lookup map.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Exit,

    // View
    PanUp,
    PanDown,
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
    GridOnTop,
    ToggleRealUnits,

    // Selection and ordering
    ClearSelection,
    SelectPrevious,
    SelectNext,
    BumpBackward,
    BumpForward,

    // Sprite gestures
    EditReference,
    ZeroReference,
    MoveOffset,
    Scale,
    Overlap,

    // Viewport gestures
    DefineViewport,
    ViewportOrigin,
    ViewportOpposite,
    ViewportScale,

    // Prompts, triggered on key release
    Rename,
    LoadImage,
    WriteDocument,

    Delete,
    ExportViewports,
}

impl Action {
    /// Actions that fire on key release so the triggering character does not
    /// land in the prompt they open.
    pub fn fires_on_release(self) -> bool {
        matches!(self, Action::Rename | Action::LoadImage | Action::WriteDocument)
    }
}

/// A single keybinding: a key name with optional modifiers.
///
/// Single-character keys are stored upper-cased so lookups are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    pub fn new(key: &str, ctrl: bool, shift: bool, alt: bool) -> Self {
        Self {
            key: normalize_key(key),
            ctrl,
            shift,
            alt,
        }
    }

    /// Parse a keybinding string like "Ctrl+Up" or "Escape".
    /// Modifiers can appear in any order and spaces around '+' are allowed.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" | "accel" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into trailing empty parts; the key is '+'
        let key = key_parts.join("+");
        let key = if key.is_empty() { "+".to_string() } else { key };

        Ok(Self::new(&key, ctrl, shift, alt))
    }

    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

fn normalize_key(key: &str) -> String {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_uppercase().collect(),
        _ => {
            let lower = key.to_lowercase();
            match lower.as_str() {
                "esc" | "escape" => "Escape".to_string(),
                "enter" | "return" => "Return".to_string(),
                "backspace" => "Backspace".to_string(),
                "tab" => "Tab".to_string(),
                "space" => "Space".to_string(),
                "up" => "Up".to_string(),
                "down" => "Down".to_string(),
                "left" => "Left".to_string(),
                "right" => "Right".to_string(),
                "delete" | "del" => "Delete".to_string(),
                _ => key.to_string(),
            }
        }
    }
}

/// Configuration for all keybindings.
///
/// ```toml
/// [keybindings]
/// zoom_in = ["Ctrl+Up", "Ctrl+="]
/// write_document = ["W"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_exit")]
    pub exit: Vec<String>,

    #[serde(default = "default_pan_up")]
    pub pan_up: Vec<String>,

    #[serde(default = "default_pan_down")]
    pub pan_down: Vec<String>,

    #[serde(default = "default_pan_left")]
    pub pan_left: Vec<String>,

    #[serde(default = "default_pan_right")]
    pub pan_right: Vec<String>,

    #[serde(default = "default_zoom_in")]
    pub zoom_in: Vec<String>,

    #[serde(default = "default_zoom_out")]
    pub zoom_out: Vec<String>,

    /// Held: draws the grid above the sprites until released
    #[serde(default = "default_grid_on_top")]
    pub grid_on_top: Vec<String>,

    #[serde(default = "default_toggle_real_units")]
    pub toggle_real_units: Vec<String>,

    #[serde(default = "default_clear_selection")]
    pub clear_selection: Vec<String>,

    #[serde(default = "default_select_previous")]
    pub select_previous: Vec<String>,

    #[serde(default = "default_select_next")]
    pub select_next: Vec<String>,

    #[serde(default = "default_bump_backward")]
    pub bump_backward: Vec<String>,

    #[serde(default = "default_bump_forward")]
    pub bump_forward: Vec<String>,

    #[serde(default = "default_edit_reference")]
    pub edit_reference: Vec<String>,

    /// Inside reference editing: shift the sprites so the reference sits at zero
    #[serde(default = "default_zero_reference")]
    pub zero_reference: Vec<String>,

    #[serde(default = "default_move_offset")]
    pub move_offset: Vec<String>,

    #[serde(default = "default_scale")]
    pub scale: Vec<String>,

    #[serde(default = "default_overlap")]
    pub overlap: Vec<String>,

    #[serde(default = "default_define_viewport")]
    pub define_viewport: Vec<String>,

    #[serde(default = "default_viewport_origin")]
    pub viewport_origin: Vec<String>,

    #[serde(default = "default_viewport_opposite")]
    pub viewport_opposite: Vec<String>,

    #[serde(default = "default_viewport_scale")]
    pub viewport_scale: Vec<String>,

    #[serde(default = "default_rename")]
    pub rename: Vec<String>,

    #[serde(default = "default_load_image")]
    pub load_image: Vec<String>,

    #[serde(default = "default_write_document")]
    pub write_document: Vec<String>,

    #[serde(default = "default_delete")]
    pub delete: Vec<String>,

    #[serde(default = "default_export_viewports")]
    pub export_viewports: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            exit: default_exit(),
            pan_up: default_pan_up(),
            pan_down: default_pan_down(),
            pan_left: default_pan_left(),
            pan_right: default_pan_right(),
            zoom_in: default_zoom_in(),
            zoom_out: default_zoom_out(),
            grid_on_top: default_grid_on_top(),
            toggle_real_units: default_toggle_real_units(),
            clear_selection: default_clear_selection(),
            select_previous: default_select_previous(),
            select_next: default_select_next(),
            bump_backward: default_bump_backward(),
            bump_forward: default_bump_forward(),
            edit_reference: default_edit_reference(),
            zero_reference: default_zero_reference(),
            move_offset: default_move_offset(),
            scale: default_scale(),
            overlap: default_overlap(),
            define_viewport: default_define_viewport(),
            viewport_origin: default_viewport_origin(),
            viewport_opposite: default_viewport_opposite(),
            viewport_scale: default_viewport_scale(),
            rename: default_rename(),
            load_image: default_load_image(),
            write_document: default_write_document(),
            delete: default_delete(),
            export_viewports: default_export_viewports(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let groups: [(&[String], Action); 28] = [
            (&self.exit, Action::Exit),
            (&self.pan_up, Action::PanUp),
            (&self.pan_down, Action::PanDown),
            (&self.pan_left, Action::PanLeft),
            (&self.pan_right, Action::PanRight),
            (&self.zoom_in, Action::ZoomIn),
            (&self.zoom_out, Action::ZoomOut),
            (&self.grid_on_top, Action::GridOnTop),
            (&self.toggle_real_units, Action::ToggleRealUnits),
            (&self.clear_selection, Action::ClearSelection),
            (&self.select_previous, Action::SelectPrevious),
            (&self.select_next, Action::SelectNext),
            (&self.bump_backward, Action::BumpBackward),
            (&self.bump_forward, Action::BumpForward),
            (&self.edit_reference, Action::EditReference),
            (&self.zero_reference, Action::ZeroReference),
            (&self.move_offset, Action::MoveOffset),
            (&self.scale, Action::Scale),
            (&self.overlap, Action::Overlap),
            (&self.define_viewport, Action::DefineViewport),
            (&self.viewport_origin, Action::ViewportOrigin),
            (&self.viewport_opposite, Action::ViewportOpposite),
            (&self.viewport_scale, Action::ViewportScale),
            (&self.rename, Action::Rename),
            (&self.load_image, Action::LoadImage),
            (&self.write_document, Action::WriteDocument),
            (&self.delete, Action::Delete),
            (&self.export_viewports, Action::ExportViewports),
        ];

        for (bindings, action) in groups {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing_action, action
                    ));
                }
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybindings
// =============================================================================

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn default_exit() -> Vec<String> {
    keys(&["Escape", "Ctrl+Q"])
}

fn default_pan_up() -> Vec<String> {
    keys(&["Up"])
}

fn default_pan_down() -> Vec<String> {
    keys(&["Down"])
}

fn default_pan_left() -> Vec<String> {
    keys(&["Left"])
}

fn default_pan_right() -> Vec<String> {
    keys(&["Right"])
}

fn default_zoom_in() -> Vec<String> {
    keys(&["Ctrl+Up"])
}

fn default_zoom_out() -> Vec<String> {
    keys(&["Ctrl+Down"])
}

fn default_grid_on_top() -> Vec<String> {
    keys(&["G"])
}

fn default_toggle_real_units() -> Vec<String> {
    keys(&["R"])
}

fn default_clear_selection() -> Vec<String> {
    keys(&["Alt+Up"])
}

fn default_select_previous() -> Vec<String> {
    keys(&["Alt+Left"])
}

fn default_select_next() -> Vec<String> {
    keys(&["Alt+Right"])
}

fn default_bump_backward() -> Vec<String> {
    keys(&["Ctrl+Left"])
}

fn default_bump_forward() -> Vec<String> {
    keys(&["Ctrl+Right"])
}

fn default_edit_reference() -> Vec<String> {
    keys(&["Z"])
}

fn default_zero_reference() -> Vec<String> {
    keys(&["0"])
}

fn default_move_offset() -> Vec<String> {
    keys(&["T"])
}

fn default_scale() -> Vec<String> {
    keys(&["S"])
}

fn default_overlap() -> Vec<String> {
    keys(&["O"])
}

fn default_define_viewport() -> Vec<String> {
    keys(&["V"])
}

fn default_viewport_origin() -> Vec<String> {
    keys(&["P"])
}

fn default_viewport_opposite() -> Vec<String> {
    keys(&["E"])
}

fn default_viewport_scale() -> Vec<String> {
    keys(&["C"])
}

fn default_rename() -> Vec<String> {
    keys(&["N"])
}

fn default_load_image() -> Vec<String> {
    keys(&["L"])
}

fn default_write_document() -> Vec<String> {
    keys(&["W"])
}

fn default_delete() -> Vec<String> {
    keys(&["D"])
}

fn default_export_viewports() -> Vec<String> {
    keys(&["X"])
}
