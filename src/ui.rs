//! HUD text and the interactive frame built from editor state.

use crate::draw::{Renderer, SceneView, render_frame};
use crate::input::{EditorMode, EditorState};
use crate::scene::SceneRef;

/// Caret drawn after the buffer of a text prompt.
const PROMPT_CURSOR: char = '|';

/// Lines shown in the top-left corner: mode, pointer position, primary
/// selection and the status message (or the open prompt).
pub fn hud_lines(state: &EditorState) -> Vec<String> {
    let scene = &state.scene;
    let unit = scene.unit_label(state.real_units);
    let pointer = state.pointer_world();

    let mut lines = vec![
        format!("Mode: {}", state.mode.label()),
        format!(
            "Pointer: {:.2}, {:.2} {unit}",
            scene.to_display_units(pointer.x, state.real_units),
            scene.to_display_units(pointer.y, state.real_units),
        ),
    ];

    match state.selection.primary() {
        Some(SceneRef::Sprite(index)) => {
            if let Some(sprite) = scene.sprites.get(index) {
                let mut line = format!(
                    "Sprite {}/{} {:?} scale {:.3} overlap {:.2}",
                    index + 1,
                    scene.sprites.len(),
                    sprite.name,
                    sprite.display_scale,
                    sprite.overlap
                );
                if let Some(height) = sprite.reference_height() {
                    line.push_str(&format!(
                        " height {:.3}{unit}",
                        scene.to_display_units(height, state.real_units)
                    ));
                }
                lines.push(line);
            }
        }
        Some(SceneRef::Viewport(index)) => {
            if let Some(viewport) = scene.viewports.get(index) {
                let size = viewport.render_size();
                lines.push(format!(
                    "Viewport {:?} {:.0}x{:.0}px @{}x{}",
                    viewport.name,
                    size.x,
                    size.y,
                    viewport.render_scale,
                    if viewport.is_invalid() { " (invalid)" } else { "" }
                ));
            }
        }
        None => {}
    }
    if state.selection.len() > 1 {
        lines.push(format!("{} selected", state.selection.len()));
    }

    match (&state.mode, state.mode.text_buffer()) {
        (EditorMode::DeleteConfirm, _) => lines.push(state.message.clone()),
        (mode, Some(buffer)) => {
            lines.push(format!("{}: {buffer}{PROMPT_CURSOR}", mode.label()));
            if !state.message.is_empty() {
                lines.push(state.message.clone());
            }
        }
        (_, None) if !state.message.is_empty() => lines.push(state.message.clone()),
        _ => {}
    }
    lines
}

/// Draws the editor's current frame with grid, viewports, cursor and HUD.
pub fn render_editor<R: Renderer + ?Sized>(renderer: &mut R, state: &EditorState) {
    let hud = if state.ui.show_hud {
        hud_lines(state)
    } else {
        Vec::new()
    };
    let view = SceneView {
        scene: &state.scene,
        canvas: &state.canvas,
        selection: &state.selection,
        show_grid: true,
        grid_on_top: state.grid_on_top,
        real_units: state.real_units,
        show_viewports: true,
        cursor: Some(state.pointer),
        hud: &hud,
    };
    render_frame(renderer, &view, &state.ui.frame_style());
}
