use super::*;
use crate::config::Config;
use crate::draw::{ImageError, ImageHandle, ImageLoader};
use crate::geometry::{Rect, Vec2};
use crate::input::{InputEvent, Key, MouseButton, TextEdit};
use crate::scene::{MAX_ITEM_SCALE, MIN_ITEM_SCALE, SceneRef, Sprite};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Serves placeholder images of fixed sizes for known paths.
#[derive(Default)]
struct StubLoader {
    images: HashMap<PathBuf, (u32, u32)>,
}

impl ImageLoader for StubLoader {
    fn load(&self, path: &Path) -> Result<ImageHandle, ImageError> {
        self.images
            .get(path)
            .map(|&(w, h)| ImageHandle::placeholder(w, h))
            .ok_or_else(|| ImageError::NotFound(path.to_path_buf()))
    }
}

fn create_test_editor() -> EditorState {
    let mut loader = StubLoader::default();
    loader.images.insert(PathBuf::from("tall.png"), (40, 300));
    EditorState::new(&Config::default(), Box::new(loader)).unwrap()
}

/// Editor with `count` 100x100 sprites named "a", "b", ... laid out.
fn editor_with_sprites(count: usize) -> EditorState {
    let mut state = create_test_editor();
    for i in 0..count {
        let mut sprite = Sprite::new(ImageHandle::placeholder(100, 100), format!("{i}.png"));
        sprite.name = ((b'a' + i as u8) as char).to_string();
        state.scene.sprites.push(sprite);
    }
    state.scene.layout();
    state
}

fn names(state: &EditorState) -> Vec<&str> {
    state.scene.sprites.iter().map(|s| s.name.as_str()).collect()
}

fn press(state: &mut EditorState, key: Key) {
    state.handle_event(InputEvent::KeyDown(key));
    state.handle_event(InputEvent::KeyUp(key));
}

fn chord(state: &mut EditorState, modifier: Key, key: Key) {
    state.handle_event(InputEvent::KeyDown(modifier));
    press(state, key);
    state.handle_event(InputEvent::KeyUp(modifier));
}

fn click(state: &mut EditorState, button: MouseButton, x: f64, y: f64) {
    state.handle_event(InputEvent::PointerDown(button, Vec2::new(x, y)));
    state.handle_event(InputEvent::PointerUp(button, Vec2::new(x, y)));
}

fn move_to(state: &mut EditorState, x: f64, y: f64) {
    state.handle_event(InputEvent::PointerMove(Vec2::new(x, y)));
}

fn type_text(state: &mut EditorState, text: &str) {
    state.handle_event(InputEvent::TextInput(text.to_string()));
}

// Initial canvas: origin (0, 0), scale 0.5, so world = 2 * device.

#[test]
fn test_starts_in_default_mode() {
    let state = create_test_editor();
    assert_eq!(state.mode, EditorMode::Default);
    assert!(state.selection.is_empty());
    assert!(state.real_units);
    assert_eq!(state.canvas.scale, 0.5);
}

#[test]
fn test_move_cancel_restores_every_offset() {
    let mut state = editor_with_sprites(2);
    state.scene.sprites[0].y_offset = 5.0;
    state.scene.sprites[1].y_offset = -3.0;
    state.selection.replace(SceneRef::Sprite(0));
    state.selection.add(SceneRef::Sprite(1));

    move_to(&mut state, 10.0, 10.0);
    press(&mut state, Key::Char('t'));
    assert!(matches!(state.mode, EditorMode::Move { .. }));

    move_to(&mut state, 10.0, 60.0);
    assert_eq!(state.scene.sprites[0].y_offset, 105.0);
    assert_eq!(state.scene.sprites[1].y_offset, 97.0);

    state.handle_event(InputEvent::PointerDown(MouseButton::Right, Vec2::new(10.0, 60.0)));
    assert_eq!(state.mode, EditorMode::Default);
    assert_eq!(state.scene.sprites[0].y_offset, 5.0);
    assert_eq!(state.scene.sprites[1].y_offset, -3.0);
    assert!(state.baseline.is_none());
}

#[test]
fn test_move_adds_same_world_delta_regardless_of_scale() {
    let mut state = editor_with_sprites(2);
    state.scene.sprites[1].display_scale = 2.0;
    state.selection.replace(SceneRef::Sprite(0));
    state.selection.add(SceneRef::Sprite(1));

    press(&mut state, Key::Char('t'));
    move_to(&mut state, 0.0, 20.0);
    click(&mut state, MouseButton::Left, 0.0, 20.0);

    assert_eq!(state.mode, EditorMode::Default);
    assert_eq!(state.scene.sprites[0].y_offset, 40.0);
    assert_eq!(state.scene.sprites[1].y_offset, 40.0);
}

#[test]
fn test_move_requires_a_selected_sprite() {
    let mut state = editor_with_sprites(1);
    press(&mut state, Key::Char('t'));
    assert_eq!(state.mode, EditorMode::Default);
    assert_eq!(state.message, "Select a sprite first");
}

#[test]
fn test_scale_is_exponential_in_vertical_motion() {
    let mut state = editor_with_sprites(1);
    state.selection.replace(SceneRef::Sprite(0));

    press(&mut state, Key::Char('s'));
    move_to(&mut state, 0.0, 10.0);
    let expected = 1.01_f64.powf(10.0);
    assert!((state.scene.sprites[0].display_scale - expected).abs() < 1e-12);

    state.handle_event(InputEvent::KeyDown(Key::Ctrl));
    move_to(&mut state, 0.0, 20.0);
    let expected = expected * 1.001_f64.powf(10.0);
    assert!((state.scene.sprites[0].display_scale - expected).abs() < 1e-12);

    state.handle_event(InputEvent::PointerDown(MouseButton::Right, Vec2::new(0.0, 20.0)));
    assert_eq!(state.scene.sprites[0].display_scale, 1.0);
}

#[test]
fn test_long_scale_drag_stays_positive() {
    let mut state = editor_with_sprites(1);
    state
        .scene
        .add_viewport(crate::scene::Viewport::new("v", Rect::new(0.0, 0.0, 10.0, 10.0), 1.0));
    state.selection.replace(SceneRef::Sprite(0));
    state.selection.add(SceneRef::Viewport(0));

    press(&mut state, Key::Char('s'));
    state.handle_event(InputEvent::KeyDown(Key::Shift));
    move_to(&mut state, 0.0, -10_000.0);
    assert_eq!(state.scene.sprites[0].display_scale, MIN_ITEM_SCALE);
    assert_eq!(state.scene.viewports[0].render_scale, MIN_ITEM_SCALE);

    move_to(&mut state, 0.0, 10_000.0);
    move_to(&mut state, 0.0, 30_000.0);
    assert_eq!(state.scene.sprites[0].display_scale, MAX_ITEM_SCALE);
    assert!(state.scene.viewports[0].render_scale.is_finite());
}

#[test]
fn test_viewport_scale_drag_is_clamped() {
    let mut state = create_test_editor();
    state
        .scene
        .add_viewport(crate::scene::Viewport::new("v", Rect::new(0.0, 0.0, 10.0, 10.0), 1.0));
    state.selection.replace(SceneRef::Viewport(0));

    press(&mut state, Key::Char('c'));
    assert!(matches!(state.mode, EditorMode::ViewportScale { .. }));
    move_to(&mut state, 0.0, -100_000.0);
    assert_eq!(state.scene.viewports[0].render_scale, MIN_ITEM_SCALE);
}

#[test]
fn test_scale_applies_to_viewports() {
    let mut state = create_test_editor();
    state
        .scene
        .add_viewport(crate::scene::Viewport::new("v", Rect::new(0.0, 0.0, 10.0, 10.0), 1.0));
    state.selection.replace(SceneRef::Viewport(0));

    press(&mut state, Key::Char('s'));
    move_to(&mut state, 0.0, -10.0);
    let expected = 1.01_f64.powf(-10.0);
    assert!((state.scene.viewports[0].render_scale - expected).abs() < 1e-12);
}

#[test]
fn test_overlap_on_first_sprite_is_refused() {
    let mut state = editor_with_sprites(2);
    state.selection.replace(SceneRef::Sprite(0));
    press(&mut state, Key::Char('o'));
    assert_eq!(state.mode, EditorMode::Default);
    assert_eq!(state.message, "Can't offset the first sprite");
}

#[test]
fn test_overlap_adjusts_predecessor_and_cancel_restores() {
    let mut state = editor_with_sprites(2);
    state.selection.replace(SceneRef::Sprite(1));

    press(&mut state, Key::Char('o'));
    move_to(&mut state, 10.0, 0.0);
    assert!((state.scene.sprites[0].overlap - 0.85).abs() < 1e-12);
    assert_eq!(state.scene.sprites[1].overlap, 0.75);
    assert!((state.scene.sprites[1].last_drawn_x.unwrap() - 85.0).abs() < 1e-9);

    state.handle_event(InputEvent::PointerDown(MouseButton::Right, Vec2::new(10.0, 0.0)));
    assert_eq!(state.scene.sprites[0].overlap, 0.75);
}

#[test]
fn test_delete_confirm_removes_primary_and_clears_selection() {
    let mut state = editor_with_sprites(3);
    state.selection.replace(SceneRef::Sprite(1));
    state.selection.add(SceneRef::Sprite(2));

    press(&mut state, Key::Char('d'));
    assert_eq!(state.mode, EditorMode::DeleteConfirm);
    assert_eq!(state.message, "Really delete? (y/n)");

    press(&mut state, Key::Char('y'));
    assert_eq!(state.mode, EditorMode::Default);
    assert_eq!(names(&state), vec!["a", "c"]);
    assert!(state.selection.is_empty());
}

#[test]
fn test_delete_declined_by_any_other_key() {
    let mut state = editor_with_sprites(2);
    state.selection.replace(SceneRef::Sprite(0));
    press(&mut state, Key::Char('d'));
    press(&mut state, Key::Char('k'));
    assert_eq!(state.mode, EditorMode::Default);
    assert_eq!(state.scene.sprites.len(), 2);
    assert_eq!(state.selection.primary(), Some(SceneRef::Sprite(0)));
}

#[test]
fn test_load_prompt_opens_on_key_release() {
    let mut state = create_test_editor();
    state.handle_event(InputEvent::KeyDown(Key::Char('l')));
    assert_eq!(state.mode, EditorMode::Default);
    state.handle_event(InputEvent::KeyUp(Key::Char('l')));
    assert_eq!(
        state.mode,
        EditorMode::LoadPath {
            buffer: String::new()
        }
    );

    type_text(&mut state, "tall.png");
    press(&mut state, Key::Return);
    assert_eq!(state.mode, EditorMode::Default);
    assert_eq!(state.scene.sprites.len(), 1);
    assert_eq!(state.scene.sprites[0].pixel_size(), Vec2::new(40.0, 300.0));
    assert_eq!(state.selection.items(), &[SceneRef::Sprite(0)]);
    assert_eq!(state.message, "Loaded tall.png");
}

#[test]
fn test_load_missing_image_falls_back_to_placeholder() {
    let mut state = create_test_editor();
    state.load_sprite("nowhere.png");
    assert_eq!(state.scene.sprites.len(), 1);
    let sprite = &state.scene.sprites[0];
    assert!(sprite.image.is_placeholder());
    assert_eq!(sprite.image.width(), crate::draw::FALLBACK_PLACEHOLDER_SIZE);
    assert_eq!(sprite.image_path, "nowhere.png");
    assert!(state.message.contains("placeholder"));
}

#[test]
fn test_load_inserts_before_primary_sprite() {
    let mut state = editor_with_sprites(2);
    state.selection.replace(SceneRef::Sprite(1));
    state.load_sprite("tall.png");
    assert_eq!(names(&state), vec!["a", "", "b"]);
    assert_eq!(state.selection.items(), &[SceneRef::Sprite(1)]);
}

#[test]
fn test_naming_edits_buffer_and_commits() {
    let mut state = editor_with_sprites(1);
    state.selection.replace(SceneRef::Sprite(0));
    press(&mut state, Key::Char('n'));
    assert_eq!(state.mode.text_buffer(), Some("a"));

    state.handle_event(InputEvent::TextEdit(TextEdit::Backspace));
    type_text(&mut state, "Tall");
    press(&mut state, Key::Backspace);
    assert_eq!(state.mode.text_buffer(), Some("Tal"));

    press(&mut state, Key::Return);
    assert_eq!(state.mode, EditorMode::Default);
    assert_eq!(state.scene.sprites[0].name, "Tal");
}

#[test]
fn test_naming_without_selection_reports() {
    let mut state = editor_with_sprites(1);
    press(&mut state, Key::Char('n'));
    assert_eq!(state.mode, EditorMode::Default);
    assert_eq!(state.message, "Nothing selected to name");
}

#[test]
fn test_escape_cancels_prompt_then_exits() {
    let mut state = create_test_editor();
    press(&mut state, Key::Char('w'));
    assert_eq!(state.mode.text_buffer(), Some("chart.svg"));

    press(&mut state, Key::Escape);
    assert_eq!(state.mode, EditorMode::Default);
    assert!(!state.should_exit);

    press(&mut state, Key::Escape);
    assert!(state.should_exit);
}

#[test]
fn test_text_ignored_outside_prompts() {
    let mut state = create_test_editor();
    type_text(&mut state, "abc");
    assert_eq!(state.mode, EditorMode::Default);
}

#[test]
fn test_click_selects_shift_adds_ctrl_removes() {
    let mut state = editor_with_sprites(2);

    click(&mut state, MouseButton::Left, 10.0, 10.0);
    assert_eq!(state.selection.items(), &[SceneRef::Sprite(0)]);

    state.handle_event(InputEvent::KeyDown(Key::Shift));
    click(&mut state, MouseButton::Left, 80.0, 10.0);
    state.handle_event(InputEvent::KeyUp(Key::Shift));
    assert_eq!(
        state.selection.items(),
        &[SceneRef::Sprite(0), SceneRef::Sprite(1)]
    );

    state.handle_event(InputEvent::KeyDown(Key::Ctrl));
    click(&mut state, MouseButton::Left, 10.0, 10.0);
    state.handle_event(InputEvent::KeyUp(Key::Ctrl));
    assert_eq!(state.selection.items(), &[SceneRef::Sprite(1)]);

    click(&mut state, MouseButton::Left, 200.0, 200.0);
    assert!(state.selection.is_empty());
}

#[test]
fn test_drag_pans_without_selecting() {
    let mut state = editor_with_sprites(1);
    state.selection.replace(SceneRef::Sprite(0));

    state.handle_event(InputEvent::PointerDown(MouseButton::Left, Vec2::new(10.0, 10.0)));
    move_to(&mut state, 30.0, 5.0);
    state.handle_event(InputEvent::PointerUp(MouseButton::Left, Vec2::new(30.0, 5.0)));

    assert_eq!(state.mode, EditorMode::Default);
    assert_eq!(state.canvas.origin, Vec2::new(-40.0, 10.0));
    assert_eq!(state.selection.items(), &[SceneRef::Sprite(0)]);
}

#[test]
fn test_drag_back_to_press_point_is_a_click() {
    let mut state = editor_with_sprites(1);

    state.handle_event(InputEvent::PointerDown(MouseButton::Left, Vec2::new(10.0, 10.0)));
    move_to(&mut state, 60.0, 60.0);
    move_to(&mut state, 10.0, 10.0);
    state.handle_event(InputEvent::PointerUp(MouseButton::Left, Vec2::new(10.0, 10.0)));

    assert_eq!(state.canvas.origin, Vec2::new(0.0, 0.0));
    assert_eq!(state.selection.items(), &[SceneRef::Sprite(0)]);
}

#[test]
fn test_release_without_motion_pans_to_release_point() {
    let mut state = editor_with_sprites(1);
    state.selection.replace(SceneRef::Sprite(0));

    state.handle_event(InputEvent::PointerDown(MouseButton::Left, Vec2::new(10.0, 10.0)));
    state.handle_event(InputEvent::PointerUp(MouseButton::Left, Vec2::new(30.0, 5.0)));

    assert_eq!(state.mode, EditorMode::Default);
    assert_eq!(state.canvas.origin, Vec2::new(-40.0, 10.0));
    assert_eq!(state.selection.items(), &[SceneRef::Sprite(0)]);
}

#[test]
fn test_viewport_define_then_name() {
    let mut state = create_test_editor();
    press(&mut state, Key::Char('v'));
    assert_eq!(state.mode, EditorMode::ViewportDefine { index: None });

    click(&mut state, MouseButton::Left, 10.0, 10.0);
    assert_eq!(state.scene.viewports.len(), 1);
    move_to(&mut state, 60.0, 40.0);
    assert_eq!(state.scene.viewports[0].rect, Rect::new(20.0, 20.0, 100.0, 60.0));

    state.handle_event(InputEvent::PointerDown(MouseButton::Left, Vec2::new(0.0, 0.0)));
    assert!(matches!(state.mode, EditorMode::Naming { .. }));
    assert_eq!(state.scene.viewports[0].rect, Rect::new(0.0, 0.0, 20.0, 20.0));

    type_text(&mut state, "Face");
    press(&mut state, Key::Return);
    assert_eq!(state.scene.viewports[0].name, "Face");
    assert_eq!(state.selection.items(), &[SceneRef::Viewport(0)]);
}

#[test]
fn test_viewport_define_secondary_click_discards() {
    let mut state = create_test_editor();
    press(&mut state, Key::Char('v'));
    click(&mut state, MouseButton::Left, 10.0, 10.0);
    move_to(&mut state, 50.0, 50.0);
    state.handle_event(InputEvent::PointerDown(MouseButton::Right, Vec2::new(50.0, 50.0)));
    assert_eq!(state.mode, EditorMode::Default);
    assert!(state.scene.viewports.is_empty());
}

#[test]
fn test_viewport_origin_and_opposite_drag() {
    let mut state = create_test_editor();
    state
        .scene
        .add_viewport(crate::scene::Viewport::new("v", Rect::new(0.0, 0.0, 50.0, 50.0), 1.0));
    state.selection.replace(SceneRef::Viewport(0));

    press(&mut state, Key::Char('p'));
    move_to(&mut state, 5.0, 10.0);
    click(&mut state, MouseButton::Left, 5.0, 10.0);
    assert_eq!(state.scene.viewports[0].rect, Rect::new(10.0, 20.0, 50.0, 50.0));

    press(&mut state, Key::Char('e'));
    move_to(&mut state, 10.0, 10.0);
    state.handle_event(InputEvent::PointerDown(MouseButton::Right, Vec2::new(10.0, 10.0)));
    assert_eq!(state.scene.viewports[0].rect, Rect::new(10.0, 20.0, 50.0, 50.0));
}

#[test]
fn test_reference_tracks_pointer_and_zeroes() {
    let mut state = editor_with_sprites(1);
    state.selection.replace(SceneRef::Sprite(0));

    press(&mut state, Key::Char('z'));
    assert_eq!(state.mode, EditorMode::Reference);
    move_to(&mut state, 10.0, 25.0);
    assert_eq!(state.scene.sprites[0].reference_y, Some(50.0));

    press(&mut state, Key::Char('0'));
    assert_eq!(state.mode, EditorMode::Default);
    assert_eq!(state.scene.sprites[0].y_offset, -50.0);
    assert_eq!(state.scene.sprites[0].reference_y, None);
}

#[test]
fn test_reference_secondary_click_clears() {
    let mut state = editor_with_sprites(1);
    state.scene.sprites[0].reference_y = Some(12.0);
    state.selection.replace(SceneRef::Sprite(0));

    press(&mut state, Key::Char('z'));
    move_to(&mut state, 10.0, 25.0);
    state.handle_event(InputEvent::PointerDown(MouseButton::Right, Vec2::new(10.0, 25.0)));
    assert_eq!(state.mode, EditorMode::Default);
    assert_eq!(state.scene.sprites[0].reference_y, None);
}

#[test]
fn test_reference_escape_restores() {
    let mut state = editor_with_sprites(1);
    state.scene.sprites[0].reference_y = Some(12.0);
    state.selection.replace(SceneRef::Sprite(0));

    press(&mut state, Key::Char('z'));
    move_to(&mut state, 10.0, 25.0);
    state.handle_event(InputEvent::KeyDown(Key::Escape));
    assert_eq!(state.scene.sprites[0].reference_y, Some(12.0));
    assert!(!state.should_exit);
}

#[test]
fn test_scroll_zoom_keeps_point_under_pointer() {
    let mut state = create_test_editor();
    let anchor = Vec2::new(100.0, 100.0);
    let before = state.canvas.unmap_point(anchor);
    state.handle_event(InputEvent::Scroll {
        position: anchor,
        delta: 1.0,
    });
    assert!((state.canvas.scale - 0.55).abs() < 1e-12);
    assert!(state.canvas.unmap_point(anchor).approx_eq(before, 1e-9));
}

#[test]
fn test_pan_and_zoom_keys() {
    let mut state = create_test_editor();
    press(&mut state, Key::Up);
    assert!((state.canvas.origin.y - 120.0).abs() < 1e-9);
    press(&mut state, Key::Left);
    assert!((state.canvas.origin.x + 160.0).abs() < 1e-9);

    chord(&mut state, Key::Ctrl, Key::Up);
    assert_eq!(state.canvas.scale, 1.0);
    chord(&mut state, Key::Ctrl, Key::Down);
    assert_eq!(state.canvas.scale, 0.5);
}

#[test]
fn test_bump_moves_primary_and_follows_selection() {
    let mut state = editor_with_sprites(3);
    state.selection.replace(SceneRef::Sprite(0));

    chord(&mut state, Key::Ctrl, Key::Right);
    assert_eq!(names(&state), vec!["b", "a", "c"]);
    assert_eq!(state.selection.primary(), Some(SceneRef::Sprite(1)));

    chord(&mut state, Key::Ctrl, Key::Left);
    chord(&mut state, Key::Ctrl, Key::Left);
    assert_eq!(names(&state), vec!["a", "b", "c"]);
    assert_eq!(state.selection.primary(), Some(SceneRef::Sprite(0)));
}

#[test]
fn test_select_cycle_wraps() {
    let mut state = editor_with_sprites(2);
    chord(&mut state, Key::Alt, Key::Right);
    assert_eq!(state.selection.primary(), Some(SceneRef::Sprite(0)));
    chord(&mut state, Key::Alt, Key::Right);
    chord(&mut state, Key::Alt, Key::Right);
    assert_eq!(state.selection.primary(), Some(SceneRef::Sprite(0)));
    chord(&mut state, Key::Alt, Key::Left);
    assert_eq!(state.selection.primary(), Some(SceneRef::Sprite(1)));
    chord(&mut state, Key::Alt, Key::Up);
    assert!(state.selection.is_empty());
}

#[test]
fn test_grid_on_top_held_while_key_down() {
    let mut state = create_test_editor();
    state.handle_event(InputEvent::KeyDown(Key::Char('g')));
    assert!(state.grid_on_top);
    state.handle_event(InputEvent::KeyUp(Key::Char('g')));
    assert!(!state.grid_on_top);
}

#[test]
fn test_toggle_real_units() {
    let mut state = create_test_editor();
    press(&mut state, Key::Char('r'));
    assert!(!state.real_units);
    assert_eq!(state.message, "Measuring in px");
}

#[test]
fn test_shifted_key_falls_back_to_plain_binding() {
    let mut state = editor_with_sprites(1);
    state.selection.replace(SceneRef::Sprite(0));
    chord(&mut state, Key::Shift, Key::Char('S'));
    assert!(matches!(state.mode, EditorMode::Scale { .. }));
}

#[test]
fn test_gesture_survives_sprite_removed_underneath() {
    let mut state = editor_with_sprites(2);
    state.selection.replace(SceneRef::Sprite(0));
    state.selection.add(SceneRef::Sprite(1));

    press(&mut state, Key::Char('t'));
    state.scene.sprites.pop();
    move_to(&mut state, 0.0, 10.0);
    assert_eq!(state.scene.sprites[0].y_offset, 20.0);
    assert_eq!(state.selection.items(), &[SceneRef::Sprite(0)]);

    state.handle_event(InputEvent::PointerDown(MouseButton::Right, Vec2::new(0.0, 10.0)));
    assert_eq!(state.scene.sprites[0].y_offset, 0.0);
}

#[test]
fn test_write_prompt_saves_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.svg");
    let mut state = editor_with_sprites(1);

    state.mode = EditorMode::WritePath {
        buffer: path.to_string_lossy().into_owned(),
    };
    press(&mut state, Key::Return);
    assert!(path.exists());
    assert!(state.message.starts_with("Wrote"));
}

#[test]
fn test_tab_completes_paths() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("alpha.png"), b"").unwrap();
    std::fs::write(dir.path().join("alps.png"), b"").unwrap();
    std::fs::create_dir(dir.path().join("sprites")).unwrap();
    let base = format!("{}/", dir.path().display());

    let completion = complete_path(&format!("{base}al")).unwrap();
    assert_eq!(completion.text, format!("{base}alp"));
    assert_eq!(completion.matches, 2);

    let completion = complete_path(&format!("{base}spr")).unwrap();
    assert_eq!(completion.text, format!("{base}sprites/"));
    assert!(complete_path(&format!("{base}zzz")).is_none());

    let mut state = create_test_editor();
    state.mode = EditorMode::LoadPath {
        buffer: format!("{base}alph"),
    };
    press(&mut state, Key::Tab);
    assert_eq!(state.mode.text_buffer(), Some(format!("{base}alpha.png").as_str()));
}

#[test]
fn test_rejects_duplicate_bindings() {
    let mut config = Config::default();
    config.keybindings.scale = vec!["T".to_string()];
    let err = EditorState::new(&config, Box::new(StubLoader::default())).unwrap_err();
    assert!(err.contains("T"));
}
