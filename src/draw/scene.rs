//! Composes one frame of the chart through a [`Renderer`].

use super::color::{BLACK, CYAN, GRAY, MAGENTA, ORANGE, RED, WHITE, YELLOW};
use super::{Color, Renderer, TextAnchor};
use crate::geometry::{Rect, Vec2};
use crate::scene::{Scene, SceneRef, Selection};
use crate::view::{Canvas, DEFAULT_BIAS, steps};

/// Grid values closer to zero than this are drawn as the origin line.
const ORIGIN_EPSILON: f64 = 0.001;
/// Half-length of the pointer crosshair arms in device pixels.
const CURSOR_ARM: f64 = 6.0;
const HUD_MARGIN: f64 = 6.0;

/// Colors and line widths used when composing a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStyle {
    pub background: Color,
    pub pixel_grid: Color,
    pub unit_grid: Color,
    pub reference: Color,
    pub selection: Color,
    pub cursor: Color,
    pub viewport: Color,
    pub invalid_viewport: Color,
    pub hud: Color,
    pub origin_line_width: f64,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            background: BLACK,
            pixel_grid: GRAY.with_alpha(0.6),
            unit_grid: YELLOW.with_alpha(0.6),
            reference: MAGENTA,
            selection: WHITE,
            cursor: CYAN,
            viewport: ORANGE,
            invalid_viewport: RED,
            hud: WHITE,
            origin_line_width: 3.0,
        }
    }
}

/// Everything a frame reads. Export uses the same path with the overlays off.
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    pub scene: &'a Scene,
    pub canvas: &'a Canvas,
    pub selection: &'a Selection,
    pub show_grid: bool,
    pub grid_on_top: bool,
    pub real_units: bool,
    pub show_viewports: bool,
    /// Pointer position in device pixels.
    pub cursor: Option<Vec2>,
    pub hud: &'a [String],
}

/// Draws background, grid, sprites, reference lines, selection, viewports,
/// cursor and HUD in that order (the grid moves above sprites when
/// `grid_on_top` is set).
pub fn render_frame<R: Renderer + ?Sized>(renderer: &mut R, view: &SceneView<'_>, style: &FrameStyle) {
    renderer.clear(style.background);
    if view.show_grid && !view.grid_on_top {
        render_grid(renderer, view, style);
    }

    let positions = view.scene.layout_positions();
    render_sprites(renderer, view, &positions, style);
    render_selection(renderer, view, &positions, style);
    if view.show_viewports {
        render_viewports(renderer, view, style);
    }

    if view.show_grid && view.grid_on_top {
        render_grid(renderer, view, style);
    }
    if let Some(cursor) = view.cursor {
        render_cursor(renderer, cursor, style.cursor);
    }
    render_hud(renderer, view.hud, style.hud);
}

/// Maps a world rectangle to device space.
pub fn device_rect(canvas: &Canvas, rect: Rect) -> Rect {
    let origin = canvas.map_point(rect.origin());
    let size = canvas.map_scaled(rect.size());
    Rect::new(origin.x, origin.y, size.x, size.y)
}

fn grid_label(value: f64, view: &SceneView<'_>) -> String {
    format!("{value:.3}{}", view.scene.unit_label(view.real_units))
}

fn render_grid<R: Renderer + ?Sized>(renderer: &mut R, view: &SceneView<'_>, style: &FrameStyle) {
    let canvas = view.canvas;
    let bounds = canvas.view_bounds();
    let ppu = view.scene.ppu;
    let (units, color) = if view.real_units {
        (
            Rect::new(bounds.x / ppu, bounds.y / ppu, bounds.w / ppu, bounds.h / ppu),
            style.unit_grid,
        )
    } else {
        (bounds, style.pixel_grid)
    };
    let to_world = |v: f64| if view.real_units { v * ppu } else { v };
    let width_for = |v: f64| {
        if v.abs() <= ORIGIN_EPSILON {
            style.origin_line_width
        } else {
            1.0
        }
    };

    for y in steps(units.y, units.h, DEFAULT_BIAS) {
        let wy = to_world(y);
        let a = canvas.map_point(Vec2::new(bounds.x, wy));
        let b = canvas.map_point(Vec2::new(bounds.right(), wy));
        renderer.draw_line(a, b, color, width_for(y));
        renderer.draw_text(&grid_label(y, view), a, color, TextAnchor::BottomLeft);
    }

    for x in steps(units.x, units.w, DEFAULT_BIAS) {
        let wx = to_world(x);
        let a = canvas.map_point(Vec2::new(wx, bounds.y));
        let b = canvas.map_point(Vec2::new(wx, bounds.top()));
        renderer.draw_line(a, b, color, width_for(x));
        let label_at = canvas.map_point(Vec2::new(wx, 0.0));
        renderer.draw_text(&grid_label(x, view), label_at, color, TextAnchor::BottomLeft);
    }
}

fn render_sprites<R: Renderer + ?Sized>(
    renderer: &mut R,
    view: &SceneView<'_>,
    positions: &[f64],
    style: &FrameStyle,
) {
    let canvas = view.canvas;
    for (sprite, &x) in view.scene.sprites.iter().zip(positions) {
        let at = canvas.map_point(Vec2::new(x, sprite.base_y()));
        renderer.draw_image(&sprite.image, at, sprite.display_scale * canvas.scale);

        let Some(height) = sprite.reference_height() else {
            continue;
        };
        let a = canvas.map_point(Vec2::new(x, height));
        let b = canvas.map_point(Vec2::new(x + sprite.pixel_size().x, height));
        renderer.draw_line(a, b, style.reference, 1.0);
        let shown = view.scene.to_display_units(height, view.real_units);
        let label = format!("{shown:.3}{}", view.scene.unit_label(view.real_units));
        renderer.draw_text(&label, a, style.reference, TextAnchor::BottomLeft);
    }
}

fn render_selection<R: Renderer + ?Sized>(
    renderer: &mut R,
    view: &SceneView<'_>,
    positions: &[f64],
    style: &FrameStyle,
) {
    for index in view.selection.sprites() {
        let (Some(sprite), Some(&x)) = (view.scene.sprites.get(index), positions.get(index)) else {
            continue;
        };
        let rect = device_rect(view.canvas, sprite.rect_at(x));
        renderer.draw_rect(rect, style.selection, false);
    }
}

fn render_viewports<R: Renderer + ?Sized>(renderer: &mut R, view: &SceneView<'_>, style: &FrameStyle) {
    for (index, viewport) in view.scene.viewports.iter().enumerate() {
        let color = if view.selection.contains(SceneRef::Viewport(index)) {
            style.selection
        } else if viewport.is_invalid() {
            style.invalid_viewport
        } else {
            style.viewport
        };
        let rect = device_rect(view.canvas, viewport.rect.normalized());
        renderer.draw_rect(rect, color, false);
        if viewport.is_invalid() {
            renderer.draw_line(rect.origin(), rect.opposite(), color, 1.0);
        }

        let size = viewport.render_size();
        let label = format!(
            "{} {}x{} @{:.3}",
            viewport.name,
            size.x.round(),
            size.y.round(),
            viewport.render_scale
        );
        renderer.draw_text(
            label.trim_start(),
            Vec2::new(rect.x, rect.top()),
            color,
            TextAnchor::TopLeft,
        );
    }
}

fn render_cursor<R: Renderer + ?Sized>(renderer: &mut R, cursor: Vec2, color: Color) {
    renderer.draw_line(
        cursor - Vec2::new(CURSOR_ARM, 0.0),
        cursor + Vec2::new(CURSOR_ARM, 0.0),
        color,
        1.0,
    );
    renderer.draw_line(
        cursor - Vec2::new(0.0, CURSOR_ARM),
        cursor + Vec2::new(0.0, CURSOR_ARM),
        color,
        1.0,
    );
}

fn render_hud<R: Renderer + ?Sized>(renderer: &mut R, lines: &[String], color: Color) {
    if lines.is_empty() {
        return;
    }
    let line_height = renderer.measure_text("Ag").y.max(1.0);
    let top = renderer.size().y - HUD_MARGIN;
    for (row, line) in lines.iter().enumerate() {
        let at = Vec2::new(HUD_MARGIN, top - row as f64 * line_height);
        renderer.draw_text(line, at, color, TextAnchor::TopLeft);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::ImageHandle;
    use crate::scene::{Sprite, Viewport};

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear,
        Image(Vec2, f64),
        Line(Vec2, Vec2),
        Rect(Rect, Color),
        Text(String),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Renderer for Recorder {
        fn size(&self) -> Vec2 {
            Vec2::new(800.0, 600.0)
        }
        fn clear(&mut self, _color: Color) {
            self.calls.push(Call::Clear);
        }
        fn draw_image(&mut self, _image: &ImageHandle, position: Vec2, scale: f64) {
            self.calls.push(Call::Image(position, scale));
        }
        fn draw_line(&mut self, a: Vec2, b: Vec2, _color: Color, _width: f64) {
            self.calls.push(Call::Line(a, b));
        }
        fn draw_rect(&mut self, rect: Rect, color: Color, _filled: bool) {
            self.calls.push(Call::Rect(rect, color));
        }
        fn draw_text(&mut self, text: &str, _position: Vec2, _color: Color, _anchor: TextAnchor) {
            self.calls.push(Call::Text(text.to_string()));
        }
        fn measure_text(&self, text: &str) -> Vec2 {
            Vec2::new(text.len() as f64 * 7.0, 14.0)
        }
    }

    fn sample_scene() -> Scene {
        let mut scene = Scene::default();
        let mut a = Sprite::new(ImageHandle::placeholder(100, 200), "a.png");
        a.reference_y = Some(64.0);
        scene.sprites.push(a);
        scene.sprites.push(Sprite::new(ImageHandle::placeholder(50, 50), "b.png"));
        scene
    }

    fn view<'a>(scene: &'a Scene, canvas: &'a Canvas, selection: &'a Selection) -> SceneView<'a> {
        SceneView {
            scene,
            canvas,
            selection,
            show_grid: false,
            grid_on_top: false,
            real_units: true,
            show_viewports: true,
            cursor: None,
            hud: &[],
        }
    }

    #[test]
    fn sprites_are_laid_out_in_device_space() {
        let scene = sample_scene();
        let canvas = Canvas::new(Vec2::new(-10.0, 0.0), 2.0);
        let selection = Selection::new();
        let mut rec = Recorder::default();
        render_frame(&mut rec, &view(&scene, &canvas, &selection), &FrameStyle::default());

        let images: Vec<&Call> = rec.calls.iter().filter(|c| matches!(c, Call::Image(..))).collect();
        assert_eq!(
            images,
            vec![
                &Call::Image(Vec2::new(20.0, 0.0), 2.0),
                &Call::Image(Vec2::new(20.0 + 75.0 * 2.0, 0.0), 2.0),
            ]
        );
        // Reference label in real units: 64px / 128ppu
        assert!(rec.calls.contains(&Call::Text("0.500m".to_string())));
    }

    #[test]
    fn selection_and_invalid_viewports_are_outlined() {
        let mut scene = sample_scene();
        scene.add_viewport(Viewport::new("bad", Rect::new(0.0, 0.0, 0.0, 10.0), 1.0));
        let canvas = Canvas::default();
        let mut selection = Selection::new();
        selection.replace(SceneRef::Sprite(1));
        let style = FrameStyle::default();
        let mut rec = Recorder::default();
        render_frame(&mut rec, &view(&scene, &canvas, &selection), &style);

        assert!(rec.calls.contains(&Call::Rect(Rect::new(75.0, 0.0, 50.0, 50.0), style.selection)));
        assert!(
            rec.calls
                .iter()
                .any(|c| matches!(c, Call::Rect(_, color) if *color == style.invalid_viewport))
        );
    }

    #[test]
    fn grid_position_follows_toggle() {
        let scene = sample_scene();
        let canvas = Canvas::default();
        let selection = Selection::new();
        let mut v = view(&scene, &canvas, &selection);
        v.show_grid = true;

        let first_line_index = |calls: &[Call]| calls.iter().position(|c| matches!(c, Call::Line(..)));
        let first_image_index = |calls: &[Call]| calls.iter().position(|c| matches!(c, Call::Image(..)));

        let mut below = Recorder::default();
        render_frame(&mut below, &v, &FrameStyle::default());
        assert!(first_line_index(&below.calls) < first_image_index(&below.calls));

        v.grid_on_top = true;
        let mut above = Recorder::default();
        render_frame(&mut above, &v, &FrameStyle::default());
        // Only the reference line may precede the grid when it is on top
        let lines_after_images = above
            .calls
            .iter()
            .skip_while(|c| !matches!(c, Call::Image(..)))
            .filter(|c| matches!(c, Call::Line(..)))
            .count();
        assert!(lines_after_images > 1);
        assert_eq!(above.calls.first(), Some(&Call::Clear));
    }

    #[test]
    fn hud_lines_are_drawn_last() {
        let scene = Scene::default();
        let canvas = Canvas::default();
        let selection = Selection::new();
        let hud = vec!["mode: Default".to_string()];
        let mut v = view(&scene, &canvas, &selection);
        v.hud = &hud;
        let mut rec = Recorder::default();
        render_frame(&mut rec, &v, &FrameStyle::default());
        assert_eq!(rec.calls.last(), Some(&Call::Text("mode: Default".to_string())));
    }
}
