//! [`Renderer`] implementation over a Cairo context with Pango text.

use super::color::MAGENTA;
use super::{Color, FontDescriptor, ImageHandle, Renderer, TextAnchor};
use crate::geometry::{Rect, Vec2};

/// Draws into a Cairo context whose user space is y-down; incoming y-up
/// device coordinates are flipped against the surface height.
pub struct CairoRenderer<'a> {
    ctx: &'a cairo::Context,
    width: f64,
    height: f64,
    font: pango::FontDescription,
    checkerboard: Option<cairo::SurfacePattern>,
}

impl<'a> CairoRenderer<'a> {
    pub fn new(
        ctx: &'a cairo::Context,
        width: f64,
        height: f64,
        font: &FontDescriptor,
        font_size: f64,
    ) -> Self {
        Self {
            ctx,
            width,
            height,
            font: pango::FontDescription::from_string(&font.to_pango_string(font_size)),
            checkerboard: checkerboard_pattern(),
        }
    }

    #[inline]
    fn flip(&self, y: f64) -> f64 {
        self.height - y
    }

    fn set_color(&self, color: Color) {
        self.ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    }

    fn layout(&self, text: &str) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(self.ctx);
        layout.set_font_description(Some(&self.font));
        layout.set_text(text);
        layout
    }
}

impl Renderer for CairoRenderer<'_> {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.ctx.save().ok();
        self.ctx.set_operator(cairo::Operator::Source);
        self.set_color(color);
        let _ = self.ctx.paint();
        self.ctx.restore().ok();
    }

    fn draw_image(&mut self, image: &ImageHandle, position: Vec2, scale: f64) {
        if scale <= 0.0 || !scale.is_finite() {
            return;
        }
        let w = f64::from(image.width());
        let h = f64::from(image.height());
        let top = self.flip(position.y + h * scale);

        self.ctx.save().ok();
        self.ctx.translate(position.x, top);
        self.ctx.scale(scale, scale);
        match (image.surface(), &self.checkerboard) {
            (Some(surface), _) => {
                if self.ctx.set_source_surface(surface, 0.0, 0.0).is_ok() {
                    self.ctx.source().set_filter(cairo::Filter::Good);
                    self.ctx.rectangle(0.0, 0.0, w, h);
                    let _ = self.ctx.fill();
                }
            }
            (None, Some(pattern)) => {
                if self.ctx.set_source(pattern).is_ok() {
                    self.ctx.rectangle(0.0, 0.0, w, h);
                    let _ = self.ctx.fill();
                }
            }
            (None, None) => {
                self.set_color(MAGENTA.with_alpha(0.5));
                self.ctx.rectangle(0.0, 0.0, w, h);
                let _ = self.ctx.fill();
            }
        }
        self.ctx.restore().ok();
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2, color: Color, width: f64) {
        self.set_color(color);
        self.ctx.set_line_width(width);
        self.ctx.set_line_cap(cairo::LineCap::Butt);
        self.ctx.move_to(a.x, self.flip(a.y));
        self.ctx.line_to(b.x, self.flip(b.y));
        let _ = self.ctx.stroke();
    }

    fn draw_rect(&mut self, rect: Rect, color: Color, filled: bool) {
        let r = rect.normalized();
        self.set_color(color);
        self.ctx.set_line_join(cairo::LineJoin::Miter);
        self.ctx.rectangle(r.x, self.flip(r.top()), r.w, r.h);
        if filled {
            let _ = self.ctx.fill();
        } else {
            self.ctx.set_line_width(1.0);
            let _ = self.ctx.stroke();
        }
    }

    fn draw_text(&mut self, text: &str, position: Vec2, color: Color, anchor: TextAnchor) {
        if text.is_empty() {
            return;
        }
        self.ctx.save().ok();
        self.ctx.set_antialias(cairo::Antialias::Best);
        let layout = self.layout(text);
        let (w, h) = layout.pixel_size();
        let size = Vec2::new(f64::from(w), f64::from(h));
        let origin = anchor.origin_for(position, size);

        // Contrasting outline keeps labels legible over sprites.
        let outline = if color.brightness() > 0.5 {
            Color::new(0.0, 0.0, 0.0, 0.6)
        } else {
            Color::new(1.0, 1.0, 1.0, 0.6)
        };
        self.ctx.move_to(origin.x, self.flip(origin.y + size.y));
        pangocairo::functions::layout_path(self.ctx, &layout);
        self.set_color(outline);
        self.ctx.set_line_width(2.0);
        self.ctx.set_line_join(cairo::LineJoin::Round);
        let _ = self.ctx.stroke_preserve();
        self.set_color(color);
        let _ = self.ctx.fill();
        self.ctx.restore().ok();
    }

    fn measure_text(&self, text: &str) -> Vec2 {
        let (w, h) = self.layout(text).pixel_size();
        Vec2::new(f64::from(w), f64::from(h))
    }
}

/// One image pixel per cell, magenta on the diagonal, transparent elsewhere.
fn checkerboard_pattern() -> Option<cairo::SurfacePattern> {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 2, 2).ok()?;
    {
        let ctx = cairo::Context::new(&surface).ok()?;
        ctx.set_source_rgba(MAGENTA.r, MAGENTA.g, MAGENTA.b, MAGENTA.a);
        ctx.rectangle(0.0, 0.0, 1.0, 1.0);
        ctx.rectangle(1.0, 1.0, 1.0, 1.0);
        ctx.fill().ok()?;
    }
    let pattern = cairo::SurfacePattern::create(&surface);
    pattern.set_extend(cairo::Extend::Repeat);
    pattern.set_filter(cairo::Filter::Nearest);
    Some(pattern)
}
