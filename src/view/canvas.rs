//! Pan/zoom state and the world <-> device mapping.

use crate::geometry::{Rect, Vec2};

/// Smallest zoom the canvas accepts; keeps `unmap_*` finite.
const MIN_SCALE: f64 = 1e-6;
/// Largest zoom the canvas accepts.
const MAX_SCALE: f64 = 1e6;

/// View transform owning the pan offset and zoom scale.
///
/// `origin` is the world point shown at the device's bottom-left corner and
/// `scale` is device pixels per world unit. Device space is y-up; backends
/// with y-down pointer coordinates flip them before dispatching input.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub origin: Vec2,
    pub scale: f64,
    /// Device surface size in pixels.
    pub viewport_size: Vec2,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Vec2::zero(), 1.0)
    }
}

impl Canvas {
    pub fn new(origin: Vec2, scale: f64) -> Self {
        Self {
            origin,
            scale: sanitize_scale(scale, 1.0),
            viewport_size: Vec2::new(800.0, 600.0),
        }
    }

    /// Updates the device surface size after the backend (re)configures it.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport_size = Vec2::new(width.max(0.0), height.max(0.0));
    }

    #[inline]
    pub fn map_scaled(&self, v: Vec2) -> Vec2 {
        v * self.scale
    }

    /// World point to device point.
    #[inline]
    pub fn map_point(&self, v: Vec2) -> Vec2 {
        self.map_scaled(v - self.origin)
    }

    #[inline]
    pub fn unmap_scaled(&self, v: Vec2) -> Vec2 {
        v / self.scale
    }

    /// Device point to world point.
    #[inline]
    pub fn unmap_point(&self, v: Vec2) -> Vec2 {
        self.unmap_scaled(v) + self.origin
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.origin = self.origin + Vec2::new(dx, dy);
    }

    /// Pans by a fraction of the currently visible world extent.
    pub fn pan_fraction(&mut self, fx: f64, fy: f64) {
        let bounds = self.view_bounds();
        self.move_by(fx * bounds.w, fy * bounds.h);
    }

    /// Rescales without moving the origin.
    pub fn zoom_by(&mut self, factor: f64) {
        self.scale = sanitize_scale(self.scale * factor, self.scale);
    }

    /// Rescales by `factor` keeping the world point under `anchor` (device
    /// coordinates) fixed on screen.
    pub fn zoom_at(&mut self, factor: f64, anchor: Vec2) {
        let new_scale = sanitize_scale(self.scale * factor, self.scale);
        let effective = new_scale / self.scale;
        let anchor_world = self.unmap_point(anchor);
        self.origin = anchor_world - (anchor_world - self.origin) / effective;
        self.scale = new_scale;
    }

    /// World-space rectangle currently visible on the device surface.
    pub fn view_bounds(&self) -> Rect {
        let size = self.unmap_scaled(self.viewport_size);
        Rect::new(self.origin.x, self.origin.y, size.x, size.y)
    }
}

fn sanitize_scale(candidate: f64, fallback: f64) -> f64 {
    if candidate.is_finite() && candidate > 0.0 {
        candidate.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        log::warn!("Rejecting canvas scale {candidate}, keeping {fallback}");
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn map_then_unmap_is_identity() {
        let origins = [Vec2::zero(), Vec2::new(-120.5, 33.25), Vec2::new(1e4, -7.0)];
        let scales = [0.01, 0.5, 1.0, 3.75, 250.0];
        let points = [Vec2::new(0.0, 0.0), Vec2::new(12.5, -99.0), Vec2::new(-4e3, 8e2)];

        for origin in origins {
            for scale in scales {
                let canvas = Canvas::new(origin, scale);
                for p in points {
                    let back = canvas.unmap_point(canvas.map_point(p));
                    assert!(back.approx_eq(p, 1e-6), "{p} -> {back} at {origin} x{scale}");
                }
            }
        }
    }

    #[test]
    fn zoom_at_keeps_anchor_fixed() {
        let mut canvas = Canvas::new(Vec2::new(40.0, -10.0), 0.5);
        let anchor = Vec2::new(300.0, 200.0);
        let before = canvas.unmap_point(anchor);

        canvas.zoom_at(1.1, anchor);
        assert!((canvas.scale - 0.55).abs() < EPS);
        assert!(canvas.unmap_point(anchor).approx_eq(before, 1e-9));

        canvas.zoom_at(1.0 / 1.1, anchor);
        assert!(canvas.unmap_point(anchor).approx_eq(before, 1e-9));
    }

    #[test]
    fn move_and_bounds() {
        let mut canvas = Canvas::new(Vec2::zero(), 2.0);
        canvas.resize(800.0, 600.0);
        canvas.move_by(10.0, -5.0);
        let bounds = canvas.view_bounds();
        assert_eq!(bounds, Rect::new(10.0, -5.0, 400.0, 300.0));

        canvas.pan_fraction(0.1, 0.0);
        assert!((canvas.origin.x - 50.0).abs() < EPS);
    }

    #[test]
    fn invalid_scale_is_rejected() {
        let mut canvas = Canvas::new(Vec2::zero(), 1.0);
        canvas.zoom_by(0.0);
        assert_eq!(canvas.scale, 1.0);
        canvas.zoom_by(f64::NAN);
        assert_eq!(canvas.scale, 1.0);
        canvas.zoom_by(2.0);
        assert_eq!(canvas.scale, 2.0);
    }
}
