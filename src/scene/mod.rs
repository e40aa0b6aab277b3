//! Scene model: ordered sprites, viewports, measurement settings.
//!
//! Sprite order is both the layout order (each sprite starts where the
//! previous one's overlap leaves off) and the draw order (later sprites are
//! drawn on top).

pub mod selection;
pub mod sprite;
pub mod viewport;

pub use selection::{SceneRef, Selection};
pub use sprite::{DEFAULT_OVERLAP, Sprite};
pub use viewport::Viewport;

use crate::geometry::{Rect, Vec2};

/// Default pixels per real-world unit.
pub const DEFAULT_PPU: f64 = 128.0;
/// Default real-world unit label.
pub const DEFAULT_UNIT: &str = "m";

/// Smallest display or render scale a drag can reach.
pub const MIN_ITEM_SCALE: f64 = 1e-4;
/// Largest display or render scale a drag can reach.
pub const MAX_ITEM_SCALE: f64 = 1e4;

/// Multiplies `current` by `factor`, clamped to
/// [`MIN_ITEM_SCALE`]..=[`MAX_ITEM_SCALE`]. A NaN or negative factor leaves
/// `current` unchanged.
pub fn scaled_by(current: f64, factor: f64) -> f64 {
    if factor.is_nan() || factor < 0.0 {
        log::warn!("Rejecting scale factor {factor}, keeping {current}");
        return current;
    }
    let candidate = current * factor;
    if candidate.is_nan() {
        current
    } else {
        candidate.clamp(MIN_ITEM_SCALE, MAX_ITEM_SCALE)
    }
}

/// Sprites, viewports and measurement settings.
#[derive(Debug, Clone)]
pub struct Scene {
    pub sprites: Vec<Sprite>,
    pub viewports: Vec<Viewport>,
    /// Pixels per real-world unit; annotation only, never used for layout.
    pub ppu: f64,
    pub unit: String,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(DEFAULT_PPU, DEFAULT_UNIT)
    }
}

impl Scene {
    pub fn new(ppu: f64, unit: impl Into<String>) -> Self {
        Self {
            sprites: Vec::new(),
            viewports: Vec::new(),
            ppu,
            unit: unit.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty() && self.viewports.is_empty()
    }

    /// Runs the layout recurrence, recording each sprite's x position.
    ///
    /// Returns the x coordinate after the last sprite.
    pub fn layout(&mut self) -> f64 {
        self.sprites
            .iter_mut()
            .fold(0.0, |x, sprite| sprite.place(x))
    }

    /// Layout x positions without touching the sprites.
    pub fn layout_positions(&self) -> Vec<f64> {
        let mut x = 0.0;
        self.sprites
            .iter()
            .map(|sprite| {
                let at = x;
                x += sprite.pixel_size().x * sprite.overlap;
                at
            })
            .collect()
    }

    /// Union of all placed sprite rectangles together with the unit square at
    /// the origin. Runs layout first.
    pub fn bounds(&mut self) -> Rect {
        self.layout();
        self.sprites
            .iter()
            .filter_map(Sprite::placed_rect)
            .fold(Rect::new(0.0, 0.0, 1.0, 1.0), |acc, rect| acc.union(&rect))
    }

    pub fn contains_ref(&self, item: SceneRef) -> bool {
        match item {
            SceneRef::Sprite(index) => index < self.sprites.len(),
            SceneRef::Viewport(index) => index < self.viewports.len(),
        }
    }

    /// Topmost entity under a world point: viewports first, then sprites from
    /// the last drawn to the first. Uses positions from the last layout.
    pub fn hit_test(&self, world: Vec2) -> Option<SceneRef> {
        if let Some(index) = self.viewports.iter().rposition(|vp| vp.contains(world)) {
            return Some(SceneRef::Viewport(index));
        }
        self.sprites
            .iter()
            .rposition(|sprite| sprite.contains(world))
            .map(SceneRef::Sprite)
    }

    /// Inserts a sprite before `before`, or appends when `None`/out of range.
    /// Returns the index the sprite landed at.
    pub fn insert_sprite(&mut self, sprite: Sprite, before: Option<usize>) -> usize {
        match before {
            Some(index) if index <= self.sprites.len() => {
                self.sprites.insert(index, sprite);
                index
            }
            _ => {
                self.sprites.push(sprite);
                self.sprites.len() - 1
            }
        }
    }

    pub fn add_viewport(&mut self, viewport: Viewport) -> usize {
        self.viewports.push(viewport);
        self.viewports.len() - 1
    }

    /// Removes an entity, preserving the order of the rest, and purges it from
    /// `selection`. Returns false for a dangling reference.
    pub fn remove(&mut self, item: SceneRef, selection: &mut Selection) -> bool {
        let removed = match item {
            SceneRef::Sprite(index) if index < self.sprites.len() => {
                self.sprites.remove(index);
                true
            }
            SceneRef::Viewport(index) if index < self.viewports.len() => {
                self.viewports.remove(index);
                true
            }
            _ => false,
        };
        if removed {
            selection.purge(item);
        }
        removed
    }

    /// Moves the sprite at `from` to `to` (clamped to the valid range),
    /// keeping the relative order of every other sprite. Returns the final
    /// index, or `None` when `from` is out of range.
    pub fn bump_sprite(&mut self, from: usize, to: isize, selection: &mut Selection) -> Option<usize> {
        if from >= self.sprites.len() {
            return None;
        }
        let last = self.sprites.len() as isize - 1;
        let to = to.clamp(0, last) as usize;
        if to != from {
            let sprite = self.sprites.remove(from);
            self.sprites.insert(to, sprite);
            selection.remap_sprite(from, to);
        }
        Some(to)
    }

    /// Moves the primary sprite selection by `delta` with wrap-around.
    /// An empty selection starts at the first (forward) or last (backward).
    pub fn select_step(&self, selection: &mut Selection, delta: isize) {
        if self.sprites.is_empty() {
            selection.clear();
            return;
        }
        let len = self.sprites.len() as isize;
        let next = match selection.primary_sprite() {
            Some(current) => (current as isize + delta).rem_euclid(len),
            None if delta > 0 => 0,
            None => len - 1,
        };
        selection.replace(SceneRef::Sprite(next as usize));
    }

    pub fn sprite_mut(&mut self, index: usize) -> Option<&mut Sprite> {
        self.sprites.get_mut(index)
    }

    pub fn viewport_mut(&mut self, index: usize) -> Option<&mut Viewport> {
        self.viewports.get_mut(index)
    }

    /// Sets the name of whatever `item` points at.
    pub fn rename(&mut self, item: SceneRef, name: &str) -> bool {
        match item {
            SceneRef::Sprite(index) => self.sprite_mut(index).map(|s| s.name = name.to_string()),
            SceneRef::Viewport(index) => {
                self.viewport_mut(index).map(|v| v.name = name.to_string())
            }
        }
        .is_some()
    }

    pub fn name_of(&self, item: SceneRef) -> Option<&str> {
        match item {
            SceneRef::Sprite(index) => self.sprites.get(index).map(|s| s.name.as_str()),
            SceneRef::Viewport(index) => self.viewports.get(index).map(|v| v.name.as_str()),
        }
    }

    /// Converts world pixels to the display unit when `real_units` is set.
    pub fn to_display_units(&self, value: f64, real_units: bool) -> f64 {
        if real_units { value / self.ppu } else { value }
    }

    pub fn unit_label(&self, real_units: bool) -> &str {
        if real_units { &self.unit } else { "px" }
    }
}
