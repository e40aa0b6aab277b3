//! Ordered multi-selection of scene entities.

/// Non-owning reference to a scene entity by index into its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneRef {
    Sprite(usize),
    Viewport(usize),
}

impl SceneRef {
    pub fn is_sprite(&self) -> bool {
        matches!(self, SceneRef::Sprite(_))
    }

    pub fn is_viewport(&self) -> bool {
        matches!(self, SceneRef::Viewport(_))
    }

    pub fn sprite_index(&self) -> Option<usize> {
        match self {
            SceneRef::Sprite(index) => Some(*index),
            SceneRef::Viewport(_) => None,
        }
    }

    pub fn viewport_index(&self) -> Option<usize> {
        match self {
            SceneRef::Viewport(index) => Some(*index),
            SceneRef::Sprite(_) => None,
        }
    }
}

/// Selection list; the first entry is the primary selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: Vec<SceneRef>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(&self) -> Option<SceneRef> {
        self.items.first().copied()
    }

    pub fn primary_sprite(&self) -> Option<usize> {
        self.primary().and_then(|r| r.sprite_index())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[SceneRef] {
        &self.items
    }

    pub fn contains(&self, item: SceneRef) -> bool {
        self.items.contains(&item)
    }

    /// Selected sprite indices in selection order.
    pub fn sprites(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().filter_map(SceneRef::sprite_index)
    }

    /// Selected viewport indices in selection order.
    pub fn viewports(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().filter_map(SceneRef::viewport_index)
    }

    pub fn has_sprites(&self) -> bool {
        self.items.iter().any(SceneRef::is_sprite)
    }

    pub fn has_viewports(&self) -> bool {
        self.items.iter().any(SceneRef::is_viewport)
    }

    /// Makes `item` the sole selection.
    pub fn replace(&mut self, item: SceneRef) {
        self.items.clear();
        self.items.push(item);
    }

    /// Appends `item` unless already selected.
    pub fn add(&mut self, item: SceneRef) {
        if !self.items.contains(&item) {
            self.items.push(item);
        }
    }

    pub fn remove(&mut self, item: SceneRef) {
        self.items.retain(|existing| *existing != item);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drops `removed` and shifts later indices of the same collection down so
    /// the remaining references stay valid after a removal from the scene.
    pub fn purge(&mut self, removed: SceneRef) {
        self.items.retain(|existing| *existing != removed);
        for item in &mut self.items {
            match (item, removed) {
                (SceneRef::Sprite(index), SceneRef::Sprite(gone)) if *index > gone => *index -= 1,
                (SceneRef::Viewport(index), SceneRef::Viewport(gone)) if *index > gone => {
                    *index -= 1
                }
                _ => {}
            }
        }
    }

    /// Rewrites a sprite reference after the sequence was reordered.
    pub fn remap_sprite(&mut self, from: usize, to: usize) {
        for item in &mut self.items {
            if let SceneRef::Sprite(index) = item {
                *index = reorder_index(*index, from, to);
            }
        }
    }
}

/// Where an element at `index` ends up when the element at `from` moves to `to`.
pub(crate) fn reorder_index(index: usize, from: usize, to: usize) -> usize {
    if index == from {
        to
    } else if from < to && index > from && index <= to {
        index - 1
    } else if to < from && index >= to && index < from {
        index + 1
    } else {
        index
    }
}
