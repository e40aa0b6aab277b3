//! Per-gesture undo baseline.

use crate::geometry::Rect;
use crate::scene::Scene;

/// One remembered field value, addressed by collection index.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotEntry {
    YOffset(usize, f64),
    Scale(usize, f64),
    Overlap(usize, f64),
    Reference(usize, Option<f64>),
    RenderScale(usize, f64),
    Rect(usize, Rect),
}

/// Field values captured when a gesture mode is entered.
///
/// Entries are recorded in selection order. Restoring skips entries whose
/// index no longer resolves, so a scene that changed underneath a gesture
/// is restored as far as it still can be.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    entries: Vec<SnapshotEntry>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: SnapshotEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes every captured value back. Returns how many entries applied.
    pub fn restore(&self, scene: &mut Scene) -> usize {
        let mut applied = 0;
        for entry in &self.entries {
            let done = match *entry {
                SnapshotEntry::YOffset(i, v) => scene.sprite_mut(i).map(|s| s.y_offset = v),
                SnapshotEntry::Scale(i, v) => scene.sprite_mut(i).map(|s| s.display_scale = v),
                SnapshotEntry::Overlap(i, v) => scene.sprite_mut(i).map(|s| s.overlap = v),
                SnapshotEntry::Reference(i, v) => scene.sprite_mut(i).map(|s| s.reference_y = v),
                SnapshotEntry::RenderScale(i, v) => {
                    scene.viewport_mut(i).map(|vp| vp.render_scale = v)
                }
                SnapshotEntry::Rect(i, r) => scene.viewport_mut(i).map(|vp| vp.rect = r),
            };
            if done.is_some() {
                applied += 1;
            } else {
                log::debug!("Skipping stale undo entry {:?}", entry);
            }
        }
        applied
    }
}
