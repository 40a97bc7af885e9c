//! Stable per-user label colors.
//!
//! Every user id maps to one palette slot for the life of the process. The
//! slot is a hash of the id, computed once and remembered; entries are never
//! evicted.
//!
//! The hash is `DefaultHasher`, whose output is not guaranteed across Rust
//! releases, so a user's color can differ between builds.

use par_timeline_config::Color;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

/// Numeric user id as delivered by the timeline API.
pub type UserId = i64;

/// Memoized id → palette index lookup. Safe to share between threads.
#[derive(Debug)]
pub struct LabelColorAssigner {
    palette_len: usize,
    assigned: Mutex<HashMap<UserId, usize>>,
}

impl LabelColorAssigner {
    /// An empty palette is treated as a single slot so lookups stay in range.
    pub fn new(palette_len: usize) -> Self {
        Self {
            palette_len: palette_len.max(1),
            assigned: Mutex::new(HashMap::new()),
        }
    }

    /// Process-wide assigner sized to the default label palette.
    pub fn global() -> &'static LabelColorAssigner {
        static GLOBAL: OnceLock<LabelColorAssigner> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            LabelColorAssigner::new(par_timeline_config::defaults::label_palette().len())
        })
    }

    pub fn palette_len(&self) -> usize {
        self.palette_len
    }

    /// Palette index for `id`, assigning one on first use.
    pub fn color_for(&self, id: UserId) -> usize {
        *self
            .assigned
            .lock()
            .entry(id)
            .or_insert_with(|| slot_for(id, self.palette_len))
    }

    /// Convenience: resolve the index against `palette`.
    ///
    /// `palette` should have `palette_len()` entries; a shorter one wraps.
    pub fn label_color(&self, id: UserId, palette: &[Color]) -> Option<Color> {
        if palette.is_empty() {
            return None;
        }
        Some(palette[self.color_for(id) % palette.len()])
    }

    /// Number of ids that have been assigned so far.
    pub fn assigned_count(&self) -> usize {
        self.assigned.lock().len()
    }
}

fn slot_for(id: UserId, palette_len: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    (hasher.finish() % palette_len as u64) as usize
}
