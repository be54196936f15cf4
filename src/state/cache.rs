//! The accessible-tile cache: which board tiles are currently pickable and
//! how many of each type are, kept precomputed so the bot heuristic can read
//! them in O(1) instead of re-walking the board every candidate move.

use std::collections::HashMap;

use crate::model::{CanonicalKey, TileType};

#[derive(Debug, Clone, Default)]
pub struct AccessibleCache {
    per_type_counts: HashMap<TileType, u32>,
    valid: bool,
}

impl AccessibleCache {
    pub fn new() -> Self {
        Self {
            per_type_counts: HashMap::new(),
            valid: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Replaces the cached contents and marks the cache valid. The caller
    /// supplies the already-computed accessible set; this type owns only
    /// the memoisation, not the legality logic.
    pub fn rebuild(&mut self, accessible: Vec<(CanonicalKey, TileType)>) {
        self.per_type_counts.clear();
        for (_key, ty) in accessible {
            *self.per_type_counts.entry(ty).or_insert(0) += 1;
        }
        self.valid = true;
    }

    pub fn count_of(&self, tile_type: TileType) -> u32 {
        self.per_type_counts.get(&tile_type).copied().unwrap_or(0)
    }
}
