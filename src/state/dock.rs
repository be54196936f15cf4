//! The dock/buffer: a 7-slot (minus locked slots) holding area where equal
//! tile types stay contiguous and any run of three clears together.

use crate::model::{CanonicalKey, TileType};

/// One tile currently sitting in the dock.
#[derive(Debug, Clone, PartialEq)]
pub struct DockSlot {
    pub key: CanonicalKey,
    pub tile_type: TileType,
    /// The goal token a craft-emitted tile should credit on clear, if any.
    pub origin_goal: Option<String>,
}

/// Ordered dock contents. Insertion always preserves the grouping
/// invariant: a newly arrived tile of a type already present joins that
/// type's contiguous run; otherwise it is appended at the end.
#[derive(Debug, Clone, Default)]
pub struct Dock {
    slots: Vec<DockSlot>,
}

impl Dock {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[DockSlot] {
        &self.slots
    }

    pub fn count_of(&self, tile_type: TileType) -> usize {
        self.slots.iter().filter(|s| s.tile_type == tile_type).count()
    }

    /// Inserts one tile, honouring the grouping invariant.
    pub fn insert(&mut self, slot: DockSlot) {
        if let Some(run_end) = self.last_index_of(slot.tile_type) {
            self.slots.insert(run_end + 1, slot);
        } else {
            self.slots.push(slot);
        }
    }

    fn last_index_of(&self, tile_type: TileType) -> Option<usize> {
        self.slots
            .iter()
            .rposition(|s| s.tile_type == tile_type)
    }

    /// Removes and returns the first contiguous run of exactly-or-more
    /// than three same-typed slots, taking only the first three, or
    /// `None` if no type currently reaches three. Call repeatedly — a
    /// single insertion batch (e.g. a linked pick) can complete more than
    /// one type's run.
    pub fn clear_one_match(&mut self) -> Option<[DockSlot; 3]> {
        let mut i = 0;
        while i < self.slots.len() {
            let ty = self.slots[i].tile_type;
            let mut j = i;
            while j < self.slots.len() && self.slots[j].tile_type == ty {
                j += 1;
            }
            if j - i >= 3 {
                let removed: Vec<DockSlot> = self.slots.drain(i..i + 3).collect();
                let arr: [DockSlot; 3] = removed.try_into().ok()?;
                return Some(arr);
            }
            i = j;
        }
        None
    }

    /// Clears every completed run, repeatedly, returning each cleared
    /// triple in the order they were resolved.
    pub fn clear_all_matches(&mut self) -> Vec<[DockSlot; 3]> {
        let mut cleared = Vec::new();
        while let Some(triple) = self.clear_one_match() {
            cleared.push(triple);
        }
        cleared
    }

    /// True iff every run of equal types is contiguous — the invariant
    /// insertion is meant to preserve; used only by tests.
    #[cfg(test)]
    fn grouping_holds(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        let mut i = 0;
        while i < self.slots.len() {
            let ty = self.slots[i].tile_type;
            if !seen.insert(ty) {
                return false;
            }
            while i < self.slots.len() && self.slots[i].tile_type == ty {
                i += 1;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(layer: u32, x: i32, y: i32, ty: TileType) -> DockSlot {
        DockSlot {
            key: CanonicalKey::new(layer, x, y),
            tile_type: ty,
            origin_goal: None,
        }
    }

    #[test]
    fn insert_groups_equal_types_contiguously() {
        let mut dock = Dock::new();
        dock.insert(slot(0, 0, 0, TileType::Colour(1)));
        dock.insert(slot(0, 1, 0, TileType::Colour(2)));
        dock.insert(slot(0, 2, 0, TileType::Colour(1)));
        assert!(dock.grouping_holds());
        assert_eq!(dock.count_of(TileType::Colour(1)), 2);
    }

    #[test]
    fn clears_first_completed_run_of_three() {
        let mut dock = Dock::new();
        for i in 0..3 {
            dock.insert(slot(0, i, 0, TileType::Colour(5)));
        }
        dock.insert(slot(0, 9, 0, TileType::Colour(6)));
        let cleared = dock.clear_one_match().unwrap();
        assert!(cleared.iter().all(|s| s.tile_type == TileType::Colour(5)));
        assert_eq!(dock.len(), 1);
    }

    #[test]
    fn clear_all_matches_drains_every_completed_run() {
        let mut dock = Dock::new();
        for i in 0..3 {
            dock.insert(slot(0, i, 0, TileType::Colour(1)));
        }
        for i in 0..3 {
            dock.insert(slot(0, i, 1, TileType::Colour(2)));
        }
        let cleared = dock.clear_all_matches();
        assert_eq!(cleared.len(), 2);
        assert!(dock.is_empty());
    }

    #[test]
    fn never_leaves_a_type_at_three_or_more_after_clearing() {
        let mut dock = Dock::new();
        for i in 0..2 {
            dock.insert(slot(0, i, 0, TileType::Colour(3)));
        }
        dock.insert(slot(0, 9, 0, TileType::Colour(3)));
        dock.clear_all_matches();
        assert_eq!(dock.count_of(TileType::Colour(3)), 0);
    }
}
