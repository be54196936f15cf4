//! Gimmick registries: fast membership indices over the canonical tile map.
//!
//! For ice, grass, chain, bomb, curtain and link the canonical mutable state
//! lives on `Tile.effect` itself; the sets here are membership-only indices
//! for O(1) enumeration and are never a second source of truth. Frog is the
//! exception — `frog_positions` is itself authoritative, since a frog is a
//! mobile occupant of a cell rather than a counter owned by one tile.

use std::collections::{HashMap, HashSet};

use crate::model::{CanonicalKey, TileType};

#[derive(Debug, Clone, Default)]
pub struct GimmickIndex {
    pub ice: HashSet<CanonicalKey>,
    pub grass: HashSet<CanonicalKey>,
    pub chain: HashSet<CanonicalKey>,
    pub bomb: HashSet<CanonicalKey>,
    pub curtain: HashSet<CanonicalKey>,
    pub link: HashSet<CanonicalKey>,

    /// Authoritative: the set of cells currently occupied by a frog.
    pub frog_positions: HashSet<CanonicalKey>,

    /// Teleport participants in click order; not a set, since the shuffle
    /// needs a stable iteration order over "current set of participants".
    pub teleport_participants: Vec<CanonicalKey>,
    pub teleport_click_count: u8,

    /// Tile types promoted to permanent overrides once a teleport group
    /// drops below two participants.
    pub tile_type_overrides: HashMap<CanonicalKey, TileType>,

    /// Key tiles collected so far, mod 3; wrapping to 0 promotes
    /// `dock_capacity` by one (capped at 7) in the caller.
    pub key_progress: u8,

    /// Maps a craft-emitted board tile to the goal token it should credit
    /// on clear, instead of the token implied by its own tile type.
    pub craft_origin_goal: HashMap<CanonicalKey, String>,
}

impl GimmickIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more key pick; returns true if this pick completes a
    /// group of three and should promote `dock_capacity`.
    pub fn record_key_pick(&mut self) -> bool {
        self.key_progress = (self.key_progress + 1) % 3;
        self.key_progress == 0
    }

    pub fn remove_teleport_participant(&mut self, key: CanonicalKey) {
        self.teleport_participants.retain(|k| *k != key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_progress_wraps_every_three_picks() {
        let mut idx = GimmickIndex::new();
        assert!(!idx.record_key_pick());
        assert!(!idx.record_key_pick());
        assert!(idx.record_key_pick());
        assert_eq!(idx.key_progress, 0);
    }

    #[test]
    fn removing_a_participant_shrinks_the_list() {
        let mut idx = GimmickIndex::new();
        let a = CanonicalKey::new(0, 0, 0);
        let b = CanonicalKey::new(0, 1, 0);
        idx.teleport_participants = vec![a, b];
        idx.remove_teleport_participant(a);
        assert_eq!(idx.teleport_participants, vec![b]);
    }
}
