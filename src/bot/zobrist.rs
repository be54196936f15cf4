//! A Zobrist-style position hash for the bot's lookahead transposition
//! memo: dock contents, per-type accessible counts, frog set, and dock
//! capacity, folded into one `u64`. Two states with this hash equal are
//! treated as equivalent only within the same lookahead pass — the memo
//! is cleared every move application, so no cross-move staleness accrues.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::model::{CanonicalKey, TileType};
use crate::state::GameState;

pub fn hash(state: &GameState) -> u64 {
    let mut hasher = DefaultHasher::new();
    state.dock_capacity.hash(&mut hasher);

    let dock_types: Vec<u8> = state
        .dock
        .slots()
        .iter()
        .map(|s| type_ordinal(s.tile_type))
        .collect();
    dock_types.hash(&mut hasher);

    let mut frogs: Vec<CanonicalKey> = state.gimmicks.frog_positions.iter().copied().collect();
    frogs.sort();
    frogs.hash(&mut hasher);

    if state.cache.is_valid() {
        for n in 0..=16u8 {
            state.cache.count_of(TileType::Colour(n)).hash(&mut hasher);
        }
    }

    hasher.finish()
}

fn type_ordinal(t: TileType) -> u8 {
    match t {
        TileType::Placeholder => 0,
        TileType::Colour(n) => n,
    }
}
