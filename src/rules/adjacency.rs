//! Adjacency effects triggered by a pick: ice thaw, grass decay, chain
//! unlocking. Each only ever touches same-layer neighbours.

use std::collections::HashSet;

use crate::model::{CanonicalKey, Effect};
use crate::state::GameState;

fn same_row_neighbours(key: CanonicalKey) -> [CanonicalKey; 2] {
    [
        CanonicalKey::new(key.layer, key.x - 1, key.y),
        CanonicalKey::new(key.layer, key.x + 1, key.y),
    ]
}

fn orthogonal_neighbours(key: CanonicalKey) -> [CanonicalKey; 4] {
    [
        CanonicalKey::new(key.layer, key.x - 1, key.y),
        CanonicalKey::new(key.layer, key.x + 1, key.y),
        CanonicalKey::new(key.layer, key.x, key.y - 1),
        CanonicalKey::new(key.layer, key.x, key.y + 1),
    ]
}

/// Decrements every ice tile that was exposed *before* this pick — ice
/// revealed by the pick itself must not thaw on the same turn.
pub fn thaw_snapshotted_ice(state: &mut GameState, snapshot: &HashSet<CanonicalKey>) {
    for &key in snapshot {
        if let Some(tile) = state.tile_mut(key) {
            if let Effect::Ice { remaining } = &mut tile.effect {
                *remaining = remaining.saturating_sub(1);
            }
        }
    }
}

/// Decrements every orthogonal-neighbour grass tile that is currently
/// unblocked from above.
pub fn decay_neighbouring_grass(state: &mut GameState, picked_key: CanonicalKey) {
    for neighbour in orthogonal_neighbours(picked_key) {
        if !state.is_exposed(neighbour) {
            continue;
        }
        if let Some(tile) = state.tile_mut(neighbour) {
            if let Effect::Grass { remaining } = &mut tile.effect {
                *remaining = remaining.saturating_sub(1);
            }
        }
    }
}

/// Unlocks any same-row neighbour chain tile.
pub fn unlock_neighbouring_chains(state: &mut GameState, picked_key: CanonicalKey) {
    for neighbour in same_row_neighbours(picked_key) {
        if let Some(tile) = state.tile_mut(neighbour) {
            if let Effect::Chain { unlocked } = &mut tile.effect {
                *unlocked = true;
            }
        }
    }
}
