//! Move legality: the predicate a pick must satisfy before it is applied.

use crate::error::MoveRefusal;
use crate::model::{CanonicalKey, Effect};
use crate::state::GameState;

/// Checks every legality condition for picking `key`, independent of
/// whether it is the first or second half of a linked pair.
pub fn check(state: &GameState, key: CanonicalKey) -> Result<(), MoveRefusal> {
    let tile = state.tile(key).ok_or(MoveRefusal::NotFound)?;
    if tile.picked {
        return Err(MoveRefusal::AlreadyPicked);
    }
    if state.is_blocked_by_upper(key) {
        return Err(MoveRefusal::BlockedByUpper);
    }
    if state.gimmicks.frog_positions.contains(&key) {
        return Err(MoveRefusal::OccupiedByFrog);
    }
    match &tile.effect {
        Effect::Ice { remaining } if *remaining > 0 => return Err(MoveRefusal::EffectForbids),
        Effect::Chain { unlocked } if !unlocked => return Err(MoveRefusal::EffectForbids),
        Effect::Grass { remaining } if *remaining > 0 => return Err(MoveRefusal::EffectForbids),
        Effect::Link { can_pick, .. } if !can_pick => return Err(MoveRefusal::EffectForbids),
        Effect::Curtain { is_open } if !is_open => return Err(MoveRefusal::EffectForbids),
        Effect::Craft { .. } => return Err(MoveRefusal::BlockedStackOrCraftInterior),
        _ => {}
    }
    Ok(())
}

pub fn is_pickable(state: &GameState, key: CanonicalKey) -> bool {
    check(state, key).is_ok()
}

/// All currently pickable board keys, in canonical order.
pub fn legal_moves(state: &GameState) -> Vec<CanonicalKey> {
    let mut keys: Vec<CanonicalKey> = state
        .tiles
        .keys()
        .copied()
        .filter(|&k| is_pickable(state, k))
        .collect();
    keys.sort();
    keys
}
