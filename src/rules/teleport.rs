//! Teleport tick: a global 3-move cycle that shuffles tile types among
//! surviving teleport participants, and retires the gimmick once too few
//! participants remain.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::CanonicalKey;
use crate::state::GameState;

/// Advances the click counter by one; when it wraps to zero, shuffles tile
/// types among the surviving participants (those still on the board).
pub fn tick(state: &mut GameState, rng: &mut impl Rng) {
    state.gimmicks.teleport_participants.retain(|key| {
        state
            .tiles
            .get(key)
            .is_some_and(|t| !t.picked)
    });

    state.gimmicks.teleport_click_count = (state.gimmicks.teleport_click_count + 1) % 3;
    if state.gimmicks.teleport_click_count != 0 {
        return;
    }

    let participants = state.gimmicks.teleport_participants.clone();
    if participants.len() < 2 {
        retire(state, &participants);
        return;
    }

    let mut types: Vec<_> = participants
        .iter()
        .filter_map(|key| state.tile(*key).map(|t| t.tile_type))
        .collect();
    types.shuffle(rng);
    for (key, ty) in participants.iter().zip(types) {
        if let Some(tile) = state.tile_mut(*key) {
            tile.tile_type = ty;
        }
    }
}

/// Strips the teleport effect from every surviving participant, promoting
/// its current tile type to a permanent override.
fn retire(state: &mut GameState, participants: &[CanonicalKey]) {
    use crate::model::Effect;
    for &key in participants {
        if let Some(tile) = state.tile_mut(key) {
            if matches!(tile.effect, crate::model::Effect::Teleport) {
                tile.effect = Effect::None;
            }
            let tile_type = tile.tile_type;
            state
                .gimmicks
                .tile_type_overrides
                .insert(key, tile_type);
        }
    }
    state.gimmicks.teleport_participants.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Effect, Tile, TileType};
    use crate::state::{AccessibleCache, Dock, GimmickIndex, Terminal};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn state_with(tiles: Vec<Tile>) -> GameState {
        let mut layer_cols = HashMap::new();
        let mut map = HashMap::new();
        for t in &tiles {
            layer_cols.entry(t.layer).or_insert(8);
        }
        let mut gimmicks = GimmickIndex::new();
        for t in &tiles {
            map.insert(t.key(), t.clone());
            if matches!(t.effect, Effect::Teleport) {
                gimmicks.teleport_participants.push(t.key());
            }
        }
        GameState {
            tiles: map,
            layer_cols,
            dock: Dock::new(),
            dock_capacity: 7,
            goals_remaining: HashMap::new(),
            moves_used: 0,
            max_moves: 20,
            gimmicks,
            terminal: Terminal::Running,
            cache: AccessibleCache::new(),
            time_attack_budget: None,
        }
    }

    #[test]
    fn click_count_cycles_through_zero_one_two() {
        let mut state = state_with(vec![]);
        let mut rng = SmallRng::seed_from_u64(3);
        tick(&mut state, &mut rng);
        assert_eq!(state.gimmicks.teleport_click_count, 1);
        tick(&mut state, &mut rng);
        assert_eq!(state.gimmicks.teleport_click_count, 2);
        tick(&mut state, &mut rng);
        assert_eq!(state.gimmicks.teleport_click_count, 0);
    }

    #[test]
    fn dropping_below_two_participants_retires_and_promotes_override() {
        let tile = Tile::new(0, 0, 0, TileType::Colour(1), Effect::Teleport);
        let key = tile.key();
        let mut state = state_with(vec![tile]);
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..3 {
            tick(&mut state, &mut rng);
        }
        assert!(state.gimmicks.teleport_participants.is_empty());
        assert!(state.gimmicks.tile_type_overrides.contains_key(&key));
        assert_eq!(state.tile(key).unwrap().effect, Effect::None);
    }
}
