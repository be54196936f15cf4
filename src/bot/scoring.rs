//! The additive move-scoring heuristic.

use rand::Rng;

use crate::model::{CanonicalKey, Effect};
use crate::state::GameState;

use super::profile::Profile;

/// Scores one candidate move for this profile. Noise is added last and
/// skipped entirely once `pattern_recognition >= 1.0`.
pub fn score(state: &GameState, profile: &Profile, key: CanonicalKey, rng: &mut impl Rng) -> f64 {
    let mut s = 0.0;
    let Some(tile) = state.tile(key) else {
        return f64::NEG_INFINITY;
    };
    let ty = tile.tile_type;
    let dock_count = state.dock.count_of(ty);
    let will_match = dock_count == 2;

    if will_match {
        s += 100.0;
    }
    if dock_count == 2 {
        s += 20.0 * profile.pattern_recognition;
    }

    if !will_match {
        s += match dock_count {
            6 => -50.0,
            5 => -20.0,
            4 => -5.0 * profile.blocking_awareness,
            _ => 0.0,
        };
    }

    s += 0.3 * profile.blocking_awareness * key.layer as f64;

    if state.cache.is_valid() && state.cache.count_of(ty) >= 2 {
        s += 2.0 * profile.pattern_recognition;
    }

    s += gimmick_bonus(state, profile, key);

    if profile.pattern_recognition < 1.0 {
        s += rng.random::<f64>() * 2.0 * (1.0 - profile.pattern_recognition);
    }

    s
}

fn gimmick_bonus(state: &GameState, profile: &Profile, key: CanonicalKey) -> f64 {
    let mut bonus = 0.0;

    for neighbour in [
        CanonicalKey::new(key.layer, key.x - 1, key.y),
        CanonicalKey::new(key.layer, key.x + 1, key.y),
    ] {
        if let Some(t) = state.tile(neighbour) {
            if matches!(t.effect, Effect::Chain { unlocked: false }) {
                bonus += 5.0 * profile.chain_preference;
            }
        }
    }

    for neighbour in [
        CanonicalKey::new(key.layer, key.x - 1, key.y),
        CanonicalKey::new(key.layer, key.x + 1, key.y),
        CanonicalKey::new(key.layer, key.x, key.y - 1),
        CanonicalKey::new(key.layer, key.x, key.y + 1),
    ] {
        if let Some(t) = state.tile(neighbour) {
            if let Effect::Ice { remaining } = t.effect {
                if remaining == 1 && state.goals_remaining.contains_key(&token_for(t.tile_type)) {
                    bonus += 8.0 * profile.goal_priority;
                }
            }
        }
    }

    for &bomb_key in &state.gimmicks.bomb {
        if let Some(t) = state.tile(bomb_key) {
            if let Effect::Bomb { remaining } = t.effect {
                if remaining <= 3 && state.is_exposed(bomb_key) {
                    let urgency = (4 - remaining as i32).max(1) as f64;
                    bonus += urgency * profile.blocking_awareness;
                }
            }
        }
    }

    bonus
}

fn token_for(tile_type: crate::model::TileType) -> String {
    match tile_type {
        crate::model::TileType::Colour(n) => format!("t{n}"),
        crate::model::TileType::Placeholder => "t0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::profile::OPTIMAL;
    use crate::model::{Tile, TileType};
    use crate::state::{AccessibleCache, Dock, DockSlot, GimmickIndex, Terminal};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn state_with(tiles: Vec<Tile>) -> GameState {
        let mut layer_cols = HashMap::new();
        let mut map = HashMap::new();
        for t in tiles {
            layer_cols.entry(t.layer).or_insert(8);
            map.insert(t.key(), t);
        }
        GameState {
            tiles: map,
            layer_cols,
            dock: Dock::new(),
            dock_capacity: 7,
            goals_remaining: HashMap::new(),
            moves_used: 0,
            max_moves: 20,
            gimmicks: GimmickIndex::new(),
            terminal: Terminal::Running,
            cache: AccessibleCache::new(),
            time_attack_budget: None,
        }
    }

    #[test]
    fn completing_a_match_dominates_the_score() {
        let key = CanonicalKey::new(0, 0, 0);
        let mut state = state_with(vec![Tile::new(0, 0, 0, TileType::Colour(1), Effect::None)]);
        state.dock.insert(DockSlot {
            key: CanonicalKey::new(0, 9, 9),
            tile_type: TileType::Colour(1),
            origin_goal: None,
        });
        state.dock.insert(DockSlot {
            key: CanonicalKey::new(0, 9, 8),
            tile_type: TileType::Colour(1),
            origin_goal: None,
        });
        let mut rng = SmallRng::seed_from_u64(1);
        let s = score(&state, &OPTIMAL, key, &mut rng);
        assert!(s >= 100.0);
    }

    #[test]
    fn optimal_score_is_deterministic_across_rng_seeds() {
        let key = CanonicalKey::new(0, 0, 0);
        let state = state_with(vec![Tile::new(0, 0, 0, TileType::Colour(1), Effect::None)]);
        let mut rng_a = SmallRng::seed_from_u64(1);
        let mut rng_b = SmallRng::seed_from_u64(999);
        assert_eq!(
            score(&state, &OPTIMAL, key, &mut rng_a),
            score(&state, &OPTIMAL, key, &mut rng_b)
        );
    }
}
