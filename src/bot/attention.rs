//! The attention filter: cognitive-limit gate that hides a fraction of
//! legal moves from lower-`pattern_recognition` profiles before scoring.

use rand::Rng;

use crate::model::CanonicalKey;
use crate::state::GameState;

use super::profile::Profile;

/// Filters `moves` down to what this profile would actually notice. Always
/// leaves at least one survivor. Skipped entirely (returns `moves`
/// unchanged, no RNG draws) once `pattern_recognition >= 0.99` so Optimal
/// stays bit-deterministic.
pub fn filter(
    state: &GameState,
    moves: &[CanonicalKey],
    profile: &Profile,
    rng: &mut impl Rng,
) -> Vec<CanonicalKey> {
    if profile.pattern_recognition >= 0.99 || moves.is_empty() {
        return moves.to_vec();
    }

    let max_layer = state.layer_cols.keys().copied().max().unwrap_or(0).max(1) as f64;

    let visibilities: Vec<(CanonicalKey, f64)> = moves
        .iter()
        .map(|&key| (key, visibility(state, profile, key, max_layer)))
        .collect();

    let mut survivors: Vec<CanonicalKey> = visibilities
        .iter()
        .filter(|(_, vis)| rng.random::<f64>() < *vis)
        .map(|(key, _)| *key)
        .collect();

    if survivors.is_empty() {
        let best = visibilities
            .iter()
            .cloned()
            .reduce(|a, b| if b.1 > a.1 { b } else { a })
            .expect("moves is non-empty");
        survivors.push(best.0);
    }
    survivors
}

fn visibility(state: &GameState, profile: &Profile, key: CanonicalKey, max_layer: f64) -> f64 {
    if completes_a_match(state, key) {
        return 1.0;
    }
    let proximity = key.layer as f64 / max_layer;
    let matches_dock_resident = state
        .tile(key)
        .is_some_and(|t| state.dock.count_of(t.tile_type) > 0);
    let mut vis = 0.3
        + 0.4 * profile.pattern_recognition
        + 0.2 * proximity
        + 0.3 * (matches_dock_resident as u8 as f64);
    vis = vis.clamp(0.0, 1.0);
    vis
}

fn completes_a_match(state: &GameState, key: CanonicalKey) -> bool {
    state
        .tile(key)
        .is_some_and(|t| state.dock.count_of(t.tile_type) == 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::profile::{NOVICE, OPTIMAL};
    use crate::model::{Effect, Tile, TileType};
    use crate::state::{AccessibleCache, Dock, GimmickIndex, Terminal};
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
    fn optimal_skips_the_filter_entirely() {
        let state = state_with(vec![Tile::new(0, 0, 0, TileType::Colour(1), Effect::None)]);
        let moves = vec![CanonicalKey::new(0, 0, 0)];
        let mut rng = SmallRng::seed_from_u64(1);
        let out = filter(&state, &moves, &OPTIMAL, &mut rng);
        assert_eq!(out, moves);
    }

    #[test]
    fn never_returns_an_empty_survivor_list() {
        let state = state_with(vec![Tile::new(0, 0, 0, TileType::Colour(1), Effect::None)]);
        let moves = vec![CanonicalKey::new(0, 0, 0)];
        let mut rng = SmallRng::seed_from_u64(2);
        let out = filter(&state, &moves, &NOVICE, &mut rng);
        assert!(!out.is_empty());
    }
}
