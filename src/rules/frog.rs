//! Frog motion: each turn, every frog hops to a random still-legal host or
//! stays put if none exists.

use rand::Rng;

use crate::model::CanonicalKey;
use crate::state::GameState;

/// Advances every frog by one bounded random hop, consuming the game's RNG
/// in frog-registry order so the trace is reproducible for a given seed.
pub fn step(state: &mut GameState, rng: &mut impl Rng) {
    let mut frogs: Vec<CanonicalKey> = state.gimmicks.frog_positions.iter().copied().collect();
    frogs.sort();
    for frog_key in frogs {
        let Some(target) = pick_host(state, frog_key, rng) else {
            continue;
        };
        if target != frog_key {
            state.gimmicks.frog_positions.remove(&frog_key);
            state.gimmicks.frog_positions.insert(target);
        }
    }
}

/// A frog may hop onto any un-picked board tile not already hosting another
/// frog — including one still covered by ice or grass, since hopping is
/// independent of pickability (only blocks it, it doesn't require it).
fn pick_host(state: &GameState, frog_key: CanonicalKey, rng: &mut impl Rng) -> Option<CanonicalKey> {
    let mut candidates: Vec<CanonicalKey> = state
        .tiles
        .values()
        .filter(|t| !t.picked)
        .map(|t| t.key())
        .filter(|k| *k == frog_key || !state.gimmicks.frog_positions.contains(k))
        .collect();
    candidates.sort();
    if candidates.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..candidates.len());
    Some(candidates[idx])
}
