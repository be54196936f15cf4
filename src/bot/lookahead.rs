//! Depth-bounded pure minimax-against-self, with candidate pruning and a
//! transposition memo keyed by the Zobrist-style position hash.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::model::CanonicalKey;
use crate::rules;
use crate::state::GameState;

use super::profile::Profile;
use super::scoring;
use super::zobrist;

/// Cleared on every real move application; never carries entries across
/// moves, only within one decision's lookahead.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, f64>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// How many top-scoring candidates survive pruning before descent, scaled
/// by dock pressure (more full dock ⇒ narrower search).
fn candidate_width(state: &GameState) -> usize {
    match state.dock.len() {
        0..=2 => 7,
        3..=4 => 5,
        _ => 3,
    }
}

/// Depth is adaptive to remaining tiles: more tiles on the board means a
/// shallower search, since the branching factor dominates cost.
fn effective_depth(state: &GameState, requested: u8) -> u8 {
    let remaining = state.tiles.values().filter(|t| !t.picked).count();
    if remaining > 40 {
        requested.min(2)
    } else if remaining > 20 {
        requested.min(4)
    } else {
        requested
    }
}

/// Returns the best score reachable from `state` within `depth` plies,
/// always picking the candidate's own best greedy response at each ply.
pub fn best_reachable_score(
    state: &GameState,
    profile: &Profile,
    depth: u8,
    memo: &mut TranspositionTable,
) -> f64 {
    if depth == 0 || state.is_terminal() {
        return leaf_value(state);
    }

    let hash = zobrist::hash(state);
    if let Some(&cached) = memo.entries.get(&hash) {
        return cached;
    }

    let legal = rules::legal_moves(state);
    if legal.is_empty() {
        let value = leaf_value(state);
        memo.entries.insert(hash, value);
        return value;
    }

    let mut scored: Vec<(CanonicalKey, f64)> = legal
        .iter()
        .map(|&key| {
            let mut seed_rng = SmallRng::seed_from_u64(zobrist::hash(state) ^ key_seed(key));
            (key, scoring::score(state, profile, key, &mut seed_rng))
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(candidate_width(state));

    let mut best = f64::NEG_INFINITY;
    for (key, immediate) in scored {
        let mut clone = state.clone();
        let mut rng = SmallRng::seed_from_u64(zobrist::hash(state) ^ key_seed(key) ^ depth as u64);
        if rules::apply(&mut clone, &mut rng, key).is_err() {
            continue;
        }
        let backed_up = immediate + best_reachable_score(&clone, profile, depth - 1, memo);
        if backed_up > best {
            best = backed_up;
        }
    }

    if best == f64::NEG_INFINITY {
        best = leaf_value(state);
    }
    memo.entries.insert(hash, best);
    best
}

fn key_seed(key: CanonicalKey) -> u64 {
    ((key.layer as u64) << 40) ^ ((key.x as i64 as u64) << 20) ^ (key.y as i64 as u64)
}

fn leaf_value(state: &GameState) -> f64 {
    match state.terminal {
        crate::state::Terminal::Cleared => 1000.0,
        crate::state::Terminal::Failed(_) => -1000.0,
        crate::state::Terminal::Running => 0.0,
    }
}
