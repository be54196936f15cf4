//! The per-turn decision pipeline: mistake gate, attention filter, scoring,
//! forced matches, lookahead promotion, and the patience gate.

use rand::Rng;

use crate::model::CanonicalKey;
use crate::rules;
use crate::state::GameState;

use super::attention;
use super::lookahead::{self, TranspositionTable};
use super::profile::Profile;
use super::scoring;

/// Picks this profile's move for the current turn, or `None` if there is
/// no legal move at all.
pub fn decide(state: &GameState, profile: &Profile, rng: &mut impl Rng) -> Option<CanonicalKey> {
    let legal = rules::legal_moves(state);
    if legal.is_empty() {
        return None;
    }

    if !profile.is_optimal() && rng.random::<f64>() < profile.mistake_rate {
        let idx = rng.random_range(0..legal.len());
        return Some(legal[idx]);
    }

    let visible = if profile.is_optimal() {
        legal
    } else {
        attention::filter(state, &legal, profile, rng)
    };

    let mut scored: Vec<(CanonicalKey, f64)> = visible
        .iter()
        .map(|&key| (key, scoring::score(state, profile, key, rng)))
        .collect();
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let will_match_leader = scored.iter().find(|(key, _)| completes_a_match(state, *key));
    if let Some(&(key, _)) = will_match_leader {
        return Some(key);
    }

    let ranked = if profile.lookahead_depth > 0 {
        promote_with_lookahead(state, profile, scored)
    } else {
        scored
    };

    Some(apply_patience_gate(ranked, profile, rng))
}

fn completes_a_match(state: &GameState, key: CanonicalKey) -> bool {
    state
        .tile(key)
        .is_some_and(|t| state.dock.count_of(t.tile_type) == 2)
}

/// Re-scores each candidate by adding its best reachable lookahead value,
/// then re-sorts by the combined score.
fn promote_with_lookahead(
    state: &GameState,
    profile: &Profile,
    mut scored: Vec<(CanonicalKey, f64)>,
) -> Vec<(CanonicalKey, f64)> {
    let mut memo = TranspositionTable::new();
    let depth = profile.lookahead_depth.saturating_sub(1);
    for (key, score) in scored.iter_mut() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(super::zobrist::hash(state) ^ key_bits(*key));
        let mut clone = state.clone();
        if rules::apply(&mut clone, &mut rng, *key).is_ok() {
            *score += lookahead::best_reachable_score(&clone, profile, depth, &mut memo);
        }
    }
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scored
}

fn key_bits(key: CanonicalKey) -> u64 {
    ((key.layer as u64) << 40) ^ ((key.x as i64 as u64) << 20) ^ (key.y as i64 as u64)
}

/// If `patience < 0.5`, with probability `1 - patience` picks uniformly
/// from the top `ceil(|moves| * patience)` moves instead of the argmax.
/// Optimal (`patience == 1.0`) always takes the argmax and never touches
/// the RNG here.
fn apply_patience_gate(
    ranked: Vec<(CanonicalKey, f64)>,
    profile: &Profile,
    rng: &mut impl Rng,
) -> CanonicalKey {
    if profile.patience >= 0.5 || ranked.len() <= 1 {
        return ranked[0].0;
    }
    if rng.random::<f64>() >= 1.0 - profile.patience {
        return ranked[0].0;
    }
    let width = ((ranked.len() as f64) * profile.patience).ceil().max(1.0) as usize;
    let idx = rng.random_range(0..width.min(ranked.len()));
    ranked[idx].0
}

use rand::SeedableRng;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::profile::{NOVICE, OPTIMAL};
    use crate::level::LevelDescription;
    use crate::state::materialise;
    use rand::rngs::SmallRng;

    fn three_by_three() -> &'static str {
        r#"{
            "layer": 1,
            "layer_0": {
                "col": 3,
                "row": 3,
                "tiles": {
                    "1_1": ["t1", "none"],
                    "1_2": ["t2", "none"],
                    "1_3": ["t3", "none"],
                    "2_1": ["t1", "none"],
                    "2_2": ["t2", "none"],
                    "2_3": ["t3", "none"],
                    "3_1": ["t1", "none"],
                    "3_2": ["t2", "none"],
                    "3_3": ["t3", "none"]
                }
            },
            "goalCount": {"t1": 3, "t2": 3, "t3": 3},
            "max_moves": 20
        }"#
    }

    #[test]
    fn optimal_clears_the_simple_board_within_nine_moves() {
        let level = LevelDescription::from_json(three_by_three()).unwrap();
        let mut state = materialise(&level).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut moves = 0;
        while !state.is_terminal() && moves < 20 {
            let Some(mv) = decide(&state, &OPTIMAL, &mut rng) else {
                break;
            };
            rules::apply(&mut state, &mut rng, mv).unwrap();
            moves += 1;
        }
        assert_eq!(state.terminal, crate::state::Terminal::Cleared);
        assert_eq!(moves, 9);
    }

    #[test]
    fn novice_eventually_terminates_without_panicking() {
        let level = LevelDescription::from_json(three_by_three()).unwrap();
        let mut state = materialise(&level).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut moves = 0;
        while !state.is_terminal() && moves < 20 {
            let Some(mv) = decide(&state, &NOVICE, &mut rng) else {
                break;
            };
            rules::apply(&mut state, &mut rng, mv).unwrap();
            moves += 1;
        }
        assert!(state.is_terminal() || moves == 20);
    }
}
