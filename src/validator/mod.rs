//! The generate-and-measure retry loop: generate a level, batch-simulate
//! clear rates against a per-difficulty target table, keep the closest
//! match, and stop early once within tolerance.

use std::collections::HashMap;

use log::{info, warn};

use crate::bot::{self, Profile};
use crate::error::Result;
use crate::generator::{self, GeneratorParams};
use crate::level::LevelDescription;
use crate::runner::{self, ProfileStats};

/// Full validation request: generator inputs plus the retry budget.
#[derive(Debug, Clone)]
pub struct ValidationRequest {
    pub params: GeneratorParams,
    pub max_retries: u32,
    pub tolerance: f64,
    pub simulation_iterations: u32,
    pub use_core_bots_only: bool,
    pub use_best_match: bool,
    pub base_seed: u64,
}

#[derive(Debug, Clone)]
pub struct ValidationResponse {
    pub level: LevelDescription,
    pub measured: HashMap<String, f64>,
    pub target: HashMap<String, f64>,
    pub avg_gap: f64,
    pub max_gap: f64,
    pub match_score: f64,
    pub validation_passed: bool,
    pub attempts: u32,
}

/// Per-profile base clear rate at `d = 0`, decreasing roughly linearly with
/// difficulty down to a floor so the target never collapses to zero.
fn base_rate(profile_name: &str) -> f64 {
    match profile_name {
        "novice" => 0.95,
        "casual" => 0.90,
        "average" => 0.85,
        "expert" => 0.80,
        "optimal" => 1.00,
        _ => 0.5,
    }
}

/// Target clear rate for a profile at difficulty `d`: monotonically
/// non-increasing in `d`, floored so no profile's target goes to zero.
pub fn target_for(profile_name: &str, d: f64) -> f64 {
    let d = d.clamp(0.0, 1.0);
    (base_rate(profile_name) * (1.0 - 0.6 * d)).max(0.05)
}

pub fn targets(profiles: &[Profile], d: f64) -> HashMap<String, f64> {
    profiles
        .iter()
        .map(|p| (p.name.to_string(), target_for(p.name, d)))
        .collect()
}

/// Weighted mean of per-profile `|measured - target|`, weighted by each
/// profile's corpus weight.
pub fn weighted_gap(
    measured: &HashMap<String, ProfileStats>,
    target: &HashMap<String, f64>,
    profiles: &[Profile],
) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for profile in profiles {
        let Some(stats) = measured.get(profile.name) else {
            continue;
        };
        let Some(&goal) = target.get(profile.name) else {
            continue;
        };
        weighted_sum += profile.corpus_weight * (stats.clear_rate - goal).abs();
        weight_total += profile.corpus_weight;
    }
    if weight_total == 0.0 {
        0.0
    } else {
        weighted_sum / weight_total
    }
}

struct Attempt {
    level: LevelDescription,
    rates: HashMap<String, ProfileStats>,
    gap: f64,
}

pub fn validate(request: &ValidationRequest) -> Result<ValidationResponse> {
    let profiles: &[Profile] = if request.use_core_bots_only {
        &bot::CORE_SUBSET
    } else {
        &bot::ALL
    };
    let target = targets(profiles, request.params.target_difficulty);

    let mut best: Option<Attempt> = None;
    let mut attempts_used = 0;

    for attempt in 1..=request.max_retries.max(1) {
        attempts_used = attempt;
        let mut params = request.params.clone();
        params.rand_seed = request.params.rand_seed.wrapping_add(attempt as u64);
        let level = generator::generate(&params)?;

        let rates = runner::batch_simulate(
            &level,
            profiles,
            request.simulation_iterations,
            request.base_seed,
        )?
        .per_profile;
        let gap = weighted_gap(&rates, &target, profiles);
        info!("validation attempt {attempt}/{}: weighted gap {gap:.4}", request.max_retries);

        let replace = match &best {
            None => true,
            Some(b) => request.use_best_match && gap < b.gap,
        };
        if replace {
            best = Some(Attempt { level, rates, gap });
        }
        if gap <= request.tolerance {
            break;
        }
    }

    let best = best.expect("at least one attempt always runs");
    let validation_passed = best.gap <= request.tolerance;
    if !validation_passed {
        warn!("validation exhausted {attempts_used} attempts without reaching tolerance {}", request.tolerance);
    }
    let max_gap = profiles
        .iter()
        .filter_map(|p| {
            let measured = best.rates.get(p.name)?.clear_rate;
            let goal = target.get(p.name)?;
            Some((measured - goal).abs())
        })
        .fold(0.0_f64, f64::max);

    Ok(ValidationResponse {
        measured: best
            .rates
            .iter()
            .map(|(k, v)| (k.clone(), v.clear_rate))
            .collect(),
        target: target.clone(),
        avg_gap: best.gap,
        max_gap,
        match_score: (1.0 - best.gap).max(0.0),
        validation_passed,
        attempts: attempts_used,
        level: best.level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap as Map;

    fn params() -> GeneratorParams {
        GeneratorParams {
            target_difficulty: 0.2,
            grid_cols: 4,
            grid_rows: 4,
            max_layers: 1,
            allowed_tile_types: vec![1, 2, 3],
            allowed_obstacles: vec![],
            goals: Map::new(),
            symmetry: crate::generator::Symmetry::None,
            pattern_index: 0,
            gimmick_intensity: 0.0,
            level_number: 5,
            rand_seed: 7,
            max_moves: 30,
            unlock_tile: 0,
        }
    }

    #[test]
    fn targets_decrease_monotonically_with_difficulty() {
        let low = target_for("average", 0.0);
        let high = target_for("average", 1.0);
        assert!(high < low);
    }

    #[test]
    fn validate_always_returns_at_least_one_attempt() {
        let request = ValidationRequest {
            params: params(),
            max_retries: 2,
            tolerance: 0.01,
            simulation_iterations: 5,
            use_core_bots_only: true,
            use_best_match: true,
            base_seed: 1,
        };
        let response = validate(&request).unwrap();
        assert!(response.attempts >= 1);
        assert!(!response.measured.is_empty());
    }

    #[test]
    fn weighted_gap_is_zero_when_measured_matches_target_exactly() {
        let mut measured = Map::new();
        measured.insert(
            "casual".to_string(),
            ProfileStats {
                clear_rate: 0.8,
                avg_moves: 10.0,
                variance: 0.0,
            },
        );
        let mut target = Map::new();
        target.insert("casual".to_string(), 0.8);
        let gap = weighted_gap(&measured, &target, &[bot::CASUAL]);
        assert_eq!(gap, 0.0);
    }
}
