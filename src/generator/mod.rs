//! Procedural level generation: unlock gate, layout, tile-type assignment,
//! obstacle placement, goal/craft/stack insertion, and a bounded
//! difficulty-adjustment loop against the static analyzer.

mod assign;
mod goals;
mod layout;
mod obstacles;
pub mod params;
mod unlock;

use std::collections::HashMap;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::analyzer;
use crate::error::{CoreError, Result};
use crate::level::{LayerDescription, LevelDescription, TileEntry};
use crate::model::TileType;

pub use params::{GeneratorParams, Symmetry};
pub use unlock::{is_unlocked, UnlockEntry, UNLOCK_TABLE};

const MAX_DIFFICULTY_PASSES: u32 = 6;

/// Runs the full generation pipeline and returns a materialisable level.
pub fn generate(params: &GeneratorParams) -> Result<LevelDescription> {
    let allowed_obstacles = unlock::filter_allowed(&params.allowed_obstacles, params.level_number);
    info!(
        "generating level {} at difficulty {:.2} with obstacles {allowed_obstacles:?}",
        params.level_number, params.target_difficulty
    );
    let mut rng = SmallRng::seed_from_u64(params.rand_seed);

    let mut cells = layout::build_positions(
        params.grid_cols,
        params.grid_rows,
        params.symmetry,
        params.pattern_index,
    );
    if cells.is_empty() {
        return Err(CoreError::GeneratorExhausted(
            "layout produced an empty board".to_string(),
        ));
    }

    let mut cell_types = assign::assign_types(&cells, &params.allowed_tile_types, &mut rng)?;
    let mut placement = obstacles::place(&cells, &allowed_obstacles, params.gimmick_intensity, &mut rng);

    let stack_count = if allowed_obstacles.iter().any(|g| g == "stack") {
        (cells.len() as f64 * params.gimmick_intensity * 0.05).round() as usize
    } else {
        0
    };
    let craft_count = if allowed_obstacles.iter().any(|g| g == "craft") {
        (cells.len() as f64 * params.gimmick_intensity * 0.05).round() as usize
    } else {
        0
    };
    goals::pack_stacks(&mut cells, &mut cell_types, &mut placement, stack_count, &mut rng);
    goals::pack_crafts(&mut cells, &mut cell_types, &mut placement, craft_count, &mut rng);

    let goal_count = goals::derive_goal_count(&cell_types, &params.goals);

    let mut level = build_level(params, &cells, &cell_types, &placement, &goal_count);

    let target = params.target_difficulty.clamp(0.0, 1.0) * 100.0;
    for _ in 0..MAX_DIFFICULTY_PASSES {
        let current = analyzer::score(&level);
        if (current - target).abs() <= 5.0 {
            break;
        }
        if current < target {
            let added = (cells.len() as f64 * 0.05).round().max(1.0) as usize;
            let extra = obstacles::place(&cells, &allowed_obstacles, 1.0, &mut rng);
            for (k, v) in extra.into_iter().take(added) {
                placement.entry(k).or_insert(v);
            }
        } else {
            let drop: Vec<(i32, i32)> = placement.keys().copied().take(3).collect();
            for k in drop {
                placement.remove(&k);
            }
        }
        level = build_level(params, &cells, &cell_types, &placement, &goal_count);
    }

    debug!("generated level with {} tiles, analyzer score {:.1}", cells.len(), analyzer::score(&level));
    Ok(level)
}

fn build_level(
    params: &GeneratorParams,
    cells: &[(i32, i32)],
    cell_types: &HashMap<(i32, i32), u8>,
    placement: &obstacles::Placement,
    goal_count: &HashMap<String, u32>,
) -> LevelDescription {
    let mut tiles = Vec::with_capacity(cells.len());
    for &(x, y) in cells {
        let Some(&ty) = cell_types.get(&(x, y)) else {
            continue;
        };
        let (attribute, extra) = placement
            .get(&(x, y))
            .cloned()
            .unwrap_or_else(|| ("none".to_string(), None));
        tiles.push(TileEntry {
            x,
            y,
            tile_type: TileType::Colour(ty),
            attribute,
            extra,
        });
    }

    LevelDescription {
        layers: vec![LayerDescription {
            col: params.grid_cols,
            row: params.grid_rows,
            tiles,
        }],
        goal_count: goal_count.clone(),
        max_moves: params.max_moves,
        rand_seed: Some(params.rand_seed),
        unlock_tile: params.unlock_tile,
        time_attack_budget: if is_unlocked("time_attack", params.level_number) {
            Some(params.max_moves)
        } else {
            None
        },
    }
}
