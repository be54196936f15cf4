//! Builds a [`GameState`] from a parsed level description: attribute
//! translation, `t0` placeholder resolution, and registry seeding.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::level::LevelDescription;
use crate::model::{CanonicalKey, CardinalDirection, CraftDirection, Effect, Tile, TileType};

use super::cache::AccessibleCache;
use super::dock::Dock;
use super::game_state::{FailureClass, GameState, Terminal};
use super::registries::GimmickIndex;

/// Builds the authoritative state from a level description, resolving `t0`
/// placeholders under the level's own seed (independent of any play RNG).
pub fn materialise(level: &LevelDescription) -> Result<GameState> {
    let mut rng = SmallRng::seed_from_u64(level.rand_seed.unwrap_or(0));

    let mut tiles: HashMap<CanonicalKey, Tile> = HashMap::new();
    let mut layer_cols: HashMap<u32, u32> = HashMap::new();
    let mut link_waiting: Vec<(CanonicalKey, CardinalDirection)> = Vec::new();
    let mut gimmicks = GimmickIndex::new();

    for (layer_idx, layer) in level.layers.iter().enumerate() {
        let layer_idx = layer_idx as u32;
        layer_cols.insert(layer_idx, layer.col);
        for entry in &layer.tiles {
            let effect = attribute_to_effect(&entry.attribute, entry.extra.as_deref())?;
            if let Effect::Link { direction, .. } = effect {
                link_waiting.push((CanonicalKey::new(layer_idx, entry.x, entry.y), direction));
            }
            let tile = Tile::new(layer_idx, entry.x, entry.y, entry.tile_type, effect);
            tiles.insert(tile.key(), tile);
        }
    }

    let resolvable = resolve_placeholders(&mut tiles, &level.goal_count, &mut rng)?;

    for (key, direction) in &link_waiting {
        let (dx, dy) = cardinal_vector(*direction);
        let partner = CanonicalKey::new(key.layer, key.x + dx, key.y + dy);
        if let Some(tile) = tiles.get_mut(key) {
            if let Effect::Link { partner: p, .. } = &mut tile.effect {
                *p = partner;
            }
        }
    }

    for (key, tile) in &tiles {
        match tile.effect {
            Effect::Ice { .. } => {
                gimmicks.ice.insert(*key);
            }
            Effect::Grass { .. } => {
                gimmicks.grass.insert(*key);
            }
            Effect::Chain { .. } => {
                gimmicks.chain.insert(*key);
            }
            Effect::Bomb { .. } => {
                gimmicks.bomb.insert(*key);
            }
            Effect::Curtain { .. } => {
                gimmicks.curtain.insert(*key);
            }
            Effect::Link { .. } => {
                gimmicks.link.insert(*key);
            }
            Effect::Frog => {
                gimmicks.frog_positions.insert(*key);
            }
            Effect::Teleport => {
                gimmicks.teleport_participants.push(*key);
            }
            _ => {}
        }
    }
    gimmicks.teleport_participants.sort();

    let dock_capacity = 7u8.saturating_sub(level.unlock_tile);

    let mut state = GameState {
        tiles,
        layer_cols,
        dock: Dock::new(),
        dock_capacity,
        goals_remaining: level.goal_count.clone(),
        moves_used: 0,
        max_moves: level.max_moves,
        gimmicks,
        terminal: if resolvable {
            Terminal::Running
        } else {
            Terminal::Failed(FailureClass::ImpossibleLevel)
        },
        cache: AccessibleCache::new(),
        time_attack_budget: level.time_attack_budget,
    };
    crate::rules::refresh_derived_state(&mut state);
    Ok(state)
}

fn cardinal_vector(dir: CardinalDirection) -> (i32, i32) {
    match dir {
        CardinalDirection::East => (1, 0),
        CardinalDirection::West => (-1, 0),
        CardinalDirection::North => (0, -1),
        CardinalDirection::South => (0, 1),
    }
}

fn attribute_to_effect(attribute: &str, extra: Option<&[Value]>) -> Result<Effect> {
    let effect = match attribute {
        "none" => Effect::None,
        "ice" => Effect::Ice { remaining: 3 },
        "ice_1" => Effect::Ice { remaining: 1 },
        "ice_2" => Effect::Ice { remaining: 2 },
        "ice_3" => Effect::Ice { remaining: 3 },
        "chain" => Effect::Chain { unlocked: false },
        "grass" => Effect::Grass { remaining: 1 },
        "grass_1" => Effect::Grass { remaining: 1 },
        "grass_2" => Effect::Grass { remaining: 2 },
        "link_e" => link_placeholder(CardinalDirection::East),
        "link_w" => link_placeholder(CardinalDirection::West),
        "link_n" => link_placeholder(CardinalDirection::North),
        "link_s" => link_placeholder(CardinalDirection::South),
        "frog" => Effect::Frog,
        "bomb" => Effect::Bomb {
            remaining: bomb_remaining(extra),
        },
        "curtain" => Effect::Curtain { is_open: false },
        "curtain_open" => Effect::Curtain { is_open: true },
        "curtain_close" => Effect::Curtain { is_open: false },
        "teleport" => Effect::Teleport,
        "key" => Effect::Key,
        "craft" => craft_effect(CraftDirection::East, extra)?,
        "craft_n" => craft_effect(CraftDirection::North, extra)?,
        "craft_s" => craft_effect(CraftDirection::South, extra)?,
        "craft_e" => craft_effect(CraftDirection::East, extra)?,
        "craft_w" => craft_effect(CraftDirection::West, extra)?,
        "craft_ne" => craft_effect(CraftDirection::NorthEast, extra)?,
        "craft_nw" => craft_effect(CraftDirection::NorthWest, extra)?,
        "craft_se" => craft_effect(CraftDirection::SouthEast, extra)?,
        "craft_sw" => craft_effect(CraftDirection::SouthWest, extra)?,
        "stack_n" => stack_effect(CardinalDirection::North, extra)?,
        "stack_s" => stack_effect(CardinalDirection::South, extra)?,
        "stack_e" => stack_effect(CardinalDirection::East, extra)?,
        "stack_w" => stack_effect(CardinalDirection::West, extra)?,
        "unknown" => Effect::Unknown,
        other => {
            return Err(CoreError::InvalidLevel(format!(
                "unknown gimmick attribute {other}"
            )))
        }
    };
    Ok(effect)
}

fn link_placeholder(direction: CardinalDirection) -> Effect {
    Effect::Link {
        direction,
        can_pick: false,
        partner: CanonicalKey::new(0, 0, 0),
    }
}

fn bomb_remaining(extra: Option<&[Value]>) -> u8 {
    extra
        .and_then(|e| e.first())
        .and_then(Value::as_u64)
        .map(|n| n as u8)
        .unwrap_or(3)
}

fn inner_sequence(extra: Option<&[Value]>) -> Result<Vec<TileType>> {
    let raw = extra
        .and_then(|e| e.get(1))
        .and_then(Value::as_str)
        .ok_or_else(|| CoreError::InvalidLevel("missing inner tile sequence".to_string()))?;
    raw.split('_')
        .map(|token| {
            TileType::parse(token)
                .ok_or_else(|| CoreError::InvalidLevel(format!("bad inner tile token {token}")))
        })
        .collect()
}

fn craft_effect(direction: CraftDirection, extra: Option<&[Value]>) -> Result<Effect> {
    Ok(Effect::Craft {
        direction,
        inner: inner_sequence(extra)?,
        goal_token: None,
    })
}

fn stack_effect(direction: CardinalDirection, extra: Option<&[Value]>) -> Result<Effect> {
    Ok(Effect::Stack {
        direction,
        inner: inner_sequence(extra)?,
    })
}

/// Resolves every `t0` placeholder — board tiles plus stack/craft inner
/// sequences — from a single shuffled pool so that the final count of each
/// concrete type is a multiple of three. Returns `false` (level is
/// impossible) rather than erroring when no resolution makes every count
/// divisible by three, including when there are no placeholders to resolve
/// at all.
fn resolve_placeholders(
    tiles: &mut HashMap<CanonicalKey, Tile>,
    goal_count: &HashMap<String, u32>,
    rng: &mut SmallRng,
) -> Result<bool> {
    let mut candidate_types: Vec<TileType> = goal_count
        .keys()
        .filter_map(|token| TileType::parse(token))
        .filter(|t| !t.is_placeholder())
        .collect();
    if candidate_types.is_empty() {
        candidate_types = tiles
            .values()
            .map(|t| t.tile_type)
            .chain(inner_types(tiles))
            .filter(|t| !t.is_placeholder())
            .collect();
    }
    candidate_types.sort_by_key(type_ordinal);
    candidate_types.dedup();
    if candidate_types.is_empty() {
        candidate_types.push(TileType::Colour(1));
    }

    let mut existing_counts: HashMap<TileType, u32> = HashMap::new();
    for ty in tiles.values().map(|t| t.tile_type).chain(inner_types(tiles)) {
        if !ty.is_placeholder() {
            *existing_counts.entry(ty).or_insert(0) += 1;
        }
    }

    let board_slots: Vec<CanonicalKey> = {
        let mut keys: Vec<CanonicalKey> = tiles
            .iter()
            .filter(|(_, t)| t.tile_type.is_placeholder())
            .map(|(k, _)| *k)
            .collect();
        keys.sort();
        keys
    };

    let inner_slot_count: usize = tiles
        .values()
        .map(|t| match &t.effect {
            Effect::Craft { inner, .. } | Effect::Stack { inner, .. } => {
                inner.iter().filter(|t| t.is_placeholder()).count()
            }
            _ => 0,
        })
        .sum();

    let total_slots = board_slots.len() + inner_slot_count;
    if total_slots == 0 {
        return Ok(existing_counts.values().all(|&c| c % 3 == 0));
    }

    let Some(bag) = build_type_bag(total_slots, &candidate_types, &existing_counts) else {
        return Ok(false);
    };
    let mut bag = bag;
    bag.shuffle(rng);

    let mut bag_iter = bag.into_iter();
    for key in &board_slots {
        if let Some(assigned) = bag_iter.next() {
            tiles.get_mut(key).unwrap().tile_type = assigned;
        }
    }
    for tile in tiles.values_mut() {
        match &mut tile.effect {
            Effect::Craft { inner, .. } | Effect::Stack { inner, .. } => {
                for slot in inner.iter_mut() {
                    if slot.is_placeholder() {
                        if let Some(assigned) = bag_iter.next() {
                            *slot = assigned;
                        }
                    }
                }
            }
            _ => {}
        }
    }
    Ok(true)
}

fn inner_types(tiles: &HashMap<CanonicalKey, Tile>) -> Vec<TileType> {
    tiles
        .values()
        .flat_map(|t| match &t.effect {
            Effect::Craft { inner, .. } | Effect::Stack { inner, .. } => inner.clone(),
            _ => Vec::new(),
        })
        .collect()
}

fn type_ordinal(t: &TileType) -> u8 {
    match t {
        TileType::Placeholder => 0,
        TileType::Colour(n) => *n,
    }
}

/// Builds a pool of `total` concrete tile types: first top each candidate
/// type up to its next multiple of three, then distribute the remainder in
/// whole groups of three, round-robin. Returns `None` if the remainder can't
/// be divided evenly — the level's placeholder count can never be resolved
/// into valid three-of-a-kind groups.
fn build_type_bag(
    total: usize,
    candidate_types: &[TileType],
    existing_counts: &HashMap<TileType, u32>,
) -> Option<Vec<TileType>> {
    let mut bag = Vec::with_capacity(total);
    let mut remaining = total;
    let mut running = existing_counts.clone();

    for &ty in candidate_types {
        if remaining == 0 {
            break;
        }
        let count = running.entry(ty).or_insert(0);
        let deficit = ((3 - (*count % 3)) % 3) as usize;
        let take = deficit.min(remaining);
        for _ in 0..take {
            bag.push(ty);
        }
        *count += take as u32;
        remaining -= take;
    }

    if remaining % 3 != 0 {
        return None;
    }

    let mut i = 0;
    while remaining > 0 {
        let ty = candidate_types[i % candidate_types.len()];
        for _ in 0..3 {
            bag.push(ty);
        }
        remaining -= 3;
        i += 1;
    }

    Some(bag)
}
