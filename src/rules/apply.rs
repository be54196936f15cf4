//! Single-step move application: the full turn pipeline from a legal pick
//! through matching and terminal re-evaluation.

use std::collections::HashSet;

use log::{debug, trace};
use rand::Rng;

use crate::error::MoveRefusal;
use crate::model::{CanonicalKey, Effect, TileType};
use crate::state::{DockSlot, FailureClass, GameState, Terminal};

use super::{adjacency, frog, legality, teleport, terminal};

/// Everything a caller (runner, bot lookahead, tests) might want to know
/// about one applied move.
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    pub picked: Vec<CanonicalKey>,
    pub matched: Vec<[CanonicalKey; 3]>,
    pub terminal: Terminal,
}

/// Applies one pick, running the full turn pipeline. `key` names the tile
/// the player targets; if it is a linked tile, its partner is picked in the
/// same step automatically.
pub fn apply(state: &mut GameState, rng: &mut impl Rng, key: CanonicalKey) -> Result<MoveOutcome, MoveRefusal> {
    if state.is_terminal() {
        return Err(MoveRefusal::GameAlreadyTerminal);
    }
    legality::check(state, key)?;

    let mut targets = vec![key];
    if let Some(tile) = state.tile(key) {
        if let Effect::Link { partner, .. } = tile.effect {
            targets.push(partner);
        }
    }

    let ice_snapshot: HashSet<CanonicalKey> = state
        .gimmicks
        .ice
        .iter()
        .copied()
        .filter(|&k| state.is_exposed(k))
        .collect();

    let mut bomb_exploded = false;
    for target in &targets {
        remove_one(state, *target);
        run_craft_emission(state, *target);
    }

    adjacency::thaw_snapshotted_ice(state, &ice_snapshot);
    for target in &targets {
        adjacency::decay_neighbouring_grass(state, *target);
        adjacency::unlock_neighbouring_chains(state, *target);
    }

    let exposed_bombs: Vec<CanonicalKey> = state
        .gimmicks
        .bomb
        .iter()
        .copied()
        .filter(|&k| state.is_exposed(k))
        .collect();
    for bomb_key in exposed_bombs {
        if let Some(tile) = state.tile_mut(bomb_key) {
            if let Effect::Bomb { remaining } = &mut tile.effect {
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    bomb_exploded = true;
                }
            }
        }
    }

    frog::step(state, rng);
    teleport::tick(state, rng);

    let cleared = state.dock.clear_all_matches();
    let mut matched = Vec::with_capacity(cleared.len());
    for triple in &cleared {
        for slot in triple {
            let token = slot
                .origin_goal
                .clone()
                .unwrap_or_else(|| token_for(slot.tile_type));
            if let Some(count) = state.goals_remaining.get_mut(&token) {
                *count = count.saturating_sub(1);
            }
        }
        matched.push([triple[0].key, triple[1].key, triple[2].key]);
    }

    state.moves_used += 1;
    refresh_derived_state(state);

    state.terminal = if bomb_exploded {
        Terminal::Failed(FailureClass::BombExploded)
    } else {
        terminal::evaluate(state)
    };

    trace!("move {} applied: picked={targets:?} matched={} groups", state.moves_used, matched.len());
    if !matches!(state.terminal, Terminal::Running) {
        debug!("game reached terminal state {:?} after {} moves", state.terminal, state.moves_used);
    }

    Ok(MoveOutcome {
        picked: targets,
        matched,
        terminal: state.terminal,
    })
}

fn token_for(tile_type: TileType) -> String {
    match tile_type {
        TileType::Colour(n) => format!("t{n}"),
        TileType::Placeholder => "t0".to_string(),
    }
}

/// Removes one tile from the board and inserts its dock slot. A stack tile
/// with a non-empty inner sequence pops its top instead of vanishing.
fn remove_one(state: &mut GameState, key: CanonicalKey) {
    let Some(tile) = state.tile(key) else { return };
    let origin_goal = state.gimmicks.craft_origin_goal.get(&key).cloned();

    if let Effect::Stack { inner, .. } = &tile.effect {
        if !inner.is_empty() {
            let popped_type = tile.tile_type;
            let mut inner = inner.clone();
            let next_type = inner.remove(0);
            state.dock.insert(DockSlot {
                key,
                tile_type: popped_type,
                origin_goal,
            });
            if let Some(tile) = state.tile_mut(key) {
                tile.tile_type = next_type;
                if let Effect::Stack { inner: stored, .. } = &mut tile.effect {
                    *stored = inner;
                }
            }
            return;
        }
    }

    let was_key_gimmick = matches!(tile.effect, Effect::Key);
    let tile_type = tile.tile_type;
    if let Some(tile) = state.tile_mut(key) {
        tile.picked = true;
    }
    state.dock.insert(DockSlot {
        key,
        tile_type,
        origin_goal,
    });
    state.gimmicks.craft_origin_goal.remove(&key);
    state.gimmicks.ice.remove(&key);
    state.gimmicks.grass.remove(&key);
    state.gimmicks.chain.remove(&key);
    state.gimmicks.bomb.remove(&key);
    state.gimmicks.curtain.remove(&key);
    state.gimmicks.link.remove(&key);

    if was_key_gimmick && state.gimmicks.record_key_pick() {
        state.dock_capacity = (state.dock_capacity + 1).min(7);
    }
}

/// Emits the next tile from any craft whose designated emit cell just
/// became free.
fn run_craft_emission(state: &mut GameState, vacated: CanonicalKey) {
    let craft_keys: Vec<CanonicalKey> = state
        .tiles
        .iter()
        .filter(|(_, t)| matches!(t.effect, Effect::Craft { .. }))
        .map(|(k, _)| *k)
        .collect();

    for craft_key in craft_keys {
        let Some(tile) = state.tile(craft_key) else { continue };
        let Effect::Craft { direction, inner, goal_token } = &tile.effect else { continue };
        let (dx, dy) = direction.vector();
        let emit_key = CanonicalKey::new(craft_key.layer, craft_key.x + dx, craft_key.y + dy);
        if emit_key != vacated {
            continue;
        }
        let mut inner = inner.clone();
        let goal_token = goal_token.clone();
        if inner.is_empty() {
            continue;
        }
        let next_type = inner.remove(0);

        if let Some(tile) = state.tile_mut(craft_key) {
            if inner.is_empty() {
                tile.picked = true;
            } else if let Effect::Craft { inner: stored, .. } = &mut tile.effect {
                *stored = inner;
            }
        }

        let new_tile = crate::model::Tile::new(
            emit_key.layer,
            emit_key.x,
            emit_key.y,
            next_type,
            Effect::None,
        );
        state.tiles.insert(emit_key, new_tile);
        if let Some(token) = goal_token {
            state.gimmicks.craft_origin_goal.insert(emit_key, token);
        }
    }
}

/// Recomputes every piece of state derived from current board occupancy:
/// link-pickability, curtain-openness, and the accessible-tile cache. Used
/// both after a move and once at construction time, since a level can start
/// with tiles already unblocked or already exposed.
pub(crate) fn refresh_derived_state(state: &mut GameState) {
    recompute_link_flags(state);
    recompute_curtain_flags(state);
    rebuild_accessible_cache(state);
}

/// Rebuilds the accessible-tile cache from the current legal-move set. Must
/// run after link/curtain flags are recomputed, since both feed legality.
fn rebuild_accessible_cache(state: &mut GameState) {
    let accessible: Vec<(CanonicalKey, TileType)> = legality::legal_moves(state)
        .into_iter()
        .filter_map(|key| state.tile(key).map(|t| (key, t.tile_type)))
        .collect();
    state.cache.rebuild(accessible);
}

fn recompute_link_flags(state: &mut GameState) {
    let link_keys: Vec<CanonicalKey> = state.gimmicks.link.iter().copied().collect();
    for key in link_keys {
        let Some(partner) = (match state.tile(key).map(|t| t.effect.clone()) {
            Some(Effect::Link { partner, .. }) => Some(partner),
            _ => None,
        }) else {
            continue;
        };
        let self_open = !state.is_blocked_by_upper(key) && !state.tile(key).is_some_and(|t| t.picked);
        let partner_open = state
            .tile(partner)
            .is_some_and(|t| !t.picked)
            && !state.is_blocked_by_upper(partner);
        let can_pick = self_open && partner_open;
        if let Some(tile) = state.tile_mut(key) {
            if let Effect::Link { can_pick: stored, .. } = &mut tile.effect {
                *stored = can_pick;
            }
        }
    }
}

/// Opens any curtain tile no longer covered by an un-picked tile in a
/// higher layer. Curtains never re-close once opened.
fn recompute_curtain_flags(state: &mut GameState) {
    let curtain_keys: Vec<CanonicalKey> = state.gimmicks.curtain.iter().copied().collect();
    for key in curtain_keys {
        if state.is_blocked_by_upper(key) {
            continue;
        }
        if let Some(tile) = state.tile_mut(key) {
            if let Effect::Curtain { is_open } = &mut tile.effect {
                *is_open = true;
            }
        }
    }
}
