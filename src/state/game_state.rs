//! The authoritative simulation state: board, dock, registries, caches, and
//! the terminal verdict.

use std::collections::HashMap;

use crate::geometry;
use crate::model::{CanonicalKey, Tile};

use super::cache::AccessibleCache;
use super::dock::Dock;
use super::registries::GimmickIndex;

/// Why a game stopped short of clearing, per failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    BombExploded,
    DockOverflow,
    MoveBudgetExhausted,
    ImpossibleLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Running,
    Cleared,
    Failed(FailureClass),
}

impl Terminal {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Terminal::Running)
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub tiles: HashMap<CanonicalKey, Tile>,
    pub layer_cols: HashMap<u32, u32>,
    pub dock: Dock,
    pub dock_capacity: u8,
    pub goals_remaining: HashMap<String, u32>,
    pub moves_used: u32,
    pub max_moves: u32,
    pub gimmicks: GimmickIndex,
    pub terminal: Terminal,
    pub cache: AccessibleCache,
    /// Advisory only; the rule engine never reads it (spec decision: the
    /// source treats time-attack as metadata, not a hard budget).
    pub time_attack_budget: Option<u32>,
}

impl GameState {
    pub fn is_terminal(&self) -> bool {
        self.terminal.is_terminal()
    }

    pub fn tile(&self, key: CanonicalKey) -> Option<&Tile> {
        self.tiles.get(&key)
    }

    pub fn tile_mut(&mut self, key: CanonicalKey) -> Option<&mut Tile> {
        self.tiles.get_mut(&key)
    }

    pub fn board_is_empty(&self) -> bool {
        self.tiles.values().all(|t| t.picked)
    }

    pub fn all_goals_met(&self) -> bool {
        self.goals_remaining.values().all(|&count| count == 0)
    }

    /// True iff an un-picked tile in a higher layer covers this key.
    pub fn is_blocked_by_upper(&self, key: CanonicalKey) -> bool {
        let tiles = &self.tiles;
        geometry::is_blocked_by_upper(key.layer, key.x, key.y, &self.layer_cols, |l, x, y| {
            tiles
                .get(&CanonicalKey::new(l, x, y))
                .is_some_and(|t| !t.picked)
        })
    }

    /// True iff the tile is present, un-picked, unblocked from above, and
    /// not currently occupied by a frog — independent of its own effect
    /// predicate (used for ice/bomb "exposed" bookkeeping, which must see
    /// tiles the effect predicate would otherwise still forbid picking).
    pub fn is_exposed(&self, key: CanonicalKey) -> bool {
        match self.tiles.get(&key) {
            Some(tile) if !tile.picked => {
                !self.is_blocked_by_upper(key) && !self.gimmicks.frog_positions.contains(&key)
            }
            _ => false,
        }
    }
}
