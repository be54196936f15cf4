//! The deterministic play trace: what a playback renderer consumes and
//! what tests assert on.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{CanonicalKey, TileType};
use crate::state::{FailureClass, Terminal};

/// A full snapshot of every gimmick registry, taken after a move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GimmickSnapshot {
    pub frog_positions: Vec<CanonicalKey>,
    pub bomb_states: HashMap<CanonicalKey, u8>,
    pub curtain_states: HashMap<CanonicalKey, bool>,
    pub ice_states: HashMap<CanonicalKey, u8>,
    pub grass_states: HashMap<CanonicalKey, u8>,
    pub chain_states: HashMap<CanonicalKey, bool>,
    pub link_states: HashMap<CanonicalKey, CanonicalKey>,
    pub teleport_participants: Vec<CanonicalKey>,
    pub teleport_click_count: u8,
    pub tile_type_overrides: HashMap<CanonicalKey, TileType>,
}

/// One applied move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveSnapshot {
    pub step: u32,
    pub pick: CanonicalKey,
    pub linked: Vec<CanonicalKey>,
    pub matched: Vec<[CanonicalKey; 3]>,
    pub goals_after: HashMap<String, u32>,
    pub dock_after: Vec<TileType>,
    pub gimmicks_after: GimmickSnapshot,
}

/// A terminal verdict, serialisable for the trace's final field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceVerdict {
    Cleared,
    BombExploded,
    DockOverflow,
    MoveBudgetExhausted,
    ImpossibleLevel,
    StillRunning,
}

impl From<Terminal> for TraceVerdict {
    fn from(t: Terminal) -> Self {
        match t {
            Terminal::Cleared => TraceVerdict::Cleared,
            Terminal::Failed(FailureClass::BombExploded) => TraceVerdict::BombExploded,
            Terminal::Failed(FailureClass::DockOverflow) => TraceVerdict::DockOverflow,
            Terminal::Failed(FailureClass::MoveBudgetExhausted) => TraceVerdict::MoveBudgetExhausted,
            Terminal::Failed(FailureClass::ImpossibleLevel) => TraceVerdict::ImpossibleLevel,
            Terminal::Running => TraceVerdict::StillRunning,
        }
    }
}

/// The complete record of one bot playing one level from one seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    pub seed: u64,
    pub profile_name: String,
    pub initial_tile_count: usize,
    pub moves: Vec<MoveSnapshot>,
    pub verdict: TraceVerdict,
}
