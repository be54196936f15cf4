//! The closed set of gimmick effect kinds as a tagged sum.
//!
//! Dispatch on `Effect` is always a `match` — there is no trait object and
//! no subtype polymorphism, so the compiler can
//! inline every call site.

use serde::{Deserialize, Serialize};

use super::key::CanonicalKey;
use super::tile::TileType;

/// The four cardinal directions used by links and stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardinalDirection {
    East,
    West,
    North,
    South,
}

/// The eight directions a craft container may emit into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CraftDirection {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl CraftDirection {
    /// The `(dx, dy)` vector a craft emits into, relative to its own cell.
    pub fn vector(self) -> (i32, i32) {
        match self {
            CraftDirection::North => (0, -1),
            CraftDirection::South => (0, 1),
            CraftDirection::East => (1, 0),
            CraftDirection::West => (-1, 0),
            CraftDirection::NorthEast => (1, -1),
            CraftDirection::NorthWest => (-1, -1),
            CraftDirection::SouthEast => (1, 1),
            CraftDirection::SouthWest => (-1, 1),
        }
    }
}

/// The per-tile state machine for each gimmick kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// No gimmick.
    None,
    /// Decrements by one each time this tile is exposed and a pick happens
    /// elsewhere that turn; pickable once `remaining == 0`.
    Ice { remaining: u8 },
    /// Unlocked by a horizontally-adjacent pick; pickable once unlocked.
    Chain { unlocked: bool },
    /// Decrements on an orthogonal-neighbour pick while unblocked; pickable
    /// once `remaining == 0`.
    Grass { remaining: u8 },
    /// Paired with a partner tile in the given direction; both must be
    /// independently unblocked for either to become pickable.
    Link {
        direction: CardinalDirection,
        can_pick: bool,
        partner: CanonicalKey,
    },
    /// Blocks picking of whatever tile currently shares its canonical key
    /// in `frog_positions`; hops under rule-engine control.
    Frog,
    /// Explodes the level (`Failed`) if it reaches zero before being
    /// picked; decrements once per turn while exposed.
    Bomb { remaining: u8 },
    /// Pickable only while open; opened by clearing whatever covers it.
    Curtain { is_open: bool },
    /// Participates in the level-wide teleport shuffle; carries no private
    /// state beyond its membership in the registry.
    Teleport,
    /// Emits its inner sequence one tile at a time into the cell offset by
    /// `direction`; removed once the sequence is exhausted.
    Craft {
        direction: CraftDirection,
        inner: Vec<TileType>,
        goal_token: Option<String>,
    },
    /// Exposes only the top of `inner`; popping reveals the next tile.
    Stack {
        direction: CardinalDirection,
        inner: Vec<TileType>,
    },
    /// Bears the key token: counted toward the dock-capacity unlock but
    /// otherwise behaves like [`Effect::None`].
    Key,
    /// A gimmick id the level references but this engine does not yet
    /// special-case; behaves like [`Effect::None`] for pickability.
    Unknown,
}

impl Effect {
    /// Short machine name, matching the wire attribute vocabulary in
    /// the wire attribute vocabulary (`ice`, `chain`, `grass`, ...).
    pub fn kind_name(&self) -> &'static str {
        match self {
            Effect::None => "none",
            Effect::Ice { .. } => "ice",
            Effect::Chain { .. } => "chain",
            Effect::Grass { .. } => "grass",
            Effect::Link { .. } => "link",
            Effect::Frog => "frog",
            Effect::Bomb { .. } => "bomb",
            Effect::Curtain { .. } => "curtain",
            Effect::Teleport => "teleport",
            Effect::Craft { .. } => "craft",
            Effect::Stack { .. } => "stack",
            Effect::Key => "key",
            Effect::Unknown => "unknown",
        }
    }
}
