//! Tile and gimmick model: entities, effect kinds, per-tile mutable state.

mod effect;
mod key;
mod tile;

pub use effect::{CardinalDirection, CraftDirection, Effect};
pub use key::CanonicalKey;
pub use tile::{Tile, TileType};
