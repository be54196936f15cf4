//! The tile entity.

use serde::{Deserialize, Serialize};

use super::effect::Effect;
use super::key::CanonicalKey;

/// A matching colour, `T1..T16`, plus the `T0` sentinel meaning "fill from
/// the random pool at materialisation time". Never observed by
/// the rule engine once a level has been materialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Placeholder,
    Colour(u8),
}

impl TileType {
    /// Parses the wire form (`"t0"`..`"t16"`) used in level descriptions.
    pub fn parse(s: &str) -> Option<Self> {
        let n: u8 = s.strip_prefix('t')?.parse().ok()?;
        match n {
            0 => Some(TileType::Placeholder),
            1..=16 => Some(TileType::Colour(n)),
            _ => None,
        }
    }

    pub fn is_placeholder(self) -> bool {
        matches!(self, TileType::Placeholder)
    }
}

/// A tile's layer index, position, type, effect state, and pick status
/// Equality and hashing elsewhere in the crate are always by
/// [`CanonicalKey`], not by structural equality on `Tile` — two tiles of
/// the same type and effect at different positions are never conflated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub layer: u32,
    pub x: i32,
    pub y: i32,
    pub tile_type: TileType,
    pub effect: Effect,
    pub picked: bool,
}

impl Tile {
    pub fn new(layer: u32, x: i32, y: i32, tile_type: TileType, effect: Effect) -> Self {
        Self {
            layer,
            x,
            y,
            tile_type,
            effect,
            picked: false,
        }
    }

    pub fn key(&self) -> CanonicalKey {
        CanonicalKey::new(self.layer, self.x, self.y)
    }
}
