//! Canonical addressing for board tiles and gimmick registries.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// `"L_x_y"` — the canonical key used to address a board cell across every
/// registry (ice/grass/chain/link/frog/bomb/curtain states). Link partners
/// and frog occupancy are modeled as these keys, never as owning pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey {
    pub layer: u32,
    pub x: i32,
    pub y: i32,
}

impl CanonicalKey {
    pub fn new(layer: u32, x: i32, y: i32) -> Self {
        Self { layer, x, y }
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.layer, self.x, self.y)
    }
}

impl FromStr for CanonicalKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '_');
        let layer = parts.next().ok_or(())?.parse().map_err(|_| ())?;
        let x = parts.next().ok_or(())?.parse().map_err(|_| ())?;
        let y = parts.next().ok_or(())?.parse().map_err(|_| ())?;
        Ok(CanonicalKey::new(layer, x, y))
    }
}

// Serialized as its `"L_x_y"` string form so it can also serve as a JSON
// object key (e.g. inside the trace's per-registry snapshot maps), which
// serde_json only accepts for string-like types.
impl Serialize for CanonicalKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CanonicalKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;
        impl Visitor<'_> for KeyVisitor {
            type Value = CanonicalKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a canonical key string \"layer_x_y\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<CanonicalKey, E> {
                CanonicalKey::from_str(v).map_err(|_| E::custom(format!("invalid canonical key {v}")))
            }
        }
        deserializer.deserialize_str(KeyVisitor)
    }
}
