//! The external level description and its parse/validate step
//! into the internal model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::model::TileType;

/// One `layer_N` entry of a level description.
#[derive(Debug, Clone)]
pub struct LayerDescription {
    pub col: u32,
    pub row: u32,
    pub tiles: Vec<TileEntry>,
}

/// One parsed `"x_y": [type, attribute, extra?]` entry.
#[derive(Debug, Clone)]
pub struct TileEntry {
    pub x: i32,
    pub y: i32,
    pub tile_type: TileType,
    pub attribute: String,
    pub extra: Option<Vec<Value>>,
}

/// The fully parsed level description: layer contents, goal counts, move
/// budget, and the optional fields.
#[derive(Debug, Clone)]
pub struct LevelDescription {
    pub layers: Vec<LayerDescription>,
    pub goal_count: HashMap<String, u32>,
    pub max_moves: u32,
    pub rand_seed: Option<u64>,
    pub unlock_tile: u8,
    pub time_attack_budget: Option<u32>,
}

impl LevelDescription {
    pub fn from_json(s: &str) -> Result<Self> {
        let raw: RawLevel = serde_json::from_str(s)?;
        Self::try_from(raw)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_raw())?)
    }

    fn to_raw(&self) -> RawLevel {
        let mut flat = HashMap::new();
        for (i, layer) in self.layers.iter().enumerate() {
            let mut tiles = HashMap::new();
            for t in &layer.tiles {
                let mut entry = vec![
                    Value::String(tile_type_wire(t.tile_type)),
                    Value::String(t.attribute.clone()),
                ];
                if let Some(extra) = &t.extra {
                    entry.push(Value::Array(extra.clone()));
                }
                tiles.insert(format!("{}_{}", t.x, t.y), entry);
            }
            flat.insert(
                format!("layer_{i}"),
                RawLayer {
                    col: layer.col,
                    row: layer.row,
                    tiles,
                },
            );
        }
        RawLevel {
            layer: self.layers.len() as u32,
            layers: flat,
            goal_count: self.goal_count.clone(),
            max_moves: self.max_moves,
            rand_seed: self.rand_seed,
            unlock_tile: Some(self.unlock_tile),
            timea: self.time_attack_budget,
        }
    }
}

fn tile_type_wire(t: TileType) -> String {
    match t {
        TileType::Placeholder => "t0".to_string(),
        TileType::Colour(n) => format!("t{n}"),
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct RawLayer {
    col: u32,
    row: u32,
    tiles: HashMap<String, Vec<Value>>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawLevel {
    layer: u32,
    #[serde(flatten)]
    layers: HashMap<String, RawLayer>,
    #[serde(rename = "goalCount", default)]
    goal_count: HashMap<String, u32>,
    max_moves: u32,
    #[serde(default, rename = "randSeed")]
    rand_seed: Option<u64>,
    #[serde(default)]
    unlock_tile: Option<u8>,
    #[serde(default)]
    timea: Option<u32>,
}

impl TryFrom<RawLevel> for LevelDescription {
    type Error = CoreError;

    fn try_from(raw: RawLevel) -> Result<Self> {
        let mut layers = Vec::with_capacity(raw.layer as usize);
        for i in 0..raw.layer {
            let key = format!("layer_{i}");
            let raw_layer = raw
                .layers
                .get(&key)
                .ok_or_else(|| CoreError::InvalidLevel(format!("missing {key}")))?;
            let mut tiles = Vec::with_capacity(raw_layer.tiles.len());
            for (pos_key, entry) in &raw_layer.tiles {
                let (x, y) = parse_pos_key(pos_key)
                    .ok_or_else(|| CoreError::InvalidLevel(format!("bad tile key {pos_key}")))?;
                let type_str = entry
                    .first()
                    .and_then(Value::as_str)
                    .ok_or_else(|| CoreError::InvalidLevel(format!("missing tile type at {pos_key}")))?;
                let tile_type = TileType::parse(type_str)
                    .ok_or_else(|| CoreError::InvalidLevel(format!("unknown tile type {type_str}")))?;
                let attribute = entry
                    .get(1)
                    .and_then(Value::as_str)
                    .unwrap_or("none")
                    .to_string();
                let extra = entry.get(2).and_then(Value::as_array).cloned();
                tiles.push(TileEntry {
                    x,
                    y,
                    tile_type,
                    attribute,
                    extra,
                });
            }
            layers.push(LayerDescription {
                col: raw_layer.col,
                row: raw_layer.row,
                tiles,
            });
        }
        let unlock_tile = raw.unlock_tile.unwrap_or(0);
        if unlock_tile > 6 {
            return Err(CoreError::InvalidLevel(format!(
                "unlock_tile {unlock_tile} out of range 0..=6"
            )));
        }
        Ok(LevelDescription {
            layers,
            goal_count: raw.goal_count,
            max_moves: raw.max_moves,
            rand_seed: raw.rand_seed,
            unlock_tile,
            time_attack_budget: raw.timea,
        })
    }
}

fn parse_pos_key(key: &str) -> Option<(i32, i32)> {
    let (x, y) = key.split_once('_')?;
    Some((x.parse().ok()?, y.parse().ok()?))
}
