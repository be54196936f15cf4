//! Generator request parameters.

use std::collections::HashMap;

/// Board symmetry applied while laying out tile positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    None,
    Vertical,
    Horizontal,
    Rotational,
    Diagonal,
}

#[derive(Debug, Clone)]
pub struct GeneratorParams {
    pub target_difficulty: f64,
    pub grid_cols: u32,
    pub grid_rows: u32,
    pub max_layers: u32,
    pub allowed_tile_types: Vec<u8>,
    pub allowed_obstacles: Vec<String>,
    pub goals: HashMap<String, u32>,
    pub symmetry: Symmetry,
    pub pattern_index: u8,
    pub gimmick_intensity: f64,
    pub level_number: u32,
    pub rand_seed: u64,
    pub max_moves: u32,
    pub unlock_tile: u8,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            target_difficulty: 0.5,
            grid_cols: 7,
            grid_rows: 7,
            max_layers: 1,
            allowed_tile_types: (1..=6).collect(),
            allowed_obstacles: Vec::new(),
            goals: HashMap::new(),
            symmetry: Symmetry::None,
            pattern_index: 0,
            gimmick_intensity: 0.0,
            level_number: 1,
            rand_seed: 0,
            max_moves: 40,
            unlock_tile: 0,
        }
    }
}
