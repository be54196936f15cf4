//! Tile-type assignment: pick from the allowed pool, keeping every
//! matching type's total a multiple of three.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::error::{CoreError, Result};

pub fn assign_types(
    cells: &[(i32, i32)],
    allowed_types: &[u8],
    rng: &mut SmallRng,
) -> Result<HashMap<(i32, i32), u8>> {
    if allowed_types.is_empty() {
        return Err(CoreError::GeneratorExhausted(
            "no allowed tile types to assign".to_string(),
        ));
    }
    if cells.len() % 3 != 0 {
        return Err(CoreError::GeneratorExhausted(
            "layout cell count is not a multiple of three".to_string(),
        ));
    }

    let mut bag = Vec::with_capacity(cells.len());
    let mut i = 0;
    while bag.len() < cells.len() {
        let ty = allowed_types[i % allowed_types.len()];
        bag.extend([ty, ty, ty]);
        i += 1;
    }
    bag.truncate(cells.len());
    bag.shuffle(rng);

    let mut shuffled_cells = cells.to_vec();
    shuffled_cells.shuffle(rng);

    Ok(shuffled_cells.into_iter().zip(bag).collect())
}
