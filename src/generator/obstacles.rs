//! Obstacle placement: picks which plain cells become gimmicks, honouring
//! each kind's local feasibility constraint.

use std::collections::{HashMap, HashSet};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde_json::Value;

pub type Placement = HashMap<(i32, i32), (String, Option<Vec<Value>>)>;

/// Places obstacles from `allowed` onto `cells`, scaling counts with
/// `intensity` (0.0..=1.0). A cell receives at most one gimmick.
pub fn place(cells: &[(i32, i32)], allowed: &[String], intensity: f64, rng: &mut SmallRng) -> Placement {
    let cell_set: HashSet<(i32, i32)> = cells.iter().copied().collect();
    let mut taken: HashSet<(i32, i32)> = HashSet::new();
    let mut result = Placement::new();

    for kind in allowed {
        match kind.as_str() {
            "ice" => place_simple(cells, &mut taken, intensity, 0.15, rng, &mut result, "ice"),
            "frog" => place_simple(cells, &mut taken, intensity, 0.08, rng, &mut result, "frog"),
            "unknown" => place_simple(cells, &mut taken, intensity, 0.05, rng, &mut result, "unknown"),
            "curtain" => place_simple(cells, &mut taken, intensity, 0.10, rng, &mut result, "curtain"),
            "teleport" => place_simple(cells, &mut taken, intensity, 0.10, rng, &mut result, "teleport"),
            "bomb" => place_bomb(cells, &mut taken, intensity, rng, &mut result),
            "grass" => place_grass(cells, &cell_set, &mut taken, intensity, rng, &mut result),
            "chain" => place_chain(cells, &cell_set, &mut taken, intensity, rng, &mut result),
            "link" => place_link(cells, &cell_set, &mut taken, intensity, rng, &mut result),
            _ => {}
        }
    }
    result
}

fn intensity_count(total: usize, intensity: f64, factor: f64) -> usize {
    ((total as f64) * intensity.clamp(0.0, 1.0) * factor).round() as usize
}

fn free_cells(cells: &[(i32, i32)], taken: &HashSet<(i32, i32)>, rng: &mut SmallRng) -> Vec<(i32, i32)> {
    let mut free: Vec<(i32, i32)> = cells.iter().copied().filter(|c| !taken.contains(c)).collect();
    free.shuffle(rng);
    free
}

fn place_simple(
    cells: &[(i32, i32)],
    taken: &mut HashSet<(i32, i32)>,
    intensity: f64,
    factor: f64,
    rng: &mut SmallRng,
    result: &mut Placement,
    attribute: &str,
) {
    let count = intensity_count(cells.len(), intensity, factor);
    for cell in free_cells(cells, taken, rng).into_iter().take(count) {
        taken.insert(cell);
        result.insert(cell, (attribute.to_string(), None));
    }
}

fn place_bomb(
    cells: &[(i32, i32)],
    taken: &mut HashSet<(i32, i32)>,
    intensity: f64,
    rng: &mut SmallRng,
    result: &mut Placement,
) {
    let count = intensity_count(cells.len(), intensity, 0.05);
    for cell in free_cells(cells, taken, rng).into_iter().take(count) {
        taken.insert(cell);
        result.insert(cell, ("bomb".to_string(), Some(vec![Value::from(5)])));
    }
}

fn orthogonal_neighbour_count(cell: (i32, i32), cell_set: &HashSet<(i32, i32)>) -> usize {
    let (x, y) = cell;
    [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]
        .iter()
        .filter(|n| cell_set.contains(n))
        .count()
}

/// Grass only goes on cells with at least two orthogonal neighbours, so the
/// decay-on-adjacent-pick rule has somewhere to draw from.
fn place_grass(
    cells: &[(i32, i32)],
    cell_set: &HashSet<(i32, i32)>,
    taken: &mut HashSet<(i32, i32)>,
    intensity: f64,
    rng: &mut SmallRng,
    result: &mut Placement,
) {
    let count = intensity_count(cells.len(), intensity, 0.12);
    let eligible: Vec<(i32, i32)> = free_cells(cells, taken, rng)
        .into_iter()
        .filter(|c| orthogonal_neighbour_count(*c, cell_set) >= 2)
        .collect();
    for cell in eligible.into_iter().take(count) {
        taken.insert(cell);
        result.insert(cell, ("grass".to_string(), None));
    }
}

/// Chain only binds horizontally: pair a cell with its right-hand
/// neighbour and mark the left one chained.
fn place_chain(
    cells: &[(i32, i32)],
    cell_set: &HashSet<(i32, i32)>,
    taken: &mut HashSet<(i32, i32)>,
    intensity: f64,
    rng: &mut SmallRng,
    result: &mut Placement,
) {
    let count = intensity_count(cells.len(), intensity, 0.08);
    let candidates: Vec<(i32, i32)> = free_cells(cells, taken, rng)
        .into_iter()
        .filter(|&(x, y)| cell_set.contains(&(x + 1, y)) && !taken.contains(&(x + 1, y)))
        .collect();
    for cell in candidates.into_iter().take(count) {
        if taken.contains(&cell) {
            continue;
        }
        taken.insert(cell);
        result.insert(cell, ("chain".to_string(), None));
    }
}

/// Links place in pairs: one side gets the declared direction, its partner
/// gets the opposite. Only orthogonal partners are ever linked.
fn place_link(
    cells: &[(i32, i32)],
    cell_set: &HashSet<(i32, i32)>,
    taken: &mut HashSet<(i32, i32)>,
    intensity: f64,
    rng: &mut SmallRng,
    result: &mut Placement,
) {
    let count = intensity_count(cells.len(), intensity, 0.08);
    let directions: [((i32, i32), &str, &str); 2] =
        [((1, 0), "link_e", "link_w"), ((0, 1), "link_s", "link_n")];
    let mut placed = 0;
    for cell in free_cells(cells, taken, rng) {
        if placed >= count {
            break;
        }
        if taken.contains(&cell) {
            continue;
        }
        let mut dirs = directions;
        dirs.shuffle(rng);
        for ((dx, dy), near_attr, far_attr) in dirs {
            let partner = (cell.0 + dx, cell.1 + dy);
            if cell_set.contains(&partner) && !taken.contains(&partner) {
                taken.insert(cell);
                taken.insert(partner);
                result.insert(cell, (near_attr.to_string(), None));
                result.insert(partner, (far_attr.to_string(), None));
                placed += 1;
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn grid(cols: i32, rows: i32) -> Vec<(i32, i32)> {
        let mut cells = Vec::new();
        for y in 1..=rows {
            for x in 1..=cols {
                cells.push((x, y));
            }
        }
        cells
    }

    #[test]
    fn grass_only_lands_on_well_connected_cells() {
        let cells = grid(5, 5);
        let cell_set: HashSet<_> = cells.iter().copied().collect();
        let mut rng = SmallRng::seed_from_u64(3);
        let placed = place(&cells, &["grass".to_string()], 1.0, &mut rng);
        for cell in placed.keys() {
            assert!(orthogonal_neighbour_count(*cell, &cell_set) >= 2);
        }
    }

    #[test]
    fn chain_always_has_a_right_hand_neighbour_in_the_cell_set() {
        let cells = grid(6, 4);
        let cell_set: HashSet<_> = cells.iter().copied().collect();
        let mut rng = SmallRng::seed_from_u64(7);
        let placed = place(&cells, &["chain".to_string()], 1.0, &mut rng);
        for (&(x, y), (attr, _)) in &placed {
            assert_eq!(attr, "chain");
            assert!(cell_set.contains(&(x + 1, y)));
        }
    }

    #[test]
    fn link_partners_point_at_each_other() {
        let cells = grid(6, 6);
        let mut rng = SmallRng::seed_from_u64(11);
        let placed = place(&cells, &["link".to_string()], 1.0, &mut rng);
        for (&(x, y), (attr, _)) in &placed {
            let (dx, dy, opposite) = match attr.as_str() {
                "link_e" => (1, 0, "link_w"),
                "link_w" => (-1, 0, "link_e"),
                "link_s" => (0, 1, "link_n"),
                "link_n" => (0, -1, "link_s"),
                other => panic!("unexpected link attribute {other}"),
            };
            let partner = placed.get(&(x + dx, y + dy)).expect("link partner missing");
            assert_eq!(partner.0, opposite);
        }
    }

    #[test]
    fn no_cell_receives_two_gimmicks() {
        let cells = grid(6, 6);
        let mut rng = SmallRng::seed_from_u64(13);
        let placed = place(
            &cells,
            &[
                "ice".to_string(),
                "grass".to_string(),
                "chain".to_string(),
                "link".to_string(),
                "bomb".to_string(),
            ],
            1.0,
            &mut rng,
        );
        assert!(placed.len() <= cells.len());
    }
}
