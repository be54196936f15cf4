//! Goal-count derivation and craft/stack container packing.
//!
//! Packing a stack or craft container never changes a type's total count —
//! it only redistributes some of that type's occurrences from separate
//! board cells into one container's inner sequence, so the materialiser's
//! per-type multiple-of-three invariant still holds afterwards.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde_json::Value;

use super::obstacles::Placement;

/// Derives the goal count map from the assigned board, clamped to what the
/// requested `goals` ask for and to what the board actually contains.
pub fn derive_goal_count(
    cell_types: &HashMap<(i32, i32), u8>,
    requested: &HashMap<String, u32>,
) -> HashMap<String, u32> {
    let mut board_counts: HashMap<u8, u32> = HashMap::new();
    for ty in cell_types.values() {
        *board_counts.entry(*ty).or_insert(0) += 1;
    }

    let mut goal_count = HashMap::new();
    for (token, &want) in requested {
        let Some(n) = token.strip_prefix('t').and_then(|s| s.parse::<u8>().ok()) else {
            continue;
        };
        let available = *board_counts.get(&n).unwrap_or(&0);
        let clamped = (want.min(available) / 3) * 3;
        if clamped > 0 {
            goal_count.insert(token.clone(), clamped);
        }
    }
    if goal_count.is_empty() {
        for (ty, count) in &board_counts {
            let usable = (count / 3) * 3;
            if usable > 0 {
                goal_count.insert(format!("t{ty}"), usable);
            }
        }
    }
    goal_count
}

/// Packs up to `count` stack containers: for each, picks three same-type
/// cells, keeps the first as the visible container, folds the other two
/// into its inner sequence, and removes them from the free cell pool.
pub fn pack_stacks(
    cells: &mut Vec<(i32, i32)>,
    cell_types: &mut HashMap<(i32, i32), u8>,
    placement: &mut Placement,
    count: usize,
    rng: &mut SmallRng,
) {
    pack(cells, cell_types, placement, count, rng, ContainerKind::Stack);
}

/// Packs up to `count` craft containers, where all three copies of the type
/// move into the inner sequence since the container itself is never
/// directly pickable.
pub fn pack_crafts(
    cells: &mut Vec<(i32, i32)>,
    cell_types: &mut HashMap<(i32, i32), u8>,
    placement: &mut Placement,
    count: usize,
    rng: &mut SmallRng,
) {
    pack(cells, cell_types, placement, count, rng, ContainerKind::Craft);
}

enum ContainerKind {
    Stack,
    Craft,
}

fn pack(
    cells: &mut Vec<(i32, i32)>,
    cell_types: &mut HashMap<(i32, i32), u8>,
    placement: &mut Placement,
    count: usize,
    rng: &mut SmallRng,
    kind: ContainerKind,
) {
    for _ in 0..count {
        let Some((container, folded)) = pick_triplet(cells, cell_types, placement, rng) else {
            break;
        };
        let ty = cell_types[&container];
        for dead in &folded {
            cells.retain(|c| c != dead);
            cell_types.remove(dead);
        }
        let attribute = match kind {
            ContainerKind::Stack => "stack_n",
            ContainerKind::Craft => "craft_e",
        };
        let inner_len = match kind {
            ContainerKind::Stack => 2,
            ContainerKind::Craft => 3,
        };
        let inner = vec![format!("t{ty}"); inner_len].join("_");
        placement.insert(container, (attribute.to_string(), Some(vec![Value::Null, Value::String(inner)])));
    }
}

/// Finds three same-type cells with no obstacle already assigned to any of
/// them, returning the chosen container plus the two to fold away.
fn pick_triplet(
    cells: &[(i32, i32)],
    cell_types: &HashMap<(i32, i32), u8>,
    placement: &Placement,
    rng: &mut SmallRng,
) -> Option<((i32, i32), [(i32, i32); 2])> {
    let mut by_type: HashMap<u8, Vec<(i32, i32)>> = HashMap::new();
    for &cell in cells {
        if placement.contains_key(&cell) {
            continue;
        }
        by_type.entry(cell_types[&cell]).or_default().push(cell);
    }
    let mut types: Vec<u8> = by_type.iter().filter(|(_, v)| v.len() >= 3).map(|(k, _)| *k).collect();
    types.sort_unstable();
    types.shuffle(rng);
    let ty = types.first()?;
    let mut group = by_type.remove(ty).unwrap();
    group.shuffle(rng);
    Some((group[0], [group[1], group[2]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn goal_count_is_clamped_to_a_multiple_of_three() {
        let mut cell_types = HashMap::new();
        for i in 0..5 {
            cell_types.insert((i, 0), 1);
        }
        let mut requested = HashMap::new();
        requested.insert("t1".to_string(), 5);
        let goals = derive_goal_count(&cell_types, &requested);
        assert_eq!(goals.get("t1"), Some(&3));
    }

    #[test]
    fn packing_a_stack_preserves_the_types_total_count() {
        let mut cells: Vec<(i32, i32)> = (0..6).map(|i| (i, 0)).collect();
        let mut cell_types = HashMap::new();
        for &c in &cells {
            cell_types.insert(c, 1);
        }
        let mut placement = Placement::new();
        let mut rng = SmallRng::seed_from_u64(5);
        pack_stacks(&mut cells, &mut cell_types, &mut placement, 1, &mut rng);

        let board_count = cell_types.values().filter(|&&t| t == 1).count();
        let inner_count: usize = placement
            .values()
            .filter_map(|(_, extra)| extra.as_ref())
            .filter_map(|e| e.get(1).and_then(Value::as_str))
            .map(|s| s.split('_').count())
            .sum();
        assert_eq!(board_count + inner_count, 6);
    }
}
