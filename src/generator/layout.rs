//! Board layout: which cells of the grid hold a tile, with the requested
//! symmetry enforced and the aesthetic pattern selecting a base shape.

use super::params::Symmetry;

/// Builds the occupied-cell set for one layer, 1-indexed to match the
/// level description's `"x_y"` tile keys.
pub fn build_positions(cols: u32, rows: u32, symmetry: Symmetry, pattern_index: u8) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    for y in 1..=rows {
        for x in 1..=cols {
            if cell_included(x, y, cols, rows, pattern_index) {
                cells.push((x as i32, y as i32));
            }
        }
    }
    apply_symmetry(&mut cells, cols, rows, symmetry);
    cells.sort();
    cells.dedup();
    enforce_triple_multiple(&mut cells);
    cells
}

fn cell_included(x: u32, y: u32, cols: u32, rows: u32, pattern_index: u8) -> bool {
    match pattern_index % 3 {
        0 => true,
        1 => (x + y) % 2 == 0,
        _ => x == 1 || x == cols || y == 1 || y == rows,
    }
}

fn apply_symmetry(cells: &mut Vec<(i32, i32)>, cols: u32, rows: u32, symmetry: Symmetry) {
    let cols = cols as i32;
    let rows = rows as i32;
    let mirrored: Vec<(i32, i32)> = cells
        .iter()
        .filter_map(|&(x, y)| match symmetry {
            Symmetry::None => None,
            Symmetry::Vertical => Some((cols + 1 - x, y)),
            Symmetry::Horizontal => Some((x, rows + 1 - y)),
            Symmetry::Rotational => Some((cols + 1 - x, rows + 1 - y)),
            Symmetry::Diagonal if cols == rows => Some((y, x)),
            Symmetry::Diagonal => None,
        })
        .collect();
    cells.extend(mirrored);
}

/// Board tile totals must be a multiple of three so the matching invariant
/// can ever be satisfied; trims the tail down to the nearest multiple,
/// never below three.
fn enforce_triple_multiple(cells: &mut Vec<(i32, i32)>) {
    if cells.len() < 3 {
        return;
    }
    let trimmed = (cells.len() / 3) * 3;
    cells.truncate(trimmed.max(3));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_rectangle_covers_every_cell() {
        let cells = build_positions(3, 3, Symmetry::None, 0);
        assert_eq!(cells.len(), 9);
    }

    #[test]
    fn vertical_symmetry_mirrors_every_cell() {
        let cells = build_positions(4, 3, Symmetry::Vertical, 2);
        for &(x, y) in &cells {
            assert!(cells.contains(&(5 - x, y)));
        }
    }

    #[test]
    fn total_is_always_a_multiple_of_three() {
        for pattern in 0..3u8 {
            let cells = build_positions(5, 5, Symmetry::None, pattern);
            assert_eq!(cells.len() % 3, 0);
        }
    }
}
