//! Board geometry: layer/coordinate arithmetic and the upper-layer blocking rule.
//!
//! Pure functions only — no allocation beyond the fixed offset table, and no
//! dependency on [`crate::state`] so the rule is testable in isolation.

mod offsets;

pub use offsets::blocking_offsets;

use std::collections::HashMap;

/// A position within a single layer.
pub type Pos = (i32, i32);

/// Returns the candidate `(layer, x, y)` cells in higher layers that could
/// block the tile at `(layer, x, y)`.
///
/// `layer_cols` maps a layer index to its column count; layers with no
/// entry are treated as absent (no tiles, no blocking).
pub fn upper_blockers(
    layer: u32,
    x: i32,
    y: i32,
    layer_cols: &HashMap<u32, u32>,
) -> Vec<(u32, Pos)> {
    let mut out = Vec::new();
    let Some(&col) = layer_cols.get(&layer) else {
        return out;
    };
    for (&upper, &upper_col) in layer_cols {
        if upper <= layer {
            continue;
        }
        for (dx, dy) in blocking_offsets(layer, upper, col, upper_col) {
            out.push((upper, (x + dx, y + dy)));
        }
    }
    out
}

/// True iff a tile at `(layer, x, y)` is blocked by an un-picked tile in a
/// higher layer, per the fixed offset sets.
///
/// `is_occupied` reports whether a given `(layer, x, y)` currently hosts an
/// un-picked tile; it is the caller's job to supply that (backed by
/// [`crate::state::GameState`] in production, a plain map in tests).
pub fn is_blocked_by_upper(
    layer: u32,
    x: i32,
    y: i32,
    layer_cols: &HashMap<u32, u32>,
    is_occupied: impl Fn(u32, i32, i32) -> bool,
) -> bool {
    let Some(&col) = layer_cols.get(&layer) else {
        return false;
    };
    for (&upper, &upper_col) in layer_cols {
        if upper <= layer {
            continue;
        }
        // Same-parity case short-circuits to a single offset check.
        for (dx, dy) in blocking_offsets(layer, upper, col, upper_col) {
            if is_occupied(upper, x + dx, y + dy) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(pairs: &[(u32, u32)]) -> HashMap<u32, u32> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn same_parity_checks_only_direct_cell() {
        let layer_cols = cols(&[(0, 7), (2, 7)]);
        let occ = |l: u32, x: i32, y: i32| l == 2 && x == 3 && y == 4;
        assert!(is_blocked_by_upper(0, 3, 4, &layer_cols, occ));
        assert!(!is_blocked_by_upper(0, 3, 5, &layer_cols, occ));
    }

    #[test]
    fn differing_parity_wider_upper_checks_quad() {
        let layer_cols = cols(&[(0, 7), (1, 8)]);
        let occ = |l: u32, x: i32, y: i32| l == 1 && x == 4 && y == 1;
        assert!(is_blocked_by_upper(0, 3, 0, &layer_cols, occ));
        assert!(!is_blocked_by_upper(0, 1, 1, &layer_cols, occ));
    }

    #[test]
    fn differing_parity_narrower_upper_checks_quad_negative() {
        let layer_cols = cols(&[(0, 8), (1, 7)]);
        let occ = |l: u32, x: i32, y: i32| l == 1 && x == 2 && y == 4;
        assert!(is_blocked_by_upper(0, 3, 4, &layer_cols, occ));
    }

    #[test]
    fn no_higher_layer_never_blocks() {
        let layer_cols = cols(&[(0, 7)]);
        assert!(!is_blocked_by_upper(0, 0, 0, &layer_cols, |_, _, _| true));
    }

    #[test]
    fn absent_layer_is_never_blocked() {
        let layer_cols = cols(&[(2, 7)]);
        assert!(!is_blocked_by_upper(0, 0, 0, &layer_cols, |_, _, _| true));
    }
}
