//! The fixed offset table behind the blocking rule.

/// Offset set `Δ(L, L')` used to test whether a tile on layer `lower`
/// (with `lower_cols` columns) is blocked by layer `upper` (with
/// `upper_cols` columns).
///
/// Returned as a `&'static [(i32, i32)]` — the three cases are each a
/// small constant array, never allocated.
pub fn blocking_offsets(lower: u32, upper: u32, lower_cols: u32, upper_cols: u32) -> &'static [(i32, i32)] {
    if lower % 2 == upper % 2 {
        &SAME_PARITY
    } else if upper_cols > lower_cols {
        &WIDER_UPPER
    } else {
        &NARROWER_UPPER
    }
}

const SAME_PARITY: [(i32, i32); 1] = [(0, 0)];
const WIDER_UPPER: [(i32, i32); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];
const NARROWER_UPPER: [(i32, i32); 4] = [(-1, -1), (0, -1), (-1, 0), (0, 0)];
