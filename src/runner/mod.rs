//! Seeded single-game play and batched multi-game statistics.

mod batch;
mod single;
pub mod trace;

pub use batch::{batch_simulate, BatchResult, ProfileStats};
pub use single::play_game;
pub use trace::Trace;
