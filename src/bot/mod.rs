//! Bot profiles and the move-decision pipeline: attention filtering,
//! scoring, lookahead, and the mistake/patience gates.

mod attention;
mod decision;
mod lookahead;
mod profile;
mod scoring;
mod zobrist;

pub use decision::decide;
pub use lookahead::TranspositionTable;
pub use profile::{by_name, Profile, ALL, AVERAGE, CASUAL, CORE_SUBSET, EXPERT, NOVICE, OPTIMAL};
