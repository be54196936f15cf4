//! The authoritative simulation state and its construction,
//! caches, and gimmick registries.

mod cache;
mod construct;
mod dock;
mod game_state;
mod registries;

pub use cache::AccessibleCache;
pub use construct::materialise;
pub use dock::{Dock, DockSlot};
pub use game_state::{FailureClass, GameState, Terminal};
pub use registries::GimmickIndex;
