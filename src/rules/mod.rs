//! Move legality, application, effect propagation, and terminal checks.

mod adjacency;
mod apply;
mod frog;
mod legality;
mod teleport;
mod terminal;

pub use apply::{apply, MoveOutcome};
pub(crate) use apply::refresh_derived_state;
pub use legality::{is_pickable, legal_moves};
pub use terminal::evaluate as evaluate_terminal;
