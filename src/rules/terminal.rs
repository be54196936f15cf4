//! Terminal-state evaluation: cleared, failed, or still running.

use crate::state::{FailureClass, GameState, Terminal};

/// Re-evaluates the terminal verdict from scratch; called once per move
/// after matching has settled, and once after materialisation for levels
/// that are trivially already solved or already impossible.
pub fn evaluate(state: &GameState) -> Terminal {
    if state.all_goals_met() && state.board_is_empty() && state.dock.is_empty() {
        return Terminal::Cleared;
    }
    if state.dock.len() as u8 >= state.dock_capacity {
        return Terminal::Failed(FailureClass::DockOverflow);
    }
    if state.moves_used >= state.max_moves {
        return Terminal::Failed(FailureClass::MoveBudgetExhausted);
    }
    Terminal::Running
}
