//! Crate-wide error taxonomy.

use thiserror::Error;

/// Errors the core raises directly; never panics propagate across a public
/// boundary in their place.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid level: {0}")]
    InvalidLevel(String),

    #[error("generator exhausted its attempt budget: {0}")]
    GeneratorExhausted(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Why a requested pick was refused. Not a [`CoreError`] — a refusal is
/// expected control flow, not a failure; the board is left unchanged and
/// the caller may try another move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRefusal {
    NotFound,
    AlreadyPicked,
    BlockedByUpper,
    OccupiedByFrog,
    EffectForbids,
    BlockedStackOrCraftInterior,
    GameAlreadyTerminal,
}
