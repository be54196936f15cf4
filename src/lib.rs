//! A deterministic simulator, bot decision engine, and procedural level
//! generator/validator for a layered tile-matching puzzle.
//!
//! The pipeline from a level description to a playable trace runs through
//! [`level`] (parse), [`state`] (materialise), [`rules`] (legality and
//! move application), and [`bot`]/[`runner`] (automated play and batch
//! statistics). [`generator`], [`validator`], and [`analyzer`] build levels
//! rather than play them.

/// Board geometry and the layer-blocking predicate.
pub mod geometry;

/// Tile and gimmick model.
pub mod model;

/// Crate-wide error taxonomy.
pub mod error;

/// The external level description and its parse/validate step.
pub mod level;

/// The authoritative simulation state and its construction.
pub mod state;

/// Move legality, application, and terminal checks.
pub mod rules;

/// Bot profiles and the move-decision pipeline.
pub mod bot;

/// Seeded single-game and batched multi-game simulation.
pub mod runner;

/// Procedural level generation.
pub mod generator;

/// Target clear-rate validation loop.
pub mod validator;

/// Static level grading.
pub mod analyzer;

/// File-backed logging setup for the CLI binaries.
pub mod logging;

pub use error::{CoreError, Result};

/// Library version, as published in `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
