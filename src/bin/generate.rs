//! Runs the procedural generator against CLI-supplied parameters and
//! prints the resulting level description as JSON.

use std::collections::HashMap;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use tile_match_core::generator::{generate, GeneratorParams, Symmetry};
use tile_match_core::logging::setup_logging;

#[derive(Parser, Debug)]
#[command(name = "generate", about = "Procedurally generate one level")]
struct Args {
    /// Target difficulty in 0..1.
    #[arg(long, default_value_t = 0.5)]
    difficulty: f64,

    #[arg(long, default_value_t = 7)]
    cols: u32,

    #[arg(long, default_value_t = 7)]
    rows: u32,

    /// Comma-separated allowed tile type numbers, e.g. "1,2,3".
    #[arg(long, default_value = "1,2,3,4,5,6")]
    tile_types: String,

    /// Comma-separated allowed obstacle kinds.
    #[arg(long, default_value = "")]
    obstacles: String,

    #[arg(long, default_value_t = 0.3)]
    gimmick_intensity: f64,

    #[arg(long, default_value_t = 1)]
    level_number: u32,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = 40)]
    max_moves: u32,
}

fn main() -> ExitCode {
    setup_logging();
    let args = Args::parse();

    let allowed_tile_types: Vec<u8> = args
        .tile_types
        .split(',')
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.trim().parse().ok())
        .collect();
    let allowed_obstacles: Vec<String> = args
        .obstacles
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.trim().to_string())
        .collect();

    let params = GeneratorParams {
        target_difficulty: args.difficulty,
        grid_cols: args.cols,
        grid_rows: args.rows,
        max_layers: 1,
        allowed_tile_types,
        allowed_obstacles,
        goals: HashMap::new(),
        symmetry: Symmetry::None,
        pattern_index: (args.level_number % 3) as u8,
        gimmick_intensity: args.gimmick_intensity,
        level_number: args.level_number,
        rand_seed: args.seed,
        max_moves: args.max_moves,
        unlock_tile: 0,
    };

    info!("generating level {} at difficulty {}", args.level_number, args.difficulty);
    match generate(&params) {
        Ok(level) => match level.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("failed to serialise generated level: {e}");
                return ExitCode::FAILURE;
            }
        },
        Err(e) => {
            error!("generation failed: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
