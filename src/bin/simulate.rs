//! Plays a level with one or more bot profiles and prints the resulting
//! trace (single run) or aggregate statistics (batch).

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use tile_match_core::bot;
use tile_match_core::level::LevelDescription;
use tile_match_core::logging::setup_logging;
use tile_match_core::runner::{batch_simulate, play_game};

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Play a level with a bot profile and print the trace")]
struct Args {
    /// Path to the level description JSON file.
    level: String,

    /// Bot profile name (novice, casual, average, expert, optimal).
    #[arg(long, default_value = "average")]
    profile: String,

    /// RNG seed for a single run.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Run this many iterations and print aggregate stats instead of a trace.
    #[arg(long)]
    iterations: Option<u32>,
}

fn main() -> ExitCode {
    setup_logging();
    let args = Args::parse();

    let text = match fs::read_to_string(&args.level) {
        Ok(t) => t,
        Err(e) => {
            error!("failed to read level file {}: {e}", args.level);
            return ExitCode::FAILURE;
        }
    };
    let level = match LevelDescription::from_json(&text) {
        Ok(l) => l,
        Err(e) => {
            error!("invalid level description: {e}");
            return ExitCode::FAILURE;
        }
    };
    let Some(profile) = bot::by_name(&args.profile) else {
        error!("unknown bot profile {}", args.profile);
        return ExitCode::FAILURE;
    };

    if let Some(iterations) = args.iterations {
        info!("running {iterations} iterations for profile {}", profile.name);
        match batch_simulate(&level, &[profile], iterations, args.seed) {
            Ok(result) => {
                println!("{}", serde_json::to_string_pretty(&stats_json(&result)).unwrap());
            }
            Err(e) => {
                error!("batch simulation failed: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        match play_game(&level, &profile, args.seed) {
            Ok(trace) => println!("{}", serde_json::to_string_pretty(&trace).unwrap()),
            Err(e) => {
                error!("simulation failed: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn stats_json(result: &tile_match_core::runner::BatchResult) -> serde_json::Value {
    serde_json::json!(result
        .per_profile
        .iter()
        .map(|(name, stats)| {
            (
                name.clone(),
                serde_json::json!({
                    "clear_rate": stats.clear_rate,
                    "avg_moves": stats.avg_moves,
                    "variance": stats.variance,
                }),
            )
        })
        .collect::<std::collections::HashMap<_, _>>())
}
