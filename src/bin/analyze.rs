//! Grades a level description file and prints its metric vector, score,
//! and letter grade.

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use tile_match_core::analyzer::{extract, grade, score};
use tile_match_core::level::LevelDescription;
use tile_match_core::logging::setup_logging;

#[derive(Parser, Debug)]
#[command(name = "analyze", about = "Statically grade a level description")]
struct Args {
    /// Path to the level description JSON file.
    level: String,
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

    let metrics = extract(&level);
    let s = score(&level);
    let g = grade(s);

    println!("{}", serde_json::to_string_pretty(&metrics_json(&metrics, s, g)).unwrap());
    ExitCode::SUCCESS
}

fn metrics_json(m: &tile_match_core::analyzer::Metrics, score: f64, grade: tile_match_core::analyzer::Grade) -> serde_json::Value {
    let grade_str = match grade {
        tile_match_core::analyzer::Grade::S => "S",
        tile_match_core::analyzer::Grade::A => "A",
        tile_match_core::analyzer::Grade::B => "B",
        tile_match_core::analyzer::Grade::C => "C",
        tile_match_core::analyzer::Grade::D => "D",
    };
    serde_json::json!({
        "total_tiles": m.total_tiles,
        "active_layers": m.active_layers,
        "chain": m.chain,
        "frog": m.frog,
        "ice": m.ice,
        "link": m.link,
        "bomb": m.bomb,
        "grass": m.grass,
        "goal_amount": m.goal_amount,
        "layer_blocking_score": m.layer_blocking_score,
        "score": score,
        "grade": grade_str,
    })
}
