//! Static level grading: a fixed metric vector, a fixed weight vector, and
//! a 0..100 normalised score bucketed into a letter grade.

use crate::level::LevelDescription;

/// The metric vector extracted from a level description.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    pub total_tiles: u32,
    pub active_layers: u32,
    pub chain: u32,
    pub frog: u32,
    pub ice: u32,
    pub link: u32,
    pub bomb: u32,
    pub grass: u32,
    pub goal_amount: u32,
    pub layer_blocking_score: u32,
}

/// Caps the raw weighted sum before it's rescaled to 0..100. Not given by
/// any table; picked so a single-layer 49-tile board with moderate obstacle
/// density lands near the A/B boundary.
const NORMALIZATION_CAP: f64 = 220.0;

pub fn extract(level: &LevelDescription) -> Metrics {
    let mut m = Metrics {
        goal_amount: level.goal_count.values().sum(),
        ..Metrics::default()
    };

    for (idx, layer) in level.layers.iter().enumerate() {
        if layer.tiles.is_empty() {
            continue;
        }
        m.active_layers += 1;
        m.total_tiles += layer.tiles.len() as u32;
        for tile in &layer.tiles {
            match tile.attribute.as_str() {
                "chain" => m.chain += 1,
                "frog" => m.frog += 1,
                a if a.starts_with("ice") => m.ice += 1,
                a if a.starts_with("link_") => m.link += 1,
                "bomb" => m.bomb += 1,
                a if a.starts_with("grass") => m.grass += 1,
                _ => {}
            }
            if idx > 0 {
                let below = level.layers[idx - 1]
                    .tiles
                    .iter()
                    .any(|t| t.x == tile.x && t.y == tile.y);
                if below {
                    m.layer_blocking_score += 1;
                }
            }
        }
    }
    m
}

fn weighted_sum(m: &Metrics) -> f64 {
    m.chain as f64 * 5.0
        + m.frog as f64 * 6.0
        + m.ice as f64 * 4.0
        + m.link as f64 * 3.0
        + m.bomb as f64 * 4.0
        + m.grass as f64 * 3.0
        + m.layer_blocking_score as f64 * 0.15
        + m.total_tiles as f64 * 0.5
        + m.active_layers as f64 * 4.0
        + m.goal_amount as f64 * 1.5
}

/// The 0..100 normalised score, never below 0 nor above 100.
pub fn score(level: &LevelDescription) -> f64 {
    let raw = weighted_sum(&extract(level));
    (raw / NORMALIZATION_CAP * 100.0).clamp(0.0, 100.0)
}

/// Letter grade, inclusive on the upper bound of each bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
}

pub fn grade(score: f64) -> Grade {
    if score <= 20.0 {
        Grade::S
    } else if score <= 40.0 {
        Grade::A
    } else if score <= 60.0 {
        Grade::B
    } else if score <= 80.0 {
        Grade::C
    } else {
        Grade::D
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(json: &str) -> LevelDescription {
        LevelDescription::from_json(json).unwrap()
    }

    #[test]
    fn empty_level_scores_zero_and_grades_s() {
        let l = level(r#"{"layer": 0, "goalCount": {}, "max_moves": 1}"#);
        assert_eq!(score(&l), 0.0);
        assert_eq!(grade(score(&l)), Grade::S);
    }

    #[test]
    fn grade_boundaries_are_inclusive_on_the_upper_end() {
        assert_eq!(grade(20.0), Grade::S);
        assert_eq!(grade(20.0001), Grade::A);
        assert_eq!(grade(40.0), Grade::A);
        assert_eq!(grade(60.0), Grade::B);
        assert_eq!(grade(80.0), Grade::C);
        assert_eq!(grade(100.0), Grade::D);
    }

    #[test]
    fn obstacle_heavy_level_scores_higher_than_plain_one() {
        let plain = level(
            r#"{"layer": 1, "layer_0": {"col":3,"row":3,"tiles": {
                "1_1": ["t1","none"], "1_2": ["t2","none"], "1_3": ["t3","none"],
                "2_1": ["t1","none"], "2_2": ["t2","none"], "2_3": ["t3","none"],
                "3_1": ["t1","none"], "3_2": ["t2","none"], "3_3": ["t3","none"]
            }}, "goalCount": {"t1":3}, "max_moves": 20}"#,
        );
        let obstacled = level(
            r#"{"layer": 1, "layer_0": {"col":3,"row":3,"tiles": {
                "1_1": ["t1","chain"], "1_2": ["t2","frog"], "1_3": ["t3","bomb",[3]],
                "2_1": ["t1","none"], "2_2": ["t2","none"], "2_3": ["t3","none"],
                "3_1": ["t1","none"], "3_2": ["t2","none"], "3_3": ["t3","none"]
            }}, "goalCount": {"t1":3}, "max_moves": 20}"#,
        );
        assert!(score(&obstacled) > score(&plain));
    }
}
