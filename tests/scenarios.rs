//! End-to-end scenarios against the external level-description surface,
//! mirroring the handful of concrete boards used to pin down gimmick
//! behaviour during design.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use tile_match_core::bot::{self, ALL, OPTIMAL};
use tile_match_core::level::LevelDescription;
use tile_match_core::model::Effect;
use tile_match_core::rules;
use tile_match_core::runner::{batch_simulate, play_game};
use tile_match_core::state::{materialise, FailureClass, Terminal};

fn level(json: &str) -> LevelDescription {
    LevelDescription::from_json(json).unwrap()
}

/// S1: a plain 3x3 board with no obstacles.
#[test]
fn s1_simple_board_clears_for_every_profile_at_high_rate() {
    let l = level(
        r#"{
            "layer": 1,
            "layer_0": {"col": 3, "row": 3, "tiles": {
                "1_1": ["t1","none"], "1_2": ["t2","none"], "1_3": ["t3","none"],
                "2_1": ["t1","none"], "2_2": ["t2","none"], "2_3": ["t3","none"],
                "3_1": ["t1","none"], "3_2": ["t2","none"], "3_3": ["t3","none"]
            }},
            "goalCount": {"t1": 3, "t2": 3, "t3": 3},
            "max_moves": 20
        }"#,
    );
    let trace = play_game(&l, &OPTIMAL, 1).unwrap();
    assert_eq!(trace.moves.len(), 9);

    let result = batch_simulate(&l, &ALL, 100, 0).unwrap();
    for profile in &ALL {
        assert!(result.per_profile[profile.name].clear_rate >= 0.90, "{} below 90%", profile.name);
    }
}

/// S2: a bomb with a three-move countdown must be defused or the game fails.
#[test]
fn s2_unattended_bomb_explodes_within_its_countdown() {
    let l = level(
        r#"{
            "layer": 1,
            "layer_0": {"col": 4, "row": 1, "tiles": {
                "1_1": ["t1","none"], "2_1": ["t1","none"],
                "3_1": ["t1","none"], "4_1": ["t2","bomb",[1]]
            }},
            "goalCount": {"t1": 3},
            "max_moves": 10
        }"#,
    );
    let mut state = materialise(&l).unwrap();
    let mut rng = SmallRng::seed_from_u64(9);
    rules::apply(&mut state, &mut rng, tile_match_core::model::CanonicalKey::new(0, 1, 1)).unwrap();
    assert_eq!(state.terminal, Terminal::Failed(FailureClass::BombExploded));
}

/// S3: a linked pair picks together and the loose third tile completes the match.
#[test]
fn s3_linked_pair_is_picked_together() {
    let l = level(
        r#"{
            "layer": 1,
            "layer_0": {"col": 3, "row": 1, "tiles": {
                "1_1": ["t1","link_e"], "2_1": ["t1","link_w"], "3_1": ["t1","none"]
            }},
            "goalCount": {"t1": 3},
            "max_moves": 5
        }"#,
    );
    let mut state = materialise(&l).unwrap();
    let mut rng = SmallRng::seed_from_u64(3);
    let outcome = rules::apply(&mut state, &mut rng, tile_match_core::model::CanonicalKey::new(0, 1, 1)).unwrap();
    assert_eq!(outcome.picked.len(), 2);

    let outcome2 = rules::apply(&mut state, &mut rng, tile_match_core::model::CanonicalKey::new(0, 3, 1)).unwrap();
    assert_eq!(outcome2.matched.len(), 1);
    assert_eq!(state.terminal, Terminal::Cleared);
}

/// S4: curtained tiles must wait for a covering tile to clear before they
/// open, and lower-skill profiles fail more often as a result.
#[test]
fn s4_curtained_board_penalises_lower_skill_profiles() {
    let l = level(
        r#"{
            "layer": 2,
            "layer_0": {"col": 3, "row": 2, "tiles": {
                "1_1": ["t1","curtain"], "2_1": ["t2","curtain"], "3_1": ["t3","none"],
                "1_2": ["t1","none"], "2_2": ["t2","none"], "3_2": ["t3","none"]
            }},
            "layer_1": {"col": 3, "row": 2, "tiles": {
                "1_1": ["t1","none"], "2_1": ["t2","none"]
            }},
            "goalCount": {"t1": 3, "t2": 3, "t3": 3},
            "max_moves": 10
        }"#,
    );
    let result = batch_simulate(&l, &[bot::NOVICE, bot::EXPERT], 150, 11).unwrap();
    let novice_rate = result.per_profile["novice"].clear_rate;
    let expert_rate = result.per_profile["expert"].clear_rate;
    assert!(expert_rate >= novice_rate);
}

/// S5: teleport shuffles surviving participant types every third pick
/// anywhere, then retires once fewer than two remain.
#[test]
fn s5_teleport_shuffles_and_then_retires() {
    let l = level(
        r#"{
            "layer": 1,
            "layer_0": {"col": 4, "row": 1, "tiles": {
                "1_1": ["t1","teleport"], "2_1": ["t1","teleport"],
                "3_1": ["t2","teleport"], "4_1": ["t2","teleport"]
            }},
            "goalCount": {"t1": 2, "t2": 2},
            "max_moves": 10
        }"#,
    );
    let mut state = materialise(&l).unwrap();
    let mut rng = SmallRng::seed_from_u64(2);
    assert_eq!(state.gimmicks.teleport_participants.len(), 4);

    rules::apply(&mut state, &mut rng, tile_match_core::model::CanonicalKey::new(0, 1, 1)).unwrap();
    assert_eq!(state.gimmicks.teleport_click_count, 1);

    rules::apply(&mut state, &mut rng, tile_match_core::model::CanonicalKey::new(0, 2, 1)).unwrap();
    assert_eq!(state.gimmicks.teleport_click_count, 2);
    assert_eq!(state.gimmicks.teleport_participants.len(), 2);

    rules::apply(&mut state, &mut rng, tile_match_core::model::CanonicalKey::new(0, 3, 1)).unwrap();
    assert!(state.gimmicks.teleport_participants.len() < 2);
    let remaining = tile_match_core::model::CanonicalKey::new(0, 4, 1);
    let retired = match state.tile(remaining) {
        Some(t) => !matches!(t.effect, Effect::Teleport),
        None => true,
    };
    assert!(retired);
}

/// S6: locking two dock slots then recovering them via key picks.
#[test]
fn s6_key_picks_raise_dock_capacity_back_toward_seven() {
    let l = level(
        r#"{
            "layer": 1,
            "layer_0": {"col": 3, "row": 2, "tiles": {
                "1_1": ["t1","key"], "2_1": ["t1","key"], "3_1": ["t1","key"],
                "1_2": ["t2","none"], "2_2": ["t2","none"], "3_2": ["t2","none"]
            }},
            "goalCount": {"t1": 3, "t2": 3},
            "max_moves": 10,
            "unlock_tile": 2
        }"#,
    );
    let mut state = materialise(&l).unwrap();
    assert_eq!(state.dock_capacity, 5);
    let mut rng = SmallRng::seed_from_u64(4);
    for (x, _y) in [(1, 1), (2, 1), (3, 1)] {
        rules::apply(&mut state, &mut rng, tile_match_core::model::CanonicalKey::new(0, x, 1)).unwrap();
    }
    assert_eq!(state.dock_capacity, 6);
}

/// Universal invariant 2 & 6: dock count per type stays below three right
/// up to a clearance, and total dock size never exceeds capacity.
#[test]
fn dock_invariants_hold_across_a_full_playthrough() {
    let l = level(
        r#"{
            "layer": 1,
            "layer_0": {"col": 3, "row": 3, "tiles": {
                "1_1": ["t1","none"], "1_2": ["t2","none"], "1_3": ["t3","none"],
                "2_1": ["t1","none"], "2_2": ["t2","none"], "2_3": ["t3","none"],
                "3_1": ["t1","none"], "3_2": ["t2","none"], "3_3": ["t3","none"]
            }},
            "goalCount": {"t1": 3, "t2": 3, "t3": 3},
            "max_moves": 20
        }"#,
    );
    let trace = play_game(&l, &bot::AVERAGE, 123).unwrap();
    for mv in &trace.moves {
        assert!(mv.dock_after.len() as u8 <= 7);
    }
}
