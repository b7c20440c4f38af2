//! Move selection scenarios through the public agent surface

mod common;

use apple_knights::config::DEFAULT_POINT_MULTIPLIER;
use apple_knights::{
    Agent, EngineConfig, EngineError, GameSettings, Move, MoveGenerator, OffsetOrder,
    PieceSquareEvaluator, Position, Side, TacticalEvaluator,
};
use common::{init_logging, layouts, opening, unhurried, MOVE_LIMIT, VICTORY_POINTS};

#[test]
fn test_three_by_three_forced_win() {
    init_logging();
    let pos = Position::from_layout(layouts::THREE_BY_THREE, Side::Max, 10).unwrap();
    let mut agent = Agent::default();
    agent
        .setup(&pos, GameSettings::new(10.0, VICTORY_POINTS, 10, Side::Max))
        .unwrap();

    let report = agent.select_move(&pos).unwrap();

    // (0,0)->(1,2), Min's only reply, then (1,2)->(2,0) lands on Min's goal
    assert_eq!(report.best_move, Move::new(0, 0, 1, 2));
    assert_eq!(report.score, Some(DEFAULT_POINT_MULTIPLIER * (VICTORY_POINTS + 7)));
    assert!(report.score.unwrap() > agent.config().victory_score_threshold);
    assert_eq!(report.depth, 3);
    assert!(!report.timed_out);
    assert!(report.stats.nodes > 0);
}

#[test]
fn test_zero_time_falls_back_to_first_generated_move() {
    init_logging();
    let pos = Position::from_layout(layouts::THREE_BY_THREE, Side::Max, 10).unwrap();
    let mut agent = Agent::default();
    agent
        .setup(&pos, GameSettings::new(0.0, VICTORY_POINTS, 10, Side::Max))
        .unwrap();

    let report = agent.select_move(&pos).unwrap();

    assert_eq!(report.best_move, MoveGenerator::new().generate_moves(&pos)[0]);
    assert_eq!(report.best_move, Move::new(0, 0, 2, 1));
    assert_eq!(report.score, None);
    assert_eq!(report.depth, 0);
    assert!(report.timed_out);
}

#[test]
fn test_advancing_order_changes_the_fallback() {
    let pos = Position::from_layout(
        "
        A . . . .
        . . . . .
        . . h . .
        . . . . .
        H . . . a
        ",
        Side::Min,
        MOVE_LIMIT,
    )
    .unwrap();
    let config = EngineConfig::default().with_offset_order(OffsetOrder::Advancing);
    let mut agent = Agent::new(config, TacticalEvaluator::default());
    agent
        .setup(&pos, GameSettings::new(0.0, VICTORY_POINTS, MOVE_LIMIT, Side::Min))
        .unwrap();

    // Leftward offsets come first when playing Min
    assert_eq!(agent.select_move(&pos).unwrap().best_move, Move::new(2, 2, 1, 0));
}

#[test]
fn test_no_legal_moves_is_an_error() {
    let pos = Position::from_layout(layouts::MIN_STUCK, Side::Min, 10).unwrap();
    let mut agent = Agent::default();
    agent.setup(&pos, unhurried(Side::Min)).unwrap();

    assert_eq!(
        agent.select_move(&pos),
        Err(EngineError::NoLegalMoves { side: Side::Min })
    );
}

#[test]
fn test_position_of_another_size_is_rejected() {
    let mut agent = Agent::default();
    agent.setup(&opening(Side::Max), unhurried(Side::Max)).unwrap();

    let small = Position::from_layout(layouts::THREE_BY_THREE, Side::Max, 10).unwrap();
    assert!(matches!(
        agent.select_move(&small),
        Err(EngineError::DimensionMismatch { width: 6, height: 5, got_width: 3, got_height: 3 })
    ));
}

#[test]
fn test_selection_does_not_touch_the_position() {
    let pos = opening(Side::Max);
    let before = pos.clone();
    let config = EngineConfig::default().with_node_budget(Some(20_000));
    let mut agent = Agent::new(config, PieceSquareEvaluator::default());
    agent.setup(&pos, unhurried(Side::Max)).unwrap();

    let report = agent.select_move(&pos).unwrap();

    assert_eq!(pos, before);
    assert!(MoveGenerator::new().generate_moves(&pos).contains(&report.best_move));
    assert!(report.stats.polls > 0);
}

#[test]
fn test_setup_again_starts_a_new_game() {
    let mut agent = Agent::default();
    agent.setup(&opening(Side::Max), unhurried(Side::Max)).unwrap();

    let pos = Position::from_layout(layouts::THREE_BY_THREE, Side::Max, 10).unwrap();
    agent.setup(&pos, unhurried(Side::Max)).unwrap();
    assert_eq!(agent.game().map(|g| (g.width, g.height)), Some((3, 3)));
    assert_eq!(agent.select_move(&pos).unwrap().best_move, Move::new(0, 0, 1, 2));
}

#[test]
fn test_self_play_game_runs_to_completion() {
    init_logging();
    let start = opening(Side::Max);
    let config = EngineConfig::default().with_depths(1, 6).with_node_budget(Some(4_000));

    let mut max_agent = Agent::new(config.clone(), TacticalEvaluator::default());
    let mut min_agent = Agent::new(config, PieceSquareEvaluator::default());
    max_agent.setup(&start, unhurried(Side::Max)).unwrap();
    min_agent.setup(&start, unhurried(Side::Min)).unwrap();

    let generator = MoveGenerator::new();
    let mut position = start;
    let mut plies = 0;

    while !position.is_terminal() {
        if generator.generate_moves(&position).is_empty() {
            break;
        }
        let report = match position.side_to_move() {
            Side::Max => max_agent.select_move(&position),
            Side::Min => min_agent.select_move(&position),
        }
        .unwrap();
        assert!(generator.generate_moves(&position).contains(&report.best_move));

        position = position.apply(&report.best_move, VICTORY_POINTS);
        plies += 1;
    }

    assert!(plies <= MOVE_LIMIT);
    max_agent.teardown();
    min_agent.teardown();
    assert!(!max_agent.is_ready() && !min_agent.is_ready());
}
