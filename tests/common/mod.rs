//! Shared test utilities for the AppleKnights test suite
#![allow(dead_code)]

use apple_knights::{EngineConfig, GameContext, GameSettings, MoveGenerator, Position, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const VICTORY_POINTS: i32 = 200;
pub const MOVE_LIMIT: u32 = 40;

/// Install a test logger once; later calls are no-ops
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Settings with a deadline far enough away that only node budgets stop a search
pub fn unhurried(side: Side) -> GameSettings {
    GameSettings::new(f64::INFINITY, VICTORY_POINTS, MOVE_LIMIT, side)
}

pub fn context_for(position: &Position, config: EngineConfig) -> GameContext {
    GameContext::new(position, unhurried(Side::Max), config).unwrap()
}

/// Standard test layouts
pub mod layouts {
    /// Two knights each, goals on opposite edges
    pub const OPENING: &str = "
        H . . . . h
        . . . . . .
        A . . . . a
        . . . . . .
        H . . . . h
    ";

    /// 3x3: Max wins in two of its own moves via (1,2)
    pub const THREE_BY_THREE: &str = "
        H h .
        . A .
        a . .
    ";

    /// Min's only knight sits in the dead centre of a 3x3 board
    pub const MIN_STUCK: &str = "
        H . .
        . h .
        A . a
    ";
}

pub fn opening(side: Side) -> Position {
    Position::from_layout(layouts::OPENING, side, MOVE_LIMIT).unwrap()
}

/// Play `plies` random moves from the opening, never ending the game
///
/// Stops early when every move would finish the game or no move exists.
pub fn random_playout(seed: u64, plies: usize) -> Position {
    let mut rng = StdRng::seed_from_u64(seed);
    let generator = MoveGenerator::new();
    let mut position = opening(if seed % 2 == 0 { Side::Max } else { Side::Min });

    for _ in 0..plies {
        let successors: Vec<Position> = generator
            .generate_moves(&position)
            .iter()
            .map(|mv| position.apply(mv, VICTORY_POINTS))
            .filter(|next| !next.is_terminal())
            .collect();
        if successors.is_empty() {
            break;
        }
        let pick = rng.gen_range(0..successors.len());
        position = successors[pick].clone();
    }

    position
}
