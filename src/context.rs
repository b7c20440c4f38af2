//! AppleKnights - Game context
//!
//! Everything fixed for the lifetime of one game: settings, search tuning,
//! board dimensions and the tables derived from the initial position.

use crate::board::Position;
use crate::config::{EngineConfig, GameSettings};
use crate::error::{EngineError, EngineResult};
use crate::tables::{GoalDistances, PositionalTable};
use crate::types::{Score, Side};

/// Immutable per-game state shared by the evaluator and the search
#[derive(Clone, Debug)]
pub struct GameContext {
    pub settings: GameSettings,
    pub config: EngineConfig,
    pub width: usize,
    pub height: usize,
    pub goals: GoalDistances,
    pub positional: PositionalTable,
}

impl GameContext {
    /// Validate the configuration and precompute the per-game tables
    pub fn new(initial: &Position, settings: GameSettings, config: EngineConfig) -> EngineResult<Self> {
        config.validate_for(&settings)?;

        let board = initial.board();
        let goals = GoalDistances::new(board);
        let positional = PositionalTable::new(board.width(), board.height(), &goals);

        Ok(GameContext {
            settings,
            config,
            width: board.width(),
            height: board.height(),
            goals,
            positional,
        })
    }

    /// Reject positions whose board differs from the one seen at setup
    pub fn check_dimensions(&self, position: &Position) -> EngineResult<()> {
        let board = position.board();
        if board.width() != self.width || board.height() != self.height {
            return Err(EngineError::DimensionMismatch {
                width: self.width,
                height: self.height,
                got_width: board.width(),
                got_height: board.height(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn victory_points(&self) -> i32 {
        self.settings.victory_points
    }

    #[inline]
    pub fn point_multiplier(&self) -> Score {
        self.config.point_multiplier
    }

    #[inline]
    pub fn victory_threshold(&self) -> Score {
        self.config.victory_score_threshold
    }

    /// Score of a realized game result
    #[inline]
    pub fn terminal_score(&self, position: &Position) -> Score {
        self.point_multiplier() * position.terminal_points()
    }

    /// Score of a side that wins `moves_until_win` moves from now
    ///
    /// Matches the payoff a terminal position would realize, so a forced
    /// win found by the evaluator ranks next to a win found by the search.
    #[inline]
    pub fn win_score(&self, winner: Side, moves_remaining: u32, moves_until_win: u32) -> Score {
        let points = self.victory_points() + moves_remaining as i32 - moves_until_win as i32;
        winner.sign() * self.point_multiplier() * points
    }

    /// Score of a side to move that has no legal move: an immediate loss
    #[inline]
    pub fn stalemate_score(&self, position: &Position) -> Score {
        self.win_score(position.side_to_move().opponent(), position.moves_remaining(), 0)
    }
}
