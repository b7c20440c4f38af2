//! AppleKnights - Position Evaluation Module
//!
//! Static evaluation of positions. The search is generic over the
//! `Evaluator` trait; two strategies are provided:
//! - `TacticalEvaluator`: material, positional table, threat/defence
//!   balance and forcing-sequence detection
//! - `PieceSquareEvaluator`: material plus a bonus for approaching the
//!   opponent's goal
//!
//! Weights are in points; scores come out in `SCORE_SCALE` units per point.
//! Terminal positions are scored from their realized payoff by both.

use crate::board::Position;
use crate::context::GameContext;
use crate::move_generator::count_neighbours;
use crate::types::*;

/// Static position scoring strategy; positive scores favor `Side::Max`
pub trait Evaluator {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Score a position
    fn evaluate(&self, position: &Position, game: &GameContext) -> Score;
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(&self, position: &Position, game: &GameContext) -> Score {
        (**self).evaluate(position, game)
    }
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(&self, position: &Position, game: &GameContext) -> Score {
        (**self).evaluate(position, game)
    }
}

// ============================================================================
// TACTICAL EVALUATOR
// ============================================================================

pub const TACTICAL_PIECE_VALUE: Score = 20;
pub const TROUBLED_PIECE_PENALTY: Score = 1;
pub const PROTECTION_WEIGHT: Score = 4;

/// Per-side counters gathered in one board scan
#[derive(Clone, Copy, Debug, Default)]
struct SideTally {
    pieces: i32,
    /// Pieces attacked at least once
    fighting: i32,
    /// Pieces attacked more often than defended
    troubled: i32,
    /// Sum of defenders over all pieces
    protection: i32,
}

/// Material, position, threats and forced wins
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TacticalEvaluator {
    pub piece_value: Score,
    pub troubled_penalty: Score,
    /// Points per defender, averaged over the side's pieces
    pub protection_weight: Score,
}

impl Default for TacticalEvaluator {
    fn default() -> Self {
        TacticalEvaluator {
            piece_value: TACTICAL_PIECE_VALUE,
            troubled_penalty: TROUBLED_PIECE_PENALTY,
            protection_weight: PROTECTION_WEIGHT,
        }
    }
}

impl TacticalEvaluator {
    /// Average defenders per piece, weighted, in score units
    fn protection_term(&self, tally: &SideTally) -> Score {
        if tally.pieces == 0 {
            0
        } else {
            self.protection_weight * SCORE_SCALE * tally.protection / tally.pieces
        }
    }
}

impl Evaluator for TacticalEvaluator {
    fn name(&self) -> &str {
        "tactical"
    }

    fn evaluate(&self, position: &Position, game: &GameContext) -> Score {
        if position.is_terminal() {
            return game.terminal_score(position);
        }

        let board = position.board();
        let to_move = position.side_to_move();
        let waiting = to_move.opponent();

        let mut tally = [SideTally::default(); 2];
        let mut moves_until_win: [Option<u32>; 2] = [None, None];
        let mut points: Score = 0;

        for row in 0..board.height() {
            for col in 0..board.width() {
                let Some(owner) = piece_owner(board.cell(row, col)) else {
                    continue;
                };

                points += owner.sign() * game.positional.get(owner, row, col);

                let (defenders, attackers) = count_neighbours(board, row, col, owner);
                let t = &mut tally[owner.index()];
                t.pieces += 1;
                t.protection += defenders as i32;
                if attackers > 0 {
                    t.fighting += 1;
                }
                if attackers > defenders {
                    t.troubled += 1;
                }

                // One jump away from the opponent's goal
                if game.goals.to_goal(owner.opponent(), row, col) == Some(1) {
                    let slot = &mut moves_until_win[owner.index()];
                    if owner == to_move {
                        *slot = Some(1);
                    } else if defenders >= attackers {
                        let eta = 2 * attackers + 2;
                        *slot = Some(slot.map_or(eta, |m| m.min(eta)));
                    }
                }
            }
        }

        let (max, min) = (tally[Side::Max.index()], tally[Side::Min.index()]);
        points += self.piece_value * (max.pieces - min.pieces);
        points += self.troubled_penalty * (min.troubled - max.troubled);

        // The side to move is about to win a piece
        let mover = tally[to_move.index()];
        let other = tally[waiting.index()];
        if mover.troubled < other.troubled || (other.troubled == 1 && other.fighting == 1) {
            points += to_move.sign() * self.piece_value;
        }

        let score = points * SCORE_SCALE + self.protection_term(&max) - self.protection_term(&min);

        // The opponent's last piece can be taken right now
        if other.pieces == 1 && other.troubled == 1 {
            moves_until_win[to_move.index()] = Some(1);
        }

        let remaining = position.moves_remaining();
        match (moves_until_win[to_move.index()], moves_until_win[waiting.index()]) {
            (Some(own), theirs) if theirs.map_or(true, |t| own <= t) => {
                game.win_score(to_move, remaining, own)
            }
            (_, Some(theirs)) => game.win_score(waiting, remaining, theirs),
            _ => score,
        }
    }
}

// ============================================================================
// PIECE-SQUARE EVALUATOR
// ============================================================================

pub const GOAL_VALUE: Score = 900;
pub const PIECE_SQUARE_PIECE_VALUE: Score = 20;

/// Bonus for a piece by knight distance to the opponent's goal
pub const APPROACH_BONUS: [Score; 5] = [100, 20, 13, 8, 5];

/// Material plus approach bonus
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceSquareEvaluator {
    pub goal_value: Score,
    pub piece_value: Score,
    pub approach_bonus: [Score; 5],
}

impl Default for PieceSquareEvaluator {
    fn default() -> Self {
        PieceSquareEvaluator {
            goal_value: GOAL_VALUE,
            piece_value: PIECE_SQUARE_PIECE_VALUE,
            approach_bonus: APPROACH_BONUS,
        }
    }
}

impl PieceSquareEvaluator {
    fn approach(&self, game: &GameContext, owner: Side, row: usize, col: usize) -> Score {
        game.goals
            .to_goal(owner.opponent(), row, col)
            .and_then(|d| self.approach_bonus.get(d as usize).copied())
            .unwrap_or(0)
    }
}

impl Evaluator for PieceSquareEvaluator {
    fn name(&self) -> &str {
        "piece-square"
    }

    fn evaluate(&self, position: &Position, game: &GameContext) -> Score {
        if position.is_terminal() {
            return game.terminal_score(position);
        }

        let board = position.board();
        let mut score = 0;

        for row in 0..board.height() {
            for col in 0..board.width() {
                score += match board.cell(row, col) {
                    MAX_GOAL => self.goal_value,
                    MIN_GOAL => -self.goal_value,
                    cell => match piece_owner(cell) {
                        Some(owner) => {
                            owner.sign() * (self.piece_value + self.approach(game, owner, row, col))
                        }
                        None => 0,
                    },
                };
            }
        }

        score * SCORE_SCALE
    }
}
