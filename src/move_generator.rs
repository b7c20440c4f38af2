//! AppleKnights - Move Generator Module
//!
//! This module enumerates the legal knight moves of the side to move and
//! provides the attack/defence counting used by the evaluator.

use crate::board::{Board, Move, Position};
use crate::config::OffsetOrder;
use crate::types::*;

/// Move generator with a fixed offset enumeration order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveGenerator {
    offsets: [Offset; 8],
}

impl MoveGenerator {
    /// Create a move generator using the standard offset order
    pub fn new() -> Self {
        MoveGenerator {
            offsets: KNIGHT_OFFSETS,
        }
    }

    /// Move generator for the configured order as seen by `assigned_side`
    pub fn for_order(order: OffsetOrder, assigned_side: Side) -> Self {
        let offsets = match (order, assigned_side) {
            (OffsetOrder::Standard, _) => KNIGHT_OFFSETS,
            (OffsetOrder::Advancing, Side::Max) => RIGHTWARD_OFFSETS,
            (OffsetOrder::Advancing, Side::Min) => LEFTWARD_OFFSETS,
        };
        MoveGenerator { offsets }
    }

    /// Generate all legal moves for the side to move
    ///
    /// Squares are scanned row-major and offsets are tried in the
    /// generator's order, so the result is deterministic.
    pub fn generate_moves(&self, position: &Position) -> Vec<Move> {
        let board = position.board();
        let side = position.side_to_move();
        let own_piece = side.piece();
        let own_goal = side.goal();
        let mut moves = Vec::with_capacity(16);

        for row in 0..board.height() {
            for col in 0..board.width() {
                if board.cell(row, col) != own_piece {
                    continue;
                }

                for &(dr, dc) in &self.offsets {
                    let (end_row, end_col) = (row as i32 + dr, col as i32 + dc);
                    match board.cell_at(end_row, end_col) {
                        Some(target) if target != own_piece && target != own_goal => {
                            moves.push(Move::new(row, col, end_row as usize, end_col as usize));
                        }
                        _ => {}
                    }
                }
            }
        }

        moves
    }
}

impl Default for MoveGenerator {
    fn default() -> Self {
        MoveGenerator::new()
    }
}

/// Count the pieces of each side one knight move away from (row, col)
///
/// Returns (pieces of `side`, pieces of the opponent).
pub fn count_neighbours(board: &Board, row: usize, col: usize, side: Side) -> (u32, u32) {
    let mut own = 0;
    let mut other = 0;

    for &(dr, dc) in &KNIGHT_OFFSETS {
        match board.cell_at(row as i32 + dr, col as i32 + dc) {
            Some(cell) if cell == side.piece() => own += 1,
            Some(cell) if cell == side.opponent().piece() => other += 1,
            _ => {}
        }
    }

    (own, other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_piece_moves_in_offset_order() {
        let pos = Position::from_layout(
            "
            H . . .
            . . . .
            . . . h
            ",
            Side::Max,
            10,
        )
        .unwrap();

        let moves = MoveGenerator::new().generate_moves(&pos);
        assert_eq!(moves, vec![Move::new(0, 0, 2, 1), Move::new(0, 0, 1, 2)]);

        let rightward = MoveGenerator::for_order(OffsetOrder::Advancing, Side::Max);
        assert_eq!(
            rightward.generate_moves(&pos),
            vec![Move::new(0, 0, 1, 2), Move::new(0, 0, 2, 1)]
        );
    }

    #[test]
    fn test_own_pieces_and_goal_block_moves() {
        let pos = Position::from_layout(
            "
            H . . .
            . . A .
            . H . h
            ",
            Side::Max,
            10,
        )
        .unwrap();

        let moves = MoveGenerator::new().generate_moves(&pos);
        // (0,0) is boxed in by its own goal and its own piece
        assert_eq!(moves, vec![Move::new(2, 1, 1, 3), Move::new(2, 1, 0, 2)]);
    }

    #[test]
    fn test_captures_and_goal_landings_are_legal() {
        let pos = Position::from_layout(
            "
            h . a .
            . . . .
            . H . .
            ",
            Side::Max,
            10,
        )
        .unwrap();

        let moves = MoveGenerator::new().generate_moves(&pos);
        assert_eq!(
            moves,
            vec![
                Move::new(2, 1, 1, 3),
                Move::new(2, 1, 0, 2),
                Move::new(2, 1, 0, 0),
            ]
        );
    }

    #[test]
    fn test_side_without_pieces_has_no_moves() {
        let pos = Position::from_layout("H . a\n. . .\nA . .", Side::Min, 10).unwrap();
        assert!(MoveGenerator::new().generate_moves(&pos).is_empty());
    }

    #[test]
    fn test_count_neighbours() {
        let board = Board::from_layout(
            "
            H . . .
            . . h .
            . H . .
            ",
        )
        .unwrap();

        // (0,0) sees h at (1,2) and H at (2,1)
        assert_eq!(count_neighbours(&board, 0, 0, Side::Max), (1, 1));
        assert_eq!(count_neighbours(&board, 1, 2, Side::Min), (0, 1));
    }
}
