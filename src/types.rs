//! AppleKnights - Type definitions and constants
//!
//! This module provides the cell codes used on the board, the two sides,
//! the knight-offset tables and the score constants shared by every
//! component of the engine.

/// Content of a single board square
pub type Cell = i8;

/// Search and evaluation score; positive favors `Side::Max`
pub type Score = i32;

/// Cell codes
pub const EMPTY: Cell = 0;
pub const MAX_PIECE: Cell = 1;
pub const MIN_PIECE: Cell = -1;
pub const MAX_GOAL: Cell = 2;
pub const MIN_GOAL: Cell = -2;

/// Score units per game point. Divisible by every piece count up to ten,
/// so per-piece averages in the evaluator are exact.
pub const SCORE_SCALE: Score = 2520;

/// Bound used for open alpha-beta windows. Far above any reachable score.
pub const INFINITY: Score = 1_000_000_000;

/// Knight displacement as (delta row, delta col)
pub type Offset = (i32, i32);

/// Fixed offset order shared by the move generator and the evaluator
pub const KNIGHT_OFFSETS: [Offset; 8] = [
    (1, -2), (2, -1), (2, 1), (1, 2), (-1, 2), (-2, 1), (-2, -1), (-1, -2),
];

/// Column-increasing offsets first (pieces heading right)
pub const RIGHTWARD_OFFSETS: [Offset; 8] = [
    (1, 2), (2, 1), (-1, 2), (-2, 1), (-1, -2), (-2, -1), (1, -2), (2, -1),
];

/// Column-decreasing offsets first (pieces heading left)
pub const LEFTWARD_OFFSETS: [Offset; 8] = [
    (-1, -2), (-2, -1), (1, -2), (2, -1), (1, 2), (2, 1), (-1, 2), (-2, 1),
];

/// One of the two players
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Side +1, maximizes the score
    Max,
    /// Side -1, minimizes the score
    Min,
}

impl Side {
    /// Build a side from its sign (+1 / -1)
    pub fn from_sign(sign: i32) -> Option<Side> {
        match sign {
            1 => Some(Side::Max),
            -1 => Some(Side::Min),
            _ => None,
        }
    }

    /// +1 for Max, -1 for Min
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Side::Max => 1,
            Side::Min => -1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Max => Side::Min,
            Side::Min => Side::Max,
        }
    }

    /// Cell code of this side's pieces
    #[inline]
    pub fn piece(self) -> Cell {
        match self {
            Side::Max => MAX_PIECE,
            Side::Min => MIN_PIECE,
        }
    }

    /// Cell code of this side's goal square
    #[inline]
    pub fn goal(self) -> Cell {
        match self {
            Side::Max => MAX_GOAL,
            Side::Min => MIN_GOAL,
        }
    }

    /// Array index for per-side tables (Max = 0, Min = 1)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Max => 0,
            Side::Min => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Max => write!(f, "MAX"),
            Side::Min => write!(f, "MIN"),
        }
    }
}

/// Check whether a code is one of the five legal cell values
#[inline]
pub fn is_valid_cell(cell: Cell) -> bool {
    (MIN_GOAL..=MAX_GOAL).contains(&cell)
}

/// Owner of a piece code, `None` for empty squares and goals
#[inline]
pub fn piece_owner(cell: Cell) -> Option<Side> {
    match cell {
        MAX_PIECE => Some(Side::Max),
        MIN_PIECE => Some(Side::Min),
        _ => None,
    }
}

/// Layout character to cell code
pub fn char_to_cell(c: char) -> Option<Cell> {
    match c {
        '.' => Some(EMPTY),
        'H' => Some(MAX_PIECE),
        'h' => Some(MIN_PIECE),
        'A' => Some(MAX_GOAL),
        'a' => Some(MIN_GOAL),
        _ => None,
    }
}

/// Cell code to layout character
pub fn cell_to_char(cell: Cell) -> char {
    match cell {
        MAX_PIECE => 'H',
        MIN_PIECE => 'h',
        MAX_GOAL => 'A',
        MIN_GOAL => 'a',
        _ => '.',
    }
}
