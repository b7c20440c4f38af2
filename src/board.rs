//! AppleKnights - Board Representation Module
//!
//! This module provides the core data structures for representing the
//! game: the fixed-size board, moves and immutable positions. It includes
//! text layout parsing and generation and the state transition that
//! produces a successor position from a move.

use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};
use crate::types::*;

/// Represents a move as start and end squares
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl Move {
    /// Create a new move
    pub fn new(start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> Self {
        Move {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }
}

impl From<(usize, usize, usize, usize)> for Move {
    fn from((start_row, start_col, end_row, end_col): (usize, usize, usize, usize)) -> Self {
        Move::new(start_row, start_col, end_row, end_col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})->({},{})",
            self.start_row, self.start_col, self.end_row, self.end_col
        )
    }
}

/// Fixed-size grid of cell codes, stored row-major
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board from row-major cell codes
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> EngineResult<Self> {
        if width == 0 || height == 0 || cells.len() != width * height {
            return Err(EngineError::InvalidDimensions {
                width,
                height,
                cells: cells.len(),
            });
        }

        if let Some(idx) = cells.iter().position(|&c| !is_valid_cell(c)) {
            return Err(EngineError::InvalidCell {
                row: idx / width,
                col: idx % width,
                code: cells[idx],
            });
        }

        Ok(Board {
            width,
            height,
            cells,
        })
    }

    /// Create a board from nested rows of cell codes
    pub fn from_rows(rows: &[Vec<Cell>]) -> EngineResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != width) {
            return Err(EngineError::InvalidDimensions {
                width,
                height,
                cells: rows.iter().map(|r| r.len()).sum(),
            });
        }
        Board::from_cells(width, height, rows.concat())
    }

    /// Parse a text layout: one line per row, whitespace ignored
    ///
    /// `.` empty, `H`/`h` Max/Min piece, `A`/`a` Max/Min goal.
    pub fn from_layout(layout: &str) -> EngineResult<Self> {
        let mut rows: Vec<Vec<Cell>> = Vec::new();

        for line in layout.lines() {
            let line: String = line.chars().filter(|c| !c.is_whitespace()).collect();
            if line.is_empty() {
                continue;
            }
            let row_idx = rows.len();
            let mut row = Vec::with_capacity(line.len());
            for (col, c) in line.chars().enumerate() {
                match char_to_cell(c) {
                    Some(cell) => row.push(cell),
                    None => {
                        return Err(EngineError::InvalidLayout {
                            row: row_idx,
                            col,
                            found: c,
                        })
                    }
                }
            }
            rows.push(row);
        }

        Board::from_rows(&rows)
    }

    /// Generate the text layout of this board
    pub fn to_layout(&self) -> String {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|&c| cell_to_char(c)).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Flat index of (row, col); caller guarantees bounds
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Check that (row, col) lies on the board
    #[inline]
    pub fn contains_square(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    /// Bounds-checked cell access
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.height && col < self.width {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// Cell at (row, col)
    ///
    /// Panics when the square is off the board.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < self.height && col < self.width,
            "square ({}, {}) is off the {}x{} board",
            row,
            col,
            self.width,
            self.height
        );
        self.cells[self.index(row, col)]
    }

    /// Cell at signed coordinates, `None` when off the board
    #[inline]
    pub fn cell_at(&self, row: i32, col: i32) -> Option<Cell> {
        if self.contains_square(row, col) {
            Some(self.cells[self.index(row as usize, col as usize)])
        } else {
            None
        }
    }

    /// Check whether any square holds `cell`
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Count the squares holding `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Find the first square holding `cell`, scanning row-major
    pub fn find(&self, cell: Cell) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|&c| c == cell)
            .map(|idx| (idx / self.width, idx % self.width))
    }

    /// Board with every code negated (pieces and goals change owner)
    pub fn mirrored(&self) -> Board {
        Board {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|&c| -c).collect(),
        }
    }

    /// Display the board with coordinates
    pub fn display(&self) -> String {
        let mut lines = Vec::with_capacity(self.height + 1);
        let header: String = (0..self.width).map(|c| format!("{:>2}", c % 100)).collect();
        lines.push(format!("   {}", header));

        for (row, cells) in self.cells.chunks(self.width).enumerate() {
            let body: String = cells.iter().map(|&c| format!(" {}", cell_to_char(c))).collect();
            lines.push(format!("{:>2} {}", row, body));
        }

        lines.join("\n")
    }
}

impl FromStr for Board {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_layout(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Immutable game state
///
/// Positions are never changed in place: `apply` always builds a successor
/// with its own copy of the board, so sibling branches of the search tree
/// cannot observe each other.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
    side_to_move: Side,
    moves_remaining: u32,
    is_terminal: bool,
    terminal_points: i32,
}

impl Position {
    /// Create a non-terminal position
    pub fn new(board: Board, side_to_move: Side, moves_remaining: u32) -> Self {
        Position {
            board,
            side_to_move,
            moves_remaining,
            is_terminal: false,
            terminal_points: 0,
        }
    }

    /// Create a position with an explicit terminal status
    pub fn with_outcome(
        board: Board,
        side_to_move: Side,
        moves_remaining: u32,
        terminal_points: Option<i32>,
    ) -> Self {
        Position {
            board,
            side_to_move,
            moves_remaining,
            is_terminal: terminal_points.is_some(),
            terminal_points: terminal_points.unwrap_or(0),
        }
    }

    /// Parse a layout and wrap it in a non-terminal position
    pub fn from_layout(layout: &str, side_to_move: Side, moves_remaining: u32) -> EngineResult<Self> {
        Ok(Position::new(Board::from_layout(layout)?, side_to_move, moves_remaining))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[inline]
    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Signed payoff, meaningful only when terminal (0 for a draw)
    #[inline]
    pub fn terminal_points(&self) -> i32 {
        self.terminal_points
    }

    /// Position with all codes negated and the other side to move
    pub fn mirrored(&self) -> Position {
        Position {
            board: self.board.mirrored(),
            side_to_move: self.side_to_move.opponent(),
            moves_remaining: self.moves_remaining,
            is_terminal: self.is_terminal,
            terminal_points: -self.terminal_points,
        }
    }

    /// Execute a move and return the successor position
    ///
    /// The winner of a finished game is paid `victory_points` plus the
    /// moves still remaining; running out of moves is a draw.
    pub fn apply(&self, mv: &Move, victory_points: i32) -> Position {
        let mover = self.side_to_move;
        let opponent = mover.opponent();
        let target = self.board.cell(mv.end_row, mv.end_col);

        let mut board = self.board.clone();
        let start = board.index(mv.start_row, mv.start_col);
        let end = board.index(mv.end_row, mv.end_col);
        board.cells[start] = EMPTY;
        board.cells[end] = mover.piece();

        let moves_remaining = self.moves_remaining.saturating_sub(1);

        let (is_terminal, terminal_points) =
            if target == opponent.goal() || !board.contains(opponent.piece()) {
                (true, mover.sign() * (victory_points + moves_remaining as i32))
            } else if moves_remaining == 0 {
                (true, 0)
            } else {
                (false, 0)
            };

        Position {
            board,
            side_to_move: opponent,
            moves_remaining,
            is_terminal,
            terminal_points,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(
            f,
            "to move: {}, moves remaining: {}",
            self.side_to_move, self.moves_remaining
        )?;
        if self.is_terminal {
            write!(f, ", game over ({} points)", self.terminal_points)?;
        }
        Ok(())
    }
}
