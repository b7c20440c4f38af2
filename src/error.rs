//! AppleKnights - Error types
//!
//! Failures surfaced by board construction, configuration and the agent
//! entry points. The search itself is infallible.

use thiserror::Error;

use crate::types::{Cell, Side};

/// Errors that can occur in the engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Board with a zero dimension or a cell count that does not match
    #[error("Invalid board dimensions: {width}x{height} with {cells} cells")]
    InvalidDimensions {
        width: usize,
        height: usize,
        cells: usize,
    },

    /// Cell code outside {-2, -1, 0, 1, 2}
    #[error("Invalid cell code {code} at ({row}, {col})")]
    InvalidCell { row: usize, col: usize, code: Cell },

    /// Unknown character in a text layout
    #[error("Invalid layout character {found:?} at ({row}, {col})")]
    InvalidLayout { row: usize, col: usize, found: char },

    /// Position handed to the agent does not match the board fixed at setup
    #[error("Position is {got_width}x{got_height}, engine was set up for {width}x{height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        got_width: usize,
        got_height: usize,
    },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// `select_move` called before `setup` or after `teardown`
    #[error("Engine has not been set up")]
    NotInitialized,

    /// `select_move` called on a finished game
    #[error("Game is already over")]
    GameOver,

    /// The side to move has no piece that can move; this loses the game
    #[error("No legal moves for {side}")]
    NoLegalMoves { side: Side },
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
