//! AppleKnights - Knights and Apples Game Engine
//!
//! A move-selection engine for a two-player knight-movement game on a
//! rectangular board. Each side owns knights and one goal square; a side
//! wins by landing on the opponent's goal or capturing the opponent's last
//! knight, and the game is drawn when the move limit runs out.
//!
//! Engine features:
//! - Immutable positions with copy-on-move state transition
//! - Pluggable static evaluation (tactical and piece-square evaluators)
//! - Fail-soft alpha-beta search with static move ordering
//! - Iterative deepening under a per-move deadline
//!
//! ```no_run
//! use apple_knights::{Agent, GameSettings, Position, Side};
//!
//! let start = Position::from_layout(
//!     "
//!     H . . . a
//!     . . . . .
//!     A . . . h
//!     ",
//!     Side::Max,
//!     40,
//! )?;
//! let mut agent = Agent::default();
//! agent.setup(&start, GameSettings::new(1.0, 200, 40, Side::Max))?;
//! let report = agent.select_move(&start)?;
//! println!("{} (score {:?})", report.best_move, report.score);
//! agent.teardown();
//! # Ok::<(), apple_knights::EngineError>(())
//! ```

pub mod types;
pub mod error;
pub mod board;
pub mod move_generator;
pub mod tables;
pub mod config;
pub mod context;
pub mod evaluation;
pub mod time_manager;
pub mod search;
pub mod agent;

pub use agent::{Agent, SearchReport};
pub use board::{Board, Move, Position};
pub use config::{EngineConfig, GameSettings, OffsetOrder};
pub use context::GameContext;
pub use error::{EngineError, EngineResult};
pub use evaluation::{Evaluator, PieceSquareEvaluator, TacticalEvaluator};
pub use move_generator::MoveGenerator;
pub use search::{SearchEngine, SearchStats};
pub use time_manager::TimeManager;
pub use types::{Cell, Score, Side};
