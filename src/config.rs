//! AppleKnights - Engine configuration
//!
//! `GameSettings` carries the per-game arguments handed over at setup.
//! `EngineConfig` carries the search tuning; both are immutable once the
//! agent is set up and are threaded through every component.

use std::time::Duration;

use crate::error::{EngineError, EngineResult};
use crate::types::{Score, Side, SCORE_SCALE};

/// Default search bounds
pub const DEFAULT_MIN_DEPTH: u32 = 3;
pub const DEFAULT_MAX_DEPTH: u32 = 20;
pub const DEFAULT_ORDERING_MIN_DEPTH: u32 = 3;

/// Multiplier applied to realized payoffs (10 points per payoff point)
pub const DEFAULT_POINT_MULTIPLIER: Score = 10 * SCORE_SCALE;

/// Scores beyond this magnitude mean a forced win or loss (1000 points)
pub const DEFAULT_VICTORY_SCORE_THRESHOLD: Score = 1000 * SCORE_SCALE;

/// Knight-offset enumeration order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OffsetOrder {
    /// One fixed order for both sides
    #[default]
    Standard,
    /// Offsets heading towards the opponent's half first (rightward for an
    /// agent playing Max, leftward for Min)
    Advancing,
}

/// Arguments of a game, fixed at setup
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameSettings {
    /// Thinking time per move
    pub time_limit: Duration,
    /// Points paid to the winner on top of the moves remaining
    pub victory_points: i32,
    /// Total number of moves in a game
    pub move_limit: u32,
    /// Side played by this agent
    pub assigned_side: Side,
}

impl GameSettings {
    /// Build settings from a time limit in (fractional) seconds
    pub fn new(time_limit_seconds: f64, victory_points: i32, move_limit: u32, assigned_side: Side) -> Self {
        let time_limit = if time_limit_seconds.is_nan() {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64(time_limit_seconds.max(0.0)).unwrap_or(Duration::MAX)
        };
        GameSettings {
            time_limit,
            victory_points,
            move_limit,
            assigned_side,
        }
    }
}

/// Search tuning
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// First iterative-deepening depth (plies)
    pub min_depth: u32,
    /// Last iterative-deepening depth (plies)
    pub max_depth: u32,
    /// Children are visited best-first when their remaining depth is at
    /// least this value
    pub ordering_min_depth: u32,
    pub point_multiplier: Score,
    pub victory_score_threshold: Score,
    pub offset_order: OffsetOrder,
    /// Alpha-beta cutoffs; disabling gives a full-width minimax
    pub pruning: bool,
    /// Extra deterministic cut-off: the deadline also passes after this many
    /// time polls
    pub node_budget: Option<u64>,
}

impl EngineConfig {
    pub fn with_depths(mut self, min_depth: u32, max_depth: u32) -> Self {
        self.min_depth = min_depth;
        self.max_depth = max_depth;
        self
    }

    pub fn with_ordering_min_depth(mut self, depth: u32) -> Self {
        self.ordering_min_depth = depth;
        self
    }

    pub fn with_point_multiplier(mut self, multiplier: Score) -> Self {
        self.point_multiplier = multiplier;
        self
    }

    pub fn with_victory_score_threshold(mut self, threshold: Score) -> Self {
        self.victory_score_threshold = threshold;
        self
    }

    pub fn with_offset_order(mut self, order: OffsetOrder) -> Self {
        self.offset_order = order;
        self
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_node_budget(mut self, budget: Option<u64>) -> Self {
        self.node_budget = budget;
        self
    }

    /// Check the tuning on its own
    pub fn validate(&self) -> EngineResult<()> {
        if self.min_depth == 0 {
            return Err(invalid("min_depth must be at least 1"));
        }
        if self.min_depth > self.max_depth {
            return Err(invalid(format!(
                "min_depth {} exceeds max_depth {}",
                self.min_depth, self.max_depth
            )));
        }
        if self.point_multiplier <= 0 {
            return Err(invalid("point_multiplier must be positive"));
        }
        if self.victory_score_threshold <= 0 {
            return Err(invalid("victory_score_threshold must be positive"));
        }
        Ok(())
    }

    /// Check the tuning against the settings of a game
    ///
    /// The smallest realized win, `point_multiplier * victory_points`, must
    /// clear the victory threshold.
    pub fn validate_for(&self, settings: &GameSettings) -> EngineResult<()> {
        self.validate()?;

        if settings.victory_points <= 0 {
            return Err(invalid("victory_points must be positive"));
        }
        let smallest_win = (self.point_multiplier as i64) * (settings.victory_points as i64);
        if smallest_win <= self.victory_score_threshold as i64 {
            return Err(invalid(format!(
                "a win scores {} which does not exceed the victory threshold {}",
                smallest_win, self.victory_score_threshold
            )));
        }
        if smallest_win + (self.point_multiplier as i64) * (settings.move_limit as i64) >= Score::MAX as i64 / 4 {
            return Err(invalid("victory_points and move_limit overflow the score range"));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            min_depth: DEFAULT_MIN_DEPTH,
            max_depth: DEFAULT_MAX_DEPTH,
            ordering_min_depth: DEFAULT_ORDERING_MIN_DEPTH,
            point_multiplier: DEFAULT_POINT_MULTIPLIER,
            victory_score_threshold: DEFAULT_VICTORY_SCORE_THRESHOLD,
            offset_order: OffsetOrder::Standard,
            pruning: true,
            node_budget: None,
        }
    }
}

fn invalid(reason: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        reason: reason.into(),
    }
}
