//! AppleKnights - Agent
//!
//! The game-facing surface: `setup` once per game, `select_move` once per
//! turn, `teardown` at the end. Move selection runs iterative deepening
//! over the root children until the deadline passes, the depth limit is
//! reached or a forced result is found.

use std::time::Duration;

use log::{debug, info, warn};

use crate::board::{Move, Position};
use crate::config::{EngineConfig, GameSettings};
use crate::context::GameContext;
use crate::error::{EngineError, EngineResult};
use crate::evaluation::{Evaluator, TacticalEvaluator};
use crate::move_generator::MoveGenerator;
use crate::search::{SearchEngine, SearchStats};
use crate::time_manager::TimeManager;
use crate::types::*;

/// Outcome of one move selection
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: Move,
    /// Score of `best_move`, positive favors `Side::Max`; `None` when no
    /// search round produced one
    pub score: Option<Score>,
    /// Deepest fully completed iterative-deepening round (0 if none)
    pub depth: u32,
    pub timed_out: bool,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

/// Verdict on a round cut short by the deadline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PartialRound {
    /// Newly above the victory threshold
    Winning,
    /// Newly above minus the victory threshold
    Defending,
    Disregarded,
}

/// Judge a partial round against the last kept score, both from the
/// mover's point of view. A missing previous score counts as minus infinity.
fn judge_partial_round(previous: Option<Score>, partial: Option<Score>, threshold: Score) -> PartialRound {
    let before = previous.unwrap_or(-INFINITY);
    match partial {
        Some(score) if before < threshold && score > threshold => PartialRound::Winning,
        Some(score) if before < -threshold && score > -threshold => PartialRound::Defending,
        _ => PartialRound::Disregarded,
    }
}

pub struct Agent<E: Evaluator = TacticalEvaluator> {
    config: EngineConfig,
    evaluator: E,
    game: Option<GameContext>,
    move_generator: MoveGenerator,
}

impl<E: Evaluator> Agent<E> {
    pub fn new(config: EngineConfig, evaluator: E) -> Self {
        Agent {
            config,
            evaluator,
            game: None,
            move_generator: MoveGenerator::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Per-game state, present between `setup` and `teardown`
    pub fn game(&self) -> Option<&GameContext> {
        self.game.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.game.is_some()
    }

    /// Prepare for a new game
    ///
    /// Validates the configuration against the game settings and
    /// precomputes the per-game tables. Calling it again starts over.
    pub fn setup(&mut self, initial: &Position, settings: GameSettings) -> EngineResult<()> {
        let game = GameContext::new(initial, settings, self.config.clone())?;
        self.move_generator = MoveGenerator::for_order(self.config.offset_order, settings.assigned_side);

        debug!(
            "setup: {}x{} board, playing {}, {:?} per move, {} victory points, {} moves, {} evaluator",
            game.width,
            game.height,
            settings.assigned_side,
            settings.time_limit,
            settings.victory_points,
            settings.move_limit,
            self.evaluator.name()
        );
        debug!(
            "goal distances computed: MAX goal {}, MIN goal {}",
            game.goals.has_goal(Side::Max),
            game.goals.has_goal(Side::Min)
        );

        self.game = Some(game);
        Ok(())
    }

    /// Choose a move for the side to move in `position`
    pub fn select_move(&mut self, position: &Position) -> EngineResult<SearchReport> {
        let game = self.game.as_ref().ok_or(EngineError::NotInitialized)?;
        game.check_dimensions(position)?;
        if position.is_terminal() {
            return Err(EngineError::GameOver);
        }

        let clock = TimeManager::start(game.settings.time_limit, game.config.node_budget);
        let mut engine = SearchEngine::new(game, &self.evaluator, &self.move_generator, &clock);

        let mover = position.side_to_move();
        let fallback = match self.move_generator.generate_moves(position).first() {
            Some(&mv) => mv,
            None => return Err(EngineError::NoLegalMoves { side: mover }),
        };
        let children = engine.order_children(position);
        let threshold = game.victory_threshold();

        // Scores below are from the mover's point of view
        let mut favored_move = fallback;
        let mut favored_score: Option<Score> = None;
        let mut completed_depth = 0;
        let mut timed_out = false;

        for depth in game.config.min_depth..=game.config.max_depth {
            if engine.timed_out() {
                timed_out = true;
                warn!("timeout: depth {} not started", depth);
                break;
            }

            let mut alpha = -INFINITY;
            let mut beta = INFINITY;
            let mut round: Option<(Move, Score)> = None;

            // Root children always sort their own replies
            for child in &children {
                let score = engine.look_ahead_ordered(&child.position, depth - 1, alpha, beta);
                if engine.timed_out() {
                    timed_out = true;
                    break;
                }

                match mover {
                    Side::Max if score > alpha => {
                        alpha = score;
                        round = Some((child.mv, score));
                    }
                    Side::Min if score < beta => {
                        beta = score;
                        round = Some((child.mv, -score));
                    }
                    _ => {}
                }
            }

            if timed_out {
                let verdict = judge_partial_round(favored_score, round.map(|(_, score)| score), threshold);
                match (round, verdict) {
                    (Some((mv, score)), PartialRound::Winning) => {
                        info!("timeout: depth {} incomplete but found winning move {}", depth, mv);
                        favored_move = mv;
                        favored_score = Some(score);
                    }
                    (Some((mv, score)), PartialRound::Defending) => {
                        info!("timeout: depth {} incomplete but found defending move {}", depth, mv);
                        favored_move = mv;
                        favored_score = Some(score);
                    }
                    _ => warn!("timeout: depth {} incomplete and disregarded", depth),
                }
                break;
            }

            if let Some((mv, score)) = round {
                favored_move = mv;
                favored_score = Some(score);
            }
            completed_depth = depth;

            let stats = engine.stats();
            info!(
                "depth {} finished at {:.4} s, {} evals, {} leaves, favored move {}, score = {}",
                depth,
                clock.elapsed().as_secs_f64(),
                stats.evaluations,
                stats.leaves,
                favored_move,
                favored_score.unwrap_or(0)
            );

            if favored_score.map_or(false, |s| s.abs() > threshold) {
                break;
            }
        }

        Ok(SearchReport {
            best_move: favored_move,
            score: favored_score.map(|s| mover.sign() * s),
            depth: completed_depth,
            timed_out,
            stats: engine.stats(),
            elapsed: clock.elapsed(),
        })
    }

    /// Release per-game state; safe to call more than once
    pub fn teardown(&mut self) {
        if self.game.take().is_some() {
            debug!("teardown: game state released");
        }
    }
}

impl Default for Agent<TacticalEvaluator> {
    fn default() -> Self {
        Agent::new(EngineConfig::default(), TacticalEvaluator::default())
    }
}
