//! AppleKnights - Search Engine Module
//!
//! This module implements the game-tree search:
//! - Fail-soft minimax with alpha-beta pruning
//! - Static move ordering (children visited best-first by evaluation)
//! - Deadline polling on every call
//!
//! Scores are absolute: positive favors `Side::Max`. A search call that
//! finds the deadline passed returns 0; callers must check the clock
//! before trusting any result.

use crate::board::{Move, Position};
use crate::context::GameContext;
use crate::evaluation::Evaluator;
use crate::move_generator::MoveGenerator;
use crate::time_manager::TimeManager;
use crate::types::*;

/// Counters of one move selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search calls that did real work
    pub nodes: u64,
    /// Static evaluator invocations
    pub evaluations: u64,
    /// Nodes scored without expansion
    pub leaves: u64,
    /// Alpha-beta cut-offs
    pub cutoffs: u64,
    /// Deadline checks
    pub polls: u64,
}

/// Successor of a position with its static score
#[derive(Clone, Debug)]
pub struct Child {
    pub mv: Move,
    pub position: Position,
    pub static_score: Score,
}

pub struct SearchEngine<'a, E: Evaluator + ?Sized> {
    game: &'a GameContext,
    evaluator: &'a E,
    move_generator: &'a MoveGenerator,
    clock: &'a TimeManager,
    stats: SearchStats,
}

impl<'a, E: Evaluator + ?Sized> SearchEngine<'a, E> {
    pub fn new(
        game: &'a GameContext,
        evaluator: &'a E,
        move_generator: &'a MoveGenerator,
        clock: &'a TimeManager,
    ) -> Self {
        SearchEngine {
            game,
            evaluator,
            move_generator,
            clock,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            polls: self.clock.polls(),
            ..self.stats
        }
    }

    /// Poll the deadline
    #[inline]
    pub fn timed_out(&self) -> bool {
        self.clock.is_expired()
    }

    /// Static score; terminal positions score their realized payoff
    fn score_position(&mut self, position: &Position) -> Score {
        if position.is_terminal() {
            return self.game.terminal_score(position);
        }
        self.stats.evaluations += 1;
        self.evaluator.evaluate(position, self.game)
    }

    /// All successors of `position`, best-first for its side to move
    ///
    /// The sort is stable, so equally scored children keep generator order.
    pub fn order_children(&mut self, position: &Position) -> Vec<Child> {
        let mover = position.side_to_move();
        let victory_points = self.game.victory_points();
        let moves = self.move_generator.generate_moves(position);

        let mut children = Vec::with_capacity(moves.len());
        for mv in moves {
            let child = position.apply(&mv, victory_points);
            let static_score = self.score_position(&child);
            children.push(Child {
                mv,
                position: child,
                static_score,
            });
        }

        children.sort_by_key(|c| -mover.sign() * c.static_score);
        children
    }

    /// Search a position `depth` plies deep, ordering children when the
    /// depth is large enough to pay for it
    pub fn search(&mut self, position: &Position, depth: u32, alpha: Score, beta: Score) -> Score {
        if depth >= self.game.config.ordering_min_depth {
            self.look_ahead_ordered(position, depth, alpha, beta)
        } else {
            self.look_ahead(position, depth, alpha, beta)
        }
    }

    /// Alpha-beta over children in generator order
    pub fn look_ahead(&mut self, position: &Position, depth: u32, mut alpha: Score, mut beta: Score) -> Score {
        if self.clock.is_expired() {
            return 0;
        }
        self.stats.nodes += 1;

        if depth == 0 || position.is_terminal() {
            self.stats.leaves += 1;
            return self.score_position(position);
        }

        let moves = self.move_generator.generate_moves(position);
        if moves.is_empty() {
            self.stats.leaves += 1;
            return self.game.stalemate_score(position);
        }

        let side = position.side_to_move();
        let victory_points = self.game.victory_points();
        let mut best = -side.sign() * INFINITY;

        for mv in &moves {
            let child = position.apply(mv, victory_points);
            let score = self.look_ahead(&child, depth - 1, alpha, beta);

            if self.update_window(side, score, &mut best, &mut alpha, &mut beta) {
                break;
            }
        }

        best
    }

    /// Alpha-beta over children sorted by their static scores
    pub fn look_ahead_ordered(&mut self, position: &Position, depth: u32, mut alpha: Score, mut beta: Score) -> Score {
        if self.clock.is_expired() {
            return 0;
        }
        self.stats.nodes += 1;

        if depth == 0 || position.is_terminal() {
            self.stats.leaves += 1;
            return self.score_position(position);
        }

        let children = self.order_children(position);
        let Some(first) = children.first() else {
            self.stats.leaves += 1;
            return self.game.stalemate_score(position);
        };

        // Children are already scored; the best of them is the answer
        if depth == 1 {
            self.stats.leaves += children.len() as u64;
            return first.static_score;
        }

        let side = position.side_to_move();
        let mut best = -side.sign() * INFINITY;

        for child in &children {
            let score = self.search(&child.position, depth - 1, alpha, beta);

            if self.update_window(side, score, &mut best, &mut alpha, &mut beta) {
                break;
            }
        }

        best
    }

    /// Fold a child score into the node; returns true on a cut-off
    #[inline]
    fn update_window(&mut self, side: Side, score: Score, best: &mut Score, alpha: &mut Score, beta: &mut Score) -> bool {
        match side {
            Side::Max => {
                *best = (*best).max(score);
                *alpha = (*alpha).max(score);
            }
            Side::Min => {
                *best = (*best).min(score);
                *beta = (*beta).min(score);
            }
        }

        if self.game.config.pruning && *alpha >= *beta {
            self.stats.cutoffs += 1;
            return true;
        }
        false
    }
}
