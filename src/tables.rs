//! AppleKnights - Precomputed Tables Module
//!
//! Per-game lookup tables built once at setup:
//! - knight-move distance from every square to each goal square
//! - positional bonus of every square for each side

use std::collections::VecDeque;

use crate::board::Board;
use crate::types::*;

// ============================================================================
// CONSTANTS - Positional bonuses
// ============================================================================

/// Bonus for standing close to the own goal, indexed by knight distance
pub const DEFENSE_BONUS: [i32; 4] = [0, 2, 2, 0];

/// Bonus for standing close to the opponent's goal, indexed by knight distance
pub const ATTACK_BONUS: [i32; 4] = [0, 6, 3, 1];

/// Edge distance beyond which a square counts as fully central
const CENTRALITY_CAP: usize = 2;

// ============================================================================
// DISTANCE MAP
// ============================================================================

/// Knight-move distance from every square to one target square
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceMap {
    width: usize,
    distances: Vec<Option<u32>>,
}

impl DistanceMap {
    /// Breadth-first search over the knight graph from (row, col)
    ///
    /// Squares the target cannot reach keep no distance.
    pub fn from_square(width: usize, height: usize, row: usize, col: usize) -> Self {
        let mut distances = vec![None; width * height];
        let mut queue = VecDeque::with_capacity(width * height);

        distances[row * width + col] = Some(0);
        queue.push_back((row, col));

        while let Some((r, c)) = queue.pop_front() {
            let next = distances[r * width + c].map_or(0, |d| d + 1);

            for &(dr, dc) in &KNIGHT_OFFSETS {
                let (nr, nc) = (r as i32 + dr, c as i32 + dc);
                if nr < 0 || nc < 0 || nr as usize >= height || nc as usize >= width {
                    continue;
                }
                let idx = nr as usize * width + nc as usize;
                if distances[idx].is_none() {
                    distances[idx] = Some(next);
                    queue.push_back((nr as usize, nc as usize));
                }
            }
        }

        DistanceMap { width, distances }
    }

    /// Distance from (row, col) to the target, `None` if unreachable
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.distances.get(row * self.width + col).copied().flatten()
    }
}

// ============================================================================
// GOAL DISTANCES
// ============================================================================

/// Distance maps towards each side's goal square
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct GoalDistances {
    maps: [Option<DistanceMap>; 2],
}

impl GoalDistances {
    /// Build the maps from the goal squares found on `board`
    pub fn new(board: &Board) -> Self {
        let map_for = |side: Side| {
            board
                .find(side.goal())
                .map(|(row, col)| DistanceMap::from_square(board.width(), board.height(), row, col))
        };

        GoalDistances {
            maps: [map_for(Side::Max), map_for(Side::Min)],
        }
    }

    /// Knight distance from (row, col) to the goal owned by `owner`
    #[inline]
    pub fn to_goal(&self, owner: Side, row: usize, col: usize) -> Option<u32> {
        self.maps[owner.index()].as_ref().and_then(|m| m.get(row, col))
    }

    /// Whether `owner` had a goal square on the setup board
    pub fn has_goal(&self, owner: Side) -> bool {
        self.maps[owner.index()].is_some()
    }
}

// ============================================================================
// POSITIONAL TABLE
// ============================================================================

/// Per-square positional bonus for each side
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionalTable {
    width: usize,
    scores: [Vec<i32>; 2],
}

impl PositionalTable {
    /// Centrality plus defence and attack bonuses near the goals
    pub fn new(width: usize, height: usize, goals: &GoalDistances) -> Self {
        let mut scores = [vec![0; width * height], vec![0; width * height]];

        for row in 0..height {
            for col in 0..width {
                let edge_row = row.min(height - 1 - row);
                let edge_col = col.min(width - 1 - col);
                let centrality = (edge_row.min(CENTRALITY_CAP) + edge_col.min(CENTRALITY_CAP)) as i32;

                for side in [Side::Max, Side::Min] {
                    let mut score = centrality;
                    if let Some(d) = goals.to_goal(side, row, col) {
                        score += DEFENSE_BONUS.get(d as usize).copied().unwrap_or(0);
                    }
                    if let Some(d) = goals.to_goal(side.opponent(), row, col) {
                        score += ATTACK_BONUS.get(d as usize).copied().unwrap_or(0);
                    }
                    scores[side.index()][row * width + col] = score;
                }
            }
        }

        PositionalTable { width, scores }
    }

    /// Bonus for a piece of `side` standing on (row, col)
    #[inline]
    pub fn get(&self, side: Side, row: usize, col: usize) -> i32 {
        self.scores[side.index()][row * self.width + col]
    }
}
