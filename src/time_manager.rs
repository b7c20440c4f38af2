//! AppleKnights - Time Manager
//!
//! Per-move deadline. The clock is started once at the beginning of a
//! move selection and polled by every search call; once the deadline has
//! been observed it stays expired for the rest of the selection.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Deadline of one move selection
#[derive(Debug)]
pub struct TimeManager {
    start_time: Instant,
    time_limit: Duration,
    /// Optional cap on the number of polls, for reproducible cut-offs
    poll_budget: Option<u64>,
    polls: Cell<u64>,
    expired: Cell<bool>,
}

impl TimeManager {
    /// Start the clock
    pub fn start(time_limit: Duration, poll_budget: Option<u64>) -> Self {
        TimeManager {
            start_time: Instant::now(),
            time_limit,
            poll_budget,
            polls: Cell::new(0),
            expired: Cell::new(false),
        }
    }

    /// Whether the deadline has passed
    pub fn is_expired(&self) -> bool {
        if self.expired.get() {
            return true;
        }

        let polls = self.polls.get() + 1;
        self.polls.set(polls);

        let over_budget = self.poll_budget.map_or(false, |budget| polls > budget);
        if over_budget || self.start_time.elapsed() >= self.time_limit {
            self.expired.set(true);
        }
        self.expired.get()
    }

    // How long we've been thinking
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Number of times the deadline has been checked
    pub fn polls(&self) -> u64 {
        self.polls.get()
    }
}
