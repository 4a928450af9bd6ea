//! Reachability check with obstacle-clearing retries
//!
//! The goal is searched from the start with a breadth-first search over
//! 4-connected empty cells. When the search fails, one obstacle bordering
//! the region reachable from the start is removed and the search repeated.
//! Every such removal grows the reachable region by at least one cell, so
//! the loop makes progress on each retry.
//!
//! The time budget is polled before each attempt; a search that has
//! started always runs to completion.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::{seq::SliceRandom, Rng};

use crate::{config::GridConfig, error::GridError, Cell, Coord, Grid};

/// Verifies that the goal can be reached from the start
#[derive(Clone, Debug)]
pub struct ConnectivityChecker {
    start: Coord,
    goal: Coord,
    max_attempts: usize,
    time_budget: Duration,
}

/// Result of a connectivity check
#[derive(Clone, Debug)]
pub struct CheckReport {
    /// Number of searches that were run
    pub attempts: usize,
    /// Obstacles removed between attempts, in removal order
    pub cleared: Vec<Coord>,
    /// How the check ended
    pub ending: CheckEnding,
}

/// How the check ended
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum CheckEnding {
    /// Goal reached
    Found,
    /// Every attempt failed to reach the goal
    AttemptsExhausted,
    /// Time budget ran out before the goal was reached
    TimedOut,
}

/// Outcome of a single breadth-first search
struct Search {
    found: bool,
    /// Cells reached from the start
    visited: Vec<Vec<bool>>,
}

impl ConnectivityChecker {
    /// Checker with the default attempt and time budgets
    pub fn new(start: Coord, goal: Coord) -> Self {
        Self {
            start,
            goal,
            max_attempts: GridConfig::DEFAULT_MAX_ATTEMPTS,
            time_budget: GridConfig::DEFAULT_TIME_BUDGET,
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            start: config.start,
            goal: config.goal,
            max_attempts: config.max_attempts,
            time_budget: config.time_budget,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    /// Whether the goal is reachable, clearing obstacles if necessary
    ///
    /// Changes made to `grid` remain visible after the call.
    pub fn is_path_available<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Result<bool, GridError> {
        Ok(self.check(grid, rng)?.is_found())
    }

    /// Search for the goal, clearing one obstacle after each failed attempt
    ///
    /// ## Arguments
    /// - `grid`: Grid to search. Cleared obstacles are written back.
    /// - `rng`: Source for choosing which obstacle to clear.
    ///
    /// Returns error, if start or goal is outside of `grid` or no attempts
    /// are allowed. An unreachable goal is reported through
    /// [CheckReport::ending].
    pub fn check<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Result<CheckReport, GridError> {
        if self.max_attempts == 0 {
            return Err(GridError::InvalidAttemptBudget);
        }
        for (what, coord) in [("Start", self.start), ("Goal", self.goal)] {
            if !grid.contains(coord) {
                return Err(GridError::OutOfBounds {
                    what,
                    coord,
                    rows: grid.rows(),
                    columns: grid.columns(),
                });
            }
        }

        let started = Instant::now();
        Ok(self.retry_until_found(grid, rng, || started.elapsed()))
    }

    /// Retry loop of [Self::check], polling `elapsed` before each attempt
    fn retry_until_found<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        rng: &mut R,
        mut elapsed: impl FnMut() -> Duration,
    ) -> CheckReport {
        let mut attempts = 0;
        let mut cleared = Vec::new();

        let ending = loop {
            if elapsed() > self.time_budget {
                warn!(
                    "Time budget of {:?} exhausted after {} attempts",
                    self.time_budget, attempts
                );
                break CheckEnding::TimedOut;
            }

            attempts += 1;
            let search = breadth_first_search(grid, self.start, self.goal);
            debug!(
                "Attempt {}: goal {} {}",
                attempts,
                self.goal,
                if search.found { "reached" } else { "not reached" }
            );

            if search.found {
                break CheckEnding::Found;
            }
            if attempts >= self.max_attempts {
                break CheckEnding::AttemptsExhausted;
            }

            match Self::clear_obstacle(grid, &search, rng) {
                Some(coord) => {
                    debug!("Cleared obstacle at {}", coord);
                    cleared.push(coord);
                }
                // Only possible if the reachable region is walled in by
                // grid edges alone, which a failed search rules out
                None => break CheckEnding::AttemptsExhausted,
            }
        };

        info!(
            "Connectivity check {} -> {} ended with {:?} after {} attempts",
            self.start, self.goal, ending, attempts
        );
        CheckReport {
            attempts,
            cleared,
            ending,
        }
    }

    /// Remove a random obstacle adjacent to the region reached by `search`
    fn clear_obstacle<R: Rng + ?Sized>(
        grid: &mut Grid,
        search: &Search,
        rng: &mut R,
    ) -> Option<Coord> {
        let frontier: Vec<Coord> = grid
            .blocked_cells()
            .into_iter()
            .filter(|c| grid.neighbors(*c).any(|n| search.visited[n.row][n.column]))
            .collect();

        let coord = *frontier.choose(rng)?;
        grid.set(coord, Cell::Empty);
        Some(coord)
    }
}

impl CheckReport {
    pub fn is_found(&self) -> bool {
        self.ending == CheckEnding::Found
    }

    /// Print report
    pub fn print_report(&self) {
        match self.ending {
            CheckEnding::Found => println!(
                "Path found after {} attempts, {} obstacles cleared.",
                self.attempts,
                self.cleared.len()
            ),
            CheckEnding::AttemptsExhausted => {
                println!("No path found in {} attempts.", self.attempts)
            }
            CheckEnding::TimedOut => {
                println!("No path found before the time budget ran out.")
            }
        }
    }
}

/// Whether `to` can be reached from `from` without modifying the grid
///
/// Coordinates outside of the grid are never reachable.
pub fn is_reachable(grid: &Grid, from: Coord, to: Coord) -> bool {
    grid.contains(from) && grid.contains(to) && breadth_first_search(grid, from, to).found
}

/// Breadth-first search over empty cells, 4-connected
///
/// Every cell is enqueued at most once. The start cell itself is not checked
/// for obstacles.
fn breadth_first_search(grid: &Grid, start: Coord, goal: Coord) -> Search {
    let mut visited = vec![vec![false; grid.columns()]; grid.rows()];
    visited[start.row][start.column] = true;

    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        if pos == goal {
            return Search {
                found: true,
                visited,
            };
        }

        for next in grid.neighbors(pos) {
            if !visited[next.row][next.column] && !grid.is_blocked(next) {
                visited[next.row][next.column] = true;
                queue.push_back(next);
            }
        }
    }

    Search {
        found: false,
        visited,
    }
}
