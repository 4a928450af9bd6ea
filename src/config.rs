//! Generator and checker configuration

use std::time::Duration;

use crate::{error::GridError, Coord};

/// Parameters for grid generation and the connectivity check.
///
/// Held immutable for the lifetime of a
/// [GridGenerator](crate::grid_generator::GridGenerator).
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    pub rows: usize,
    pub columns: usize,
    /// Number of cells to block
    pub obstacles: usize,
    pub start: Coord,
    pub goal: Coord,
    /// Search attempts before the check gives up
    pub max_attempts: usize,
    /// Wall-clock allowance for the whole retry loop
    pub time_budget: Duration,
}

impl GridConfig {
    pub const DEFAULT_MAX_ATTEMPTS: usize = 5;
    pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(5);

    /// Configuration for a `rows` x `columns` grid, goal in the far corner
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            obstacles: 1,
            start: Coord::new(0, 0),
            goal: Coord::new(rows.saturating_sub(1), columns.saturating_sub(1)),
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            time_budget: Self::DEFAULT_TIME_BUDGET,
        }
    }

    pub fn with_obstacles(mut self, obstacles: usize) -> Self {
        self.obstacles = obstacles;
        self
    }

    pub fn with_start(mut self, start: Coord) -> Self {
        self.start = start;
        self
    }

    pub fn with_goal(mut self, goal: Coord) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }

    /// Cells that obstacles may occupy, i.e. everything except start & goal
    pub fn free_cells(&self) -> usize {
        let reserved = if self.start == self.goal { 1 } else { 2 };
        self.rows.saturating_mul(self.columns).saturating_sub(reserved)
    }

    /// Check dimensions, start/goal bounds, obstacle capacity and attempt budget
    ///
    /// Obstacles must leave at least one free cell open, so any non-zero
    /// count has to stay below [Self::free_cells].
    pub fn validate(&self) -> Result<(), GridError> {
        if self.rows == 0
            || self.columns == 0
            || self.rows.checked_mul(self.columns).is_none()
        {
            return Err(GridError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        for (what, coord) in [("Start", self.start), ("Goal", self.goal)] {
            if !coord.is_within(self.rows, self.columns) {
                return Err(GridError::OutOfBounds {
                    what,
                    coord,
                    rows: self.rows,
                    columns: self.columns,
                });
            }
        }
        if self.obstacles > 0 && self.obstacles >= self.free_cells() {
            return Err(GridError::Capacity {
                requested: self.obstacles,
                free: self.free_cells(),
            });
        }
        if self.max_attempts == 0 {
            return Err(GridError::InvalidAttemptBudget);
        }
        Ok(())
    }
}

impl Default for GridConfig {
    /// 10x10 grid, one obstacle, from (0, 0) to (9, 9)
    fn default() -> Self {
        Self::new(10, 10)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{config::GridConfig, error::GridError, Coord};

    #[test]
    fn default_goal_is_in_bounds() {
        let config = GridConfig::default();
        assert_eq!(config.rows, 10);
        assert_eq!(config.columns, 10);
        assert_eq!(config.obstacles, 1);
        assert_eq!(config.start, Coord::new(0, 0));
        assert_eq!(config.goal, Coord::new(9, 9));
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.time_budget, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn goal_outside_grid_is_rejected() {
        let config = GridConfig::default().with_goal(Coord::new(10, 10));
        assert!(matches!(
            config.validate(),
            Err(GridError::OutOfBounds { what: "Goal", .. })
        ));
    }

    #[test]
    fn start_outside_grid_is_rejected() {
        let config = GridConfig::new(3, 3).with_start(Coord::new(0, 3));
        assert!(matches!(
            config.validate(),
            Err(GridError::OutOfBounds { what: "Start", .. })
        ));
    }

    #[test]
    fn empty_dimensions_are_rejected() {
        assert!(matches!(
            GridConfig::new(0, 4).validate(),
            Err(GridError::InvalidDimensions { rows: 0, columns: 4 })
        ));
    }

    #[test]
    fn free_cells_counts_shared_start_goal_once() {
        assert_eq!(GridConfig::new(2, 2).free_cells(), 2);
        let config = GridConfig::new(2, 2).with_goal(Coord::new(0, 0));
        assert_eq!(config.free_cells(), 3);
    }

    #[test]
    fn oversubscribed_obstacles_are_rejected() {
        let config = GridConfig::new(2, 2).with_obstacles(4);
        assert!(matches!(
            config.validate(),
            Err(GridError::Capacity {
                requested: 4,
                free: 2
            })
        ));
    }

    #[test]
    fn obstacles_must_leave_a_free_cell() {
        let full = GridConfig::new(2, 2).with_obstacles(2);
        assert!(matches!(
            full.validate(),
            Err(GridError::Capacity {
                requested: 2,
                free: 2
            })
        ));
        assert!(GridConfig::new(2, 2).with_obstacles(1).validate().is_ok());
    }

    #[test]
    fn single_cell_without_obstacles_is_valid() {
        let config = GridConfig::new(1, 1).with_obstacles(0);
        assert_eq!(config.free_cells(), 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        let config = GridConfig::new(usize::MAX, 2);
        assert_eq!(config.free_cells(), usize::MAX - 2);
        assert!(matches!(
            config.validate(),
            Err(GridError::InvalidDimensions { columns: 2, .. })
        ));
    }

    #[test]
    fn zero_attempts_are_rejected() {
        let config = GridConfig::new(2, 2).with_max_attempts(0);
        assert!(matches!(
            config.validate(),
            Err(GridError::InvalidAttemptBudget)
        ));
    }
}
