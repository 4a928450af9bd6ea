//! Grid generation

use log::{debug, warn};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    config::GridConfig,
    connectivity::{CheckReport, ConnectivityChecker},
    error::GridError,
    Cell, Coord, Grid,
};

/// Generator for grids with randomly placed obstacles.
///
/// The random source is owned by the generator, so a seeded generator
/// produces the same sequence of grids and retry choices.
pub struct GridGenerator<R = StdRng> {
    config: GridConfig,
    random: R,
}

impl GridGenerator<StdRng> {
    /// Generator seeded with `seed`, or from entropy if `None`
    ///
    /// Returns error, if the configuration is invalid.
    pub fn new(config: GridConfig, seed: Option<u64>) -> Result<Self, GridError> {
        let random = if let Some(state) = seed {
            StdRng::seed_from_u64(state)
        } else {
            StdRng::from_entropy()
        };
        Self::with_rng(config, random)
    }
}

impl<R: Rng> GridGenerator<R> {
    /// Random draws per cell before falling back to enumerating free cells
    const DRAWS_PER_CELL: usize = 8;

    /// Generator using the given random source
    pub fn with_rng(config: GridConfig, random: R) -> Result<Self, GridError> {
        config.validate()?;
        Ok(Self { config, random })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Create a new grid with `obstacles` blocked cells
    ///
    /// Start and goal are never blocked.
    pub fn create_grid(&mut self) -> Grid {
        let mut grid = Grid::empty(self.config.rows, self.config.columns);

        for _ in 0..self.config.obstacles {
            match self.sample_free_cell(&grid) {
                Some(coord) => grid.set(coord, Cell::Blocked),
                // Capacity is validated on construction
                None => break,
            }
        }

        grid.set(self.config.start, Cell::Empty);
        grid.set(self.config.goal, Cell::Empty);

        debug!(
            "Created {}x{} grid with {} obstacles",
            grid.rows(),
            grid.columns(),
            grid.blocked_count()
        );
        grid
    }

    /// Run the connectivity check on `grid` with this generator's settings
    pub fn check(&mut self, grid: &mut Grid) -> Result<CheckReport, GridError> {
        ConnectivityChecker::from_config(&self.config).check(grid, &mut self.random)
    }

    /// Whether the goal is reachable in `grid`, see [Self::check]
    pub fn is_path_available(&mut self, grid: &mut Grid) -> Result<bool, GridError> {
        Ok(self.check(grid)?.is_found())
    }

    /// Create a new grid and run the connectivity check on it
    pub fn create_connected_grid(&mut self) -> Result<(Grid, CheckReport), GridError> {
        let mut grid = self.create_grid();
        let report = self.check(&mut grid)?;
        Ok((grid, report))
    }

    /// Pick a random cell that is neither blocked nor reserved
    ///
    /// Draws uniformly with rejection first. If that keeps hitting taken
    /// cells, chooses among the remaining free cells directly.
    fn sample_free_cell(&mut self, grid: &Grid) -> Option<Coord> {
        let (rows, columns) = (self.config.rows, self.config.columns);

        let draws = rows
            .saturating_mul(columns)
            .saturating_mul(Self::DRAWS_PER_CELL);
        for _ in 0..draws {
            let coord = Coord::new(
                self.random.gen_range(0..rows),
                self.random.gen_range(0..columns),
            );
            if self.is_free(grid, coord) {
                return Some(coord);
            }
        }

        warn!("Rejection sampling gave up, choosing from remaining free cells");
        let free: Vec<Coord> = grid.coords().filter(|c| self.is_free(grid, *c)).collect();
        free.choose(&mut self.random).copied()
    }

    fn is_free(&self, grid: &Grid, coord: Coord) -> bool {
        coord != self.config.start && coord != self.config.goal && !grid.is_blocked(coord)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use crate::{grid_generator::GridGenerator, Cell, Coord, Grid, GridConfig, GridError};

    #[test]
    fn generate_parseable_grid() {
        let mut gen = GridGenerator::new(GridConfig::new(15, 15).with_obstacles(40), Some(0))
            .unwrap();
        let grid = gen.create_grid();

        let parsed = Grid::parse(&grid.to_string(), Grid::BLOCK_MARKER).unwrap();
        assert_eq!(parsed, grid);
    }

    #[test]
    fn same_seed_gives_same_grid() {
        let config = GridConfig::new(8, 12).with_obstacles(30);
        let a = GridGenerator::new(config.clone(), Some(42))
            .unwrap()
            .create_grid();
        let b = GridGenerator::new(config, Some(42)).unwrap().create_grid();
        assert_eq!(a, b);
    }

    #[test]
    fn oversubscribed_grid_is_capacity_error() {
        let config = GridConfig::new(2, 2).with_obstacles(4);
        assert!(matches!(
            GridGenerator::new(config, Some(0)),
            Err(GridError::Capacity {
                requested: 4,
                free: 2
            })
        ));
    }

    #[test]
    fn default_goal_out_of_bounds_is_rejected() {
        let config = GridConfig::default().with_goal(Coord::new(10, 10));
        assert!(GridGenerator::new(config, None).is_err());
    }

    #[test]
    fn blocking_every_free_cell_is_capacity_error() {
        let config = GridConfig::new(3, 3).with_obstacles(7);
        assert!(matches!(
            GridGenerator::new(config, Some(1)),
            Err(GridError::Capacity {
                requested: 7,
                free: 7
            })
        ));
    }

    #[test]
    fn leaves_one_free_cell_open() {
        let config = GridConfig::new(3, 3).with_obstacles(6);
        let grid = GridGenerator::new(config, Some(1)).unwrap().create_grid();

        assert_eq!(grid.blocked_count(), 6);
        assert_eq!(grid[Coord::new(0, 0)], Cell::Empty);
        assert_eq!(grid[Coord::new(2, 2)], Cell::Empty);
    }

    #[test]
    fn single_cell_grid() {
        let config = GridConfig::new(1, 1).with_obstacles(0);
        let mut gen = GridGenerator::new(config, Some(0)).unwrap();
        let (grid, report) = gen.create_connected_grid().unwrap();

        assert_eq!(grid.blocked_count(), 0);
        assert!(report.is_found());
        assert_eq!(report.attempts, 1);
    }

    #[test]
    fn connected_grid_from_defaults() {
        let mut gen = GridGenerator::new(GridConfig::default(), Some(3)).unwrap();
        let (mut grid, report) = gen.create_connected_grid().unwrap();

        // One obstacle cannot separate opposite corners of a 10x10 grid
        assert!(report.is_found());
        assert_eq!(report.attempts, 1);
        assert!(gen.is_path_available(&mut grid).unwrap());
    }

    #[test]
    fn check_clears_obstacles_of_generated_grid() {
        // Dense grid, generous attempt budget
        let config = GridConfig::new(6, 6)
            .with_obstacles(30)
            .with_max_attempts(40);
        let mut gen = GridGenerator::new(config, Some(9)).unwrap();
        let mut grid = gen.create_grid();

        let report = gen.check(&mut grid).unwrap();
        assert!(report.is_found());
        assert_eq!(grid.blocked_count(), 30 - report.cleared.len());
    }

    proptest! {
        /// Start and goal stay open and exactly `obstacles` cells are blocked
        #[test]
        fn obstacles_are_exact_and_avoid_endpoints(
            rows in 1..=8_usize,
            columns in 1..=8_usize,
            fill in 0.0..1.0_f64,
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let start = Coord::new(rng.gen_range(0..rows), rng.gen_range(0..columns));
            let goal = Coord::new(rng.gen_range(0..rows), rng.gen_range(0..columns));
            let mut config = GridConfig::new(rows, columns).with_start(start).with_goal(goal);
            config.obstacles = (fill * config.free_cells() as f64) as usize;

            let grid = GridGenerator::with_rng(config.clone(), rng).unwrap().create_grid();

            prop_assert_eq!(grid[start], Cell::Empty);
            prop_assert_eq!(grid[goal], Cell::Empty);
            prop_assert_eq!(grid.blocked_count(), config.obstacles);
            prop_assert_eq!((grid.rows(), grid.columns()), (rows, columns));
        }
    }
}
