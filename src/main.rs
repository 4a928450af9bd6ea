//! CLI for checking a fixed grid

use std::{
    io::{self, Read},
    path::PathBuf,
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use grid_scenario::{connectivity::ConnectivityChecker, Coord, Grid, GridConfig};
use rand::{rngs::StdRng, SeedableRng};

/// Check that a grid has a path from start to goal, clearing obstacles if not
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Start cell as `row,column`
    #[arg(short, long, default_value = "0,0")]
    start: Coord,

    /// Goal cell as `row,column`. Defaults to the bottom right corner.
    #[arg(short, long)]
    goal: Option<Coord>,

    /// Character marking an obstacle
    #[arg(short, long, default_value_t = Grid::BLOCK_MARKER)]
    marker: char,

    /// Maximum number of search attempts
    #[arg(long, default_value_t = GridConfig::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,

    /// Time budget for all attempts, seconds
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    /// Random seed for choosing which obstacles to clear
    #[arg(long)]
    seed: Option<u64>,

    /// File, where to read the grid. Use `-` for stdin.
    file: PathBuf,
}

/// Read grid from file, print the checked grid and report
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut grid = if args.file.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        Grid::parse(buf.trim(), args.marker).context("Invalid grid on stdin")?
    } else {
        Grid::load(&args.file, args.marker)
            .with_context(|| format!("Could not load grid from {}", args.file.display()))?
    };

    let goal = args
        .goal
        .unwrap_or(Coord::new(grid.rows() - 1, grid.columns() - 1));
    let checker = ConnectivityChecker::new(args.start, goal)
        .with_max_attempts(args.max_attempts)
        .with_time_budget(Duration::from_secs(args.timeout));

    let mut random = if let Some(state) = args.seed {
        StdRng::seed_from_u64(state)
    } else {
        StdRng::from_entropy()
    };
    let report = checker.check(&mut grid, &mut random)?;

    println!("{}", grid.render_with(args.start, goal));
    report.print_report();
    Ok(())
}
