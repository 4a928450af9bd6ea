//! CLI for grid generation

use std::time::Duration;

use clap::Parser;
use grid_scenario::{Coord, GridConfig, GridGenerator};

/// Generate a grid with random obstacles and a path from start to goal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Generated grid height
    #[arg(long, default_value_t = 10)]
    rows: usize,

    /// Generated grid width
    #[arg(long, default_value_t = 10)]
    columns: usize,

    /// Number of obstacles
    #[arg(long, default_value_t = 1)]
    obstacles: usize,

    /// Start cell as `row,column`
    #[arg(long, default_value = "0,0")]
    start: Coord,

    /// Goal cell as `row,column`. Defaults to the bottom right corner.
    #[arg(long)]
    goal: Option<Coord>,

    /// Maximum number of search attempts
    #[arg(long, default_value_t = GridConfig::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,

    /// Time budget for all attempts, seconds
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print obstacles only, without start and goal markers
    #[arg(long)]
    plain: bool,
}

/// Generate grid, print it with the check report
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = GridConfig::new(args.rows, args.columns)
        .with_obstacles(args.obstacles)
        .with_start(args.start)
        .with_max_attempts(args.max_attempts)
        .with_time_budget(Duration::from_secs(args.timeout));
    if let Some(goal) = args.goal {
        config = config.with_goal(goal);
    }

    let mut gen = GridGenerator::new(config, args.seed)?;
    let (grid, report) = gen.create_connected_grid()?;

    if args.plain {
        println!("{}", grid);
    } else {
        println!("{}", grid.render_with(gen.config().start, gen.config().goal));
    }
    report.print_report();
    Ok(())
}
