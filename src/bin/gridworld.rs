use std::process::exit;

use clap::Parser;
use log::{error, info};

use pellet::logging;
use pellet::mdp::{GridWorld, Mdp, Schedule, ValueIterationAgent};

#[derive(Parser)]
#[command(name = "grid world solver", about = "Value iteration on a grid world.")]
struct Opts {
    /// Name of a built-in grid or path to a grid file.
    #[arg(short, long, default_value = "book")]
    grid: String,
    #[arg(short, long, default_value_t = 0.9)]
    discount: f64,
    #[arg(short, long, default_value_t = 100)]
    iterations: usize,
    /// Probability of an unintended perpendicular move.
    #[arg(short, long, default_value_t = 0.2)]
    noise: f64,
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    living_reward: f64,
    /// Schedule as json, e.g. `"cyclic"` or `{"prioritized_sweeping":{"theta":1e-5}}`.
    #[arg(short, long, default_value = "\"batch\"", value_parser = parse_schedule)]
    schedule: Schedule,
}

fn parse_schedule(s: &str) -> Result<Schedule, serde_json::Error> {
    serde_json::from_str(s)
}

fn load_grid(grid: &str) -> Option<GridWorld> {
    match GridWorld::get(grid) {
        Some(grid) => Some(grid),
        None => {
            let txt = std::fs::read_to_string(grid).ok()?;
            GridWorld::parse(&txt)
        }
    }
}

fn main() {
    logging();

    let Opts {
        grid,
        discount,
        iterations,
        noise,
        living_reward,
        schedule,
    } = Opts::parse();

    if !(0.0..=1.0).contains(&discount) || !(0.0..=1.0).contains(&noise) {
        error!("Discount and noise have to be within [0, 1]");
        exit(1);
    }

    let Some(mut world) = load_grid(&grid) else {
        error!("Invalid grid {grid:?}, expected one of {:?} or a file", GridWorld::NAMES);
        exit(1);
    };
    world.noise = noise;
    world.living_reward = living_reward;
    info!("Grid {grid}:\n{world}");

    let agent = ValueIterationAgent::solve(&world, discount, schedule, iterations);

    println!("Values after {iterations} iterations:");
    print!("{}", world.format_values(&agent));
    println!("Policy:");
    print!("{}", world.format_policy(&agent));
    if let Some(start) = world.start() {
        println!(
            "Start: {:.4} {:?}",
            agent.value(&start),
            agent.policy(&start)
        );
    }
    info!("{} states", world.states().len());
}
