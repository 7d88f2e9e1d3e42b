use std::process::exit;
use std::time::Instant;

use clap::Parser;
use log::{error, info};
use owo_colors::OwoColorize;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use pellet::agents::Agent;
use pellet::game::{layouts, Game, GameState};
use pellet::logging;
use pellet::simulate::play_game;

#[derive(Parser)]
#[command(name = "pacman simulator", about = "Play pacman with different agents.")]
struct Opts {
    /// Name of a built-in layout or path to a layout file.
    #[arg(short, long, default_value = "minimaxClassic")]
    layout: String,
    #[arg(short = 'n', long, default_value_t = 1)]
    game_count: usize,
    /// Pacman moves after which a game is aborted.
    #[arg(long, default_value_t = 500)]
    max_moves: usize,
    /// Seed for tie breaks and ghost moves, random if not set.
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long)]
    verbose: bool,
    /// Agent configuration as json.
    #[arg(default_value_t)]
    agent: Agent,
}

fn load_layout(layout: &str) -> Option<Game> {
    match layouts::get(layout) {
        Some(txt) => Game::parse(txt),
        None => {
            let txt = std::fs::read_to_string(layout).ok()?;
            Game::parse(&txt)
        }
    }
}

fn main() {
    logging();

    let Opts {
        layout,
        game_count,
        max_moves,
        seed,
        verbose,
        agent,
    } = Opts::parse();

    let Some(game) = load_layout(&layout) else {
        error!("Invalid layout {layout:?}, expected one of {:?} or a file", layouts::NAMES);
        exit(1);
    };
    info!("Agent: {agent}");

    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let start = Instant::now();
    let mut wins = 0;
    let mut total = 0.0;
    for i in 0..game_count {
        let game = play_game(game.clone(), &agent, max_moves, &mut rng, verbose);
        wins += game.is_win() as usize;
        total += game.score;
        println!(
            "{}: {} score {} {}ms",
            "Finish Game".bright_green(),
            i,
            game.score,
            start.elapsed().as_millis()
        );
    }

    println!("Average score: {}", total / game_count.max(1) as f64);
    println!("Result: {}/{}", wins, game_count);
}
