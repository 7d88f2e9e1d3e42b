use serde::{Deserialize, Serialize};

use crate::env::{Direction, Vec2D};
use crate::game::PacmanState;
use crate::search::Heuristic;

/// Static evaluation used at the leafs of the tree search agents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Evaluation {
    /// The game score.
    #[default]
    Score,
    /// See [`better_evaluation`].
    Better,
}

impl<G: PacmanState> Heuristic<G> for Evaluation {
    fn eval(&self, game: &G) -> f64 {
        match self {
            Evaluation::Score => score_evaluation(game),
            Evaluation::Better => better_evaluation(game),
        }
    }
}

fn nearest(from: Vec2D, targets: impl IntoIterator<Item = Vec2D>) -> Option<f64> {
    targets
        .into_iter()
        .map(|p| from.distance(p))
        .min()
        .map(|d| d as f64)
}

fn min_scared_timer<G: PacmanState>(game: &G) -> f64 {
    game.ghost_states()
        .iter()
        .map(|g| g.scared_timer)
        .min()
        .unwrap_or_default() as f64
}

pub fn score_evaluation<G: PacmanState>(game: &G) -> f64 {
    game.score()
}

/// Scores pacman's `action` by looking at the successor.
///
/// Winning moves are infinitely good. Otherwise, stopping is punished,
/// eating and being far from ghosts is rewarded and the distance to the next
/// food is subtracted.
pub fn reflex_evaluation<G: PacmanState>(game: &G, action: Direction) -> f64 {
    let next = game.pacman_successor(action);
    if next.is_win() {
        return f64::INFINITY;
    }

    let pos = next.pacman_position();
    let stopped = (action == Direction::Stop) as u8 as f64;
    let ate_food = (next.num_food() < game.num_food()) as u8 as f64;
    let food_distance = nearest(pos, next.food()).unwrap_or_default();
    let ate_capsule = game.capsules().contains(&pos) as u8 as f64;
    let ghost_distance = nearest(pos, next.ghost_positions()).unwrap_or_default();

    next.score() - stopped + ate_food - food_distance
        + ate_capsule
        + ghost_distance
        + min_scared_timer(&next)
}

/// Evaluation for the depth limited search agents.
///
/// Rewards the score, being close to food, hunting scared ghosts and keeping
/// some distance (up to 10) from the ghosts. A ghost distance of zero is
/// treated as one.
pub fn better_evaluation<G: PacmanState>(game: &G) -> f64 {
    if game.is_win() {
        return f64::INFINITY;
    }
    if game.is_lose() {
        return f64::NEG_INFINITY;
    }

    let pos = game.pacman_position();
    let food_distance = nearest(pos, game.food()).unwrap_or_default();
    let ghosts = match nearest(pos, game.ghost_positions()) {
        Some(d) => 0.75 * min_scared_timer(game) / d.max(1.0) + 0.5 * d.min(10.0),
        None => 0.0,
    };

    game.score() - 0.5 * food_distance + ghosts
}
