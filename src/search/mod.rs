//! Adversarial tree search over any [`GameState`](crate::game::GameState).
//!
//! Depth is counted in full rounds: every agent moves once per round.

mod tree;
pub use tree::*;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// A heuristic that evaluates the game state at the leafs of a tree search.
pub trait Heuristic<G>: Debug {
    fn eval(&self, game: &G) -> f64;
}

/// How the values of the opponents' children are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Opponents minimize.
    Minimax,
    /// Opponents minimize, provably irrelevant subtrees are skipped.
    AlphaBeta,
    /// Opponents move uniformly at random.
    Expectimax,
}
