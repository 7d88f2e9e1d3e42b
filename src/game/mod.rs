mod grid;
pub use grid::*;
mod game;
pub use game::*;
pub mod layouts;

use std::fmt::Debug;

use crate::env::{Direction, Vec2D};

/// Immutable snapshot of a turn based multi agent game.
///
/// Agent 0 is the maximizing player, all other agents follow in a fixed
/// cyclic order. Successors are new snapshots, the receiver is never mutated.
pub trait GameState: Sized {
    type Action: Copy + Debug + PartialEq;

    /// Legal actions of `agent`. Empty if the game is over.
    fn legal_actions(&self, agent: usize) -> Vec<Self::Action>;
    fn successor(&self, agent: usize, action: Self::Action) -> Self;
    fn num_agents(&self) -> usize;
    fn is_win(&self) -> bool;
    fn is_lose(&self) -> bool;

    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// Position and power-up state of a single ghost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GhostState {
    pub position: Vec2D,
    pub start: Vec2D,
    /// Last move, used to forbid turning around.
    pub direction: Direction,
    /// Remaining moves this ghost can be eaten.
    pub scared_timer: u16,
}

impl GhostState {
    pub fn new(start: Vec2D) -> GhostState {
        GhostState {
            position: start,
            start,
            direction: Direction::Stop,
            scared_timer: 0,
        }
    }

    pub fn scared(&self) -> bool {
        self.scared_timer > 0
    }
}

/// Accessors the pacman evaluation functions are built on.
pub trait PacmanState: GameState<Action = Direction> {
    fn pacman_position(&self) -> Vec2D;
    /// Positions of all remaining food pellets.
    fn food(&self) -> Vec<Vec2D>;
    fn ghost_states(&self) -> Vec<GhostState>;
    fn capsules(&self) -> Vec<Vec2D>;
    fn score(&self) -> f64;

    fn num_food(&self) -> usize {
        self.food().len()
    }

    fn ghost_positions(&self) -> Vec<Vec2D> {
        self.ghost_states().iter().map(|g| g.position).collect()
    }

    fn pacman_successor(&self, action: Direction) -> Self {
        self.successor(0, action)
    }
}
