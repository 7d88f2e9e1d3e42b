use super::{Heuristic, Strategy};
use crate::game::GameState;

/// Returns the value of every legal action of agent 0.
///
/// The tree is searched `depth` rounds deep or until the game ends.
/// With [`Strategy::AlphaBeta`] actions that cannot be optimal may report an
/// upper bound instead of their exact value; the maximum is always exact.
pub fn tree_search<G: GameState>(
    game: &G,
    depth: usize,
    strategy: Strategy,
    heuristic: &dyn Heuristic<G>,
) -> Vec<(G::Action, f64)> {
    if game.is_terminal() || depth == 0 {
        return Vec::new();
    }

    let search = TreeSearch {
        strategy,
        heuristic,
        agents: game.num_agents().max(1),
    };
    let (next, rounds) = search.advance(0, depth);

    let mut alpha = f64::NEG_INFINITY;
    let mut values = Vec::new();
    for action in game.legal_actions(0) {
        let value = search.value(
            &game.successor(0, action),
            rounds,
            next,
            alpha,
            f64::INFINITY,
        );
        if strategy == Strategy::AlphaBeta && value > alpha {
            alpha = value;
        }
        values.push((action, value));
    }
    values
}

/// Returns the first best action of agent 0 and its value.
/// Without any action the static evaluation of `game` is returned.
pub fn best_action<G: GameState>(
    game: &G,
    depth: usize,
    strategy: Strategy,
    heuristic: &dyn Heuristic<G>,
) -> (Option<G::Action>, f64) {
    let mut best = (None, f64::NEG_INFINITY);
    for (action, value) in tree_search(game, depth, strategy, heuristic) {
        if best.0.is_none() || value > best.1 {
            best = (Some(action), value);
        }
    }
    if best.0.is_none() {
        best.1 = heuristic.eval(game);
    }
    best
}

/// Minimax tree search.
/// The agent 0 maximizes, all others minimize.
pub fn minimax<G: GameState>(
    game: &G,
    depth: usize,
    heuristic: &dyn Heuristic<G>,
) -> (Option<G::Action>, f64) {
    best_action(game, depth, Strategy::Minimax, heuristic)
}

/// Alpha-Beta tree search.
///
/// @see https://en.wikipedia.org/wiki/Alpha%E2%80%93beta_pruning
/// Returns the same action and value as [`minimax`].
pub fn alphabeta<G: GameState>(
    game: &G,
    depth: usize,
    heuristic: &dyn Heuristic<G>,
) -> (Option<G::Action>, f64) {
    best_action(game, depth, Strategy::AlphaBeta, heuristic)
}

/// Expectimax tree search.
/// The agent 0 maximizes, all others choose uniformly at random.
pub fn expectimax<G: GameState>(
    game: &G,
    depth: usize,
    heuristic: &dyn Heuristic<G>,
) -> (Option<G::Action>, f64) {
    best_action(game, depth, Strategy::Expectimax, heuristic)
}

struct TreeSearch<'a, G> {
    strategy: Strategy,
    heuristic: &'a dyn Heuristic<G>,
    agents: usize,
}

impl<'a, G: GameState> TreeSearch<'a, G> {
    /// The next agent in the cycle and the remaining rounds.
    /// A round is used up when the cycle wraps around to agent 0.
    fn advance(&self, agent: usize, rounds: usize) -> (usize, usize) {
        let next = (agent + 1) % self.agents;
        if next == 0 {
            (next, rounds - 1)
        } else {
            (next, rounds)
        }
    }

    /// Value of `game` with `agent` to move.
    ///
    /// Finished games and exhausted depth are evaluated before any action is
    /// enumerated. A chance node with a lost child is lost (`-inf`), so a
    /// mean over `-inf` and `+inf` never produces NaN.
    fn value(&self, game: &G, rounds: usize, agent: usize, alpha: f64, beta: f64) -> f64 {
        if game.is_win() || game.is_lose() || rounds == 0 {
            return self.heuristic.eval(game);
        }

        let (next, next_rounds) = self.advance(agent, rounds);
        let actions = game.legal_actions(agent);
        if actions.is_empty() {
            // agents without moves pass
            return self.value(game, next_rounds, next, alpha, beta);
        }

        if agent == 0 {
            self.max_value(game, &actions, next_rounds, next, alpha, beta)
        } else if self.strategy == Strategy::Expectimax {
            self.chance_value(game, agent, &actions, next_rounds, next, alpha, beta)
        } else {
            self.min_value(game, agent, &actions, next_rounds, next, alpha, beta)
        }
    }

    fn max_value(
        &self,
        game: &G,
        actions: &[G::Action],
        rounds: usize,
        next: usize,
        mut alpha: f64,
        beta: f64,
    ) -> f64 {
        let mut max = f64::NEG_INFINITY;
        for &action in actions {
            let val = self.value(&game.successor(0, action), rounds, next, alpha, beta);
            if val > max {
                max = val;
            }
            if self.strategy == Strategy::AlphaBeta {
                // the minimizer above never allows this branch
                if val > beta {
                    return val;
                }
                if val > alpha {
                    alpha = val;
                }
            }
        }
        max
    }

    /// Mean over uniformly chosen actions.
    #[allow(clippy::too_many_arguments)]
    fn chance_value(
        &self,
        game: &G,
        agent: usize,
        actions: &[G::Action],
        rounds: usize,
        next: usize,
        alpha: f64,
        beta: f64,
    ) -> f64 {
        let mut total = 0.0;
        for &action in actions {
            let val = self.value(&game.successor(agent, action), rounds, next, alpha, beta);
            if val == f64::NEG_INFINITY {
                return val;
            }
            total += val;
        }
        total / actions.len() as f64
    }

    #[allow(clippy::too_many_arguments)]
    fn min_value(
        &self,
        game: &G,
        agent: usize,
        actions: &[G::Action],
        rounds: usize,
        next: usize,
        alpha: f64,
        mut beta: f64,
    ) -> f64 {
        let mut min = f64::INFINITY;
        for &action in actions {
            let val = self.value(&game.successor(agent, action), rounds, next, alpha, beta);
            if val < min {
                min = val;
            }
            if self.strategy == Strategy::AlphaBeta {
                if val < alpha {
                    return val;
                }
                if val < beta {
                    beta = val;
                }
            }
        }
        min
    }
}
