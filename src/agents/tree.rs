use std::time::Instant;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Evaluation;
use crate::env::Direction;
use crate::game::PacmanState;
use crate::search::{self, Strategy};
use crate::util::argmax_random;

/// Searches `depth` rounds and picks one of the best actions at random.
fn tree_action<G: PacmanState, R: Rng>(
    game: &G,
    depth: usize,
    strategy: Strategy,
    evaluation: Evaluation,
    rng: &mut R,
) -> Option<Direction> {
    let start = Instant::now();
    let values = search::tree_search(game, depth, strategy, &evaluation);
    let result = argmax_random(&values, rng);

    debug!(
        ">>> {:?} {} {:?}ms {:?} -> {:?}",
        strategy,
        depth,
        start.elapsed().as_millis(),
        values,
        result
    );
    result.map(|(dir, _)| dir)
}

/// Assumes the ghosts play optimally against pacman.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimaxAgent {
    pub depth: usize,
    pub evaluation: Evaluation,
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self {
            depth: 2,
            evaluation: Evaluation::Score,
        }
    }
}

impl MinimaxAgent {
    pub fn action<G: PacmanState, R: Rng>(&self, game: &G, rng: &mut R) -> Option<Direction> {
        tree_action(game, self.depth, Strategy::Minimax, self.evaluation, rng)
    }
}

/// Minimax with alpha-beta pruning, same decisions but faster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaBetaAgent {
    pub depth: usize,
    pub evaluation: Evaluation,
}

impl Default for AlphaBetaAgent {
    fn default() -> Self {
        Self {
            depth: 3,
            evaluation: Evaluation::Better,
        }
    }
}

impl AlphaBetaAgent {
    pub fn action<G: PacmanState, R: Rng>(&self, game: &G, rng: &mut R) -> Option<Direction> {
        tree_action(game, self.depth, Strategy::AlphaBeta, self.evaluation, rng)
    }
}

/// Models the ghosts as moving uniformly at random.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectimaxAgent {
    pub depth: usize,
    pub evaluation: Evaluation,
}

impl Default for ExpectimaxAgent {
    fn default() -> Self {
        Self {
            depth: 2,
            evaluation: Evaluation::Better,
        }
    }
}

impl ExpectimaxAgent {
    pub fn action<G: PacmanState, R: Rng>(&self, game: &G, rng: &mut R) -> Option<Direction> {
        tree_action(game, self.depth, Strategy::Expectimax, self.evaluation, rng)
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::game::{layouts, Game, GameState};
    use crate::logging;
    use Direction::*;

    #[test]
    fn takes_winning_food() {
        logging();
        let game = Game::parse(
            r#"
            %%%%%%%
            %.P  G%
            %%%%%%%"#,
        )
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(0);

        // deeper "better" searches also find later wins and tie
        let configs = [
            (1, Evaluation::Score),
            (2, Evaluation::Score),
            (3, Evaluation::Score),
            (1, Evaluation::Better),
        ];
        for (depth, evaluation) in configs {
            let minimax = MinimaxAgent { depth, evaluation };
            assert_eq!(minimax.action(&game, &mut rng), Some(Left));
            let alphabeta = AlphaBetaAgent { depth, evaluation };
            assert_eq!(alphabeta.action(&game, &mut rng), Some(Left));
            let expectimax = ExpectimaxAgent { depth, evaluation };
            assert_eq!(expectimax.action(&game, &mut rng), Some(Left));
        }
    }

    #[test]
    fn avoids_ghost() {
        logging();
        let game = Game::parse(
            r#"
            %%%%%%%
            %. PG.%
            %%%%%%%"#,
        )
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(0);

        // Right runs into the ghost, after Stop the ghost can catch pacman
        let values = search::tree_search(&game, 1, Strategy::Minimax, &Evaluation::Score);
        assert_eq!(values, vec![(Right, -501.0), (Left, -1.0), (Stop, -501.0)]);
        let values = search::tree_search(&game, 1, Strategy::Expectimax, &Evaluation::Score);
        assert_eq!(values, vec![(Right, -501.0), (Left, -1.0), (Stop, -251.0)]);

        let evaluation = Evaluation::Score;
        let minimax = MinimaxAgent { depth: 1, evaluation };
        assert_eq!(minimax.action(&game, &mut rng), Some(Left));
        let alphabeta = AlphaBetaAgent { depth: 1, evaluation };
        assert_eq!(alphabeta.action(&game, &mut rng), Some(Left));
        let expectimax = ExpectimaxAgent { depth: 1, evaluation };
        assert_eq!(expectimax.action(&game, &mut rng), Some(Left));
    }

    #[test]
    fn expectimax_risky_stop() {
        let game = Game::parse(
            r#"
            %%%%%%
            %.PG %
            %%%%%%"#,
        )
        .unwrap();

        // after Stop the ghost may catch pacman or pacman wins next round
        let values = search::tree_search(&game, 2, Strategy::Expectimax, &Evaluation::Better);
        assert_eq!(
            values,
            vec![
                (Right, f64::NEG_INFINITY),
                (Left, f64::INFINITY),
                (Stop, f64::NEG_INFINITY)
            ]
        );
        assert!(values.iter().all(|(_, v)| !v.is_nan()));

        let mut rng = SmallRng::seed_from_u64(0);
        let agent = ExpectimaxAgent {
            depth: 2,
            evaluation: Evaluation::Better,
        };
        assert_eq!(agent.action(&game, &mut rng), Some(Left));
    }

    #[test]
    fn alphabeta_agrees_with_minimax() {
        logging();
        let game = Game::parse(layouts::MINIMAX_CLASSIC).unwrap();
        for depth in 1..=2 {
            for evaluation in [Evaluation::Score, Evaluation::Better] {
                let full = search::tree_search(&game, depth, Strategy::Minimax, &evaluation);
                let pruned = search::tree_search(&game, depth, Strategy::AlphaBeta, &evaluation);
                let best = |v: &[(Direction, f64)]| {
                    v.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max)
                };
                assert_eq!(best(&full), best(&pruned), "depth={depth}");
            }
        }
    }

    #[test]
    fn tree_agents_pick_legal_moves() {
        let game = Game::parse(layouts::TEST_CLASSIC).unwrap();
        let legal = game.legal_actions(0);
        let mut rng = SmallRng::seed_from_u64(42);

        let action = MinimaxAgent::default().action(&game, &mut rng).unwrap();
        assert!(legal.contains(&action));
        let action = AlphaBetaAgent::default().action(&game, &mut rng).unwrap();
        assert!(legal.contains(&action));
        let action = ExpectimaxAgent::default().action(&game, &mut rng).unwrap();
        assert!(legal.contains(&action));
    }

    #[test]
    fn finished_game_has_no_action() {
        let game = Game::parse(
            r#"
            %%%%%
            %P. %
            %%%%%"#,
        )
        .unwrap();
        let won = game.successor(0, Right);
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(ExpectimaxAgent::default().action(&won, &mut rng), None);
    }
}
