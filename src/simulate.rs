//! Game loop that lets a pacman agent play against random ghosts.

use log::{debug, info, warn};
use rand::Rng;

use crate::agents::{Agent, RandomAgent};
use crate::game::{Game, GameState, Outcome};

/// Plays `game` until it ends or pacman made `max_moves` moves.
///
/// Every round pacman moves first, then each ghost in order.
/// Agents without a legal move pass.
pub fn play_game<R: Rng>(
    mut game: Game,
    agent: &Agent,
    max_moves: usize,
    rng: &mut R,
    verbose: bool,
) -> Game {
    if verbose {
        info!("init: {game:?}");
    }

    for turn in 0..max_moves {
        for i in 0..game.num_agents() {
            if game.is_terminal() {
                break;
            }
            let action = if i == 0 {
                agent.action(&game, rng)
            } else {
                RandomAgent.action(&game, i, rng)
            };
            debug!("{turn}: agent {i} -> {action:?}");
            match action {
                Some(action) => game = game.successor(i, action),
                None if i == 0 => warn!("{turn}: pacman has no move, passing"),
                None => {}
            }
        }

        if verbose {
            info!("{turn}: {game:?}");
        }

        match game.outcome() {
            Outcome::Win => {
                info!("game: win after {} turns, score {}", turn + 1, game.score);
                return game;
            }
            Outcome::Lose => {
                info!("game: loss after {} turns, score {}", turn + 1, game.score);
                return game;
            }
            Outcome::None => {}
        }
    }
    info!("game: aborted after {max_moves} turns, score {}", game.score);
    game
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::agents::{AlphaBetaAgent, Evaluation, ReflexAgent};
    use crate::game::{layouts, FOOD_REWARD, LOSE_PENALTY, TIME_PENALTY, WIN_REWARD};
    use crate::logging;

    #[test]
    fn collect_all_food() {
        logging();
        let game = Game::parse(
            r#"
            %%%%%%%
            %P... %
            %%%%%%%"#,
        )
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        let game = play_game(game, &Agent::Reflex(ReflexAgent), 10, &mut rng, true);
        assert!(game.is_win());
        assert_eq!(game.score, 3.0 * (FOOD_REWARD - TIME_PENALTY) + WIN_REWARD);
    }

    #[test]
    fn move_limit() {
        let game = Game::parse(layouts::TRAPPED_CLASSIC).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        let agent = Agent::Random(RandomAgent);
        let game = play_game(game, &agent, 0, &mut rng, false);
        assert_eq!(game.outcome(), Outcome::None);
        assert_eq!(game.score, 0.0);
    }

    #[test]
    fn caught_by_ghost() {
        logging();
        let game = Game::parse(
            r#"
            %%%%%
            %P G%
            %%%%%"#,
        )
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        let game = play_game(game, &Agent::Reflex(ReflexAgent), 10, &mut rng, false);
        assert!(game.is_lose());
        assert!(game.score <= -LOSE_PENALTY);
        assert!(game.legal_actions(0).is_empty());
    }

    #[test]
    fn pieces_stay_on_board() {
        logging();
        let agent = Agent::AlphaBeta(AlphaBetaAgent {
            depth: 2,
            evaluation: Evaluation::Better,
        });
        for seed in 0..3 {
            let game = Game::parse(layouts::TEST_CLASSIC).unwrap();
            let mut rng = SmallRng::seed_from_u64(seed);
            let game = play_game(game, &agent, 100, &mut rng, false);
            // a ghost never moves onto a wall
            for ghost in &game.ghosts {
                assert!(!game.grid.is_wall(ghost.position));
            }
            assert!(!game.grid.is_wall(game.pacman));
        }
    }
}
