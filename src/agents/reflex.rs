use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::reflex_evaluation;
use crate::env::Direction;
use crate::game::PacmanState;
use crate::util::argmax_random;

/// Greedy one step lookahead with [`reflex_evaluation`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReflexAgent;

impl ReflexAgent {
    pub fn action<G: PacmanState, R: Rng>(&self, game: &G, rng: &mut R) -> Option<Direction> {
        let values: Vec<(Direction, f64)> = game
            .legal_actions(0)
            .into_iter()
            .map(|d| (d, reflex_evaluation(game, d)))
            .collect();
        let result = argmax_random(&values, rng);
        debug!(">>> reflex {:?} -> {:?}", values, result);
        result.map(|(dir, _)| dir)
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::game::Game;
    use Direction::*;

    #[test]
    fn reflex_eats_food() {
        let game = Game::parse(
            r#"
            %%%%%%%%
            %P.  .G%
            %%%%%%%%"#,
        )
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        // Right: 9 + 1 - 3 + 4 = 11, Stop: -1 - 1 - 1 + 5 = 2
        assert_eq!(ReflexAgent.action(&game, &mut rng), Some(Right));
    }

    #[test]
    fn reflex_takes_the_win() {
        let game = Game::parse(
            r#"
            %%%%%%
            %.P G%
            %%%%%%"#,
        )
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(ReflexAgent.action(&game, &mut rng), Some(Left));
    }
}
