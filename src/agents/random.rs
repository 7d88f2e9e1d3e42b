use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::GameState;

/// Chooses uniformly among the legal actions.
/// This is how the ghosts move in the simulation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RandomAgent;

impl RandomAgent {
    pub fn action<G: GameState, R: Rng>(
        &self,
        game: &G,
        agent: usize,
        rng: &mut R,
    ) -> Option<G::Action> {
        game.legal_actions(agent).choose(rng).copied()
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::env::Direction::*;
    use crate::game::Game;

    #[test]
    fn random_legal_moves() {
        let game = Game::parse(
            r#"
            %%%%%
            %  G%
            %P  %
            %%%%%"#,
        )
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..20 {
            let action = RandomAgent.action(&game, 1, &mut rng).unwrap();
            assert!(action == Down || action == Left);
        }
        assert_eq!(RandomAgent.action(&game, 2, &mut rng), None);
    }
}
