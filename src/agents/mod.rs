use std::fmt;
use std::str::FromStr;

mod evaluation;
pub use evaluation::*;
mod random;
pub use random::*;
mod reflex;
pub use reflex::*;
mod tree;
pub use tree::*;

use rand::Rng;

use crate::env::Direction;
use crate::game::PacmanState;

/// Pacman agent configuration.
///
/// Parsed from json, e.g. `{"AlphaBeta":{"depth":2,"evaluation":"better"}}`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum Agent {
    Reflex(ReflexAgent),
    Minimax(MinimaxAgent),
    AlphaBeta(AlphaBetaAgent),
    Expectimax(ExpectimaxAgent),
    Random(RandomAgent),
}

impl Default for Agent {
    fn default() -> Self {
        Self::AlphaBeta(AlphaBetaAgent::default())
    }
}

impl Agent {
    /// The next move of pacman, `None` if pacman has no legal move.
    pub fn action<G: PacmanState, R: Rng>(&self, game: &G, rng: &mut R) -> Option<Direction> {
        match self {
            Agent::Reflex(agent) => agent.action(game, rng),
            Agent::Minimax(agent) => agent.action(game, rng),
            Agent::AlphaBeta(agent) => agent.action(game, rng),
            Agent::Expectimax(agent) => agent.action(game, rng),
            Agent::Random(agent) => agent.action(game, 0, rng),
        }
    }
}

impl FromStr for Agent {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::game::{layouts, Game, GameState};

    #[test]
    fn agent_config() {
        let agent: Agent = r#"{"Minimax":{"depth":3}}"#.parse().unwrap();
        match &agent {
            Agent::Minimax(a) => {
                assert_eq!(a.depth, 3);
                assert_eq!(a.evaluation, Evaluation::Score);
            }
            _ => panic!("wrong agent {agent:?}"),
        }

        let agent: Agent = r#"{"Expectimax":{"evaluation":"better"}}"#.parse().unwrap();
        assert!(matches!(agent, Agent::Expectimax(ExpectimaxAgent { depth: 2, .. })));

        let agent: Agent = r#"{"Reflex":null}"#.parse().unwrap();
        assert!(matches!(agent, Agent::Reflex(_)));

        assert!("{\"Snake\":{}}".parse::<Agent>().is_err());
    }

    #[test]
    fn agent_display() {
        let agent = Agent::default();
        let json = agent.to_string();
        assert_eq!(json, r#"{"AlphaBeta":{"depth":3,"evaluation":"better"}}"#);
        let parsed: Agent = json.parse().unwrap();
        assert!(matches!(parsed, Agent::AlphaBeta(AlphaBetaAgent { depth: 3, .. })));
    }

    #[test]
    fn all_agents_move() {
        let game = Game::parse(layouts::TEST_CLASSIC).unwrap();
        let legal = game.legal_actions(0);
        let mut rng = SmallRng::seed_from_u64(1);
        let agents = [
            Agent::Reflex(ReflexAgent),
            Agent::Minimax(MinimaxAgent::default()),
            Agent::AlphaBeta(AlphaBetaAgent::default()),
            Agent::Expectimax(ExpectimaxAgent::default()),
            Agent::Random(RandomAgent),
        ];
        for agent in agents {
            let action = agent.action(&game, &mut rng).unwrap();
            assert!(legal.contains(&action), "{agent}");
        }
    }
}
