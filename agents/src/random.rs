use crate::oracle::GameStateOracle;
use crate::Agent;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Picks uniformly among the legal actions of its agent index. Used for ghosts.
pub struct RandomAgent {
    index: usize,
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(index: usize, seed: u64) -> Self {
        Self::from_rng(index, StdRng::seed_from_u64(seed))
    }

    pub fn from_rng(index: usize, rng: StdRng) -> Self {
        RandomAgent {
            index,
            name: format!("Random({})", index),
            rng,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl<S: GameStateOracle> Agent<S> for RandomAgent {
    fn get_action(&mut self, state: &S) -> Option<S::Action> {
        state.legal_actions(self.index).choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
