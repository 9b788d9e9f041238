use crate::evaluation::reflex_evaluation;
use crate::oracle::HeuristicFeatures;
use crate::Agent;
use pacman_core::PACMAN;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Greedy one-ply Pacman. Scores every legal action with [`reflex_evaluation`] and picks
/// uniformly among the best ones.
pub struct ReflexAgent {
    name: String,
    rng: StdRng,
}

impl ReflexAgent {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: StdRng) -> Self {
        ReflexAgent {
            name: "Reflex".to_string(),
            rng,
        }
    }
}

impl<S: HeuristicFeatures> Agent<S> for ReflexAgent {
    fn get_action(&mut self, state: &S) -> Option<S::Action> {
        let actions = state.legal_actions(PACMAN);
        let scores: Vec<f64> = actions
            .iter()
            .map(|&action| reflex_evaluation(state, action))
            .collect();
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let candidates: Vec<S::Action> = actions
            .iter()
            .zip(&scores)
            .filter(|&(_, &score)| score == best)
            .map(|(&action, _)| action)
            .collect();

        candidates.choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
