use crate::game_state::{GameState, PACMAN};
use crate::types::Direction;

/// Leaf statistics of a full game tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerftResults {
    pub leaves: u64,
    pub wins: u64,
    pub losses: u64,
}

impl PerftResults {
    /// Combines results from child nodes.
    pub fn add(&mut self, other: &Self) {
        self.leaves += other.leaves;
        self.wins += other.wins;
        self.losses += other.losses;
    }
}

/// Counts the leaf states reached after `plies` full rounds.
/// A round is one move by every agent; terminal states are leaves.
pub fn perft(state: &GameState, plies: u32) -> u64 {
    perft_detailed(state, plies).leaves
}

/// Counts leaves per first Pacman action.
pub fn perft_divide(state: &GameState, plies: u32) -> Vec<(Direction, u64)> {
    if plies == 0 {
        return Vec::new();
    }

    state
        .legal_actions(PACMAN)
        .into_iter()
        .map(|action| {
            let successor = state.generate_successor(PACMAN, action);
            let (agent, remaining) = next_turn(state, PACMAN, plies);
            let nodes = count(&successor, agent, remaining).leaves;
            (action, nodes)
        })
        .collect()
}

/// Counts leaves together with how many of them are won or lost.
pub fn perft_detailed(state: &GameState, plies: u32) -> PerftResults {
    count(state, PACMAN, plies)
}

fn next_turn(state: &GameState, agent: usize, plies: u32) -> (usize, u32) {
    if agent + 1 == state.num_agents() {
        (PACMAN, plies - 1)
    } else {
        (agent + 1, plies)
    }
}

fn count(state: &GameState, agent: usize, plies: u32) -> PerftResults {
    if plies == 0 || state.is_terminal() {
        return PerftResults {
            leaves: 1,
            wins: u64::from(state.is_win()),
            losses: u64::from(state.is_lose()),
        };
    }

    let (next_agent, remaining) = next_turn(state, agent, plies);
    let mut results = PerftResults::default();

    for action in state.legal_actions(agent) {
        let successor = state.generate_successor(agent, action);
        results.add(&count(&successor, next_agent, remaining));
    }

    results
}
