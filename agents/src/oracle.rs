use pacman_core::{AgentState, Direction, GameState, Position};
use std::fmt;

/// The view of a game the search needs: legal actions, successors, terminal tests and a score.
///
/// Implementations must be pure. `generate_successor` returns a new state and never modifies
/// the receiver, and the number of agents is constant for a game. Agent 0 is the maximizer.
pub trait GameStateOracle: Sized {
    type Action: Copy + PartialEq + fmt::Debug;

    /// Actions available to `agent`, in tie-break order.
    fn legal_actions(&self, agent: usize) -> Vec<Self::Action>;

    fn generate_successor(&self, agent: usize, action: Self::Action) -> Self;

    fn is_win(&self) -> bool;

    fn is_lose(&self) -> bool;

    fn num_agents(&self) -> usize;

    fn score(&self) -> f64;

    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// Accessors used by the heuristic evaluation functions.
pub trait HeuristicFeatures: GameStateOracle {
    fn pacman_position(&self) -> Position;

    fn food_positions(&self) -> Vec<Position>;

    fn ghost_states(&self) -> &[AgentState];

    fn capsule_positions(&self) -> &[Position];
}

impl GameStateOracle for GameState {
    type Action = Direction;

    fn legal_actions(&self, agent: usize) -> Vec<Direction> {
        GameState::legal_actions(self, agent)
    }

    fn generate_successor(&self, agent: usize, action: Direction) -> Self {
        GameState::generate_successor(self, agent, action)
    }

    fn is_win(&self) -> bool {
        GameState::is_win(self)
    }

    fn is_lose(&self) -> bool {
        GameState::is_lose(self)
    }

    fn num_agents(&self) -> usize {
        GameState::num_agents(self)
    }

    fn score(&self) -> f64 {
        GameState::score(self)
    }
}

impl HeuristicFeatures for GameState {
    fn pacman_position(&self) -> Position {
        GameState::pacman_position(self)
    }

    fn food_positions(&self) -> Vec<Position> {
        self.food().positions().collect()
    }

    fn ghost_states(&self) -> &[AgentState] {
        GameState::ghost_states(self)
    }

    fn capsule_positions(&self) -> &[Position] {
        self.capsules()
    }
}
