pub mod config;
pub mod error;
pub mod evaluation;
pub mod oracle;
pub mod random;
pub mod reflex;
pub mod search;
pub mod search_agent;

/// Core trait for game agents
pub trait Agent<S: GameStateOracle> {
    /// Choose an action for the given state, or None if the agent has no legal action
    fn get_action(&mut self, state: &S) -> Option<S::Action>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

pub use config::{build_ghosts, build_pacman, AgentKind, AgentOptions};
pub use error::ConfigError;
pub use evaluation::*;
pub use oracle::{GameStateOracle, HeuristicFeatures};
pub use random::RandomAgent;
pub use reflex::ReflexAgent;
pub use search::*;
pub use search_agent::SearchAgent;
