//! Agent configuration: option strings such as `depth=3,evalFn=better` and agent names.

use crate::error::ConfigError;
use crate::evaluation::EvaluationFunction;
use crate::random::RandomAgent;
use crate::reflex::ReflexAgent;
use crate::search::SearchStrategy;
use crate::search_agent::SearchAgent;
use crate::Agent;
use log::info;
use pacman_core::{GameState, PACMAN};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_DEPTH: u32 = 2;

/// Options shared by the search agents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentOptions {
    pub eval_fn: EvaluationFunction,
    pub depth: u32,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            eval_fn: EvaluationFunction::Score,
            depth: DEFAULT_DEPTH,
        }
    }
}

impl AgentOptions {
    /// Parses comma-separated `key=value` pairs. Keys are `depth` and `evalFn`; missing keys keep
    /// their defaults.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut options = Self::default();

        for pair in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ConfigError::MalformedOption(pair.to_string()))?;

            match key.trim() {
                "depth" => options.depth = parse_depth(value)?,
                "evalFn" => options.eval_fn = EvaluationFunction::from_name(value)?,
                other => return Err(ConfigError::UnknownOption(other.to_string())),
            }
        }

        Ok(options)
    }
}

impl FromStr for AgentOptions {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parses a ply count, rejecting zero and negative values.
pub fn parse_depth(value: &str) -> Result<u32, ConfigError> {
    let value = value.trim();
    let depth: i64 = value
        .parse()
        .map_err(|_| ConfigError::InvalidDepth(value.to_string()))?;

    if depth <= 0 {
        return Err(ConfigError::NonPositiveDepth(depth));
    }
    u32::try_from(depth).map_err(|_| ConfigError::InvalidDepth(value.to_string()))
}

/// The Pacman agents that can be selected by name.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum AgentKind {
    Reflex,
    Minimax,
    AlphaBeta,
    Expectimax,
    Random,
}

impl AgentKind {
    pub const ALL: [AgentKind; 5] = [
        AgentKind::Reflex,
        AgentKind::Minimax,
        AgentKind::AlphaBeta,
        AgentKind::Expectimax,
        AgentKind::Random,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            AgentKind::Reflex => "ReflexAgent",
            AgentKind::Minimax => "MinimaxAgent",
            AgentKind::AlphaBeta => "AlphaBetaAgent",
            AgentKind::Expectimax => "ExpectimaxAgent",
            AgentKind::Random => "RandomAgent",
        }
    }

    /// Accepts the full names and their lowercase short forms (`minimax`, `alphabeta`, ...).
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        let wanted = name.trim().to_ascii_lowercase();
        AgentKind::ALL
            .into_iter()
            .find(|kind| {
                let full = kind.name().to_ascii_lowercase();
                wanted == full || Some(wanted.as_str()) == full.strip_suffix("agent")
            })
            .ok_or_else(|| ConfigError::UnknownAgent(name.to_string()))
    }

    /// The search strategy behind this agent, if it searches.
    pub const fn strategy(self) -> Option<SearchStrategy> {
        match self {
            AgentKind::Minimax => Some(SearchStrategy::Minimax),
            AgentKind::AlphaBeta => Some(SearchStrategy::AlphaBeta),
            AgentKind::Expectimax => Some(SearchStrategy::Expectimax),
            AgentKind::Reflex | AgentKind::Random => None,
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AgentKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Builds the Pacman agent. `seed` drives the agents that make random choices.
pub fn build_pacman(
    kind: AgentKind,
    options: &AgentOptions,
    seed: u64,
) -> Result<Box<dyn Agent<GameState>>, ConfigError> {
    let agent: Box<dyn Agent<GameState>> = match kind.strategy() {
        Some(strategy) => Box::new(SearchAgent::from_options(strategy, options)?),
        None if kind == AgentKind::Reflex => Box::new(ReflexAgent::new(seed)),
        None => Box::new(RandomAgent::new(PACMAN, seed)),
    };

    info!("configured Pacman agent {}", agent.name());
    Ok(agent)
}

/// Builds one random ghost per ghost index, each with its own seed derived from `seed`.
pub fn build_ghosts(num_ghosts: usize, seed: u64) -> Vec<Box<dyn Agent<GameState>>> {
    (1..=num_ghosts)
        .map(|index| {
            Box::new(RandomAgent::new(index, seed.wrapping_add(index as u64)))
                as Box<dyn Agent<GameState>>
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = AgentOptions::parse("").unwrap();
        assert_eq!(options, AgentOptions::default());
        assert_eq!(options.depth, 2);
        assert_eq!(options.eval_fn, EvaluationFunction::Score);
    }

    #[test]
    fn test_parse_options() {
        let options: AgentOptions = "depth=3, evalFn=better".parse().unwrap();
        assert_eq!(options.depth, 3);
        assert_eq!(options.eval_fn, EvaluationFunction::Better);

        let options = AgentOptions::parse("evalFn=scoreEvaluationFunction").unwrap();
        assert_eq!(options.depth, DEFAULT_DEPTH);
    }

    #[test]
    fn test_configuration_errors() {
        assert_eq!(
            AgentOptions::parse("depth=0"),
            Err(ConfigError::NonPositiveDepth(0))
        );
        assert_eq!(
            AgentOptions::parse("depth=-2"),
            Err(ConfigError::NonPositiveDepth(-2))
        );
        assert_eq!(
            AgentOptions::parse("depth=two"),
            Err(ConfigError::InvalidDepth("two".to_string()))
        );
        assert_eq!(
            AgentOptions::parse("evalFn=magic"),
            Err(ConfigError::UnknownEvaluationFunction("magic".to_string()))
        );
        assert_eq!(
            AgentOptions::parse("width=3"),
            Err(ConfigError::UnknownOption("width".to_string()))
        );
        assert_eq!(
            AgentOptions::parse("depth"),
            Err(ConfigError::MalformedOption("depth".to_string()))
        );
    }

    #[test]
    fn test_agent_kind_names() {
        assert_eq!(AgentKind::from_name("AlphaBetaAgent"), Ok(AgentKind::AlphaBeta));
        assert_eq!(AgentKind::from_name("expectimax"), Ok(AgentKind::Expectimax));
        assert_eq!(AgentKind::from_name("Reflex"), Ok(AgentKind::Reflex));
        assert!(AgentKind::from_name("GreedyAgent").is_err());
        for kind in AgentKind::ALL {
            assert_eq!(kind.name().parse::<AgentKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_build_agents() {
        let options = AgentOptions::parse("depth=1,evalFn=better").unwrap();

        for kind in AgentKind::ALL {
            let agent = build_pacman(kind, &options, 0).unwrap();
            assert!(!agent.name().is_empty());
        }

        let ghosts = build_ghosts(3, 5);
        assert_eq!(ghosts.len(), 3);
        assert_eq!(ghosts[2].name(), "Random(3)");
    }
}
