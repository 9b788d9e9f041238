use crate::config::AgentOptions;
use crate::error::ConfigError;
use crate::evaluation::Evaluator;
use crate::oracle::{GameStateOracle, HeuristicFeatures};
use crate::search::{SearchResult, SearchStrategy};
use crate::Agent;
use log::debug;

/// Pacman driven by one of the adversarial search strategies.
///
/// Every call to [`Agent::get_action`] runs a fresh search; nothing carries over between calls
/// apart from the statistics of the last search.
pub struct SearchAgent<S: GameStateOracle> {
    name: String,
    strategy: SearchStrategy,
    depth: u32,
    evaluate: Evaluator<S>,
    last_result: Option<SearchResult<S::Action>>,
}

impl<S: GameStateOracle> SearchAgent<S> {
    /// Creates an agent searching `depth` plies. Depth must be positive.
    pub fn new(
        strategy: SearchStrategy,
        depth: u32,
        evaluate: Evaluator<S>,
    ) -> Result<Self, ConfigError> {
        if depth == 0 {
            return Err(ConfigError::NonPositiveDepth(0));
        }

        Ok(SearchAgent {
            name: format!("{}(depth={})", strategy, depth),
            strategy,
            depth,
            evaluate,
            last_result: None,
        })
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Statistics of the most recent search, if any.
    pub fn last_result(&self) -> Option<&SearchResult<S::Action>> {
        self.last_result.as_ref()
    }

    pub fn search(&self, state: &S) -> SearchResult<S::Action> {
        self.strategy.search(state, self.depth, self.evaluate)
    }
}

impl<S: HeuristicFeatures> SearchAgent<S> {
    /// Creates an agent from parsed options, resolving the evaluation function by name.
    pub fn from_options(
        strategy: SearchStrategy,
        options: &AgentOptions,
    ) -> Result<Self, ConfigError> {
        let mut agent = Self::new(strategy, options.depth, options.eval_fn.resolve())?;
        agent.name = format!(
            "{}(depth={}, evalFn={})",
            strategy, options.depth, options.eval_fn
        );
        Ok(agent)
    }
}

impl<S: GameStateOracle> Agent<S> for SearchAgent<S> {
    fn get_action(&mut self, state: &S) -> Option<S::Action> {
        let result = self.search(state);
        debug!(
            "{} chose {:?} (value {}, {} nodes)",
            self.name, result.best_action, result.value, result.nodes
        );

        let action = result.best_action;
        self.last_result = Some(result);
        action
    }

    fn name(&self) -> &str {
        &self.name
    }
}
