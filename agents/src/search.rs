//! Depth-limited adversarial search over any [`GameStateOracle`].
//!
//! Agent 0 maximizes. Every other agent is either an adversary that minimizes (Minimax and
//! AlphaBeta) or a chance node that picks uniformly among its legal actions (Expectimax).
//! Agents move in index order and one ply is a full round, so the depth counter only advances
//! after the last agent of a round has moved.
//!
//! A node is a leaf when the ply limit is reached or the state is won or lost; leaves are scored
//! by the evaluation function. The root is the exception: unless it is terminal it always
//! expands the maximizer's actions, so a limit of 0 still compares agent 0's immediate
//! successors.

use crate::error::ConfigError;
use crate::oracle::GameStateOracle;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Index of the maximizing agent.
pub const MAXIMIZER: usize = 0;

/// The three interchangeable search algorithms.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SearchStrategy {
    Minimax,
    AlphaBeta,
    Expectimax,
}

impl SearchStrategy {
    pub const ALL: [SearchStrategy; 3] = [
        SearchStrategy::Minimax,
        SearchStrategy::AlphaBeta,
        SearchStrategy::Expectimax,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            SearchStrategy::Minimax => "minimax",
            SearchStrategy::AlphaBeta => "alphabeta",
            SearchStrategy::Expectimax => "expectimax",
        }
    }

    /// Searches `depth` plies from `state` and returns the maximizer's choice.
    pub fn search<S, F>(self, state: &S, depth: u32, evaluate: F) -> SearchResult<S::Action>
    where
        S: GameStateOracle,
        F: Fn(&S) -> f64,
    {
        match self {
            SearchStrategy::Minimax => minimax(state, depth, evaluate),
            SearchStrategy::AlphaBeta => alpha_beta(state, depth, evaluate),
            SearchStrategy::Expectimax => expectimax(state, depth, evaluate),
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchStrategy {
    type Err = ConfigError;

    /// Case-insensitive, e.g. `alphabeta` or `AlphaBeta`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        SearchStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownStrategy(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<A> {
    /// `None` when the root is terminal or the maximizer has no legal action.
    pub best_action: Option<A>,
    /// Value of the root.
    pub value: f64,
    pub depth: u32,
    /// Number of nodes visited, root and leaves included.
    pub nodes: u64,
}

struct SearchInfo<F> {
    max_depth: u32,
    num_agents: usize,
    nodes: u64,
    evaluate: F,
}

impl<F> SearchInfo<F> {
    fn new<S: GameStateOracle>(state: &S, max_depth: u32, evaluate: F) -> Self {
        Self {
            max_depth,
            num_agents: state.num_agents(),
            nodes: 0,
            evaluate,
        }
    }

    fn is_cutoff<S: GameStateOracle>(&self, state: &S, depth: u32) -> bool {
        depth >= self.max_depth || state.is_win() || state.is_lose()
    }

    /// Returns the agent to move after `agent` and the ply it moves in.
    fn next_turn(&self, agent: usize, depth: u32) -> (usize, u32) {
        if agent + 1 >= self.num_agents {
            (MAXIMIZER, depth + 1)
        } else {
            (agent + 1, depth)
        }
    }

    fn evaluate<S>(&self, state: &S) -> f64
    where
        F: Fn(&S) -> f64,
    {
        (self.evaluate)(state)
    }

    fn finish<A: fmt::Debug>(
        self,
        strategy: SearchStrategy,
        value: f64,
        best_action: Option<A>,
    ) -> SearchResult<A> {
        debug!(
            "{} depth {}: value {} over {} nodes, action {:?}",
            strategy, self.max_depth, value, self.nodes, best_action
        );

        SearchResult {
            best_action,
            value,
            depth: self.max_depth,
            nodes: self.nodes,
        }
    }
}

type ValueFn<S, F> = fn(&S, u32, usize, &mut SearchInfo<F>) -> f64;

/// Expands the maximizer at the root, keeping the first action with the strictly greatest value.
fn search_root<S, F>(
    state: &S,
    info: &mut SearchInfo<F>,
    child_value: ValueFn<S, F>,
) -> (f64, Option<S::Action>)
where
    S: GameStateOracle,
    F: Fn(&S) -> f64,
{
    info.nodes += 1;
    if state.is_terminal() {
        return (info.evaluate(state), None);
    }

    let (next_agent, next_depth) = info.next_turn(MAXIMIZER, 0);
    let mut best_value = f64::NEG_INFINITY;
    let mut best_action = None;

    for action in state.legal_actions(MAXIMIZER) {
        let successor = state.generate_successor(MAXIMIZER, action);
        let value = child_value(&successor, next_depth, next_agent, info);
        if value > best_value {
            best_value = value;
            best_action = Some(action);
        }
    }

    (best_value, best_action)
}

/// Full minimax: the maximizer takes the greatest child value, every adversary the least.
pub fn minimax<S, F>(state: &S, depth: u32, evaluate: F) -> SearchResult<S::Action>
where
    S: GameStateOracle,
    F: Fn(&S) -> f64,
{
    let mut info = SearchInfo::new(state, depth, evaluate);
    let (value, best_action) = search_root(state, &mut info, minimax_value::<S, F>);
    info.finish(SearchStrategy::Minimax, value, best_action)
}

fn minimax_value<S, F>(state: &S, depth: u32, agent: usize, info: &mut SearchInfo<F>) -> f64
where
    S: GameStateOracle,
    F: Fn(&S) -> f64,
{
    info.nodes += 1;
    if info.is_cutoff(state, depth) {
        return info.evaluate(state);
    }

    let (next_agent, next_depth) = info.next_turn(agent, depth);
    let maximizing = agent == MAXIMIZER;
    let mut best = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };

    for action in state.legal_actions(agent) {
        let successor = state.generate_successor(agent, action);
        let value = minimax_value(&successor, next_depth, next_agent, info);
        best = if maximizing {
            best.max(value)
        } else {
            best.min(value)
        };
    }

    best
}

/// Minimax with alpha-beta pruning. Returns the same root value and action as [`minimax`]
/// while visiting at most as many nodes.
///
/// Cutoffs use strict comparisons: a maximizer stops once its value exceeds beta and a
/// minimizer once its value drops below alpha. Ties are explored.
pub fn alpha_beta<S, F>(state: &S, depth: u32, evaluate: F) -> SearchResult<S::Action>
where
    S: GameStateOracle,
    F: Fn(&S) -> f64,
{
    let mut info = SearchInfo::new(state, depth, evaluate);
    let (value, best_action) = alpha_beta_root(state, &mut info);
    info.finish(SearchStrategy::AlphaBeta, value, best_action)
}

fn alpha_beta_root<S, F>(state: &S, info: &mut SearchInfo<F>) -> (f64, Option<S::Action>)
where
    S: GameStateOracle,
    F: Fn(&S) -> f64,
{
    info.nodes += 1;
    if state.is_terminal() {
        return (info.evaluate(state), None);
    }

    let (next_agent, next_depth) = info.next_turn(MAXIMIZER, 0);
    let mut alpha = f64::NEG_INFINITY;
    let beta = f64::INFINITY;
    let mut best_value = f64::NEG_INFINITY;
    let mut best_action = None;

    for action in state.legal_actions(MAXIMIZER) {
        let successor = state.generate_successor(MAXIMIZER, action);
        let value = alpha_beta_value(&successor, next_depth, next_agent, alpha, beta, info);
        if value > best_value {
            best_value = value;
            best_action = Some(action);
        }
        alpha = alpha.max(best_value);
    }

    (best_value, best_action)
}

fn alpha_beta_value<S, F>(
    state: &S,
    depth: u32,
    agent: usize,
    alpha: f64,
    beta: f64,
    info: &mut SearchInfo<F>,
) -> f64
where
    S: GameStateOracle,
    F: Fn(&S) -> f64,
{
    if agent == MAXIMIZER {
        max_value(state, depth, alpha, beta, info)
    } else {
        min_value(state, depth, agent, alpha, beta, info)
    }
}

fn max_value<S, F>(
    state: &S,
    depth: u32,
    mut alpha: f64,
    beta: f64,
    info: &mut SearchInfo<F>,
) -> f64
where
    S: GameStateOracle,
    F: Fn(&S) -> f64,
{
    info.nodes += 1;
    if info.is_cutoff(state, depth) {
        return info.evaluate(state);
    }

    let (next_agent, next_depth) = info.next_turn(MAXIMIZER, depth);
    let mut v = f64::NEG_INFINITY;

    for action in state.legal_actions(MAXIMIZER) {
        let successor = state.generate_successor(MAXIMIZER, action);
        v = v.max(alpha_beta_value(&successor, next_depth, next_agent, alpha, beta, info));
        if v > beta {
            return v;
        }
        alpha = alpha.max(v);
    }

    v
}

fn min_value<S, F>(
    state: &S,
    depth: u32,
    agent: usize,
    alpha: f64,
    mut beta: f64,
    info: &mut SearchInfo<F>,
) -> f64
where
    S: GameStateOracle,
    F: Fn(&S) -> f64,
{
    info.nodes += 1;
    if info.is_cutoff(state, depth) {
        return info.evaluate(state);
    }

    let (next_agent, next_depth) = info.next_turn(agent, depth);
    let mut v = f64::INFINITY;

    for action in state.legal_actions(agent) {
        let successor = state.generate_successor(agent, action);
        v = v.min(alpha_beta_value(&successor, next_depth, next_agent, alpha, beta, info));
        if v < alpha {
            return v;
        }
        beta = beta.min(v);
    }

    v
}

/// Expectimax: the maximizer takes the greatest child value, every other agent is a chance
/// node worth the mean of its children. Always explores the full tree.
pub fn expectimax<S, F>(state: &S, depth: u32, evaluate: F) -> SearchResult<S::Action>
where
    S: GameStateOracle,
    F: Fn(&S) -> f64,
{
    let mut info = SearchInfo::new(state, depth, evaluate);
    let (value, best_action) = search_root(state, &mut info, expectimax_value::<S, F>);
    info.finish(SearchStrategy::Expectimax, value, best_action)
}

fn expectimax_value<S, F>(state: &S, depth: u32, agent: usize, info: &mut SearchInfo<F>) -> f64
where
    S: GameStateOracle,
    F: Fn(&S) -> f64,
{
    info.nodes += 1;
    if info.is_cutoff(state, depth) {
        return info.evaluate(state);
    }

    let (next_agent, next_depth) = info.next_turn(agent, depth);

    if agent == MAXIMIZER {
        let mut best = f64::NEG_INFINITY;
        for action in state.legal_actions(agent) {
            let successor = state.generate_successor(agent, action);
            best = best.max(expectimax_value(&successor, next_depth, next_agent, info));
        }
        return best;
    }

    let actions = state.legal_actions(agent);
    let count = actions.len();
    let mut total = 0.0;
    for action in actions {
        let successor = state.generate_successor(agent, action);
        total += expectimax_value(&successor, next_depth, next_agent, info);
    }

    total / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacman_core::{layouts, perft, GameState, Layout};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::cell::{Cell, RefCell};
    use std::ops::RangeInclusive;

    /// A game tree whose nodes carry their own evaluation.
    #[derive(Debug, Clone)]
    struct Tree {
        value: f64,
        terminal: bool,
        children: Vec<Tree>,
    }

    fn leaf(value: f64) -> Tree {
        Tree {
            value,
            terminal: false,
            children: Vec::new(),
        }
    }

    fn node(value: f64, children: Vec<Tree>) -> Tree {
        Tree {
            value,
            terminal: false,
            children,
        }
    }

    fn leaves(values: &[f64]) -> Tree {
        node(0.0, values.iter().copied().map(leaf).collect())
    }

    fn size(tree: &Tree) -> u64 {
        1 + tree.children.iter().map(size).sum::<u64>()
    }

    /// Owns a tree and records every successor the search asks for.
    struct Fixture {
        tree: Tree,
        num_agents: usize,
        expanded: RefCell<Vec<Vec<usize>>>,
    }

    impl Fixture {
        fn new(tree: Tree, num_agents: usize) -> Self {
            Self {
                tree,
                num_agents,
                expanded: RefCell::new(Vec::new()),
            }
        }

        fn root(&self) -> TreeState<'_> {
            TreeState {
                node: &self.tree,
                path: Vec::new(),
                num_agents: self.num_agents,
                expanded: &self.expanded,
            }
        }

        fn expanded(&self) -> Vec<Vec<usize>> {
            self.expanded.borrow().clone()
        }
    }

    #[derive(Clone)]
    struct TreeState<'a> {
        node: &'a Tree,
        path: Vec<usize>,
        num_agents: usize,
        expanded: &'a RefCell<Vec<Vec<usize>>>,
    }

    impl<'a> GameStateOracle for TreeState<'a> {
        type Action = usize;

        fn legal_actions(&self, _agent: usize) -> Vec<usize> {
            (0..self.node.children.len()).collect()
        }

        fn generate_successor(&self, _agent: usize, action: usize) -> Self {
            let node: &'a Tree = self.node;
            let mut path = self.path.clone();
            path.push(action);
            self.expanded.borrow_mut().push(path.clone());

            TreeState {
                node: &node.children[action],
                path,
                num_agents: self.num_agents,
                expanded: self.expanded,
            }
        }

        fn is_win(&self) -> bool {
            self.node.terminal
        }

        fn is_lose(&self) -> bool {
            false
        }

        fn num_agents(&self) -> usize {
            self.num_agents
        }

        fn score(&self) -> f64 {
            self.node.value
        }
    }

    fn tree_value(state: &TreeState<'_>) -> f64 {
        state.score()
    }

    /// Builds a tree `levels` deep. Interior nodes become terminal with probability `terminal`.
    fn random_tree(
        rng: &mut StdRng,
        levels: u32,
        values: RangeInclusive<i32>,
        terminal: f64,
    ) -> Tree {
        let value = f64::from(rng.gen_range(values.clone()));
        if levels == 0 {
            return leaf(value);
        }
        let branching = rng.gen_range(1..=3);
        let mut tree = node(
            value,
            (0..branching)
                .map(|_| random_tree(rng, levels - 1, values.clone(), terminal))
                .collect(),
        );
        tree.terminal = rng.gen_bool(terminal);
        tree
    }

    #[test]
    fn test_strategy_names_parse() {
        for strategy in SearchStrategy::ALL {
            assert_eq!(strategy.name().parse::<SearchStrategy>(), Ok(strategy));
        }
        assert_eq!("AlphaBeta".parse::<SearchStrategy>(), Ok(SearchStrategy::AlphaBeta));
        assert_eq!(
            "negamax".parse::<SearchStrategy>(),
            Err(ConfigError::UnknownStrategy("negamax".to_string()))
        );
    }

    #[test]
    fn test_minimax_picks_best_worst_case() {
        let fixture = Fixture::new(
            node(0.0, vec![leaves(&[3.0, 9.0]), leaves(&[2.0, 4.0])]),
            2,
        );

        let result = minimax(&fixture.root(), 1, tree_value);

        assert_eq!(result.best_action, Some(0));
        assert_eq!(result.value, 3.0);
        assert_eq!(result.nodes, 7);
    }

    #[test]
    fn test_expectimax_picks_best_average() {
        let fixture = Fixture::new(
            node(0.0, vec![leaves(&[3.0, 9.0]), leaves(&[2.0, 4.0])]),
            2,
        );

        let result = expectimax(&fixture.root(), 1, tree_value);

        assert_eq!(result.best_action, Some(0));
        assert_eq!(result.value, 6.0);
    }

    #[test]
    fn test_expectimax_and_minimax_disagree_on_skewed_leaves() {
        let fixture = Fixture::new(
            node(0.0, vec![leaves(&[3.0, 3.0]), leaves(&[2.0, 10.0])]),
            2,
        );

        let worst_case = minimax(&fixture.root(), 1, tree_value);
        let average = expectimax(&fixture.root(), 1, tree_value);

        assert_eq!(worst_case.best_action, Some(0));
        assert_eq!(worst_case.value, 3.0);
        assert_eq!(average.best_action, Some(1));
        assert_eq!(average.value, 6.0);
    }

    #[test]
    fn test_chance_node_is_arithmetic_mean() {
        let fixture = Fixture::new(node(0.0, vec![leaves(&[1.0, 2.0, 6.0])]), 2);

        let result = expectimax(&fixture.root(), 1, tree_value);

        assert_eq!(result.value, 3.0);
        assert_eq!(result.best_action, Some(0));
    }

    #[test]
    fn test_alpha_beta_skips_pruned_sibling() {
        let fixture = Fixture::new(
            node(0.0, vec![leaves(&[3.0, 9.0]), leaves(&[2.0, 4.0])]),
            2,
        );

        let result = alpha_beta(&fixture.root(), 1, tree_value);

        assert_eq!(result.best_action, Some(0));
        assert_eq!(result.value, 3.0);
        assert_eq!(result.nodes, 6);
        let expanded = fixture.expanded();
        assert!(expanded.contains(&vec![1, 0]));
        assert!(!expanded.contains(&vec![1, 1]));
    }

    #[test]
    fn test_alpha_beta_explores_ties() {
        // The second branch's first leaf equals alpha; strict pruning keeps looking.
        let fixture = Fixture::new(
            node(0.0, vec![leaves(&[3.0, 9.0]), leaves(&[3.0, 1.0])]),
            2,
        );

        let result = alpha_beta(&fixture.root(), 1, tree_value);

        assert!(fixture.expanded().contains(&vec![1, 1]));
        assert_eq!(result.best_action, Some(0));
        assert_eq!(result.value, 3.0);
    }

    #[test]
    fn test_first_best_action_wins_ties() {
        let fixture = Fixture::new(
            node(0.0, vec![leaves(&[1.0]), leaves(&[5.0]), leaves(&[5.0])]),
            2,
        );

        for strategy in SearchStrategy::ALL {
            let result = strategy.search(&fixture.root(), 1, tree_value);
            assert_eq!(result.best_action, Some(1), "{strategy}");
        }
    }

    #[test]
    fn test_depth_zero_expands_root_only() {
        for strategy in SearchStrategy::ALL {
            let fixture = Fixture::new(
                node(
                    0.0,
                    vec![node(5.0, vec![leaf(100.0)]), node(7.0, vec![leaf(-100.0)])],
                ),
                2,
            );

            let result = strategy.search(&fixture.root(), 0, tree_value);

            assert_eq!(result.best_action, Some(1), "{strategy}");
            assert_eq!(result.value, 7.0, "{strategy}");
            assert_eq!(result.nodes, 3, "{strategy}");
            assert_eq!(fixture.expanded(), vec![vec![0], vec![1]], "{strategy}");
        }
    }

    #[test]
    fn test_terminal_root_is_evaluated_immediately() {
        for strategy in SearchStrategy::ALL {
            let mut root = leaves(&[1.0, 2.0]);
            root.value = 42.0;
            root.terminal = true;
            let fixture = Fixture::new(root, 2);

            let result = strategy.search(&fixture.root(), 3, tree_value);

            assert_eq!(result.best_action, None, "{strategy}");
            assert_eq!(result.value, 42.0, "{strategy}");
            assert_eq!(result.nodes, 1, "{strategy}");
            assert!(fixture.expanded().is_empty(), "{strategy}");
        }
    }

    #[test]
    fn test_terminal_node_inside_tree_is_a_leaf() {
        for strategy in SearchStrategy::ALL {
            let mut won = leaves(&[-1000.0, -1000.0]);
            won.value = 50.0;
            won.terminal = true;
            let fixture = Fixture::new(node(0.0, vec![won, leaves(&[10.0, 20.0])]), 2);

            let result = strategy.search(&fixture.root(), 1, tree_value);

            assert_eq!(result.best_action, Some(0), "{strategy}");
            assert_eq!(result.value, 50.0, "{strategy}");
            assert!(!fixture.expanded().contains(&vec![0, 0]), "{strategy}");
        }
    }

    #[test]
    fn test_ply_advances_after_last_adversary() {
        // Adversary nodes carry a decoy value that only an early cutoff would return.
        let fixture = Fixture::new(
            node(
                0.0,
                vec![node(
                    1000.0,
                    vec![
                        node(1000.0, vec![leaf(5.0), leaf(8.0)]),
                        node(1000.0, vec![leaf(4.0), leaf(9.0)]),
                    ],
                )],
            ),
            3,
        );

        assert_eq!(minimax(&fixture.root(), 1, tree_value).value, 4.0);
        assert_eq!(alpha_beta(&fixture.root(), 1, tree_value).value, 4.0);
        assert_eq!(expectimax(&fixture.root(), 1, tree_value).value, 6.5);
    }

    #[test]
    fn test_single_agent_game_advances_every_move() {
        let fixture = Fixture::new(
            node(0.0, vec![leaves(&[1.0, 4.0]), leaves(&[3.0, 2.0])]),
            1,
        );

        for strategy in SearchStrategy::ALL {
            let result = strategy.search(&fixture.root(), 2, tree_value);
            assert_eq!(result.best_action, Some(0), "{strategy}");
            assert_eq!(result.value, 4.0, "{strategy}");
        }
        assert_eq!(minimax(&fixture.root(), 1, tree_value).value, 0.0);
    }

    #[test]
    fn test_alpha_beta_matches_minimax_on_random_trees() {
        let mut pruned_total = 0;
        let mut full_total = 0;

        for seed in 0..300 {
            let mut rng = StdRng::seed_from_u64(seed);
            let num_agents = rng.gen_range(2..=3);
            let depth = if num_agents == 2 { rng.gen_range(1..=3) } else { rng.gen_range(1..=2) };
            let tree = random_tree(&mut rng, depth * num_agents as u32, -20..=20, 0.0);
            let fixture = Fixture::new(tree, num_agents);

            let full = minimax(&fixture.root(), depth, tree_value);
            let pruned = alpha_beta(&fixture.root(), depth, tree_value);
            let average = expectimax(&fixture.root(), depth, tree_value);

            assert_eq!(pruned.value, full.value, "seed {seed}");
            assert_eq!(pruned.best_action, full.best_action, "seed {seed}");
            assert!(pruned.nodes <= full.nodes, "seed {seed}");
            assert_eq!(full.nodes, size(&fixture.tree), "seed {seed}");
            assert_eq!(average.nodes, full.nodes, "seed {seed}");

            pruned_total += pruned.nodes;
            full_total += full.nodes;
        }

        assert!(pruned_total < full_total);
    }

    #[test]
    fn test_alpha_beta_matches_minimax_with_ties_and_terminals() {
        for seed in 0..1000 {
            let mut rng = StdRng::seed_from_u64(seed);
            let num_agents = rng.gen_range(1..=4);
            let depth = rng.gen_range(0..=2);
            let levels = (depth * num_agents as u32).max(1);
            let tree = random_tree(&mut rng, levels, 0..=2, 0.15);
            let fixture = Fixture::new(tree, num_agents);

            let full = minimax(&fixture.root(), depth, tree_value);
            let pruned = alpha_beta(&fixture.root(), depth, tree_value);
            let average = expectimax(&fixture.root(), depth, tree_value);

            assert_eq!(pruned.value, full.value, "seed {seed}");
            assert_eq!(pruned.best_action, full.best_action, "seed {seed}");
            assert!(pruned.nodes <= full.nodes, "seed {seed}");
            assert_eq!(average.nodes, full.nodes, "seed {seed}");
        }
    }

    #[test]
    fn test_alpha_beta_maximizer_explores_ties_with_beta() {
        // The adversary caps the second maximizer node at 5 (beta). Its first grandchild reaches
        // exactly 5, so strict pruning still looks at the second one.
        let fixture = Fixture::new(
            node(
                0.0,
                vec![node(
                    0.0,
                    vec![
                        node(0.0, vec![leaves(&[5.0])]),
                        node(0.0, vec![leaves(&[5.0]), leaves(&[7.0])]),
                    ],
                )],
            ),
            2,
        );

        let result = alpha_beta(&fixture.root(), 2, tree_value);

        assert_eq!(result.value, 5.0);
        assert_eq!(result.best_action, Some(0));
        assert_eq!(result.nodes, 10);
        assert!(fixture.expanded().contains(&vec![0, 1, 1]));
        assert_eq!(minimax(&fixture.root(), 2, tree_value).value, 5.0);
    }

    fn minimax_classic() -> GameState {
        GameState::from_layout(&Layout::parse(layouts::MINIMAX_CLASSIC).unwrap())
    }

    #[test]
    fn test_strategies_agree_on_pacman_layout() {
        let state = minimax_classic();

        for depth in 1..=3 {
            let full = minimax(&state, depth, GameState::score);
            let pruned = alpha_beta(&state, depth, GameState::score);
            let average = expectimax(&state, depth, GameState::score);

            assert_eq!(pruned.value, full.value, "depth {depth}");
            assert_eq!(pruned.best_action, full.best_action, "depth {depth}");
            assert!(pruned.nodes <= full.nodes, "depth {depth}");
            assert!(average.value >= full.value, "depth {depth}");

            let legal = state.legal_actions(MAXIMIZER);
            for result in [full, pruned, average] {
                assert!(legal.contains(&result.best_action.unwrap()));
            }
        }
    }

    #[test]
    fn test_minimax_evaluates_every_census_leaf() {
        let state = minimax_classic();

        for depth in 1..=2 {
            let calls = Cell::new(0u64);
            minimax(&state, depth, |s: &GameState| {
                calls.set(calls.get() + 1);
                s.score()
            });
            assert_eq!(calls.get(), perft(&state, depth), "depth {depth}");
        }
    }
}
