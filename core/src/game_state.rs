use crate::grid::Grid;
use crate::layout::Layout;
use crate::rules;
use crate::types::{Direction, Position};
use std::fmt;
use std::sync::Arc;

/// Number of ghost moves a capsule keeps the ghosts scared for.
pub const SCARED_TIME: u32 = 40;
/// Score charged for every Pacman move.
pub const TIME_PENALTY: f64 = 1.0;
pub const FOOD_SCORE: f64 = 10.0;
pub const GHOST_EATEN_SCORE: f64 = 200.0;
pub const WIN_BONUS: f64 = 500.0;
pub const LOSE_PENALTY: f64 = 500.0;

/// Index of the Pacman agent. Ghosts use indices `1..num_agents`.
pub const PACMAN: usize = 0;

/// Position, heading and scared timer of one agent.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct AgentState {
    pub start: Position,
    pub position: Position,
    pub direction: Direction,
    pub scared_timer: u32,
}

impl AgentState {
    pub const fn new(start: Position) -> Self {
        Self {
            start,
            position: start,
            direction: Direction::Stop,
            scared_timer: 0,
        }
    }

    pub const fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }

    /// Sends the agent back to its start cell.
    pub fn respawn(&mut self) {
        *self = Self::new(self.start);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Outcome {
    InProgress,
    Win,
    Lose,
}

/// An immutable snapshot of a game. Successors are new values; a state is never modified
/// once handed out.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub(crate) walls: Arc<Grid>,
    pub(crate) food: Grid,
    pub(crate) capsules: Vec<Position>,
    pub(crate) agents: Vec<AgentState>,
    pub(crate) score: f64,
    pub(crate) outcome: Outcome,
}

impl GameState {
    /// Creates the starting state of a layout using at most `num_ghosts` ghosts.
    pub fn new(layout: &Layout, num_ghosts: usize) -> Self {
        let agents = std::iter::once(layout.pacman_start)
            .chain(layout.ghost_starts.iter().copied().take(num_ghosts))
            .map(AgentState::new)
            .collect();

        Self {
            walls: Arc::new(layout.walls.clone()),
            food: layout.food.clone(),
            capsules: layout.capsules.clone(),
            agents,
            score: 0.0,
            outcome: Outcome::InProgress,
        }
    }

    /// Creates the starting state with every ghost of the layout.
    pub fn from_layout(layout: &Layout) -> Self {
        Self::new(layout, layout.ghost_starts.len())
    }

    /// Returns the legal actions of an agent, in canonical direction order.
    /// Terminal states have no legal actions.
    pub fn legal_actions(&self, agent: usize) -> Vec<Direction> {
        if self.is_terminal() {
            return Vec::new();
        }
        if agent == PACMAN {
            rules::pacman_legal_actions(self)
        } else {
            rules::ghost_legal_actions(self, agent)
        }
    }

    /// Returns the state after `agent` takes `action`. The receiver is left untouched.
    pub fn generate_successor(&self, agent: usize, action: Direction) -> Self {
        debug_assert!(
            !self.is_terminal(),
            "cannot generate a successor of a terminal state"
        );
        debug_assert!(
            self.legal_actions(agent).contains(&action),
            "illegal action {action} for agent {agent}"
        );

        let mut next = self.clone();

        if agent == PACMAN {
            rules::apply_pacman_action(&mut next, action);
            next.score -= TIME_PENALTY;
        } else {
            rules::apply_ghost_action(&mut next, agent, action);
            rules::decrement_timer(&mut next, agent);
        }
        rules::check_death(&mut next, agent);

        next
    }

    pub fn is_win(&self) -> bool {
        self.outcome == Outcome::Win
    }

    pub fn is_lose(&self) -> bool {
        self.outcome == Outcome::Lose
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn num_agents(&self) -> usize {
        self.agents.len()
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn agent_state(&self, agent: usize) -> &AgentState {
        &self.agents[agent]
    }

    pub fn pacman_position(&self) -> Position {
        self.agents[PACMAN].position
    }

    pub fn ghost_states(&self) -> &[AgentState] {
        &self.agents[1..]
    }

    pub fn food(&self) -> &Grid {
        &self.food
    }

    pub fn num_food(&self) -> usize {
        self.food.count()
    }

    pub fn capsules(&self) -> &[Position] {
        &self.capsules
    }

    pub fn walls(&self) -> &Grid {
        &self.walls
    }

    /// Cells outside the maze count as walls.
    pub fn has_wall(&self, pos: Position) -> bool {
        !self.walls.contains(pos) || self.walls.get(pos)
    }

    /// Returns the glyph drawn for a cell, ignoring the score line.
    pub fn cell_glyph(&self, pos: Position) -> char {
        if let Some(ghost) = self.ghost_states().iter().find(|g| g.position == pos) {
            return if ghost.is_scared() { 'S' } else { 'G' };
        }
        if pos == self.pacman_position() {
            return match self.agents[PACMAN].direction {
                Direction::North => 'v',
                Direction::South => '^',
                Direction::East => '<',
                Direction::West => '>',
                Direction::Stop => 'P',
            };
        }
        if self.walls.get(pos) {
            '%'
        } else if self.capsules.contains(&pos) {
            'o'
        } else if self.food.get(pos) {
            '.'
        } else {
            ' '
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.walls.height() as i32 {
            for x in 0..self.walls.width() as i32 {
                write!(f, "{}", self.cell_glyph(Position::new(x, y)))?;
            }
            writeln!(f)?;
        }
        write!(f, "Score: {}", self.score)
    }
}
