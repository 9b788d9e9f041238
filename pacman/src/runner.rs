use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use pacman_agents::Agent;
use pacman_core::{GameState, Outcome, PACMAN};
use std::fmt;

/// Result of one finished (or abandoned) game.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameRecord {
    pub score: f64,
    pub outcome: Outcome,
    /// Completed rounds, one Pacman move each.
    pub moves: u32,
}

impl GameRecord {
    pub fn is_win(&self) -> bool {
        self.outcome == Outcome::Win
    }

    fn label(&self) -> &'static str {
        match self.outcome {
            Outcome::Win => "Win",
            Outcome::Lose => "Loss",
            Outcome::InProgress => "Timeout",
        }
    }
}

/// Plays agents against each other in index order: Pacman first, then every ghost.
pub struct Game {
    state: GameState,
    agents: Vec<Box<dyn Agent<GameState>>>,
    max_moves: u32,
}

impl Game {
    pub fn new(
        start: GameState,
        pacman: Box<dyn Agent<GameState>>,
        ghosts: Vec<Box<dyn Agent<GameState>>>,
        max_moves: u32,
    ) -> Result<Self> {
        let agents: Vec<_> = std::iter::once(pacman).chain(ghosts).collect();
        if agents.len() != start.num_agents() {
            bail!(
                "{} agents supplied for a state with {} agents",
                agents.len(),
                start.num_agents()
            );
        }

        Ok(Self {
            state: start,
            agents,
            max_moves,
        })
    }

    /// Runs the game to the end, calling `on_frame` with the start state and after every move.
    /// Stops after `max_moves` rounds if nobody has won.
    pub fn run<F>(mut self, mut on_frame: F) -> Result<GameRecord>
    where
        F: FnMut(&GameState) -> Result<()>,
    {
        on_frame(&self.state)?;

        let mut moves = 0;
        'game: while moves < self.max_moves {
            for index in 0..self.agents.len() {
                if self.state.is_terminal() {
                    break 'game;
                }

                let agent = &mut self.agents[index];
                let action = agent
                    .get_action(&self.state)
                    .with_context(|| format!("{} returned no action", agent.name()))?;
                if !self.state.legal_actions(index).contains(&action) {
                    bail!("{} chose illegal action {}", agent.name(), action);
                }
                if index == PACMAN {
                    debug!("{} moves {}", agent.name(), action);
                }

                self.state = self.state.generate_successor(index, action);
                on_frame(&self.state)?;
            }
            moves += 1;
        }

        if !self.state.is_terminal() {
            warn!("game stopped after {} moves without a result", moves);
        }

        let record = GameRecord {
            score: self.state.score(),
            outcome: self.state.outcome(),
            moves,
        };
        info!(
            "{} finished: {} with score {} after {} moves",
            self.agents[PACMAN].name(),
            record.label(),
            record.score,
            record.moves
        );
        Ok(record)
    }
}

/// Aggregate over a series of games.
#[derive(Clone, Debug, Default)]
pub struct Summary {
    pub records: Vec<GameRecord>,
}

impl Summary {
    pub fn average_score(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.records.iter().map(|r| r.score).sum::<f64>() / self.records.len() as f64
    }

    pub fn wins(&self) -> usize {
        self.records.iter().filter(|r| r.is_win()).count()
    }

    pub fn win_rate(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.wins() as f64 / self.records.len() as f64
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scores: Vec<String> = self.records.iter().map(|r| r.score.to_string()).collect();
        let record: Vec<&str> = self.records.iter().map(GameRecord::label).collect();

        writeln!(f, "Average Score: {}", self.average_score())?;
        writeln!(f, "Scores:        {}", scores.join(", "))?;
        writeln!(
            f,
            "Win Rate:      {}/{} ({:.2})",
            self.wins(),
            self.records.len(),
            self.win_rate()
        )?;
        write!(f, "Record:        {}", record.join(", "))
    }
}
