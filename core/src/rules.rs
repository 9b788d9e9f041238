use crate::game_state::{
    GameState, Outcome, FOOD_SCORE, GHOST_EATEN_SCORE, LOSE_PENALTY, PACMAN, SCARED_TIME,
    WIN_BONUS,
};
use crate::grid::Grid;
use crate::types::{Direction, Position};

/// Returns every direction that does not lead into a wall, `Stop` included.
pub fn possible_actions(position: Position, walls: &Grid) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&dir| {
            let next = position.step(dir);
            walls.contains(next) && !walls.get(next)
        })
        .collect()
}

/// Pacman may move in any open direction or stop.
pub fn pacman_legal_actions(state: &GameState) -> Vec<Direction> {
    possible_actions(state.pacman_position(), &state.walls)
}

/// Ghosts never stop and only turn around when nothing else is open.
pub fn ghost_legal_actions(state: &GameState, ghost: usize) -> Vec<Direction> {
    let ghost_state = state.agent_state(ghost);
    let mut actions = possible_actions(ghost_state.position, &state.walls);
    actions.retain(|&dir| dir != Direction::Stop);

    let reverse = ghost_state.direction.reverse();
    if actions.len() > 1 {
        actions.retain(|&dir| dir != reverse);
    }

    actions
}

pub(crate) fn apply_pacman_action(state: &mut GameState, action: Direction) {
    let pacman = &mut state.agents[PACMAN];
    pacman.position = pacman.position.step(action);
    if action != Direction::Stop {
        pacman.direction = action;
    }

    let pos = state.pacman_position();
    consume(state, pos);
}

/// Eats whatever lies on the cell Pacman just entered.
fn consume(state: &mut GameState, pos: Position) {
    if state.food.get(pos) {
        state.food.set(pos, false);
        state.score += FOOD_SCORE;

        if state.food.count() == 0 && state.outcome != Outcome::Lose {
            state.score += WIN_BONUS;
            state.outcome = Outcome::Win;
        }
    }

    if let Some(i) = state.capsules.iter().position(|&c| c == pos) {
        state.capsules.remove(i);
        for ghost in state.agents.iter_mut().skip(1) {
            ghost.scared_timer = SCARED_TIME;
        }
    }
}

pub(crate) fn apply_ghost_action(state: &mut GameState, ghost: usize, action: Direction) {
    let ghost_state = &mut state.agents[ghost];
    ghost_state.position = ghost_state.position.step(action);
    ghost_state.direction = action;
}

pub(crate) fn decrement_timer(state: &mut GameState, ghost: usize) {
    let ghost_state = &mut state.agents[ghost];
    ghost_state.scared_timer = ghost_state.scared_timer.saturating_sub(1);
}

/// Resolves collisions caused by the move of `agent`.
pub(crate) fn check_death(state: &mut GameState, agent: usize) {
    let pacman = state.pacman_position();

    if agent == PACMAN {
        for ghost in 1..state.num_agents() {
            if state.agents[ghost].position == pacman {
                collide(state, ghost);
            }
        }
    } else if state.agents[agent].position == pacman {
        collide(state, agent);
    }
}

fn collide(state: &mut GameState, ghost: usize) {
    if state.agents[ghost].is_scared() {
        state.score += GHOST_EATEN_SCORE;
        state.agents[ghost].respawn();
    } else if state.outcome != Outcome::Win {
        state.score -= LOSE_PENALTY;
        state.outcome = Outcome::Lose;
    }
}
