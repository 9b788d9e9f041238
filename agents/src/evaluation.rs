use crate::error::ConfigError;
use crate::oracle::{GameStateOracle, HeuristicFeatures};
use pacman_core::{Position, PACMAN};
use std::fmt;
use std::str::FromStr;

/// A state evaluation resolved once at configuration time. Higher is better for Pacman.
pub type Evaluator<S> = fn(&S) -> f64;

/// Ghosts closer than this are a threat.
const DANGER_DISTANCE: f64 = 2.0;
const GHOST_PENALTY: f64 = 100.0;
const SCARED_GHOST_BONUS: f64 = 100.0;
const CAPSULE_WEIGHT: f64 = 10.0;

const REFLEX_GHOST_PENALTY: f64 = 10.0;
const REFLEX_SCARED_BONUS: f64 = 10.0;

/// The evaluation functions agents can be configured with.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum EvaluationFunction {
    /// The game score.
    #[default]
    Score,
    /// Score adjusted by distances to food, ghosts and capsules.
    Better,
}

impl EvaluationFunction {
    pub const ALL: [EvaluationFunction; 2] = [EvaluationFunction::Score, EvaluationFunction::Better];

    pub const fn name(self) -> &'static str {
        match self {
            EvaluationFunction::Score => "scoreEvaluationFunction",
            EvaluationFunction::Better => "betterEvaluationFunction",
        }
    }

    /// Resolves a name. Both the full names and the short forms `score` and `better` are accepted.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name.trim() {
            "scoreEvaluationFunction" | "score" => Ok(EvaluationFunction::Score),
            "betterEvaluationFunction" | "better" => Ok(EvaluationFunction::Better),
            other => Err(ConfigError::UnknownEvaluationFunction(other.to_string())),
        }
    }

    pub fn resolve<S: HeuristicFeatures>(self) -> Evaluator<S> {
        match self {
            EvaluationFunction::Score => score_evaluation::<S>,
            EvaluationFunction::Better => better_evaluation::<S>,
        }
    }
}

impl fmt::Display for EvaluationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EvaluationFunction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

pub fn score_evaluation<S: GameStateOracle>(state: &S) -> f64 {
    state.score()
}

/// Distance to the nearest target, or infinity when there is none.
fn closest_distance(from: Position, targets: impl IntoIterator<Item = Position>) -> f64 {
    targets
        .into_iter()
        .map(|target| f64::from(from.manhattan_distance(target)))
        .fold(f64::INFINITY, f64::min)
}

/// `weight / distance`, or zero when the distance is infinite or zero.
fn inverse(weight: f64, distance: f64) -> f64 {
    if distance.is_finite() && distance > 0.0 {
        weight / distance
    } else {
        0.0
    }
}

/// Scores a state by the game score adjusted for food, ghost and capsule distances.
pub fn better_evaluation<S: HeuristicFeatures>(state: &S) -> f64 {
    let pacman = state.pacman_position();
    let ghosts = state.ghost_states();

    let closest_food = closest_distance(pacman, state.food_positions());
    let closest_ghost = closest_distance(pacman, ghosts.iter().map(|g| g.position));
    let closest_capsule = closest_distance(pacman, state.capsule_positions().iter().copied());
    let any_scared = ghosts.iter().any(|g| g.is_scared());

    let mut value = state.score();

    if closest_ghost < DANGER_DISTANCE && !any_scared {
        value -= GHOST_PENALTY;
    } else if closest_ghost > DANGER_DISTANCE && closest_food.is_finite() {
        value += inverse(1.0, closest_food);
    } else if any_scared {
        value += SCARED_GHOST_BONUS;
    }

    value + inverse(CAPSULE_WEIGHT, closest_capsule)
}

/// Scores Pacman taking `action` from `state` by looking at the resulting state only.
pub fn reflex_evaluation<S: HeuristicFeatures>(state: &S, action: S::Action) -> f64 {
    let successor = state.generate_successor(PACMAN, action);
    let food = successor.food_positions();
    if food.is_empty() {
        return successor.score();
    }

    let pacman = successor.pacman_position();
    let ghosts = successor.ghost_states();
    let closest_food = closest_distance(pacman, food);
    let closest_ghost = closest_distance(pacman, ghosts.iter().map(|g| g.position));
    let any_scared = ghosts.iter().any(|g| g.is_scared());

    let mut value = successor.score();

    if closest_ghost < DANGER_DISTANCE && !any_scared {
        value -= REFLEX_GHOST_PENALTY;
    } else if closest_ghost > DANGER_DISTANCE {
        value += inverse(1.0, closest_food);
    } else if any_scared {
        value += REFLEX_SCARED_BONUS;
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacman_core::{Direction, GameState, Layout};

    fn state(text: &str) -> GameState {
        GameState::from_layout(&Layout::parse(text).unwrap())
    }

    #[test]
    fn test_names_resolve() {
        assert_eq!(
            EvaluationFunction::from_name("scoreEvaluationFunction"),
            Ok(EvaluationFunction::Score)
        );
        assert_eq!("better".parse::<EvaluationFunction>(), Ok(EvaluationFunction::Better));
        assert_eq!(
            EvaluationFunction::from_name("bestEvaluationFunction"),
            Err(ConfigError::UnknownEvaluationFunction(
                "bestEvaluationFunction".to_string()
            ))
        );
        for eval_fn in EvaluationFunction::ALL {
            assert_eq!(EvaluationFunction::from_name(eval_fn.name()), Ok(eval_fn));
        }
    }

    #[test]
    fn test_score_evaluation_is_raw_score() {
        let start = state("%%%%%\n%P..%\n%%%%%");
        let next = start.generate_successor(PACMAN, Direction::East);
        let evaluate = EvaluationFunction::Score.resolve::<GameState>();
        assert_eq!(evaluate(&next), next.score());
    }

    #[test]
    fn test_better_rewards_nearby_food() {
        let near = state("%%%%%%%%\n%P.   .%\n%%%%%%%%");
        let far = state("%%%%%%%%\n%P    .%\n%%%%%%%%");

        assert_eq!(better_evaluation(&near), 1.0);
        assert_eq!(better_evaluation(&far), 0.2);
    }

    #[test]
    fn test_better_penalizes_adjacent_ghost() {
        let threatened = state("%%%%%%\n%PG .%\n%%%%%%");
        assert_eq!(better_evaluation(&threatened), -GHOST_PENALTY);
    }

    #[test]
    fn test_better_rewards_scared_ghosts_and_capsules() {
        let start = state("%%%%%%%\n%Po G.%\n%   o %\n%%%%%%%");
        let powered = start.generate_successor(PACMAN, Direction::East);

        // Ghost at distance 2 and scared, one capsule left at distance 3.
        let expected = powered.score() + SCARED_GHOST_BONUS + CAPSULE_WEIGHT / 3.0;
        assert_eq!(better_evaluation(&powered), expected);
    }

    #[test]
    fn test_better_handles_missing_items() {
        // No ghosts and no capsules: only the food term remains.
        let lonely = state("%%%%%\n%P .%\n%%%%%");
        assert_eq!(better_evaluation(&lonely), 0.5);

        let won = lonely
            .generate_successor(PACMAN, Direction::East)
            .generate_successor(PACMAN, Direction::East);
        assert!(won.is_win());
        assert_eq!(better_evaluation(&won), won.score());
    }

    #[test]
    fn test_reflex_evaluation_prefers_food() {
        let start = state("%%%%%%%%\n%.P    %\n%%%%%%%%");
        let west = reflex_evaluation(&start, Direction::West);
        let east = reflex_evaluation(&start, Direction::East);
        assert!(west > east);
    }
}
