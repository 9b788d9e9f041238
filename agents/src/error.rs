//! Errors raised while configuring agents. Searches themselves never fail.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("unknown evaluation function '{0}'")]
    UnknownEvaluationFunction(String),

    #[error("depth must be a positive integer, got {0}")]
    NonPositiveDepth(i64),

    #[error("invalid depth '{0}': expected an integer")]
    InvalidDepth(String),

    #[error("unknown agent option '{0}' (expected depth or evalFn)")]
    UnknownOption(String),

    #[error("malformed agent option '{0}' (expected key=value)")]
    MalformedOption(String),

    #[error("unknown agent '{0}'")]
    UnknownAgent(String),

    #[error("unknown search strategy '{0}' (expected minimax, alphabeta or expectimax)")]
    UnknownStrategy(String),
}
