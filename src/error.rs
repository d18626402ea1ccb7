//! Error taxonomy for the simulator.
//!
//! Construction, force evaluation and run setup fail eagerly with one of
//! these; a failing step leaves the previous state untouched.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    /// Non-positive mass, negative radius or non-finite initial state.
    #[error("invalid parameter for body '{body}': {reason}")]
    InvalidParameter { body: String, reason: String },

    /// Two bodies share a centre, so the gravitational force is undefined.
    #[error("degenerate configuration: bodies '{first}' and '{second}' have coincident centres")]
    DegenerateConfiguration { first: String, second: String },

    /// Non-positive step size or horizon, or an unusable scenario.
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    #[error("step {step} produced non-finite state for body '{body}'")]
    NonFiniteState { step: usize, body: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SimError {
    pub(crate) fn invalid(body: &str, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            body: body.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        SimError::ConfigurationError(reason.into())
    }
}
