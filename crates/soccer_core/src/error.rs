use thiserror::Error;

use crate::engine::types::{AgentId, BodyHandle, Team};

/// Scene/config problems detected before an episode may start.
///
/// These are fatal: a controller that hits one never enters `Running`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ball rigid body {0:?} is not known to the physics backend")]
    MissingBallBody(BodyHandle),

    #[error("agent '{name}' rigid body {body:?} is not known to the physics backend")]
    MissingAgentBody { name: String, body: BodyHandle },

    #[error("no goal defended by {0:?}; agents of the other team have no opponent goal")]
    MissingGoal(Team),

    #[error("more than one goal is defended by {0:?}")]
    DuplicateGoal(Team),

    #[error("agent {agent} is already registered with the {team:?} group")]
    DuplicateRegistration { agent: AgentId, team: Team },

    #[error("agent {agent} belongs to {agent_team:?} and cannot join the {group_team:?} group")]
    WrongGroup { agent: AgentId, agent_team: Team, group_team: Team },

    #[error("body {0:?} is used by more than one scene entity")]
    SharedBody(BodyHandle),

    #[error("scene has no agents")]
    EmptyRoster,

    #[error("invalid settings: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("invalid settings: {0}")]
    Bounds(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Observation assembly failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObservationError {
    #[error("opponent goal is not set")]
    MissingOpponentGoal,
}

#[derive(Error, Debug)]
pub enum SoccerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Observation(#[from] ObservationError),

    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),

    #[error("action axis {axis} has code {code}, allowed 0..={max}")]
    InvalidActionCode { axis: usize, code: i32, max: i32 },

    #[error("action tuple has {0} axes, expected 3 or 4")]
    InvalidActionArity(usize),

    #[error("got {found} actions for {expected} agents")]
    ActionCount { expected: usize, found: usize },

    #[error("physics backend lost body {0:?}")]
    BodyUnavailable(BodyHandle),
}

impl SoccerError {
    /// Config errors stop the environment; everything else is a caller bug for one step.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SoccerError::Config(_) | SoccerError::Observation(_))
    }
}

pub type Result<T> = std::result::Result<T, SoccerError>;
