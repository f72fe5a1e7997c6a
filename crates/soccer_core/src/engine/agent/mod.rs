//! Agent identity and per-step state
//!
//! `AgentProfile` is fixed at scene setup (team, role, speeds, spawn).
//! `AgentRuntime` carries what changes every decision step and on every
//! ball contact.

mod decision;

pub use decision::{decide, ActionTuple, AuxEvent, DecisionOutcome, MOVE_AXIS_MAX};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine::config::AgentConfig;
use crate::engine::memory::{MemorySnapshot, TemporalMemory};
use crate::engine::types::{vec3, AgentId, BodyHandle, Role, Team, Vec3};

// ============================================================================
// Speed profile
// ============================================================================

/// Lateral/forward speed multipliers keyed by role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedProfile {
    pub lateral: f32,
    pub forward: f32,
}

impl SpeedProfile {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Goalie => Self { lateral: 1.0, forward: 1.0 },
            Role::Striker => Self { lateral: 0.3, forward: 1.3 },
            Role::Generic => Self { lateral: 0.3, forward: 1.0 },
        }
    }
}

// ============================================================================
// Auxiliary action
// ============================================================================

/// Meaning of the optional fourth action axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuxAction {
    /// 1 = pass attempted, 0/2 = nothing
    Pass,
    /// 1 = turn the heading offset one step negative, 2 = one step positive
    Vision,
}

impl AuxAction {
    pub fn default_for(role: Role) -> Self {
        match role {
            Role::Striker => AuxAction::Pass,
            Role::Goalie | Role::Generic => AuxAction::Vision,
        }
    }

    /// Largest valid code on axis 3.
    pub fn max_code(self) -> u8 {
        match self {
            AuxAction::Pass => 1,
            AuxAction::Vision => 2,
        }
    }
}

// ============================================================================
// AgentProfile (immutable)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct AgentProfile {
    pub id: AgentId,
    pub name: String,
    pub body: BodyHandle,
    pub team: Team,
    pub role: Role,
    pub speed: SpeedProfile,
    pub aux_action: AuxAction,
    pub spawn_position: Vec3,
    /// Goal this agent attacks
    pub opponent_goal: Vec3,
}

impl AgentProfile {
    pub fn from_config(id: AgentId, config: &AgentConfig, opponent_goal: Vec3) -> Self {
        Self {
            id,
            name: config.name.clone(),
            body: config.body,
            team: config.team,
            role: config.role,
            speed: SpeedProfile::for_role(config.role),
            aux_action: config.aux_action.unwrap_or_else(|| AuxAction::default_for(config.role)),
            spawn_position: vec3(config.spawn_position),
            opponent_goal,
        }
    }

    pub fn rotation_sign(&self) -> f32 {
        self.team.rotation_sign()
    }
}

// ============================================================================
// AgentRuntime (mutable)
// ============================================================================

#[derive(Debug, Clone)]
pub struct AgentRuntime {
    /// 0 or 1; set by the forward axis of the latest action
    pub kick_power: f32,
    /// Episode-scoped ball-touch reward weight
    pub ball_touch: f32,
    /// Running vision offset in degrees, wrapped to [-180, 180]
    pub heading_offset: f32,
    pub memory: TemporalMemory<MemorySnapshot>,
    /// Individual reward not yet collected by the trainer
    pending_reward: f32,
    /// Individual reward collected during the current episode
    episode_reward: f32,
}

impl AgentRuntime {
    pub fn new(memory_size: usize) -> Self {
        Self {
            kick_power: 0.0,
            ball_touch: 0.0,
            heading_offset: 0.0,
            memory: TemporalMemory::new(memory_size),
            pending_reward: 0.0,
            episode_reward: 0.0,
        }
    }

    pub fn add_reward(&mut self, reward: f32) {
        self.pending_reward += reward;
        self.episode_reward += reward;
    }

    /// Returns and clears the reward accumulated since the last call.
    pub fn take_reward(&mut self) -> f32 {
        std::mem::take(&mut self.pending_reward)
    }

    pub fn episode_reward(&self) -> f32 {
        self.episode_reward
    }

    /// Episode start: re-read the touch coefficient, drop the last kick.
    pub fn begin_episode(&mut self, ball_touch: f32) {
        self.ball_touch = ball_touch;
        self.kick_power = 0.0;
        self.episode_reward = 0.0;
    }

    pub fn adjust_heading(&mut self, delta_deg: f32) {
        let mut h = self.heading_offset + delta_deg;
        while h > 180.0 {
            h -= 360.0;
        }
        while h < -180.0 {
            h += 360.0;
        }
        self.heading_offset = h;
    }
}

/// One roster entry: identity plus state.
#[derive(Debug, Clone)]
pub struct SoccerAgent {
    pub profile: AgentProfile,
    pub runtime: AgentRuntime,
}

impl SoccerAgent {
    pub fn new(profile: AgentProfile, memory_size: usize) -> Self {
        Self { profile, runtime: AgentRuntime::new(memory_size) }
    }

    pub fn id(&self) -> AgentId {
        self.profile.id
    }
}
