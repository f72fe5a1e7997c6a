//! Scene roster: ball, goals and agents, plus the environment settings.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::EnvConfig;
use crate::engine::agent::AuxAction;
use crate::engine::types::{BodyHandle, Role, Team, ZoneHandle};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BallConfig {
    pub body: BodyHandle,
    /// Kickoff position; respawns are jittered around it
    pub start_position: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GoalConfig {
    /// Trigger volume reported by the physics collaborator
    pub zone: ZoneHandle,
    /// Team whose goal this is; the ball entering it scores for the other team
    pub defended_by: Team,
    /// Reference point used for the relative goal vector
    pub position: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AgentConfig {
    pub name: String,
    pub body: BodyHandle,
    pub team: Team,
    pub role: Role,
    /// Fixed spawn position before the per-episode jitter
    pub spawn_position: [f32; 3],
    /// Overrides the role's default meaning of action axis 3
    #[serde(default)]
    pub aux_action: Option<AuxAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SceneConfig {
    #[serde(default)]
    pub env: EnvConfig,
    /// Training-area origin; observed positions are relative to it
    #[serde(default)]
    pub area_origin: [f32; 3],
    pub ball: BallConfig,
    pub goals: Vec<GoalConfig>,
    pub agents: Vec<AgentConfig>,
    /// Values read back at every episode start (e.g. `ball_touch`)
    #[serde(default)]
    pub reset_parameters: BTreeMap<String, f32>,
}

impl SceneConfig {
    /// Two strikers and two goalies facing each other on a 30m pitch.
    ///
    /// Body handles: ball 0, agents 1-4. Zones: Blue goal 0, Purple goal 1.
    pub fn two_vs_two(env: EnvConfig) -> Self {
        let agent = |name: &str, body: u32, team: Team, role: Role, pos: [f32; 3]| AgentConfig {
            name: name.to_string(),
            body: BodyHandle(body),
            team,
            role,
            spawn_position: pos,
            aux_action: None,
        };
        Self {
            env,
            area_origin: [0.0, 0.0, 0.0],
            ball: BallConfig { body: BodyHandle(0), start_position: [0.0, 0.5, 0.0] },
            goals: vec![
                GoalConfig { zone: ZoneHandle(0), defended_by: Team::Blue, position: [-16.0, 0.5, 0.0] },
                GoalConfig { zone: ZoneHandle(1), defended_by: Team::Purple, position: [16.0, 0.5, 0.0] },
            ],
            agents: vec![
                agent("BlueStriker", 1, Team::Blue, Role::Striker, [-5.0, 0.5, 2.0]),
                agent("BlueGoalie", 2, Team::Blue, Role::Goalie, [-13.0, 0.5, 0.0]),
                agent("PurpleStriker", 3, Team::Purple, Role::Striker, [5.0, 0.5, -2.0]),
                agent("PurpleGoalie", 4, Team::Purple, Role::Goalie, [13.0, 0.5, 0.0]),
            ],
            reset_parameters: BTreeMap::new(),
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let scene: SceneConfig = serde_yaml::from_str(yaml)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let scene: SceneConfig = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Loads a scene from `.yaml`/`.yml` or `.json`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("<none>").to_string())),
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Structural checks that do not need the physics backend.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.env.validate()?;
        self.env.check_finite()?;

        if self.agents.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }

        for team in Team::ALL {
            match self.goals.iter().filter(|g| g.defended_by == team).count() {
                0 => return Err(ConfigError::MissingGoal(team)),
                1 => {}
                _ => return Err(ConfigError::DuplicateGoal(team)),
            }
        }

        let mut bodies = HashSet::new();
        bodies.insert(self.ball.body);
        for agent in &self.agents {
            if !bodies.insert(agent.body) {
                return Err(ConfigError::SharedBody(agent.body));
            }
        }

        let finite = |v: &[f32; 3]| v.iter().all(|c| c.is_finite());
        if !finite(&self.ball.start_position)
            || !finite(&self.area_origin)
            || self.agents.iter().any(|a| !finite(&a.spawn_position))
            || self.goals.iter().any(|g| !finite(&g.position))
        {
            return Err(ConfigError::Bounds("positions must be finite".to_string()));
        }
        Ok(())
    }

    pub fn goal_defended_by(&self, team: Team) -> Option<&GoalConfig> {
        self.goals.iter().find(|g| g.defended_by == team)
    }
}
