//! TeamGroup - shared reward and synchronized episode end for one team
//!
//! Rewards accumulate until the episode ends (terminal) or is interrupted
//! (step budget). Either transition emits a `GroupEpisodeSummary` for the
//! trainer and starts the next episode's accumulator from zero.

use serde::{Deserialize, Serialize};

use crate::engine::types::{AgentId, Team};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOutcome {
    /// Absorbing end: a goal was scored
    Terminal,
    /// Cut short by the step budget; no terminal reward
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupEpisodeSummary {
    pub team: Team,
    pub reward: f32,
    pub outcome: GroupOutcome,
    pub steps: u32,
}

#[derive(Debug, Clone)]
pub struct TeamGroup {
    team: Team,
    members: Vec<AgentId>,
    reward: f32,
    summaries: Vec<GroupEpisodeSummary>,
}

impl TeamGroup {
    pub fn new(team: Team) -> Self {
        Self { team, members: Vec::new(), reward: 0.0, summaries: Vec::new() }
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn members(&self) -> &[AgentId] {
        &self.members
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.members.contains(&agent)
    }

    /// Adds an agent of this team. Membership is fixed afterwards.
    pub fn register(&mut self, agent: AgentId, agent_team: Team) -> Result<(), ConfigError> {
        if agent_team != self.team {
            return Err(ConfigError::WrongGroup { agent, agent_team, group_team: self.team });
        }
        if self.contains(agent) {
            return Err(ConfigError::DuplicateRegistration { agent, team: self.team });
        }
        self.members.push(agent);
        Ok(())
    }

    pub fn add_group_reward(&mut self, reward: f32) {
        self.reward += reward;
    }

    /// Reward accumulated in the running episode.
    pub fn group_reward(&self) -> f32 {
        self.reward
    }

    pub fn end_group_episode(&mut self, steps: u32) -> GroupEpisodeSummary {
        self.close(GroupOutcome::Terminal, steps)
    }

    pub fn group_episode_interrupted(&mut self, steps: u32) -> GroupEpisodeSummary {
        self.close(GroupOutcome::Interrupted, steps)
    }

    fn close(&mut self, outcome: GroupOutcome, steps: u32) -> GroupEpisodeSummary {
        let summary = GroupEpisodeSummary { team: self.team, reward: self.reward, outcome, steps };
        self.reward = 0.0;
        self.summaries.push(summary);
        summary
    }

    /// Finished episodes not yet collected by the trainer, oldest first.
    pub fn drain_summaries(&mut self) -> Vec<GroupEpisodeSummary> {
        std::mem::take(&mut self.summaries)
    }

    pub fn last_summary(&self) -> Option<&GroupEpisodeSummary> {
        self.summaries.last()
    }
}
