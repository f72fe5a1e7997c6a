//! EpisodeMetrics - per-episode statistics
//!
//! ## 메트릭 구성
//!
//! - 기본 통계: steps, group reward per team, score
//! - 종료 사유: goal or step budget
//! - 접촉 통계: ball touches and pass attempts per team

use serde::{Deserialize, Serialize};

use crate::engine::types::Team;

// ============================================================================
// TerminationReason
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// 진행 중
    #[default]
    InProgress,
    /// 골 득점 - terminal for both groups
    GoalScored,
    /// Step budget exhausted - interrupted, no terminal reward
    MaxStepsReached,
}

impl TerminationReason {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TerminationReason::InProgress)
    }

    /// True only when the episode ended on an absorbing outcome.
    pub fn is_goal(&self) -> bool {
        matches!(self, TerminationReason::GoalScored)
    }
}

// ============================================================================
// EpisodeMetrics
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeMetrics {
    pub steps: u32,
    /// Group reward added per team, indexed by `Team::index`
    pub group_reward: [f32; 2],
    pub score: [u32; 2],
    pub termination_reason: TerminationReason,
    pub ball_touches: [u32; 2],
    pub pass_attempts: [u32; 2],
    /// Possession seconds per team, filled when the episode ends
    pub possession_seconds: [f64; 2],
    pub possession_changes: u32,
}

impl EpisodeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_step(&mut self) {
        self.steps += 1;
    }

    pub fn record_group_reward(&mut self, team: Team, reward: f32) {
        self.group_reward[team.index()] += reward;
    }

    pub fn record_goal(&mut self, scoring: Team) {
        self.score[scoring.index()] += 1;
    }

    pub fn record_touch(&mut self, team: Team) {
        self.ball_touches[team.index()] += 1;
    }

    pub fn record_pass_attempt(&mut self, team: Team) {
        self.pass_attempts[team.index()] += 1;
    }

    pub fn set_termination(&mut self, reason: TerminationReason) {
        self.termination_reason = reason;
    }

    pub fn winner(&self) -> Option<Team> {
        use std::cmp::Ordering;
        match self.score[0].cmp(&self.score[1]) {
            Ordering::Greater => Some(Team::Blue),
            Ordering::Less => Some(Team::Purple),
            Ordering::Equal => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
